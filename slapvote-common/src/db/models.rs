//! Database models

use crate::classify::{approval_percentage, classify, Verdict};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A song record with aggregated vote counters
///
/// Identity is the (title, artist) pair. Counters are only ever mutated by
/// server-side atomic increments; the verdict is derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Song {
    pub guid: String,
    pub title: String,
    pub artist: String,
    pub cover_image: Option<String>,
    pub link: Option<String>,
    pub likes: i64,
    pub dislikes: i64,
    pub total_votes: i64,
    /// Creation time, epoch milliseconds
    pub timestamp: i64,
}

impl Song {
    /// Approval percentage derived from the stored counters
    pub fn percentage(&self) -> f64 {
        approval_percentage(self.likes, self.total_votes)
    }

    /// Derived verdict for this song
    pub fn verdict(&self) -> Verdict {
        classify(self.likes, self.total_votes)
    }
}

/// A user-proposed candidate submission awaiting votes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Submission {
    pub guid: String,
    pub title: String,
    pub artist: String,
    pub cover_image: Option<String>,
    pub link: Option<String>,
    pub release_date: Option<String>,
    /// Submission time, epoch milliseconds; drives the retention sweep
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(likes: i64, total_votes: i64) -> Song {
        Song {
            guid: "test".to_string(),
            title: "X".to_string(),
            artist: "Y".to_string(),
            cover_image: None,
            link: None,
            likes,
            dislikes: total_votes - likes,
            total_votes,
            timestamp: 0,
        }
    }

    #[test]
    fn test_derived_fields_follow_counters() {
        let s = song(80, 100);
        assert_eq!(s.percentage(), 80.0);
        assert_eq!(s.verdict(), Verdict::Slap);

        let s = song(40, 100);
        assert_eq!(s.percentage(), 40.0);
        assert_eq!(s.verdict(), Verdict::Scrap);

        let s = song(60, 100);
        assert_eq!(s.percentage(), 60.0);
        assert_eq!(s.verdict(), Verdict::Unclassified);
    }
}
