//! Vote classification rules
//!
//! A song becomes a certified "slap" or "scrap" once its vote volume and
//! approval percentage cross fixed thresholds. The verdict is always derived
//! from the stored counters at read time; it is never persisted.

use serde::{Deserialize, Serialize};

/// Minimum total votes before a song can be certified either way
pub const VOTE_FLOOR: i64 = 100;

/// Approval percentage at or above which a song is a certified slap
pub const SLAP_THRESHOLD: f64 = 75.0;

/// Approval percentage at or below which a song is a certified scrap
pub const SCRAP_THRESHOLD: f64 = 50.0;

/// Retention window for candidate submissions: 7 days in milliseconds
pub const SUBMISSION_MAX_AGE_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Derived verdict for a song's aggregated votes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Certified slap: percentage >= 75 with at least 100 votes
    Slap,
    /// Certified scrap: percentage <= 50 with at least 100 votes
    Scrap,
    /// Below the vote floor, or between the thresholds
    Unclassified,
}

/// Approval percentage from stored counters
///
/// Returns 0.0 when no votes have been recorded (avoids division by zero).
pub fn approval_percentage(likes: i64, total_votes: i64) -> f64 {
    if total_votes == 0 {
        0.0
    } else {
        (likes as f64 / total_votes as f64) * 100.0
    }
}

/// Classify a song from its stored counters
///
/// The closed boundaries (>= 75, <= 50) are intentional and must not be
/// tightened: a song at exactly 75% is a slap, one at exactly 50% a scrap.
/// Dislike counts play no part in the verdict.
pub fn classify(likes: i64, total_votes: i64) -> Verdict {
    if total_votes < VOTE_FLOOR {
        return Verdict::Unclassified;
    }

    let percentage = approval_percentage(likes, total_votes);
    if percentage >= SLAP_THRESHOLD {
        Verdict::Slap
    } else if percentage <= SCRAP_THRESHOLD {
        Verdict::Scrap
    } else {
        Verdict::Unclassified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_zero_votes() {
        assert_eq!(approval_percentage(0, 0), 0.0);
    }

    #[test]
    fn test_percentage_basic() {
        assert_eq!(approval_percentage(80, 100), 80.0);
        assert_eq!(approval_percentage(1, 4), 25.0);
    }

    #[test]
    fn test_below_vote_floor_never_certified() {
        // Regardless of percentage, fewer than 100 votes means no verdict
        assert_eq!(classify(99, 99), Verdict::Unclassified);
        assert_eq!(classify(0, 99), Verdict::Unclassified);
        assert_eq!(classify(1, 1), Verdict::Unclassified);
        assert_eq!(classify(0, 0), Verdict::Unclassified);
    }

    #[test]
    fn test_slap_at_and_above_threshold() {
        assert_eq!(classify(75, 100), Verdict::Slap); // exactly 75%
        assert_eq!(classify(80, 100), Verdict::Slap);
        assert_eq!(classify(100, 100), Verdict::Slap);
    }

    #[test]
    fn test_scrap_at_and_below_threshold() {
        assert_eq!(classify(50, 100), Verdict::Scrap); // exactly 50%
        assert_eq!(classify(40, 100), Verdict::Scrap);
        assert_eq!(classify(0, 100), Verdict::Scrap);
    }

    #[test]
    fn test_unclassified_between_thresholds() {
        assert_eq!(classify(60, 100), Verdict::Unclassified);
        assert_eq!(classify(74, 100), Verdict::Unclassified);
        assert_eq!(classify(51, 100), Verdict::Unclassified);
    }

    #[test]
    fn test_outcomes_exhaustive_at_vote_floor() {
        // At exactly the vote floor every like count maps to exactly one verdict
        for likes in 0..=100 {
            let verdict = classify(likes, 100);
            let pct = approval_percentage(likes, 100);
            if pct >= SLAP_THRESHOLD {
                assert_eq!(verdict, Verdict::Slap, "likes={}", likes);
            } else if pct <= SCRAP_THRESHOLD {
                assert_eq!(verdict, Verdict::Scrap, "likes={}", likes);
            } else {
                assert_eq!(verdict, Verdict::Unclassified, "likes={}", likes);
            }
        }
    }

    #[test]
    fn test_verdict_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Verdict::Slap).unwrap(), "\"slap\"");
        assert_eq!(serde_json::to_string(&Verdict::Scrap).unwrap(), "\"scrap\"");
        assert_eq!(
            serde_json::to_string(&Verdict::Unclassified).unwrap(),
            "\"unclassified\""
        );
    }

    #[test]
    fn test_submission_max_age_is_one_week() {
        assert_eq!(SUBMISSION_MAX_AGE_MS, 604_800_000);
    }
}
