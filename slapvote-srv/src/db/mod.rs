//! Database operations for slapvote-srv

pub mod songs;
pub mod submissions;
