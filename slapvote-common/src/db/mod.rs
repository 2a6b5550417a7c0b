//! Database layer: schema initialization and row models

pub mod init;
pub mod models;

pub use init::init_database;
pub use models::{Song, Submission};
