//! Statistics, memoization and dashboard assembly.

pub mod aggregate;
pub mod basic_stats;
pub mod dashboard;
pub mod fingerprint;
pub mod stats_cache;
pub mod user_stats;
