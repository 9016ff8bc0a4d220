//! Command implementations

pub mod daily;
pub mod score;
pub mod simple;
pub mod stats;

pub use daily::run_daily;
pub use score::{ScoreResult, score_words};
pub use simple::{RoundEnd, play_round, run_simple};
pub use stats::{StatsReport, collect_stats};
