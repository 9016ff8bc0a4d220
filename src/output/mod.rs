//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_authority, print_board, print_countdown, print_keyboard, print_score,
    print_server_stats, print_share, print_stats, print_summary,
};
