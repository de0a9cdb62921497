//! Shared numeric helpers and logging utilities

pub mod logging;
pub mod math;

pub use math::{clamp01, combine_access_barriers, round_count, safe_div, split_rounded};
