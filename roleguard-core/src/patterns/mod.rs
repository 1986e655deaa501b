//! Pattern matching module
//!
//! Used by the plugin visibility filter to match configured blocklist
//! patterns against plugin paths.

pub mod matcher;

pub use matcher::{MatchResult, PatternMatcher};
