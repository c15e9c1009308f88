//! Cache engine.
//!
//! Holds the set-associative cache controller together with its set and line storage
//! and the replacement policies that drive victim selection.

/// Set-associative cache (controller, sets, lines, replacement policies).
pub mod cache;
