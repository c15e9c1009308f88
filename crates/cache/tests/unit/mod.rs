//! # Unit Components
//!
//! Tests for each part of the cache simulator, organized like the crate's modules.
