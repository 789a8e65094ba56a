//! Common utilities for the flexlay layout engine.
//!
//! This crate provides shared infrastructure used by the engine and its tools:
//! - **Warning System** - deduplicated warnings for approximated layout features

pub mod warning;
