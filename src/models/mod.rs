//! Display models for CLI output
//!
//! This module provides shared display model abstractions for converting
//! accounts and session items into CLI-friendly display formats.

pub mod display;

pub use display::{AccountDisplay, ItemDisplay};
