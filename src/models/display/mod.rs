//! Display model implementations for table and JSON output
//!
//! Display models transform API and session types into CLI-friendly formats
//! with appropriate column names and serialization.

mod account;
mod common;
mod item;

pub use account::AccountDisplay;
pub use common::truncate_string;
pub use item::{ItemDisplay, describe_action};
