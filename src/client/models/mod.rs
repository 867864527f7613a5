//! 2FAuth API data models

mod account;
mod otp;

pub use account::{Account, AccountId};
pub use otp::Otp;
