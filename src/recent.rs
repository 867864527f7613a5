//! Recently used accounts
//!
//! Most-recent-first, bounded list of accounts the user fetched an OTP for.
//! Entries are not de-duplicated: fetching the same account twice puts it at
//! the front twice.

use std::collections::VecDeque;

use crate::client::Account;

/// Fixed-capacity, most-recent-first ring of accounts
#[derive(Debug, Clone)]
pub struct RecentAccounts {
    entries: VecDeque<Account>,
    capacity: usize,
}

impl RecentAccounts {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Put an account at the front, evicting the oldest entry when full
    pub fn push(&mut self, account: Account) {
        self.entries.push_front(account);
        self.entries.truncate(self.capacity);
    }

    /// Replace the ring with an empty one of the given capacity
    pub fn set_capacity(&mut self, capacity: usize) {
        *self = Self::new(capacity);
    }

    /// Entries, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.entries.iter()
    }
}
