//! Account search
//!
//! Every whitespace-separated token must appear, case-insensitively, in the
//! account's service or account name. Results keep snapshot order.

use crate::client::Account;

/// Filter `accounts` by a free-text query.
///
/// An empty or whitespace-only query matches nothing.
pub fn match_accounts<'a>(accounts: &'a [Account], query: &str) -> Vec<&'a Account> {
    let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<&Account> = accounts.iter().collect();
    for token in &tokens {
        matches.retain(|account| matches_token(account, token));
        if matches.is_empty() {
            break;
        }
    }
    matches
}

fn matches_token(account: &Account, token: &str) -> bool {
    account.service.to_lowercase().contains(token) || account.account.to_lowercase().contains(token)
}
