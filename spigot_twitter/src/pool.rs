use reqwest::header::{self, HeaderMap, HeaderValue};

use std::sync::{Mutex, MutexGuard};

use spigot_core::{Error, Result};

use crate::account::TwitterAccount;

/// Outgoing auth material derived from one account: authorization and CSRF
/// headers plus the session cookie pair.
#[derive(Debug, Clone)]
pub struct AccountAuth {
    pub headers: HeaderMap,
}

impl AccountAuth {
    fn derive(account: &TwitterAccount) -> Result<Self> {
        let invalid = |what: &str| Error::InvalidCredential(format!("{} of account {}", what, account.user_id));

        let cookie = format!("auth_token={}; ct0={}", account.auth_token, account.csrf_token);
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&account.bearer_token).map_err(|_| invalid("bearer token"))?,
        );
        headers.insert(
            "x-csrf-token",
            HeaderValue::from_str(&account.csrf_token).map_err(|_| invalid("csrf token"))?,
        );
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&cookie).map_err(|_| invalid("auth token"))?,
        );
        Ok(AccountAuth { headers })
    }
}

/// Ordered credential pool with a rotation cursor. Auth headers are derived
/// once per account at construction, so selecting an index always yields
/// headers consistent with that account; the mutex guards only the index and
/// is never held across I/O.
#[derive(Debug)]
pub struct AccountPool {
    auths: Vec<AccountAuth>,
    idx: Mutex<usize>,
}

impl AccountPool {
    pub fn new(accounts: &[TwitterAccount]) -> Result<Self> {
        if accounts.is_empty() {
            return Err(Error::NoAccounts);
        }
        let auths = accounts.iter().map(AccountAuth::derive).collect::<Result<Vec<_>>>()?;
        Ok(AccountPool {
            auths,
            idx: Mutex::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.auths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.auths.is_empty()
    }

    fn locked(&self) -> MutexGuard<'_, usize> {
        // The index is plain data; a poisoned lock still holds a valid value.
        self.idx.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn current_index(&self) -> usize {
        *self.locked()
    }

    /// Snapshot of (rotation index, auth for that index), atomic with respect
    /// to concurrent advances.
    pub fn current(&self) -> (usize, AccountAuth) {
        let idx = *self.locked();
        (idx, self.auths[idx].clone())
    }

    /// Compare-and-advance: move the cursor one step (wrapping) only if it
    /// still equals `observed`, so concurrent callers that saw the same
    /// exhausted account advance it at most once. Returns the current index
    /// after the call either way.
    pub fn advance_if_still_at(&self, observed: usize) -> usize {
        let mut idx = self.locked();
        if *idx == observed {
            *idx = (*idx + 1) % self.auths.len();
        }
        *idx
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn account(user_id: i64) -> TwitterAccount {
        TwitterAccount {
            id: user_id as i32,
            user_id,
            auth_token: format!("auth-{user_id}"),
            csrf_token: format!("csrf-{user_id}"),
            bearer_token: format!("Bearer token-{user_id}"),
        }
    }

    fn pool(n: i64) -> AccountPool {
        let accounts: Vec<_> = (0..n).map(account).collect();
        AccountPool::new(&accounts).unwrap()
    }

    #[test]
    fn empty_pool_is_rejected() {
        assert!(matches!(AccountPool::new(&[]), Err(Error::NoAccounts)));
    }

    #[test]
    fn derived_headers_follow_the_account() {
        let pool = pool(2);
        let (idx, auth) = pool.current();
        assert_eq!(idx, 0);
        assert_eq!(auth.headers[reqwest::header::AUTHORIZATION], "Bearer token-0");
        assert_eq!(auth.headers["x-csrf-token"], "csrf-0");
        assert_eq!(auth.headers[reqwest::header::COOKIE], "auth_token=auth-0; ct0=csrf-0");

        pool.advance_if_still_at(0);
        let (idx, auth) = pool.current();
        assert_eq!(idx, 1);
        assert_eq!(auth.headers[reqwest::header::AUTHORIZATION], "Bearer token-1");
    }

    #[test]
    fn rotation_wraps_after_full_cycle() {
        let pool = pool(3);
        let mut observed = pool.current_index();
        for expected in [1, 2, 0] {
            observed = pool.advance_if_still_at(observed);
            assert_eq!(observed, expected);
        }
        assert_eq!(pool.current_index(), 0);
    }

    #[test]
    fn stale_observation_does_not_advance() {
        // Two callers both saw index 0 exhausted: only the first moves the
        // cursor, the second just catches up.
        let pool = pool(3);
        assert_eq!(pool.advance_if_still_at(0), 1);
        assert_eq!(pool.advance_if_still_at(0), 1);
        assert_eq!(pool.current_index(), 1);
    }

    #[test]
    fn single_account_pool_rotates_onto_itself() {
        let pool = pool(1);
        assert_eq!(pool.advance_if_still_at(0), 0);
    }
}
