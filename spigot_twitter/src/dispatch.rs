use reqwest::{Client, Response, StatusCode, Url};

use spigot_core::Result;

use crate::pool::AccountPool;

/// Issue an upstream GET with the pool's current credentials, rotating
/// cooperatively on rate-limit responses.
///
/// The request is sent at most `pool.len() + 1` times. A 429 triggers a
/// compare-and-advance on `observed` and a retry; anything else, success or
/// not, is returned to the caller as-is. If every account is exhausted the
/// final 429 response itself is returned, which the caller must treat as
/// upstream exhaustion rather than a transport failure.
pub async fn fetch(client: &Client, pool: &AccountPool, url: Url, mut observed: usize) -> Result<Response> {
    let mut retries = 0;
    loop {
        // Snapshot credentials atomically; the lock is released before the
        // network call.
        let (_, auth) = pool.current();
        let response = client
            .get(url.clone())
            .headers(auth.headers)
            .send()
            .await
            .map_err(anyhow::Error::from)?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS && retries < pool.len() {
            retries += 1;
            observed = pool.advance_if_still_at(observed);
            continue;
        }
        return Ok(response);
    }
}
