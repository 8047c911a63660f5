use reqwest::StatusCode;
use serde_json::{json, Value};

use spigot_core::Result;
use twitter_graphql::{
    classify_tweet_result, parse_timeline, parse_tweet_result, parse_user_id, tweet_by_id_url,
    user_by_screen_name_url, user_media_url, TimelinePage, TweetResult,
};

use crate::dispatch;
use crate::state::ProxyState;

/// Outcome of a proxy operation: a JSON body plus the status the routing
/// layer should reply with. Failures scoped to one request travel in the
/// body as `{"note": ...}`; only infrastructure errors use `Result::Err`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiReply {
    fn ok(body: Value) -> Self {
        ApiReply {
            status: StatusCode::OK,
            body,
        }
    }

    fn note(status: StatusCode, note: impl Into<String>) -> Self {
        ApiReply {
            status,
            body: json!({ "note": note.into() }),
        }
    }
}

enum Capture {
    Complete,
    Unavailable { reason: String },
    Unknown,
}

/// How a page capture treats unavailable or unrecognized results: a listing
/// aborts the page and reports the entry, a recache refetch logs it and
/// keeps going so every qualifying entry is repopulated.
#[derive(Clone, Copy, PartialEq)]
enum CaptureMode {
    AbortPage,
    SkipAbnormal,
}

/// Classify and remember each captured entry of a page, recording where it
/// was seen so an expired cache entry can be regenerated later. Entries
/// without a wrapped result (tombstones) are skipped; unavailable and
/// unrecognized results are handled per `mode`.
async fn capture_page(
    state: &ProxyState,
    page: &TimelinePage,
    user_id: &str,
    cursor: Option<&str>,
    mode: CaptureMode,
) -> Capture {
    for tweet in &page.tweets {
        let Some(result) = &tweet.result else { continue };
        match classify_tweet_result(result) {
            TweetResult::Tweet(payload) | TweetResult::WithVisibility(payload) => {
                state.remember(&tweet.id, payload, user_id, cursor).await
            }
            TweetResult::Unavailable { reason } => {
                tracing::warn!("error reading protected tweet: {}", tweet.id);
                if mode == CaptureMode::AbortPage {
                    return Capture::Unavailable { reason };
                }
            }
            TweetResult::Unknown(payload) => {
                tracing::warn!("unexpected tweet result for {}: {}", tweet.id, payload);
                if mode == CaptureMode::AbortPage {
                    return Capture::Unknown;
                }
            }
        }
    }
    Capture::Complete
}

/// One page of a user's media timeline.
///
/// Resolves the username (cached for the process lifetime), fetches the page
/// through the rotating dispatcher, and optionally captures qualifying
/// entries into the tweet cache for later single-tweet lookups. The reply
/// lists tweet ids in upstream order plus a `next_page` reference built from
/// the cursor carried by the last raw entry of the page.
pub async fn list_media(
    state: &ProxyState,
    username: &str,
    cursor: Option<&str>,
    capture: bool,
    debug: bool,
) -> Result<ApiReply> {
    let mut observed = state.pool.current_index();

    let user_id = match state.cached_user_id(username).await {
        Some(user_id) => user_id,
        None => {
            let url = user_by_screen_name_url(&state.graphql_base, username).map_err(anyhow::Error::from)?;
            let response = dispatch::fetch(&state.http, &state.pool, url, observed).await?;
            let status = response.status();
            if !status.is_success() {
                return Ok(ApiReply::note(status, status.as_str()));
            }
            let body: Value = response.json().await.map_err(anyhow::Error::from)?;
            let user_id = match parse_user_id(&body) {
                Ok(user_id) => user_id,
                Err(err) => {
                    tracing::warn!("unexpected user result for {username}: {err}");
                    return Ok(ApiReply::note(status, err.to_string()));
                }
            };
            state.remember_user_id(username, &user_id).await;
            // The resolution call may have rotated the pool; observe afresh.
            observed = state.pool.current_index();
            user_id
        }
    };

    let url = user_media_url(&state.graphql_base, &user_id, cursor).map_err(anyhow::Error::from)?;
    let response = dispatch::fetch(&state.http, &state.pool, url, observed).await?;
    let status = response.status();
    if !status.is_success() {
        return Ok(ApiReply::note(status, status.as_str()));
    }
    let body: Value = response.json().await.map_err(anyhow::Error::from)?;
    if debug {
        return Ok(ApiReply { status, body });
    }

    let page = match parse_timeline(&body) {
        Ok(page) => page,
        Err(err) => {
            tracing::warn!("unexpected timeline for {username}: {err}; payload: {body}");
            // Best-effort passthrough of whatever the platform sent.
            return Ok(ApiReply { status, body });
        }
    };

    if capture {
        match capture_page(state, &page, &user_id, cursor, CaptureMode::AbortPage).await {
            Capture::Complete => {}
            Capture::Unavailable { reason } => return Ok(ApiReply::note(status, reason)),
            Capture::Unknown => return Ok(ApiReply { status, body }),
        }
    }

    let tweet_ids: Vec<&str> = page.tweets.iter().map(|tweet| tweet.id.as_str()).collect();
    Ok(ApiReply::ok(json!({
        "tweet_ids": tweet_ids,
        "next_page": format!("media?username={}&cursor={}", username, page.bottom_cursor),
    })))
}

/// A single tweet by id.
///
/// Tries the cache (consume-on-read), then the recache index (one re-fetch
/// of the page the tweet was last seen on), and finally a direct lookup
/// query. The debug flag skips the cache entirely and returns the direct
/// query's payload verbatim.
pub async fn lookup_tweet(state: &ProxyState, tweet_id: &str, debug: bool) -> Result<ApiReply> {
    let observed = state.pool.current_index();

    if !debug {
        if let Some(payload) = state.take_if_cached(tweet_id).await {
            return Ok(ApiReply::ok(payload));
        }

        if let Some(hint) = state.recache_hint(tweet_id).await {
            let url = user_media_url(&state.graphql_base, &hint.user_id, hint.cursor.as_deref())
                .map_err(anyhow::Error::from)?;
            let response = dispatch::fetch(&state.http, &state.pool, url, observed).await?;
            if response.status().is_success() {
                let body: Value = response.json().await.map_err(anyhow::Error::from)?;
                match parse_timeline(&body) {
                    // Repopulate the whole page, not just the target, and
                    // keep going past abnormal entries.
                    Ok(page) => {
                        let cursor = hint.cursor.as_deref();
                        capture_page(state, &page, &hint.user_id, cursor, CaptureMode::SkipAbnormal)
                            .await;
                    }
                    Err(err) => {
                        tracing::warn!("unexpected timeline while recaching {tweet_id}: {err}");
                    }
                }
            }
            if let Some(payload) = state.take_if_cached(tweet_id).await {
                return Ok(ApiReply::ok(payload));
            }
        }
    }

    let url = tweet_by_id_url(&state.graphql_base, tweet_id).map_err(anyhow::Error::from)?;
    let response = dispatch::fetch(&state.http, &state.pool, url, observed).await?;
    let status = response.status();
    if !status.is_success() {
        return Ok(ApiReply::note(status, status.as_str()));
    }
    let body: Value = response.json().await.map_err(anyhow::Error::from)?;
    if debug {
        return Ok(ApiReply { status, body });
    }

    let reply = match parse_tweet_result(&body).map(classify_tweet_result) {
        Ok(TweetResult::Tweet(payload)) => ApiReply { status, body: payload },
        Ok(TweetResult::WithVisibility(payload)) => ApiReply { status, body: payload },
        Ok(TweetResult::Unavailable { reason }) => {
            tracing::warn!("error reading protected tweet: {tweet_id}");
            ApiReply::note(status, reason)
        }
        Ok(TweetResult::Unknown(payload)) => {
            tracing::warn!("unexpected tweet result for {tweet_id}: {payload}");
            ApiReply { status, body }
        }
        Err(err) => {
            tracing::warn!("unexpected tweet result for {tweet_id}: {err}; payload: {body}");
            ApiReply { status, body }
        }
    };
    Ok(reply)
}
