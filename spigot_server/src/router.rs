use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::Value;

use std::sync::Arc;

use spigot_twitter::{api, ProxyState};

use crate::error::Result;

pub fn twitter_router() -> Router<Arc<ProxyState>> {
    Router::new()
        .route("/twitter/media", get(twitter_media))
        .route("/twitter/tweet", get(twitter_tweet))
}

/// Flags are presence-style: `?capture` and `?capture=anything` both count,
/// matching the consumer's existing URL templates.
#[derive(Deserialize, Debug)]
struct MediaQuery {
    username: String,
    cursor: Option<String>,
    capture: Option<String>,
    debug: Option<String>,
}

async fn twitter_media(
    State(state): State<Arc<ProxyState>>,
    Query(query): Query<MediaQuery>,
) -> Result<(StatusCode, Json<Value>)> {
    let reply = api::list_media(
        &state,
        &query.username,
        query.cursor.as_deref(),
        query.capture.is_some(),
        query.debug.is_some(),
    )
    .await?;
    Ok((reply.status, Json(reply.body)))
}

#[derive(Deserialize, Debug)]
struct TweetQuery {
    tweet: String,
    debug: Option<String>,
}

async fn twitter_tweet(
    State(state): State<Arc<ProxyState>>,
    Query(query): Query<TweetQuery>,
) -> Result<(StatusCode, Json<Value>)> {
    let reply = api::lookup_tweet(&state, &query.tweet, query.debug.is_some()).await?;
    Ok((reply.status, Json(reply.body)))
}
