use serde_json::Value;

use crate::error::{Error, Result};

/// One tweet result classified by its `__typename` discriminator. `Unknown`
/// is a first-class variant so callers decide how unrecognized payloads pass
/// through instead of dropping them.
#[derive(Debug, Clone, PartialEq)]
pub enum TweetResult {
    Tweet(Value),
    /// `TweetWithVisibilityResults`, already unwrapped one level.
    WithVisibility(Value),
    Unavailable {
        reason: String,
    },
    Unknown(Value),
}

pub fn classify_tweet_result(result: &Value) -> TweetResult {
    match result.get("__typename").and_then(Value::as_str) {
        Some("Tweet") => TweetResult::Tweet(result.clone()),
        Some("TweetWithVisibilityResults") => match result.get("tweet") {
            Some(tweet) => TweetResult::WithVisibility(tweet.clone()),
            None => TweetResult::Unknown(result.clone()),
        },
        Some("TweetUnavailable") => TweetResult::Unavailable {
            reason: result
                .get("reason")
                .and_then(Value::as_str)
                .unwrap_or("Unavailable")
                .to_string(),
        },
        _ => TweetResult::Unknown(result.clone()),
    }
}

/// A qualifying timeline entry: a `TimelineTimelineItem` carrying a non-empty
/// `tweet_results`. The wrapped result may still be absent for tombstoned
/// entries; those count toward the id list but cannot be captured.
#[derive(Debug, Clone)]
pub struct TimelineTweet {
    pub id: String,
    pub result: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct TimelinePage {
    pub tweets: Vec<TimelineTweet>,
    /// Cursor value carried by the last raw entry of the page, qualifying
    /// or not. The platform always ends a page with its bottom cursor.
    pub bottom_cursor: String,
}

pub fn parse_timeline(body: &Value) -> Result<TimelinePage> {
    let entries = body
        .pointer("/data/user/result/timeline_v2/timeline/instructions/0/entries")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Schema("missing timeline entries".to_string()))?;
    let bottom_cursor = entries
        .last()
        .and_then(|entry| entry.pointer("/content/value"))
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Schema("last timeline entry carries no cursor value".to_string()))?
        .to_string();

    let mut tweets = Vec::new();
    for entry in entries {
        let kind = entry.pointer("/content/__typename").and_then(Value::as_str);
        if kind != Some("TimelineTimelineItem") {
            continue;
        }
        let Some(results) = entry.pointer("/content/itemContent/tweet_results") else {
            continue;
        };
        if results.as_object().map_or(true, |map| map.is_empty()) {
            continue;
        }
        let id = entry
            .get("entryId")
            .and_then(Value::as_str)
            .and_then(|entry_id| entry_id.strip_prefix("tweet-"))
            .ok_or_else(|| Error::Schema("timeline item without a tweet entry id".to_string()))?
            .to_string();
        tweets.push(TimelineTweet {
            id,
            result: results.get("result").cloned(),
        });
    }

    Ok(TimelinePage { tweets, bottom_cursor })
}

pub fn parse_user_id(body: &Value) -> Result<String> {
    body.pointer("/data/user/result/rest_id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::Schema("user result carries no rest_id".to_string()))
}

pub fn parse_tweet_result(body: &Value) -> Result<&Value> {
    body.pointer("/data/tweetResult/result")
        .ok_or_else(|| Error::Schema("missing tweet result".to_string()))
}
