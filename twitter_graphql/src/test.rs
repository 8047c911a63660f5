use serde_json::{json, Value};

use crate::request::{tweet_by_id_url, user_by_screen_name_url, user_media_url};
use crate::response::{classify_tweet_result, parse_timeline, parse_tweet_result, parse_user_id, TweetResult};

fn timeline_body(entries: Value) -> Value {
    json!({
        "data": {"user": {"result": {"timeline_v2": {"timeline": {"instructions": [
            {"type": "TimelineAddEntries", "entries": entries}
        ]}}}}}
    })
}

fn item_entry(id: &str, result: Value) -> Value {
    json!({
        "entryId": format!("tweet-{id}"),
        "content": {
            "__typename": "TimelineTimelineItem",
            "itemContent": {"tweet_results": {"result": result}}
        }
    })
}

fn cursor_entry(kind: &str, value: &str) -> Value {
    json!({
        "entryId": format!("cursor-{kind}-0"),
        "content": {"__typename": "TimelineTimelineCursor", "cursorType": kind, "value": value}
    })
}

#[test]
fn timeline_collects_item_entries_in_order() {
    let body = timeline_body(json!([
        cursor_entry("Top", "TOP"),
        item_entry("111", json!({"__typename": "Tweet", "rest_id": "111"})),
        item_entry("222", json!({"__typename": "Tweet", "rest_id": "222"})),
        cursor_entry("Bottom", "BOTTOM"),
    ]));
    let page = parse_timeline(&body).unwrap();
    let ids: Vec<&str> = page.tweets.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["111", "222"]);
}

#[test]
fn timeline_cursor_comes_from_last_raw_entry() {
    // The bottom cursor entry is not a qualifying entry, but it is the last
    // raw one and must supply the next page's cursor.
    let body = timeline_body(json!([
        item_entry("111", json!({"__typename": "Tweet"})),
        cursor_entry("Bottom", "XYZ"),
    ]));
    let page = parse_timeline(&body).unwrap();
    assert_eq!(page.bottom_cursor, "XYZ");
}

#[test]
fn timeline_skips_entries_with_empty_tweet_results() {
    let empty = json!({
        "entryId": "tweet-333",
        "content": {"__typename": "TimelineTimelineItem", "itemContent": {"tweet_results": {}}}
    });
    let body = timeline_body(json!([
        item_entry("111", json!({"__typename": "Tweet"})),
        empty,
        cursor_entry("Bottom", "B"),
    ]));
    let page = parse_timeline(&body).unwrap();
    assert_eq!(page.tweets.len(), 1);
}

#[test]
fn timeline_keeps_tombstoned_items_without_result() {
    let tombstone = json!({
        "entryId": "tweet-333",
        "content": {
            "__typename": "TimelineTimelineItem",
            "itemContent": {"tweet_results": {"tombstone": "gone"}}
        }
    });
    let body = timeline_body(json!([tombstone, cursor_entry("Bottom", "B")]));
    let page = parse_timeline(&body).unwrap();
    assert_eq!(page.tweets.len(), 1);
    assert_eq!(page.tweets[0].id, "333");
    assert!(page.tweets[0].result.is_none());
}

#[test]
fn timeline_rejects_unexpected_shape() {
    assert!(parse_timeline(&json!({"data": {}})).is_err());
    assert!(parse_timeline(&timeline_body(json!([]))).is_err());
}

#[test]
fn classify_plain_tweet() {
    let result = json!({"__typename": "Tweet", "rest_id": "1"});
    assert_eq!(classify_tweet_result(&result), TweetResult::Tweet(result.clone()));
}

#[test]
fn classify_unwraps_visibility_wrapper() {
    let inner = json!({"__typename": "Tweet", "rest_id": "1"});
    let result = json!({"__typename": "TweetWithVisibilityResults", "tweet": inner});
    assert_eq!(classify_tweet_result(&result), TweetResult::WithVisibility(inner));
}

#[test]
fn classify_unavailable_with_and_without_reason() {
    let result = json!({"__typename": "TweetUnavailable", "reason": "Protected"});
    assert_eq!(
        classify_tweet_result(&result),
        TweetResult::Unavailable { reason: "Protected".to_string() }
    );
    let bare = json!({"__typename": "TweetUnavailable"});
    assert_eq!(
        classify_tweet_result(&bare),
        TweetResult::Unavailable { reason: "Unavailable".to_string() }
    );
}

#[test]
fn classify_unknown_kind() {
    let result = json!({"__typename": "TweetPreview"});
    assert_eq!(classify_tweet_result(&result), TweetResult::Unknown(result.clone()));
    let untagged = json!({"rest_id": "1"});
    assert_eq!(classify_tweet_result(&untagged), TweetResult::Unknown(untagged.clone()));
}

#[test]
fn user_id_extraction() {
    let body = json!({"data": {"user": {"result": {"rest_id": "12345"}}}});
    assert_eq!(parse_user_id(&body).unwrap(), "12345");
    assert!(parse_user_id(&json!({"data": {}})).is_err());
}

#[test]
fn tweet_result_extraction() {
    let body = json!({"data": {"tweetResult": {"result": {"__typename": "Tweet"}}}});
    assert!(parse_tweet_result(&body).is_ok());
    assert!(parse_tweet_result(&json!({"data": {}})).is_err());
}

#[test]
fn urls_carry_variables_and_features() {
    let url = user_media_url("https://api.twitter.com/graphql", "12345", Some("CURSOR")).unwrap();
    assert!(url.path().ends_with("/UserMedia"));
    let variables = url
        .query_pairs()
        .find(|(k, _)| k == "variables")
        .map(|(_, v)| v.to_string())
        .unwrap();
    let variables: Value = serde_json::from_str(&variables).unwrap();
    assert_eq!(variables["userId"], "12345");
    assert_eq!(variables["cursor"], "CURSOR");
    assert!(url.query_pairs().any(|(k, _)| k == "features"));

    let url = user_media_url("https://api.twitter.com/graphql", "12345", None).unwrap();
    let variables = url
        .query_pairs()
        .find(|(k, _)| k == "variables")
        .map(|(_, v)| v.to_string())
        .unwrap();
    let variables: Value = serde_json::from_str(&variables).unwrap();
    assert!(variables.get("cursor").is_none());

    assert!(user_by_screen_name_url("https://api.twitter.com/graphql", "foo").is_ok());
    assert!(tweet_by_id_url("https://api.twitter.com/graphql", "111").is_ok());
}
