use serde_json::Value;
use url::Url;

use crate::consts::*;
use crate::error::{Error, Result};

/// Build the GET URL for a GraphQL endpoint, merging per-call variables over
/// the defaults. Variables and features are carried as JSON-encoded query
/// parameters, exactly as the web client sends them.
fn endpoint_url<I, V>(base: &str, endpoint: &str, variables: I) -> Result<Url>
where
    I: IntoIterator<Item = (&'static str, V)>,
    V: Into<Value>,
{
    let Some(qid) = GRAPHQL_QIDS.get(endpoint) else {
        return Err(Error::InvalidEndpoint(endpoint.to_string()));
    };

    let mut all_variables: serde_json::Map<String, Value> = DEFAULT_GRAPHQL_VARIABLES
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_owned().into()))
        .collect();
    all_variables.extend(variables.into_iter().map(|(k, v)| (k.to_string(), v.into())));
    let features: serde_json::Map<String, Value> = DEFAULT_GRAPHQL_FEATURES
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_owned().into()))
        .collect();

    let variable_str = serde_json::to_string(&all_variables)?;
    let feature_str = serde_json::to_string(&features)?;
    let graphql_params = [("variables", variable_str), ("features", feature_str)];

    let base_url = format!("{}/{}/{}", base, qid, endpoint);
    Ok(Url::parse_with_params(&base_url, &graphql_params)?)
}

pub fn user_by_screen_name_url(base: &str, username: &str) -> Result<Url> {
    endpoint_url(base, "UserByScreenName", [("screen_name", Value::from(username))])
}

pub fn user_media_url(base: &str, user_id: &str, cursor: Option<&str>) -> Result<Url> {
    let mut variables: Vec<(&str, Value)> =
        vec![("userId", user_id.into()), ("count", LIST_API_MAX_COUNT.into())];
    if let Some(cursor) = cursor {
        variables.push(("cursor", cursor.into()));
    }
    endpoint_url(base, "UserMedia", variables)
}

pub fn tweet_by_id_url(base: &str, tweet_id: &str) -> Result<Url> {
    endpoint_url(base, "TweetResultByRestId", [("tweetId", Value::from(tweet_id))])
}
