//! Request construction and response interpretation for the three private
//! GraphQL queries the proxy issues: username resolution, media timeline
//! pages, and single-tweet lookup. No I/O happens here; transport and
//! credential rotation live in `spigot_twitter`.

mod consts;
mod error;
mod request;
mod response;
#[cfg(test)]
mod test;

pub use consts::{GRAPHQL_API, USER_AGENT};
pub use error::Error;
pub use request::{tweet_by_id_url, user_by_screen_name_url, user_media_url};
pub use response::{classify_tweet_result, parse_timeline, parse_tweet_result, parse_user_id};
pub use response::{TimelinePage, TimelineTweet, TweetResult};
