use reqwest::Client;
use serde_json::Value;
use tokio::sync::RwLock;

use std::collections::HashMap;

use spigot_core::Result;

use crate::account::TwitterAccount;
use crate::cache::{RecacheHint, TweetCache};
use crate::pool::AccountPool;

/// Process-wide proxy state: the credential pool plus the three in-memory
/// stores. Created once at startup and shared by every request handler; none
/// of it survives a restart. Each store operation is individually atomic,
/// but a page capture is not a bulk transaction, so concurrent lookups may
/// observe a partially captured page.
#[derive(Debug)]
pub struct ProxyState {
    pub http: Client,
    pub pool: AccountPool,
    pub graphql_base: String,
    user_ids: RwLock<HashMap<String, String>>,
    cache: RwLock<TweetCache>,
    recache: RwLock<HashMap<String, RecacheHint>>,
}

impl ProxyState {
    pub fn new(accounts: &[TwitterAccount]) -> Result<Self> {
        Self::with_base(accounts, twitter_graphql::GRAPHQL_API)
    }

    /// The GraphQL base URL is injectable so tests can point the proxy at a
    /// local upstream.
    pub fn with_base(accounts: &[TwitterAccount], graphql_base: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(twitter_graphql::USER_AGENT)
            .build()
            .map_err(anyhow::Error::from)?;
        Ok(ProxyState {
            http,
            pool: AccountPool::new(accounts)?,
            graphql_base: graphql_base.to_string(),
            user_ids: RwLock::new(HashMap::new()),
            cache: RwLock::new(TweetCache::new()),
            recache: RwLock::new(HashMap::new()),
        })
    }

    pub async fn cached_user_id(&self, username: &str) -> Option<String> {
        self.user_ids.read().await.get(username).cloned()
    }

    /// Username resolutions are kept for the process lifetime; no eviction.
    pub async fn remember_user_id(&self, username: &str, user_id: &str) {
        self.user_ids
            .write()
            .await
            .insert(username.to_string(), user_id.to_string());
    }

    /// Insert a captured tweet into both the cache and the recache index,
    /// overwriting prior entries for the same id.
    pub async fn remember(&self, id: &str, payload: Value, user_id: &str, cursor: Option<&str>) {
        self.cache.write().await.insert(id.to_string(), payload);
        self.recache.write().await.insert(
            id.to_string(),
            RecacheHint {
                user_id: user_id.to_string(),
                cursor: cursor.map(str::to_string),
            },
        );
    }

    /// Consume-on-read cache access.
    pub async fn take_if_cached(&self, id: &str) -> Option<Value> {
        self.cache.write().await.take(id)
    }

    pub async fn recache_hint(&self, id: &str) -> Option<RecacheHint> {
        self.recache.read().await.get(id).cloned()
    }
}
