use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

/// Name of the cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "kb_session";

/// Identity bound to a session token.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: u64,
    pub employee_id: String,
}

/// In-memory session store with lazy TTL expiry.
///
/// Expiry is handled by the cache itself: an entry past its TTL is simply
/// absent on the next lookup, so no background sweep is needed.
#[derive(Clone)]
pub struct SessionStore {
    cache: Cache<String, SessionUser>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Create a session for `user` and return the opaque token.
    pub async fn create(&self, user: SessionUser) -> String {
        let token = Uuid::new_v4().to_string();
        self.cache.insert(token.clone(), user).await;
        token
    }

    /// Resolve a token to its identity, if the session is still live.
    pub async fn get(&self, token: &str) -> Option<SessionUser> {
        self.cache.get(token).await
    }

    /// Invalidate a session. Destroying an unknown or already-expired
    /// token is a no-op.
    pub async fn destroy(&self, token: &str) {
        self.cache.invalidate(token).await;
    }
}
