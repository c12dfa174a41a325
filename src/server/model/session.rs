//! Session records cached per issued token.
//!
//! The cache only holds display data for a token so logout can invalidate it and lookups
//! avoid a round trip to the database. Authorization never trusts the cache: the middleware
//! always verifies the token and loads the user row.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use fred::prelude::*;
use fred::types::Expiration;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::server::error::Error;

pub const SESSION_KEY_PREFIX: &str = "finanapp:session:";
pub const SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CachedSession {
    pub user_id: i32,
    pub first_name: String,
    pub email: String,
}

/// Key-value store mapping a session token to its [`CachedSession`].
#[async_trait]
pub trait SessionCache: Send + Sync {
    /// Stores the record with the session time-to-live.
    async fn store(&self, token: &str, session: &CachedSession) -> Result<(), Error>;

    /// Returns `None` for unknown or expired tokens.
    async fn load(&self, token: &str) -> Result<Option<CachedSession>, Error>;

    /// Removing an unknown token is not an error.
    async fn remove(&self, token: &str) -> Result<(), Error>;
}

pub fn session_key(token: &str) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, token)
}

pub struct RedisSessionCache {
    pool: Pool,
}

impl RedisSessionCache {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionCache for RedisSessionCache {
    async fn store(&self, token: &str, session: &CachedSession) -> Result<(), Error> {
        let value = serde_json::to_string(session)
            .map_err(|e| Error::ParseError(format!("Failed to encode session: {}", e)))?;

        let _: () = self
            .pool
            .set(
                session_key(token),
                value,
                Some(Expiration::EX(SESSION_TTL_SECONDS)),
                None,
                false,
            )
            .await?;

        Ok(())
    }

    async fn load(&self, token: &str) -> Result<Option<CachedSession>, Error> {
        let value: Option<String> = self.pool.get(session_key(token)).await?;

        value
            .map(|raw| {
                serde_json::from_str::<CachedSession>(&raw)
                    .map_err(|e| Error::ParseError(format!("Failed to decode session: {}", e)))
            })
            .transpose()
    }

    async fn remove(&self, token: &str) -> Result<(), Error> {
        let _: i64 = self.pool.del(session_key(token)).await?;

        Ok(())
    }
}

/// In-process cache used when Redis is not wanted, mainly by tests.
pub struct MemorySessionCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (CachedSession, Instant)>>,
}

impl MemorySessionCache {
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(SESSION_TTL_SECONDS as u64))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemorySessionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionCache for MemorySessionCache {
    async fn store(&self, token: &str, session: &CachedSession) -> Result<(), Error> {
        let expires_at = Instant::now() + self.ttl;

        self.entries
            .lock()
            .await
            .insert(session_key(token), (session.clone(), expires_at));

        Ok(())
    }

    async fn load(&self, token: &str) -> Result<Option<CachedSession>, Error> {
        let key = session_key(token);
        let mut entries = self.entries.lock().await;

        match entries.get(&key) {
            Some((_, expires_at)) if *expires_at <= Instant::now() => {
                entries.remove(&key);
                Ok(None)
            }
            Some((session, _)) => Ok(Some(session.clone())),
            None => Ok(None),
        }
    }

    async fn remove(&self, token: &str) -> Result<(), Error> {
        self.entries.lock().await.remove(&session_key(token));

        Ok(())
    }
}
