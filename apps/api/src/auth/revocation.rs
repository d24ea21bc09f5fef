use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use redis::Client as RedisClient;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;

/// Where signed-out tokens are remembered.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    async fn insert(&self, key: &str, ttl_secs: u64) -> anyhow::Result<()>;
    async fn contains(&self, key: &str) -> anyhow::Result<bool>;
}

pub struct RedisRevocationStore {
    client: RedisClient,
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn insert(&self, key: &str, ttl_secs: u64) -> anyhow::Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("SET")
            .arg(key)
            .arg(1)
            .arg("EX")
            .arg(ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn contains(&self, key: &str) -> anyhow::Result<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let exists = redis::cmd("EXISTS")
            .arg(key)
            .query_async::<_, bool>(&mut conn)
            .await?;
        Ok(exists)
    }
}

/// Signed-out tokens, remembered until they expire.
#[derive(Clone)]
pub struct SessionRevocations {
    store: Arc<dyn RevocationStore>,
}

impl SessionRevocations {
    pub fn new(client: RedisClient) -> Self {
        Self::with_store(Arc::new(RedisRevocationStore { client }))
    }

    pub fn with_store(store: Arc<dyn RevocationStore>) -> Self {
        Self { store }
    }

    pub async fn revoke(&self, key: &str, expires_at: usize) -> Result<(), AppError> {
        let ttl = remaining_ttl(expires_at, Utc::now().timestamp());
        if ttl == 0 {
            return Ok(());
        }
        self.store
            .insert(key, ttl)
            .await
            .map_err(|e| AppError::Internal(e.context("failed to revoke session")))
    }

    /// Fails open: an unreachable session store does not lock everyone out.
    pub async fn is_revoked(&self, key: &str) -> bool {
        self.store.contains(key).await.unwrap_or_else(|e| {
            warn!("could not check revocation of {key}: {e:#}");
            false
        })
    }
}

/// The key a token is revoked under. Tokens without a session id are
/// revoked by digest, so signing out always ends that token.
pub fn revocation_key(session_id: Option<Uuid>, token: &str) -> String {
    match session_id {
        Some(id) => format!("hrms:revoked:{id}"),
        None => format!("hrms:revoked:token:{}", blake3::hash(token.as_bytes()).to_hex()),
    }
}

fn remaining_ttl(expires_at: usize, now: i64) -> u64 {
    (expires_at as i64 - now).max(0) as u64
}

#[cfg(test)]
pub mod testing {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use super::*;

    /// Revocations kept in memory; TTLs are ignored.
    #[derive(Default)]
    pub struct MemoryRevocations {
        keys: Mutex<HashSet<String>>,
    }

    #[async_trait]
    impl RevocationStore for MemoryRevocations {
        async fn insert(&self, key: &str, _ttl_secs: u64) -> anyhow::Result<()> {
            self.keys.lock().unwrap().insert(key.to_string());
            Ok(())
        }

        async fn contains(&self, key: &str) -> anyhow::Result<bool> {
            Ok(self.keys.lock().unwrap().contains(key))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryRevocations;
    use super::*;

    #[test]
    fn test_remaining_ttl() {
        assert_eq!(remaining_ttl(1_000, 400), 600);
        assert_eq!(remaining_ttl(1_000, 1_000), 0);
        assert_eq!(remaining_ttl(1_000, 5_000), 0);
    }

    #[test]
    fn test_revocation_key_by_session() {
        assert_eq!(
            revocation_key(Some(Uuid::nil()), "ignored"),
            "hrms:revoked:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_revocation_key_by_token_digest() {
        let key = revocation_key(None, "header.payload.signature");
        assert!(key.starts_with("hrms:revoked:token:"));
        assert_eq!(key.len(), "hrms:revoked:token:".len() + 64);
        assert!(!key.contains("payload"));
        assert_ne!(key, revocation_key(None, "header.payload.other"));
    }

    #[tokio::test]
    async fn test_revoked_token_without_session_is_remembered() {
        let revocations = SessionRevocations::with_store(Arc::new(MemoryRevocations::default()));
        let key = revocation_key(None, "header.payload.signature");
        let expires_at = (Utc::now().timestamp() + 600) as usize;

        assert!(!revocations.is_revoked(&key).await);
        revocations.revoke(&key, expires_at).await.unwrap();
        assert!(revocations.is_revoked(&key).await);
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_open() {
        let client = redis::Client::open("redis://127.0.0.1:1/").unwrap();
        let revocations = SessionRevocations::new(client);
        assert!(!revocations.is_revoked("hrms:revoked:token:abc").await);
    }
}
