//! List-query cache backed by Redis.
//!
//! Cached lists are keyed by a per-collection generation counter. A mutation
//! bumps the generation once its store write has succeeded, which makes every
//! earlier list key unreachable in one round trip. The store stays the
//! source of truth: any Redis failure falls back to a direct read.
//!
//! If a generation cannot be bumped, entries cached before the mutation may
//! still be served by Redis until their TTL runs out. For that window this
//! process reads the collection straight from the store.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use redis::Client as RedisClient;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;

const KEY_PREFIX: &str = "hrms";

/// A group of cached list queries invalidated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Employees,
    LeaveRequests,
    JobPostings,
    Interviews,
    Announcements,
    PerformanceReviews,
    Attendance,
    CandidateResumes,
    ResumeScreenings,
    CareerProfiles,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Employees => "employees",
            Collection::LeaveRequests => "leave_requests",
            Collection::JobPostings => "job_postings",
            Collection::Interviews => "interviews",
            Collection::Announcements => "announcements",
            Collection::PerformanceReviews => "performance_reviews",
            Collection::Attendance => "attendance",
            Collection::CandidateResumes => "candidate_resumes",
            Collection::ResumeScreenings => "resume_screenings",
            Collection::CareerProfiles => "career_profiles",
        }
    }
}

pub fn generation_key(collection: Collection) -> String {
    format!("{KEY_PREFIX}:gen:{}", collection.as_str())
}

pub fn list_key(collection: Collection, generation: u64, scope: &str) -> String {
    format!("{KEY_PREFIX}:list:{}:g{generation}:{scope}", collection.as_str())
}

/// Collections whose cached lists cannot be trusted, each until a deadline.
#[derive(Clone, Default)]
struct Bypass(Arc<Mutex<HashMap<Collection, Instant>>>);

impl Bypass {
    fn mark(&self, collection: Collection, until: Instant) {
        let mut marks = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        let deadline = marks.entry(collection).or_insert(until);
        *deadline = (*deadline).max(until);
    }

    fn active(&self, collection: Collection, now: Instant) -> bool {
        let mut marks = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        match marks.get(&collection) {
            Some(until) if *until > now => true,
            Some(_) => {
                marks.remove(&collection);
                false
            }
            None => false,
        }
    }
}

#[derive(Clone)]
pub struct ListCache {
    client: RedisClient,
    ttl_secs: u64,
    bypass: Bypass,
}

impl ListCache {
    pub fn new(client: RedisClient, ttl_secs: u64) -> Self {
        Self {
            client,
            ttl_secs,
            bypass: Bypass::default(),
        }
    }

    /// Returns the cached list for `scope`, or loads it from the store and caches it.
    pub async fn get_or_load<T, F, Fut>(
        &self,
        collection: Collection,
        scope: &str,
        load: F,
    ) -> Result<Vec<T>, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, AppError>>,
    {
        if self.bypass.active(collection, Instant::now()) {
            debug!("reading {} from the store until invalidation settles", collection.as_str());
            return load().await;
        }

        let key = match self.lookup::<T>(collection, scope).await {
            Ok(Lookup::Hit(rows)) => {
                debug!("cache hit for {} ({scope})", collection.as_str());
                return Ok(rows);
            }
            Ok(Lookup::Miss(key)) => Some(key),
            Err(e) => {
                warn!("list cache unavailable for {}: {e}", collection.as_str());
                None
            }
        };

        let rows = load().await?;

        if let Some(key) = key {
            if let Err(e) = self.store(&key, &rows).await {
                warn!("failed to cache {}: {e}", collection.as_str());
            }
        }
        Ok(rows)
    }

    /// Makes every cached list of `collection` unreachable.
    /// Call only after the mutation's store write has succeeded.
    ///
    /// The bump is tried twice, each time on a fresh connection. If both
    /// fail, the collection bypasses the cache for one TTL.
    pub async fn invalidate(&self, collection: Collection) {
        let result = match self.bump_generation(collection).await {
            Ok(generation) => Ok(generation),
            Err(e) => {
                debug!("retrying invalidation of {}: {e}", collection.as_str());
                self.bump_generation(collection).await
            }
        };

        match result {
            Ok(generation) => debug!(
                "invalidated {} lists (generation {generation})",
                collection.as_str()
            ),
            Err(e) => {
                warn!(
                    "failed to invalidate {} lists, bypassing cache for {}s: {e}",
                    collection.as_str(),
                    self.ttl_secs
                );
                self.bypass
                    .mark(collection, Instant::now() + Duration::from_secs(self.ttl_secs));
            }
        }
    }

    async fn bump_generation(&self, collection: Collection) -> redis::RedisResult<u64> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("INCR")
            .arg(generation_key(collection))
            .query_async::<_, u64>(&mut conn)
            .await
    }

    async fn lookup<T: DeserializeOwned>(
        &self,
        collection: Collection,
        scope: &str,
    ) -> redis::RedisResult<Lookup<T>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let generation: Option<u64> = redis::cmd("GET")
            .arg(generation_key(collection))
            .query_async(&mut conn)
            .await?;
        let key = list_key(collection, generation.unwrap_or(0), scope);

        let cached: Option<String> = redis::cmd("GET").arg(&key).query_async(&mut conn).await?;
        match cached.map(|raw| serde_json::from_str::<Vec<T>>(&raw)) {
            Some(Ok(rows)) => Ok(Lookup::Hit(rows)),
            Some(Err(e)) => {
                warn!("discarding unreadable cache entry {key}: {e}");
                Ok(Lookup::Miss(key))
            }
            None => Ok(Lookup::Miss(key)),
        }
    }

    async fn store<T: Serialize>(&self, key: &str, rows: &[T]) -> anyhow::Result<()> {
        let payload = serde_json::to_string(rows)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("SET")
            .arg(key)
            .arg(payload)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }
}

enum Lookup<T> {
    Hit(Vec<T>),
    Miss(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_key_embeds_generation_and_scope() {
        assert_eq!(
            list_key(Collection::LeaveRequests, 3, "all:status=pending"),
            "hrms:list:leave_requests:g3:all:status=pending"
        );
    }

    #[test]
    fn test_bumped_generation_changes_every_key() {
        let before = list_key(Collection::Announcements, 7, "role=employee");
        let after = list_key(Collection::Announcements, 8, "role=employee");
        assert_ne!(before, after);
    }

    #[test]
    fn test_generation_keys_are_per_collection() {
        assert_eq!(generation_key(Collection::Employees), "hrms:gen:employees");
        assert_ne!(
            generation_key(Collection::Employees),
            generation_key(Collection::Attendance)
        );
    }

    #[test]
    fn test_bypass_lasts_until_deadline() {
        let bypass = Bypass::default();
        let now = Instant::now();
        bypass.mark(Collection::Employees, now + Duration::from_secs(60));

        assert!(bypass.active(Collection::Employees, now));
        assert!(!bypass.active(Collection::Attendance, now));
        assert!(!bypass.active(Collection::Employees, now + Duration::from_secs(61)));
        assert!(!bypass.active(Collection::Employees, now));
    }

    #[test]
    fn test_bypass_keeps_the_later_deadline() {
        let bypass = Bypass::default();
        let now = Instant::now();
        bypass.mark(Collection::Interviews, now + Duration::from_secs(120));
        bypass.mark(Collection::Interviews, now + Duration::from_secs(10));
        assert!(bypass.active(Collection::Interviews, now + Duration::from_secs(60)));
    }

    #[tokio::test]
    async fn test_failed_invalidation_reads_from_store() {
        let client = RedisClient::open("redis://127.0.0.1:1/").unwrap();
        let cache = ListCache::new(client, 60);

        cache.invalidate(Collection::LeaveRequests).await;
        assert!(cache.bypass.active(Collection::LeaveRequests, Instant::now()));
        assert!(!cache.bypass.active(Collection::Employees, Instant::now()));

        let rows = cache
            .get_or_load(Collection::LeaveRequests, "all", || async {
                Ok::<_, AppError>(vec!["approved".to_string()])
            })
            .await
            .unwrap();
        assert_eq!(rows, vec!["approved".to_string()]);
    }

    #[tokio::test]
    async fn test_unreachable_redis_falls_back_to_store() {
        // Nothing listens on port 1; every cache call fails and the loader runs.
        let client = RedisClient::open("redis://127.0.0.1:1/").unwrap();
        let cache = ListCache::new(client, 60);
        let rows = cache
            .get_or_load(Collection::JobPostings, "all", || async {
                Ok::<_, AppError>(vec!["from-store".to_string()])
            })
            .await
            .unwrap();
        assert_eq!(rows, vec!["from-store".to_string()]);
    }
}
