use axum::body::Bytes;
use axum::http::HeaderValue;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Snapshot of a handler's response body
#[derive(Debug, Clone)]
pub struct CachedBody {
    pub body: Bytes,
    pub content_type: Option<HeaderValue>,
}

#[derive(Debug)]
struct Entry {
    value: CachedBody,
    expires_at: Instant,
}

/// Process-wide key -> body map with a fixed TTL.
///
/// Expiry is checked on read only. There is no size bound and no sweep, and
/// concurrent misses for one key each run the handler.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// A lookup past expiry is a miss and drops the stale entry
    pub async fn get(&self, key: &str) -> Option<CachedBody> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub async fn insert(&self, key: String, value: CachedBody) {
        let expires_at = Instant::now() + self.ttl;
        self.entries
            .lock()
            .await
            .insert(key, Entry { value, expires_at });
    }

    /// Drop every entry, returning how many there were
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let count = entries.len();
        entries.clear();
        count
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(text: &'static str) -> CachedBody {
        CachedBody {
            body: Bytes::from_static(text.as_bytes()),
            content_type: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("k".to_string(), body("{}")).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(cache.get("k").await.is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get("k").await.is_none());
        // Stale entry was dropped by the read
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reinsert_restarts_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(10));
        cache.insert("k".to_string(), body("1")).await;
        tokio::time::advance(Duration::from_secs(8)).await;
        cache.insert("k".to_string(), body("2")).await;
        tokio::time::advance(Duration::from_secs(8)).await;

        let hit = cache.get("k").await.unwrap();
        assert_eq!(hit.body, Bytes::from_static(b"2"));
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("a".to_string(), body("1")).await;
        cache.insert("b".to_string(), body("2")).await;

        assert_eq!(cache.clear().await, 2);
        assert!(cache.get("a").await.is_none());
    }
}
