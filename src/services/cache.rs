use crate::error::{ProgressError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize, Deserialize)]
struct CachedResponse {
    url: String,
    stored_at: u64,
    body: String,
}

/// On-disk store of response bodies keyed by request URL.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    pub fn default_dir() -> Result<PathBuf> {
        let home = std::env::var("HOME").map_err(|_| {
            ProgressError::InvalidInput("HOME is not set; pass --cache-dir".to_string())
        })?;
        Ok(PathBuf::from(home).join(".cache").join("pota-progress"))
    }

    pub fn entry_path(&self, url: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let id = hex::encode(hasher.finalize());
        self.dir.join(format!("{}.json", id))
    }

    /// Returns the stored body if an entry exists and is younger than the TTL.
    /// Unreadable or corrupt entries count as misses.
    pub fn get(&self, url: &str) -> Option<String> {
        let path = self.entry_path(url);
        let raw = std::fs::read_to_string(&path).ok()?;
        let entry: CachedResponse = match serde_json::from_str(&raw) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt cache entry");
                return None;
            }
        };
        if entry.url != url {
            return None;
        }
        let age = now_secs().saturating_sub(entry.stored_at);
        if age >= self.ttl.as_secs() {
            tracing::debug!(url, age, "cache entry expired");
            return None;
        }
        Some(entry.body)
    }

    pub fn put(&self, url: &str, body: &str) -> Result<()> {
        self.put_with_timestamp(url, body, now_secs())
    }

    pub fn put_with_timestamp(&self, url: &str, body: &str, stored_at: u64) -> Result<()> {
        let path = self.entry_path(url);
        let io_err = |source: std::io::Error| ProgressError::Cache {
            path: path.display().to_string(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        let entry = CachedResponse {
            url: url.to_string(),
            stored_at,
            body: body.to_string(),
        };
        let raw = serde_json::to_string(&entry).map_err(|e| io_err(e.into()))?;
        std::fs::write(&path, raw).map_err(io_err)?;
        Ok(())
    }
}

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
