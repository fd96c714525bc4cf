//! Last-known scan results, used only for the first paint.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AirlinkError, AirlinkResult};
use crate::gateway::AccessPoint;

#[derive(Debug, Deserialize)]
struct CacheFile {
    saved_at: DateTime<Utc>,
    access_points: Vec<AccessPoint>,
}

#[derive(Serialize)]
struct CacheFileRef<'a> {
    saved_at: DateTime<Utc>,
    access_points: &'a [AccessPoint],
}

#[derive(Debug, Clone)]
pub struct Cache {
    path: PathBuf,
}

impl Cache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.cache/airlink/networks.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("airlink").join("networks.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Any read or parse failure is treated as an empty cache.
    pub async fn load(&self) -> Option<Vec<AccessPoint>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                debug!("No network cache at {}: {e}", self.path.display());
                return None;
            }
        };
        match serde_json::from_slice::<CacheFile>(&raw) {
            Ok(file) => {
                debug!(
                    "Loaded {} cached access points saved at {}",
                    file.access_points.len(),
                    file.saved_at
                );
                Some(file.access_points)
            }
            Err(e) => {
                warn!("Ignoring unreadable network cache {}: {e}", self.path.display());
                None
            }
        }
    }

    pub async fn save(&self, access_points: &[AccessPoint]) -> AirlinkResult<()> {
        let file = CacheFileRef {
            saved_at: Utc::now(),
            access_points,
        };
        let json = serde_json::to_vec_pretty(&file)
            .map_err(|e| AirlinkError::Cache(format!("serialize: {e}")))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        // write-then-rename so a crash never leaves a truncated file behind
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!("Saved {} access points to {}", access_points.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::Security;

    fn temp_cache(name: &str) -> Cache {
        let dir = std::env::temp_dir().join(format!("airlink-cache-{}-{name}", std::process::id()));
        Cache::new(dir.join("networks.json"))
    }

    #[tokio::test]
    async fn save_then_load() {
        let cache = temp_cache("roundtrip");
        let aps = vec![
            AccessPoint::scanned("Home", Some("AA:BB"), 70, Security::WpaPsk),
            AccessPoint::scanned("", None, 20, Security::Open),
        ];
        cache.save(&aps).await.unwrap();
        assert_eq!(cache.load().await, Some(aps));
        let _ = tokio::fs::remove_dir_all(cache.path().parent().unwrap()).await;
    }

    #[tokio::test]
    async fn missing_or_corrupt_cache_is_none() {
        let cache = temp_cache("corrupt");
        assert_eq!(cache.load().await, None);

        tokio::fs::create_dir_all(cache.path().parent().unwrap()).await.unwrap();
        tokio::fs::write(cache.path(), b"{ not json").await.unwrap();
        assert_eq!(cache.load().await, None);
        let _ = tokio::fs::remove_dir_all(cache.path().parent().unwrap()).await;
    }
}
