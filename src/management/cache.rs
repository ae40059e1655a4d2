use std::{io::ErrorKind, path::PathBuf, time::SystemTime};

use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    info,
    types::{AlbumCacheMap, Artist, Token},
    warning,
};

#[derive(Debug)]
pub enum CacheError {
    IoError(std::io::Error),
    SerdeError(serde_json::Error),
}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::IoError(err)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::SerdeError(err)
    }
}

/// Day-scoped cache store for tokens, followed-artist snapshots, and
/// per-artist release lists.
///
/// Snapshot and album-cache files carry the calendar date in their name, so
/// a file written on day D is structurally invisible on day D+1. The token
/// file is long-lived and carries no date. Loads never fail: a missing or
/// unparseable file is a cache miss.
#[derive(Debug, Clone)]
pub struct CacheManager {
    dir: PathBuf,
    today: NaiveDate,
}

impl CacheManager {
    pub fn new(dir: PathBuf, today: NaiveDate) -> Self {
        Self { dir, today }
    }

    /// The production cache location under the platform's local data dir.
    pub fn default_dir() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("radarcli/cache");
        path
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub async fn ensure_dir(&self) -> Result<(), CacheError> {
        async_fs::create_dir_all(&self.dir)
            .await
            .map_err(CacheError::IoError)
    }

    pub async fn load_token(&self) -> Option<Token> {
        self.read_json(self.token_path()).await
    }

    pub async fn save_token(&self, token: &Token) -> Result<(), CacheError> {
        self.write_json(self.token_path(), token).await
    }

    pub async fn load_artist_snapshot(&self) -> Option<Vec<Artist>> {
        self.read_json(self.artist_snapshot_path()).await
    }

    pub async fn save_artist_snapshot(&self, artists: &[Artist]) -> Result<(), CacheError> {
        self.write_json(self.artist_snapshot_path(), &artists).await
    }

    pub async fn load_album_cache(&self) -> Option<AlbumCacheMap> {
        self.read_json(self.album_cache_path()).await
    }

    pub async fn save_album_cache(&self, cache: &AlbumCacheMap) -> Result<(), CacheError> {
        self.write_json(self.album_cache_path(), cache).await
    }

    /// Removes every cache file whose modification time is older than the
    /// retention window. Runs once per sync, before any reads.
    pub fn evict_stale(&self, retention_days: u32) {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return, // nothing cached yet
        };

        let now = SystemTime::now();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            let Ok(modified) = metadata.modified() else {
                continue;
            };
            let age_days =
                now.duration_since(modified).unwrap_or_default().as_secs_f64() / 86_400.0;
            if age_days > retention_days as f64 {
                let file_name = entry.file_name().to_string_lossy().to_string();
                match std::fs::remove_file(&path) {
                    Ok(_) => info!("Deleted old cache file: {}", file_name),
                    Err(e) => warning!("Cannot delete old cache file {}: {}", file_name, e),
                }
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, path: PathBuf) -> Option<T> {
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warning!("Cannot read cache file {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                // corrupt cache entries are treated as misses, not failures
                warning!("Ignoring corrupt cache file {}: {}", path.display(), e);
                None
            }
        }
    }

    async fn write_json<T: Serialize + ?Sized>(
        &self,
        path: PathBuf,
        value: &T,
    ) -> Result<(), CacheError> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(value)?;

        // whole-file replace: a crash mid-write leaves old or fully-new content
        let tmp = path.with_extension("tmp");
        async_fs::write(&tmp, json).await?;
        async_fs::rename(&tmp, &path).await?;
        Ok(())
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join("token.json")
    }

    fn artist_snapshot_path(&self) -> PathBuf {
        self.dir
            .join(format!("followed_artists_{}.json", self.today.format("%Y-%m-%d")))
    }

    fn album_cache_path(&self) -> PathBuf {
        self.dir
            .join(format!("album_cache_{}.json", self.today.format("%Y-%m-%d")))
    }
}
