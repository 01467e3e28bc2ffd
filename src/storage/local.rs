// src/storage/local.rs

//! Local filesystem page cache.
//!
//! Entries are written as indented JSON through a temp file and a rename, so
//! a crash mid-write never leaves a truncated entry behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{CacheConfig, Page, PageId};
use crate::storage::{ENTRY_EXTENSION, PageStore, TRACE_SUFFIX, TraceLog};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    cache_dir: PathBuf,
    log_dir: PathBuf,
    log_requests: bool,
}

impl LocalStorage {
    /// Create a LocalStorage with request tracing disabled.
    pub fn new(cache_dir: impl Into<PathBuf>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            log_dir: log_dir.into(),
            log_requests: false,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(&config.cache_dir, &config.log_dir).with_tracing(config.log_requests)
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Cache file for a normalized id. Fails for ids that are not a single
    /// file name.
    pub fn entry_path(&self, id: &PageId) -> Result<PathBuf> {
        Ok(self
            .cache_dir
            .join(format!("{}.{}", id.file_key()?, ENTRY_EXTENSION)))
    }

    /// Request trace file for a normalized id.
    pub fn trace_path(&self, id: &PageId) -> Result<PathBuf> {
        Ok(self.log_dir.join(format!("{}{}", id.file_key()?, TRACE_SUFFIX)))
    }

    /// Ids of every entry currently in the cache, sorted.
    pub async fn cached_ids(&self) -> Result<Vec<PageId>> {
        let mut ids = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ids),
            Err(e) => return Err(AppError::Io(e)),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(PageId::new(stem));
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Delete a file, treating a missing file as already deleted.
    async fn remove_file(path: &Path) -> Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(AppError::CacheRemove {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    async fn remove_dir(path: &Path) -> Result<()> {
        match tokio::fs::remove_dir_all(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn create_dir(path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|source| AppError::StorageInit {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[async_trait]
impl PageStore for LocalStorage {
    async fn init(&self) -> Result<()> {
        if self.log_requests {
            Self::create_dir(&self.log_dir).await?;
        }
        Self::create_dir(&self.cache_dir).await
    }

    async fn load(&self, id: &PageId) -> Result<Option<Page>> {
        let path = self.entry_path(id)?;
        let Some(bytes) = self.read_bytes(&path).await? else {
            return Ok(None);
        };

        Page::from_json(&bytes)
            .map(Some)
            .map_err(|source| AppError::CacheCorrupt {
                id: id.to_string(),
                path,
                source,
            })
    }

    async fn store(&self, id: &PageId, page: &Page) -> Result<()> {
        let bytes =
            serde_json::to_vec_pretty(page).map_err(|e| AppError::cache_write(id.as_str(), e))?;
        self.write_bytes(&self.entry_path(id)?, &bytes)
            .await
            .map_err(|e| AppError::cache_write(id.as_str(), e))
    }

    async fn remove(&self, id: &PageId) -> Result<()> {
        let (trace_path, entry_path) = (self.trace_path(id)?, self.entry_path(id)?);
        let trace = Self::remove_file(&trace_path).await;
        let entry = Self::remove_file(&entry_path).await;
        trace.and(entry)
    }

    async fn wipe_all(&self) -> Result<()> {
        Self::remove_dir(&self.cache_dir).await?;
        Self::remove_dir(&self.log_dir).await?;
        self.init().await
    }

    async fn open_trace(&self, id: &PageId) -> Option<TraceLog> {
        if !self.log_requests {
            return None;
        }

        let path = match self.trace_path(id) {
            Ok(path) => path,
            Err(e) => {
                log::warn!("No request trace for {}: {}", id, e);
                return None;
            }
        };
        match TraceLog::create(&path).await {
            Ok(trace) => Some(trace),
            Err(e) => {
                log::warn!("Failed to open request trace {}: {}", path.display(), e);
                None
            }
        }
    }
}
