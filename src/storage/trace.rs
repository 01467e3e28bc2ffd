// src/storage/trace.rs

//! Per-download request trace.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

/// Diagnostic sink receiving the raw request/response trace of one download.
///
/// The file is truncated when opened and closed when the value is dropped,
/// so a trace never outlives the fetch it was opened for.
#[derive(Debug)]
pub struct TraceLog {
    path: PathBuf,
    file: tokio::fs::File,
}

impl TraceLog {
    /// Create (or truncate) the trace file at `path`.
    pub async fn create(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let file = tokio::fs::File::create(&path).await?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line and flush it to disk.
    pub async fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        self.file.write_all(line.as_bytes()).await?;
        self.file.write_all(b"\n").await?;
        self.file.flush().await
    }

    /// Append a line, logging instead of failing.
    pub async fn record(&mut self, line: &str) {
        if let Err(e) = self.write_line(line).await {
            log::debug!("Trace write to {} failed: {}", self.path.display(), e);
        }
    }
}
