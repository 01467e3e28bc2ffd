// src/pipeline/info.rs

//! Cache inspection.

use crate::error::Result;
use crate::models::PageId;
use crate::storage::LocalStorage;
use crate::utils::log;

/// Report cache location and contents.
pub async fn run_info(storage: &LocalStorage) -> Result<Vec<PageId>> {
    let ids = storage.cached_ids().await?;

    log::header("Cache info");
    log::sub_item(&format!("Cache dir: {}", storage.cache_dir().display()));
    log::sub_item(&format!("Log dir: {}", storage.log_dir().display()));
    log::sub_item(&format!("Cached pages: {}", ids.len()));
    log::separator();
    for id in &ids {
        log::sub_item(id.as_str());
    }

    Ok(ids)
}
