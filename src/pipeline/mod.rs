// src/pipeline/mod.rs

//! Pipeline entry points for mirror operations.
//!
//! - `run_crawl`: Cache-first crawl from a set of seed pages
//! - `run_redownload`: Wipe the cache and crawl everything again
//! - `run_refresh`: Force re-download of a single page
//! - `run_invalidate`: Drop a single page from the cache
//! - `run_validate` / `run_info`: Configuration and cache inspection

pub mod crawl;
pub mod info;
pub mod redownload;
pub mod refresh;
pub mod validate;

pub use crawl::run_crawl;
pub use info::run_info;
pub use redownload::run_redownload;
pub use refresh::{run_invalidate, run_refresh};
pub use validate::run_validate;
