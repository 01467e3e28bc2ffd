// src/pipeline/validate.rs

//! Configuration check.

use crate::error::Result;
use crate::models::Config;
use crate::utils::log;

/// Validate configuration and print its effective values.
pub fn run_validate(config: &Config) -> Result<()> {
    log::header("Validating configuration");

    if let Err(e) = config.validate() {
        ::log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    log::success("Config OK");
    log::sub_item(&format!("Base URL: {}", config.remote.base_url()?));
    log::sub_item(&format!("User agent: {}", config.remote.user_agent));
    log::sub_item(&format!("Timeout: {}s", config.remote.timeout_secs));
    log::sub_item(&format!("Cache dir: {}", config.cache.cache_dir.display()));
    log::sub_item(&format!(
        "Request logs: {}",
        if config.cache.log_requests {
            config.cache.log_dir.display().to_string()
        } else {
            "disabled".to_string()
        }
    ));
    log::sub_item(&format!(
        "Retry: {} attempts, {}s apart",
        config.retry.max_attempts, config.retry.delay_secs
    ));
    log::sub_item(&format!("Seeds: {}", config.seeds.len()));

    Ok(())
}
