// src/services/http.rs

//! HTTP implementation of [`PageSource`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Page, PageId, RemoteConfig};
use crate::services::PageSource;
use crate::storage::TraceLog;

/// Longest response excerpt carried in a `Remote` error.
const ERROR_BODY_LIMIT: usize = 200;

/// Fetches pages as JSON from `{base_url}/{id}`.
pub struct HttpPageSource {
    client: Client,
    base_url: Url,
}

impl HttpPageSource {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Create a source with a client configured from `config`.
    pub fn from_config(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .build()?;
        Ok(Self::new(client, config.base_url()?))
    }

    pub fn page_url(&self, id: &PageId) -> Result<Url> {
        Ok(self.base_url.join(id.as_str())?)
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, id: &PageId, mut trace: Option<&mut TraceLog>) -> Result<Page> {
        let url = self.page_url(id)?;
        if let Some(trace) = trace.as_deref_mut() {
            trace.record(&format!("GET {}", url)).await;
        }

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                if let Some(trace) = trace.as_deref_mut() {
                    trace.record(&format!("ERROR {}", e)).await;
                }
                return Err(e.into());
            }
        };

        let status = response.status();
        let body = response.text().await?;
        if let Some(trace) = trace.as_deref_mut() {
            trace.record(&format!("{} {}", status.as_u16(), url)).await;
            trace.record(&body).await;
        }

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(AppError::Remote {
                id: id.to_string(),
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        Ok(Page::from_json(body.as_bytes())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_joins_id() {
        let config = RemoteConfig {
            base_url: "https://docs.example.com/api/pages".into(),
            ..RemoteConfig::default()
        };
        let source = HttpPageSource::from_config(&config).unwrap();

        let url = source.page_url(&PageId::new("ab-cd")).unwrap();
        assert_eq!(url.as_str(), "https://docs.example.com/api/pages/abcd");
    }
}
