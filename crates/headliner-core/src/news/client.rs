use reqwest::Client;
use url::Url;

use super::models::{Article, HeadlinesResponse};
use crate::config::NewsConfig;
use crate::countries::CountryCode;
use crate::http::{build_client, default_headers, upstream_message};
use crate::{Error, Result};

/// Anything that can produce top headlines for a country
#[async_trait::async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn fetch_headlines(&self, country: &CountryCode) -> Result<Vec<Article>>;
}

/// Client for a NewsAPI-compatible top-headlines endpoint
pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    page_size: u32,
}

impl NewsApiClient {
    /// Create a client from configuration. A missing key is not checked here;
    /// the upstream rejects the request and that surfaces per country.
    pub fn new(config: &NewsConfig) -> Result<Self> {
        if config.api_key.is_none() {
            tracing::warn!("No news API key configured; requests will likely be rejected");
        }

        Ok(Self {
            client: build_client(config.request_timeout_secs)?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        })
    }

    /// Build the request URL for one country
    pub fn request_url(&self, country: &CountryCode) -> Result<Url> {
        let page_size = self.page_size.to_string();
        let mut params = vec![("country", country.as_str())];
        if let Some(ref key) = self.api_key {
            params.push(("apiKey", key.as_str()));
        }
        params.push(("pageSize", page_size.as_str()));

        Ok(Url::parse_with_params(&self.base_url, &params)?)
    }
}

#[async_trait::async_trait]
impl HeadlineSource for NewsApiClient {
    async fn fetch_headlines(&self, country: &CountryCode) -> Result<Vec<Article>> {
        let url = self.request_url(country)?;

        tracing::debug!(%country, endpoint = %self.base_url, "Requesting top headlines");

        let response = self
            .client
            .get(url)
            .headers(default_headers())
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body),
            });
        }

        parse_articles(&body)
    }
}

/// Decode a top-headlines response body.
/// A missing or null `articles` field is an empty list; an error envelope is
/// an error. Entries that are not JSON objects are logged and skipped.
pub fn parse_articles(body: &[u8]) -> Result<Vec<Article>> {
    let response: HeadlinesResponse = serde_json::from_slice(body)?;

    if response.status.as_deref() == Some("error") {
        return Err(Error::Other(format!(
            "News API error {}: {}",
            response.code.as_deref().unwrap_or("unknown"),
            response.message.as_deref().unwrap_or("no message"),
        )));
    }

    let articles = response
        .articles
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry {
            serde_json::Value::Object(fields) => Some(Article::new(fields)),
            other => {
                tracing::warn!(index, entry = %other, "Skipping non-object article entry");
                None
            }
        })
        .collect();

    Ok(articles)
}
