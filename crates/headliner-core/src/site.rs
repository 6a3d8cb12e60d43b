//! Site data output: the aggregated feed written as `news.json` for templates.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::countries::CountryCode;
use crate::news::{AggregatedFeed, Article};
use crate::Result;

pub const NEWS_DATA_FILE: &str = "news.json";

/// Document consumed by site templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsData {
    pub generated_at: DateTime<Utc>,
    /// Countries requested, in order
    pub countries: Vec<CountryCode>,
    /// Countries whose request failed and contributed nothing
    pub failed: Vec<CountryCode>,
    pub articles: Vec<Article>,
}

impl NewsData {
    pub fn new(countries: &[CountryCode], feed: AggregatedFeed) -> Self {
        let failed = feed.failed_countries().to_vec();
        Self {
            generated_at: Utc::now(),
            countries: countries.to_vec(),
            failed,
            articles: feed.into_articles(),
        }
    }
}

/// Write `news.json` into the data directory, creating it if needed
pub async fn write_news_data(data: &NewsData, data_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(data_dir).await?;

    let path = data_dir.join(NEWS_DATA_FILE);
    let json = serde_json::to_string_pretty(data)?;

    fs::write(&path, json).await?;
    tracing::info!(
        path = %path.display(),
        articles = data.articles.len(),
        "Wrote news data"
    );

    Ok(path)
}
