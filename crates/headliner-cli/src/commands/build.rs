use std::path::PathBuf;

use anyhow::Result;

use headliner_core::{
    load_countries,
    news::{HeadlineAggregator, NewsApiClient},
    site::{write_news_data, NewsData},
    AppConfig,
};

pub async fn run(config: &AppConfig, out: Option<PathBuf>) -> Result<()> {
    let countries = load_countries(&config.countries_path())?;
    println!("Fetching headlines for {} countries...", countries.len());

    let aggregator = HeadlineAggregator::new(NewsApiClient::new(&config.news)?);
    let feed = aggregator.aggregate(&countries).await;

    let failed: Vec<String> = feed.failed_countries().iter().map(|c| c.to_string()).collect();
    let data = NewsData::new(&countries, feed);

    let data_dir = out.unwrap_or_else(|| config.data_dir());
    let path = write_news_data(&data, &data_dir).await?;

    println!("Wrote {} articles to {}", data.articles.len(), path.display());
    if !failed.is_empty() {
        println!("Failed countries: {}", failed.join(", "));
    }

    Ok(())
}
