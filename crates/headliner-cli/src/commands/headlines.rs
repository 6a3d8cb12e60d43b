use anyhow::Result;

use headliner_core::{
    load_countries,
    news::{HeadlineAggregator, NewsApiClient},
    AppConfig, CountryCode,
};

pub async fn run(config: &AppConfig, countries: Vec<String>, tagged: bool) -> Result<()> {
    let countries: Vec<CountryCode> = if countries.is_empty() {
        load_countries(&config.countries_path())?
    } else {
        countries
            .iter()
            .map(|c| CountryCode::parse(c))
            .collect::<headliner_core::Result<Vec<_>>>()?
    };

    let aggregator = HeadlineAggregator::new(NewsApiClient::new(&config.news)?);
    let feed = aggregator.aggregate(&countries).await;

    if feed.is_empty() {
        println!("No headlines fetched.");
    }

    if tagged {
        for (country, article) in feed.tagged() {
            println!("[{}] {}", country, article.display_title());
        }
    } else {
        for article in feed.articles() {
            println!("{}", article.display_title());
            if let Some(url) = article.url() {
                println!("    {}", url);
            }
        }
    }

    for country in feed.failed_countries() {
        println!("Warning: no headlines for '{}' (request failed)", country);
    }

    Ok(())
}
