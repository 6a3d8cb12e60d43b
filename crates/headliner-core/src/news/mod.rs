mod aggregator;
mod client;
mod models;

pub use aggregator::HeadlineAggregator;
pub use client::{parse_articles, HeadlineSource, NewsApiClient};
pub use models::{AggregatedFeed, Article, CountryHeadlines, FetchOutcome};
