use futures::future::join_all;

use super::client::HeadlineSource;
use super::models::{AggregatedFeed, CountryHeadlines, FetchOutcome};
use crate::countries::CountryCode;

/// Fans out one headline request per country and joins them into one feed.
///
/// Every request is started before any is awaited, and the join completes
/// only once all of them have settled. A failed country is logged and
/// contributes nothing; it never fails the batch.
pub struct HeadlineAggregator<S> {
    source: S,
}

impl<S: HeadlineSource> HeadlineAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch every country concurrently; results are in input order
    pub async fn collect(&self, countries: &[CountryCode]) -> Vec<CountryHeadlines> {
        let requests = countries.iter().map(|country| async move {
            let outcome = match self.source.fetch_headlines(country).await {
                Ok(articles) => FetchOutcome::Fetched(articles),
                Err(e) => {
                    tracing::error!(%country, error = %e, "Failed to fetch headlines");
                    FetchOutcome::Failed(e.to_string())
                }
            };

            CountryHeadlines {
                country: country.clone(),
                outcome,
            }
        });

        let results = join_all(requests).await;

        let summary: Vec<String> = results
            .iter()
            .map(|r| match &r.outcome {
                FetchOutcome::Fetched(articles) => format!("{}={}", r.country, articles.len()),
                FetchOutcome::Failed(_) => format!("{}=failed", r.country),
            })
            .collect();
        tracing::info!(results = ?summary, "Headline batch complete");

        results
    }

    /// Fetch every country and flatten the articles in country order
    pub async fn aggregate(&self, countries: &[CountryCode]) -> AggregatedFeed {
        AggregatedFeed::from_results(self.collect(countries).await)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::news::Article;
    use crate::{Error, Result};

    /// Returns `n` articles titled "<country>-<i>", or an error, per country
    struct StubSource {
        responses: HashMap<String, std::result::Result<usize, String>>,
        delays: HashMap<String, Duration>,
    }

    impl StubSource {
        fn new(responses: &[(&str, std::result::Result<usize, &str>)]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(c, r)| (c.to_string(), r.map_err(str::to_string)))
                    .collect(),
                delays: HashMap::new(),
            }
        }

        fn with_delay(mut self, country: &str, delay: Duration) -> Self {
            self.delays.insert(country.to_string(), delay);
            self
        }
    }

    #[async_trait::async_trait]
    impl HeadlineSource for StubSource {
        async fn fetch_headlines(&self, country: &CountryCode) -> Result<Vec<Article>> {
            if let Some(delay) = self.delays.get(country.as_str()) {
                tokio::time::sleep(*delay).await;
            }

            match self.responses.get(country.as_str()) {
                Some(Ok(n)) => Ok((0..*n)
                    .map(|i| {
                        let mut fields = serde_json::Map::new();
                        fields.insert("title".into(), format!("{}-{}", country, i).into());
                        Article::new(fields)
                    })
                    .collect()),
                Some(Err(msg)) => Err(Error::Other(msg.clone())),
                None => Err(Error::Other(format!("no stub for {}", country))),
            }
        }
    }

    fn codes(list: &[&str]) -> Vec<CountryCode> {
        list.iter().map(|c| CountryCode::from(*c)).collect()
    }

    fn titles(feed: &AggregatedFeed) -> Vec<String> {
        feed.articles().map(|a| a.display_title().to_string()).collect()
    }

    #[tokio::test]
    async fn test_concatenates_in_country_order() {
        let aggregator = HeadlineAggregator::new(StubSource::new(&[("us", Ok(2)), ("gb", Ok(3))]));
        let feed = aggregator.aggregate(&codes(&["us", "gb"])).await;

        assert_eq!(feed.len(), 5);
        assert_eq!(titles(&feed), vec!["us-0", "us-1", "gb-0", "gb-1", "gb-2"]);
        assert!(feed.failed_countries().is_empty());
    }

    #[tokio::test]
    async fn test_one_failure_is_dropped() {
        let aggregator = HeadlineAggregator::new(StubSource::new(&[
            ("us", Ok(2)),
            ("gb", Err("connection reset")),
        ]));
        let feed = aggregator.aggregate(&codes(&["us", "gb"])).await;

        assert_eq!(titles(&feed), vec!["us-0", "us-1"]);
        assert_eq!(feed.failed_countries(), &codes(&["gb"])[..]);
    }

    #[tokio::test]
    async fn test_all_failures_yield_empty_feed() {
        let aggregator = HeadlineAggregator::new(StubSource::new(&[
            ("us", Err("boom")),
            ("gb", Err("boom")),
        ]));
        let feed = aggregator.aggregate(&codes(&["us", "gb"])).await;

        assert!(feed.is_empty());
        assert_eq!(feed.failed_countries().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_country_keeps_relative_order() {
        let aggregator = HeadlineAggregator::new(StubSource::new(&[
            ("us", Ok(1)),
            ("de", Ok(0)),
            ("gb", Ok(1)),
        ]));
        let feed = aggregator.aggregate(&codes(&["us", "de", "gb"])).await;

        assert_eq!(titles(&feed), vec!["us-0", "gb-0"]);
    }

    #[tokio::test]
    async fn test_length_is_sum_of_results() {
        let aggregator = HeadlineAggregator::new(StubSource::new(&[
            ("us", Ok(5)),
            ("gb", Ok(0)),
            ("fr", Err("503")),
            ("jp", Ok(4)),
        ]));
        let countries = codes(&["us", "gb", "fr", "jp"]);
        let results = aggregator.collect(&countries).await;

        let expected: usize = results.iter().map(|r| r.outcome.articles().len()).sum();
        let feed = AggregatedFeed::from_results(results);
        assert_eq!(feed.len(), expected);
        assert_eq!(feed.len(), 9);
    }

    #[tokio::test]
    async fn test_collect_reports_outcome_per_country() {
        let aggregator = HeadlineAggregator::new(StubSource::new(&[
            ("us", Ok(1)),
            ("gb", Err("dns failure")),
        ]));
        let results = aggregator.collect(&codes(&["us", "gb"])).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].country, CountryCode::from("us"));
        assert!(!results[0].outcome.is_failed());
        assert_eq!(
            results[1].outcome,
            FetchOutcome::Failed("dns failure".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_input() {
        let aggregator = HeadlineAggregator::new(StubSource::new(&[]));
        assert!(aggregator.aggregate(&[]).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_run_concurrently() {
        let delay = Duration::from_millis(100);
        let source = StubSource::new(&[("us", Ok(1)), ("gb", Ok(1)), ("fr", Ok(1))])
            .with_delay("us", delay)
            .with_delay("gb", delay)
            .with_delay("fr", delay);
        let aggregator = HeadlineAggregator::new(source);

        let start = tokio::time::Instant::now();
        let feed = aggregator.aggregate(&codes(&["us", "gb", "fr"])).await;

        assert_eq!(feed.len(), 3);
        assert!(start.elapsed() < delay * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_follows_input_not_completion() {
        let source = StubSource::new(&[("us", Ok(1)), ("gb", Ok(1))])
            .with_delay("us", Duration::from_millis(300))
            .with_delay("gb", Duration::from_millis(10));
        let aggregator = HeadlineAggregator::new(source);

        let feed = aggregator.aggregate(&codes(&["us", "gb"])).await;
        assert_eq!(titles(&feed), vec!["us-0", "gb-0"]);
    }

    /// Collects formatted log output in memory
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn lines(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock().unwrap())
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    #[tokio::test]
    async fn test_logs_one_error_per_failure_and_one_batch_line() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let aggregator = HeadlineAggregator::new(StubSource::new(&[
            ("us", Ok(2)),
            ("gb", Err("connection reset")),
        ]));
        let feed = aggregator.aggregate(&codes(&["us", "gb"])).await;
        assert_eq!(feed.len(), 2);

        let lines = logs.lines();
        let errors: Vec<&String> = lines.iter().filter(|l| l.contains("ERROR")).collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("country=gb"));
        assert!(errors[0].contains("connection reset"));

        let batches = lines
            .iter()
            .filter(|l| l.contains("Headline batch complete"))
            .count();
        assert_eq!(batches, 1);
    }

    #[tokio::test]
    async fn test_tagged_keeps_provenance() {
        let aggregator = HeadlineAggregator::new(StubSource::new(&[("us", Ok(1)), ("gb", Ok(2))]));
        let feed = aggregator.aggregate(&codes(&["us", "gb"])).await;

        let countries: Vec<&str> = feed.tagged().iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(countries, vec!["us", "gb", "gb"]);
    }
}
