use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::countries::CountryCode;

/// Headline record exactly as returned by the news API.
///
/// The upstream object is kept as-is: no field is required or type-checked,
/// and serializing it yields the same JSON that was received. Accessors read
/// the common NewsAPI keys and return `None` when a key is absent or not a
/// string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Article(Map<String, Value>);

impl Article {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw value of any upstream field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn url(&self) -> Option<&str> {
        self.str_field("url")
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    pub fn author(&self) -> Option<&str> {
        self.str_field("author")
    }

    pub fn published_at(&self) -> Option<&str> {
        self.str_field("publishedAt")
    }

    /// Publisher name: `source.name`, or `source` itself when it is a string
    pub fn source_name(&self) -> Option<&str> {
        match self.0.get("source")? {
            Value::String(name) => Some(name),
            Value::Object(source) => source.get("name").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Title for display, falling back to the URL
    pub fn display_title(&self) -> &str {
        self.title().or(self.url()).unwrap_or("(untitled)")
    }
}

impl From<Map<String, Value>> for Article {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Envelope of a top-headlines response.
/// Articles stay untyped here so one odd entry cannot fail the whole list.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HeadlinesResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub articles: Option<Vec<Value>>,
}

/// What a single per-country request produced
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Fetched(Vec<Article>),
    /// Request failed; contributes no articles
    Failed(String),
}

impl FetchOutcome {
    pub fn articles(&self) -> &[Article] {
        match self {
            FetchOutcome::Fetched(articles) => articles,
            FetchOutcome::Failed(_) => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}

/// Result of one country's request
#[derive(Debug, Clone, PartialEq)]
pub struct CountryHeadlines {
    pub country: CountryCode,
    pub outcome: FetchOutcome,
}

/// Flattened feed of every country's headlines, in country order
#[derive(Debug, Clone, Default)]
pub struct AggregatedFeed {
    entries: Vec<(CountryCode, Article)>,
    failed: Vec<CountryCode>,
}

impl AggregatedFeed {
    /// Concatenate per-country results in the order given
    pub fn from_results(results: Vec<CountryHeadlines>) -> Self {
        let mut feed = Self::default();

        for result in results {
            match result.outcome {
                FetchOutcome::Fetched(articles) => {
                    let country = result.country;
                    feed.entries
                        .extend(articles.into_iter().map(|a| (country.clone(), a)));
                }
                FetchOutcome::Failed(_) => feed.failed.push(result.country),
            }
        }

        feed
    }

    /// Articles without provenance
    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.entries.iter().map(|(_, article)| article)
    }

    pub fn into_articles(self) -> Vec<Article> {
        self.entries.into_iter().map(|(_, article)| article).collect()
    }

    /// Articles paired with the country they were fetched for
    pub fn tagged(&self) -> &[(CountryCode, Article)] {
        &self.entries
    }

    /// Countries whose request failed
    pub fn failed_countries(&self) -> &[CountryCode] {
        &self.failed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
