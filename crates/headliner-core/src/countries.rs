use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Country identifier passed verbatim to the news endpoint (e.g. "us", "gb")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Trim and validate a user-supplied code; blank codes are rejected
    pub fn parse(code: &str) -> Result<Self> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(Error::Countries("Empty country code".to_string()));
        }
        Ok(Self::new(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CountryCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Load the ordered country list from a JSON array of strings.
/// Blank entries are rejected; order is preserved as written.
pub fn load_countries(path: &Path) -> Result<Vec<CountryCode>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Countries(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_countries(&content)
}

/// Parse a JSON array of country codes
pub fn parse_countries(content: &str) -> Result<Vec<CountryCode>> {
    let codes: Vec<String> = serde_json::from_str(content)
        .map_err(|e| Error::Countries(format!("Expected a JSON array of strings: {}", e)))?;

    codes.iter().map(|code| CountryCode::parse(code)).collect()
}
