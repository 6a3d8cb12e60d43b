pub mod config;
pub mod countries;
pub mod error;
mod http;
pub mod news;
pub mod site;
pub mod weather;

pub use config::AppConfig;
pub use countries::{load_countries, CountryCode};
pub use error::{Error, Result};
