use std::path::Path;

use anyhow::Result;

use headliner_core::AppConfig;

pub fn run(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    AppConfig::default().save(config_path)?;
    println!("Wrote default config to {}", config_path.display());
    println!("Set NEWS_API_KEY and WEATHER_API_KEY, or edit the [news] and [weather] sections.");

    Ok(())
}
