use anyhow::Result;

use headliner_core::{load_countries, AppConfig};

pub fn run(config: &AppConfig) -> Result<()> {
    let path = config.countries_path();
    let countries = load_countries(&path)?;

    println!("Countries ({}) from {}:\n", countries.len(), path.display());
    for country in &countries {
        println!("  {}", country);
    }

    Ok(())
}
