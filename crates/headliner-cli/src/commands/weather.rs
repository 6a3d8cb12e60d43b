use anyhow::Result;

use headliner_core::{weather::WeatherClient, AppConfig};

pub async fn run(config: &AppConfig, lat: f64, lon: f64) -> Result<()> {
    let client = WeatherClient::new(&config.weather)?;
    let report = client.current(lat, lon).await?;

    println!("{}", report.name.as_deref().unwrap_or("(unknown location)"));
    if let Some(temp) = report.temperature() {
        println!("  {} {}", temp, unit_suffix(&config.weather.units));
    }
    if let Some(condition) = report.condition() {
        println!("  {}", condition.main.as_deref().unwrap_or("-"));
        if let Some(description) = &condition.description {
            println!("  {}", description);
        }
    }

    Ok(())
}

fn unit_suffix(units: &str) -> &'static str {
    match units {
        "metric" => "°C",
        "imperial" => "°F",
        _ => "K",
    }
}
