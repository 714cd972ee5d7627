// Small utility: quote a bag combination for a required mass without starting the HTTP server.
//
// Usage:
//   cargo run --bin quote_bags -- <required_kg> [wastage|cost|--fallback] [catalog.json|catalog.csv]
//
// Without a catalog path the SOIL_BAG_CATALOG / built-in seed is used.

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use soil_calculator::app::AppState;
use soil_calculator::config::AppConfig;
use soil_calculator::domain::types::OptimizeObjective;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);

    let required_kg = args
        .next()
        .ok_or("usage: quote_bags <required_kg> [wastage|cost|--fallback] [catalog path]")?;
    let required_kg = Decimal::from_str(required_kg.trim())?;

    let mode = args.next().unwrap_or_else(|| "wastage".to_string());

    let mut config = AppConfig::from_env()?;
    if let Some(path) = args.next().filter(|s| !s.trim().is_empty()) {
        config.bag_catalog_path = Some(PathBuf::from(path));
    }

    let state = AppState::new(config)?;
    let api = &state.calculator_api;

    let result = if mode == "--fallback" {
        api.quote_fallback(required_kg).await?
    } else {
        let objective = OptimizeObjective::from_str(&mode)?;
        api.quote(required_kg, objective).await?
    };

    for entry in &result.entries {
        println!(
            "{:>6} x {:<24} {:>10} kg  £{}",
            entry.count,
            entry.bag.name,
            entry.subtotal_weight_kg(),
            entry.subtotal_cost()
        );
    }
    println!("total_weight_kg={}", result.total_weight_kg);
    println!("total_cost={}", result.total_cost);
    println!("wastage_kg={}", result.wastage_kg);
    println!("wastage_percent={}", result.wastage_percent);
    Ok(())
}
