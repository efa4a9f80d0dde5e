//! Command-line forecast.
//!
//! Usage: `equitypath [SYMBOL] [HORIZON_DAYS]`

use dotenvy::dotenv;
use equitypath::config::Config;
use equitypath::logging;
use equitypath::models::Prediction;
use equitypath::services::ForecastService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_cli_logging();

    let config = Config::from_env()?;
    let mut args = std::env::args().skip(1);
    let symbol = args.next().unwrap_or_else(|| "AAPL".to_string());
    let days = match args.next() {
        Some(days) => days.parse::<u32>()?,
        None => config.default_horizon_days,
    };

    let service = ForecastService::from_config(&config, None)?;

    match service.search_asset(&symbol).await {
        Some(asset) => println!(
            "{} ({}): ${:.2} ({:+.2}%)",
            asset.name, asset.symbol, asset.price, asset.change_percent
        ),
        None => println!("{}: not in catalog, using default profile", symbol),
    }
    println!();

    let prediction = service.forecast(&symbol, days).await?;
    print_prediction(&prediction);

    Ok(())
}

fn print_prediction(prediction: &Prediction) {
    let factors = &prediction.technical_factors;
    println!("Forecast for {} ({} days):", prediction.symbol, prediction.timeframe);
    println!("  Source: {:?}", prediction.source);
    println!("  Current: ${:.2}", prediction.current_price);
    println!(
        "  Predicted: ${:.2} ({:+.2}%)",
        prediction.predicted_price, prediction.change_percent
    );
    println!("  Trend: {}", prediction.trend.as_str());
    println!("  Confidence: {:.0}%", prediction.confidence);
    println!(
        "  Support / Resistance: ${:.2} / ${:.2}",
        prediction.support_level, prediction.resistance_level
    );
    println!(
        "  Targets: conservative ${:.2}, moderate ${:.2}, aggressive ${:.2}",
        prediction.price_targets.conservative,
        prediction.price_targets.moderate,
        prediction.price_targets.aggressive
    );
    println!("  Indicators:");
    println!("    RSI: {:.2}", factors.rsi);
    println!(
        "    MACD: {:.4} / signal {:.4} / histogram {:.4}",
        factors.macd.macd, factors.macd.signal, factors.macd.histogram
    );
    println!("    SMA20 / SMA50: {:.2} / {:.2}", factors.sma20, factors.sma50);
    println!("    EMA12 / EMA26: {:.2} / {:.2}", factors.ema12, factors.ema26);
    println!(
        "    Bollinger: {:.2} / {:.2} / {:.2}",
        factors.bollinger_bands.upper, factors.bollinger_bands.middle, factors.bollinger_bands.lower
    );
    println!("    Volatility: {:.2}%", factors.volatility);
    println!();
    println!("{}", prediction.explanation);
}
