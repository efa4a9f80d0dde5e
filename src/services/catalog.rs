//! Known assets and their simulation profiles.

use crate::models::market::{AssetClass, AssetData, AssetProfile, PriceSeries};

const EQUITY_WEEKDAYS: [f64; 7] = [-0.0005, 0.0002, 0.0003, 0.0001, 0.0004, 0.0, 0.0];
const CRYPTO_WEEKDAYS: [f64; 7] = [0.0005, 0.0003, 0.0002, 0.0, 0.0004, -0.0003, -0.0002];

/// Profile used for symbols the catalog does not know.
pub static DEFAULT_PROFILE: AssetProfile = AssetProfile {
    base_price: 100.0,
    volatility: 0.02,
    trend_strength: 0.001,
    mean_reversion: 0.05,
    intraday_range: 0.015,
    weekday_effects: EQUITY_WEEKDAYS,
    base_volume: 1_000_000,
};

#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub symbol: &'static str,
    pub name: &'static str,
    pub asset_class: AssetClass,
    pub profile: AssetProfile,
}

const fn equity(
    symbol: &'static str,
    name: &'static str,
    base_price: f64,
    volatility: f64,
    trend_strength: f64,
    base_volume: u64,
) -> CatalogEntry {
    CatalogEntry {
        symbol,
        name,
        asset_class: AssetClass::Stock,
        profile: AssetProfile {
            base_price,
            volatility,
            trend_strength,
            mean_reversion: 0.05,
            intraday_range: 0.015,
            weekday_effects: EQUITY_WEEKDAYS,
            base_volume,
        },
    }
}

pub const CATALOG: &[CatalogEntry] = &[
    equity("AAPL", "Apple Inc.", 190.0, 0.018, 0.0012, 55_000_000),
    equity("MSFT", "Microsoft Corporation", 410.0, 0.016, 0.0010, 22_000_000),
    equity("GOOGL", "Alphabet Inc.", 165.0, 0.019, 0.0011, 25_000_000),
    equity("AMZN", "Amazon.com, Inc.", 180.0, 0.021, 0.0012, 40_000_000),
    equity("NVDA", "NVIDIA Corporation", 120.0, 0.032, 0.0020, 300_000_000),
    equity("TSLA", "Tesla, Inc.", 240.0, 0.035, 0.0015, 95_000_000),
    equity("META", "Meta Platforms, Inc.", 500.0, 0.024, 0.0013, 15_000_000),
    equity("NFLX", "Netflix, Inc.", 650.0, 0.025, 0.0010, 4_000_000),
    equity("JPM", "JPMorgan Chase & Co.", 200.0, 0.014, 0.0006, 9_000_000),
    CatalogEntry {
        symbol: "SPY",
        name: "SPDR S&P 500 ETF Trust",
        asset_class: AssetClass::Etf,
        profile: AssetProfile {
            base_price: 540.0,
            volatility: 0.009,
            trend_strength: 0.0006,
            mean_reversion: 0.08,
            intraday_range: 0.008,
            weekday_effects: EQUITY_WEEKDAYS,
            base_volume: 60_000_000,
        },
    },
    CatalogEntry {
        symbol: "QQQ",
        name: "Invesco QQQ Trust",
        asset_class: AssetClass::Etf,
        profile: AssetProfile {
            base_price: 470.0,
            volatility: 0.012,
            trend_strength: 0.0008,
            mean_reversion: 0.07,
            intraday_range: 0.01,
            weekday_effects: EQUITY_WEEKDAYS,
            base_volume: 40_000_000,
        },
    },
    CatalogEntry {
        symbol: "BTC",
        name: "Bitcoin",
        asset_class: AssetClass::Crypto,
        profile: AssetProfile {
            base_price: 65_000.0,
            volatility: 0.04,
            trend_strength: 0.002,
            mean_reversion: 0.03,
            intraday_range: 0.03,
            weekday_effects: CRYPTO_WEEKDAYS,
            base_volume: 30_000,
        },
    },
    CatalogEntry {
        symbol: "ETH",
        name: "Ethereum",
        asset_class: AssetClass::Crypto,
        profile: AssetProfile {
            base_price: 3_200.0,
            volatility: 0.045,
            trend_strength: 0.002,
            mean_reversion: 0.03,
            intraday_range: 0.035,
            weekday_effects: CRYPTO_WEEKDAYS,
            base_volume: 400_000,
        },
    },
];

/// Uppercased, trimmed form used for every lookup.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}

pub fn lookup(symbol: &str) -> Option<&'static CatalogEntry> {
    let symbol = normalize_symbol(symbol);
    CATALOG.iter().find(|entry| entry.symbol == symbol)
}

/// Profile for `symbol`, falling back to [`DEFAULT_PROFILE`].
pub fn profile_for(symbol: &str) -> &'static AssetProfile {
    lookup(symbol)
        .map(|entry| &entry.profile)
        .unwrap_or(&DEFAULT_PROFILE)
}

/// Quote-style summary of the last two points of `series`.
pub fn asset_data(entry: &CatalogEntry, series: &PriceSeries) -> AssetData {
    let latest = series.last();
    let points = series.points();
    let previous_close = if points.len() >= 2 {
        points[points.len() - 2].close
    } else {
        latest.open
    };
    let change = latest.close - previous_close;

    AssetData {
        symbol: entry.symbol.to_string(),
        name: entry.name.to_string(),
        asset_class: entry.asset_class,
        price: latest.close,
        change,
        change_percent: change / previous_close * 100.0,
        open: latest.open,
        high: latest.high,
        low: latest.low,
        previous_close,
        volume: latest.volume,
    }
}
