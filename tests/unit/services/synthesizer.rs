//! Unit tests for the synthetic market generator

use chrono::Datelike;
use equitypath::services::catalog;
use equitypath::services::MarketSynthesizer;
use equitypath::EngineError;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::helpers::end_date;

#[test]
fn test_generates_days_plus_one_points() {
    let mut rng = StdRng::seed_from_u64(1);
    let series = MarketSynthesizer::generate("AAPL", 30, end_date(), &mut rng).unwrap();
    assert_eq!(series.len(), 31);
    assert_eq!(series.last().date, end_date());
}

#[test]
fn test_zero_days_is_rejected() {
    let mut rng = StdRng::seed_from_u64(1);
    let result = MarketSynthesizer::generate("AAPL", 0, end_date(), &mut rng);
    assert_eq!(result.unwrap_err(), EngineError::InvalidHorizon(0));
}

#[test]
fn test_points_are_consistent_and_chained() {
    for symbol in ["AAPL", "BTC", "SPY", "UNKNOWN"] {
        let mut rng = StdRng::seed_from_u64(99);
        let series = MarketSynthesizer::generate(symbol, 120, end_date(), &mut rng).unwrap();
        let points = series.points();

        assert!(points.iter().all(|p| p.is_consistent()), "{}", symbol);
        assert!(points.iter().all(|p| p.volume > 0), "{}", symbol);
        for pair in points.windows(2) {
            assert_eq!(pair[1].open, pair[0].close);
            assert_eq!((pair[1].date - pair[0].date).num_days(), 1);
        }
    }
}

#[test]
fn test_first_open_is_base_price() {
    let mut rng = StdRng::seed_from_u64(5);
    let series = MarketSynthesizer::generate("msft", 10, end_date(), &mut rng).unwrap();
    assert_eq!(series.points()[0].open, catalog::profile_for("MSFT").base_price);
}

#[test]
fn test_same_seed_same_series() {
    let mut first = StdRng::seed_from_u64(7);
    let mut second = StdRng::seed_from_u64(7);
    let a = MarketSynthesizer::generate("NVDA", 60, end_date(), &mut first).unwrap();
    let b = MarketSynthesizer::generate("NVDA", 60, end_date(), &mut second).unwrap();
    assert_eq!(a, b);

    let mut other = StdRng::seed_from_u64(8);
    let c = MarketSynthesizer::generate("NVDA", 60, end_date(), &mut other).unwrap();
    assert_ne!(a, c);
}

#[test]
fn test_weekend_volume_is_lighter() {
    let mut rng = StdRng::seed_from_u64(3);
    let series = MarketSynthesizer::generate("AAPL", 200, end_date(), &mut rng).unwrap();

    let (weekend, weekday): (Vec<_>, Vec<_>) = series
        .points()
        .iter()
        .partition(|p| p.date.weekday().num_days_from_monday() >= 5);

    let avg = |points: &[&equitypath::PricePoint]| {
        points.iter().map(|p| p.volume as f64).sum::<f64>() / points.len() as f64
    };
    assert!(avg(&weekend) < avg(&weekday));
}

#[test]
fn test_generate_today_ends_today() {
    let mut rng = StdRng::seed_from_u64(2);
    let series = MarketSynthesizer::generate_today("ETH", 5, &mut rng).unwrap();
    assert_eq!(series.len(), 6);
    assert_eq!(series.last().date, chrono::Utc::now().date_naive());
}
