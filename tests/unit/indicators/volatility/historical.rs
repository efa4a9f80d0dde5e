//! Unit tests for annualized volatility

use equitypath::indicators::volatility::{
    calculate_annualized_volatility, daily_from_annualized, VolatilityTier,
};

use crate::helpers::{assert_close, flat_closes, random_walk};

#[test]
fn test_volatility_short_series_is_zero() {
    assert_eq!(calculate_annualized_volatility(&[]), 0.0);
    assert_eq!(calculate_annualized_volatility(&[100.0]), 0.0);
}

#[test]
fn test_volatility_flat_series_is_zero() {
    assert_eq!(calculate_annualized_volatility(&flat_closes(30, 100.0)), 0.0);
}

#[test]
fn test_volatility_alternating_returns() {
    // Log returns alternate +r / -r, population std is r
    let up = 1.01f64;
    let prices = [100.0, 100.0 * up, 100.0, 100.0 * up, 100.0];
    let expected = up.ln() * 252f64.sqrt() * 100.0;
    assert_close(calculate_annualized_volatility(&prices), expected, 1e-9);
}

#[test]
fn test_volatility_is_non_negative() {
    for seed in 0..10 {
        assert!(calculate_annualized_volatility(&random_walk(40, seed)) >= 0.0);
    }
}

#[test]
fn test_daily_from_annualized_round_trip() {
    let annualized = 31.75;
    assert_close(daily_from_annualized(annualized) * 252f64.sqrt() * 100.0, annualized, 1e-9);
}

#[test]
fn test_volatility_tiers() {
    assert_eq!(VolatilityTier::classify(55.0), VolatilityTier::High);
    assert_eq!(VolatilityTier::classify(25.0), VolatilityTier::Moderate);
    assert_eq!(VolatilityTier::classify(5.0).label(), "low");
}
