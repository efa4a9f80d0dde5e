//! Unit tests for Bollinger Bands

use equitypath::indicators::volatility::{
    bollinger_position, calculate_bollinger_bands, calculate_bollinger_bands_default, BandPosition,
};
use equitypath::models::BollingerBands;

use crate::helpers::{assert_close, flat_closes, random_walk};

#[test]
fn test_bollinger_flat_series_collapses() {
    let bands = calculate_bollinger_bands_default(&flat_closes(30, 100.0));
    assert_eq!(bands.upper, 100.0);
    assert_eq!(bands.middle, 100.0);
    assert_eq!(bands.lower, 100.0);
    assert_eq!(bollinger_position(100.0, &bands), 0.5);
}

#[test]
fn test_bollinger_population_std() {
    // Window of 2,4,4,4,5,5,7,9: mean 5, population std 2
    let prices = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let bands = calculate_bollinger_bands(&prices, 8, 2.0);
    assert_close(bands.middle, 5.0, 1e-12);
    assert_close(bands.upper, 9.0, 1e-12);
    assert_close(bands.lower, 1.0, 1e-12);
}

#[test]
fn test_bollinger_bands_are_ordered_and_symmetric() {
    for seed in 0..10 {
        let bands = calculate_bollinger_bands_default(&random_walk(45, seed));
        assert!(bands.upper >= bands.middle);
        assert!(bands.middle >= bands.lower);
        assert_close(bands.upper - bands.middle, bands.middle - bands.lower, 1e-9);
    }
}

#[test]
fn test_bollinger_position_classification() {
    let bands = BollingerBands {
        upper: 110.0,
        middle: 100.0,
        lower: 90.0,
    };
    assert_close(bollinger_position(108.0, &bands), 0.9, 1e-12);
    assert_eq!(BandPosition::classify(bollinger_position(108.0, &bands)), BandPosition::NearUpper);
    assert_eq!(BandPosition::classify(bollinger_position(91.0, &bands)), BandPosition::NearLower);
    assert_eq!(BandPosition::classify(bollinger_position(100.0, &bands)), BandPosition::WithinRange);
}
