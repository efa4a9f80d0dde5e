//! Unit tests for EMA indicator

use equitypath::indicators::trend::{calculate_ema, check_ema_cross, ema_series};

use crate::helpers::{assert_close, linear_closes};

#[test]
fn test_ema_empty_is_zero() {
    assert_eq!(calculate_ema(&[], 12), 0.0);
    assert!(ema_series(&[], 12).is_empty());
}

#[test]
fn test_ema_seeded_with_first_price() {
    assert_eq!(calculate_ema(&[42.0], 12), 42.0);
}

#[test]
fn test_ema_recurrence() {
    // period 3: multiplier 0.5
    let prices = [10.0, 20.0, 30.0];
    let series = ema_series(&prices, 3);
    assert_eq!(series, vec![10.0, 15.0, 22.5]);
    assert_eq!(calculate_ema(&prices, 3), 22.5);
}

#[test]
fn test_ema_lags_rising_prices() {
    let prices = linear_closes(100.0, 150.0, 50);
    let ema = calculate_ema(&prices, 12);
    assert!(ema < 150.0);
    assert!(ema > 100.0);
    assert_close(calculate_ema(&prices, 1), 150.0, 1e-12);
}

#[test]
fn test_ema_cross() {
    let rising = linear_closes(100.0, 150.0, 50);
    assert_eq!(check_ema_cross(&rising, 12, 26), 1);

    let falling: Vec<f64> = rising.iter().rev().copied().collect();
    assert_eq!(check_ema_cross(&falling, 12, 26), -1);

    assert_eq!(check_ema_cross(&[100.0; 30], 12, 26), 0);
}
