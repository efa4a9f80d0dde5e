//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod market;
pub mod prediction;

pub use indicators::{BollingerBands, MacdIndicator, SupportResistance, TechnicalIndicators};
pub use market::{AssetClass, AssetData, AssetProfile, PricePoint, PriceSeries};
pub use prediction::{Prediction, PredictionSource, PriceTargets, Trend};
