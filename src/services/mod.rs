//! Data and analysis services around the engine.

pub mod analysis;
pub mod catalog;
pub mod forecast;
pub mod market_data;
pub mod synthesizer;

pub use analysis::{AnalysisProvider, AnalysisRequest, FallbackAnalyzer, LocalHeuristicAnalyzer, RemoteAnalyzer};
pub use forecast::ForecastService;
pub use market_data::{FallbackMarketData, HttpMarketData, MarketDataProvider, SyntheticMarketData};
pub use synthesizer::MarketSynthesizer;
