pub mod analyze;
pub mod binance;
pub mod candle;
pub mod config;
pub mod confluence;
pub mod enrich;
pub mod error;
pub mod indicators;
pub mod levels;
pub mod provider;
pub mod risk;
pub mod signal;
pub mod timeframe;
pub mod trend;
