pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sar;
pub mod vwap;

pub use atr::atr;
pub use bollinger::{bollinger_bands, BbPoint};
pub use ema::ema;
pub use macd::{macd, MacdOutput};
pub use obv::obv;
pub use rsi::rsi;
pub use sar::parabolic_sar;
pub use vwap::vwap;

use crate::candle::Candle;

/// Anything with a closing value. Close-driven indicators (EMA, RSI, MACD,
/// Bollinger) are generic over this so that derived series — e.g. the MACD
/// line fed back through `ema` for the signal line — don't need fake OHLC
/// fields.
pub trait ClosePrice {
    fn close_price(&self) -> f64;
}

impl ClosePrice for f64 {
    fn close_price(&self) -> f64 {
        *self
    }
}

impl ClosePrice for Candle {
    fn close_price(&self) -> f64 {
        self.close
    }
}
