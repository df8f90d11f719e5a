use std::future::Future;

use crate::candle::Candle;
use crate::error::EngineError;
use crate::timeframe::Timeframe;

/// Source of OHLCV history. The orchestrator only ever asks for the most
/// recent window of candles for one instrument at one resolution, so that is
/// the whole contract. Implementations must return candles in strictly
/// ascending time order.
pub trait CandleProvider: Send + Sync {
    fn fetch_candles(
        &self,
        instrument: &str,
        timeframe: Timeframe,
    ) -> impl Future<Output = Result<Vec<Candle>, EngineError>> + Send;
}
