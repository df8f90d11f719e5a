use serde_json::Value;
use std::time::Duration;

use crate::candle::Candle;
use crate::error::EngineError;
use crate::provider::CandleProvider;
use crate::timeframe::Timeframe;

const DEFAULT_BASE_URL: &str = "https://api.binance.com";
/// Bars requested per klines call. 500 leaves headroom over the 200-bar
/// analysis minimum even when the venue trims the window.
const KLINE_LIMIT: u32 = 500;
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Spot-market REST provider backed by the Binance klines endpoint.
pub struct BinanceProvider {
    client: reqwest::Client,
    base_url: String,
}

/// One tradable instrument from the exchange listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub symbol: String,
    pub base_asset: String,
    pub quote_asset: String,
}

impl BinanceProvider {
    /// Builds the HTTP client with the request timeout attached; a builder
    /// failure is surfaced rather than silently dropping the timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| EngineError::Config(format!("build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn mainnet() -> Result<Self, EngineError> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Actively trading USDT-quoted spot symbols, in listing order.
    pub async fn top_symbols(&self) -> Result<Vec<SymbolInfo>, EngineError> {
        let url = format!("{}/api/v3/exchangeInfo", self.base_url);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(EngineError::Fetch(format!("exchangeInfo HTTP {status}")));
        }
        let body: Value = resp.json().await?;
        let symbols = body
            .get("symbols")
            .and_then(Value::as_array)
            .ok_or_else(|| EngineError::Malformed("exchangeInfo missing symbols array".into()))?;

        let mut out = Vec::new();
        for entry in symbols {
            let trading = entry.get("status").and_then(Value::as_str) == Some("TRADING");
            let usdt = entry.get("quoteAsset").and_then(Value::as_str) == Some("USDT");
            if !(trading && usdt) {
                continue;
            }
            let (Some(symbol), Some(base_asset), Some(quote_asset)) = (
                entry.get("symbol").and_then(Value::as_str),
                entry.get("baseAsset").and_then(Value::as_str),
                entry.get("quoteAsset").and_then(Value::as_str),
            ) else {
                continue;
            };
            out.push(SymbolInfo {
                symbol: symbol.to_string(),
                base_asset: base_asset.to_string(),
                quote_asset: quote_asset.to_string(),
            });
        }
        Ok(out)
    }
}

impl CandleProvider for BinanceProvider {
    async fn fetch_candles(
        &self,
        instrument: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<Candle>, EngineError> {
        let url = format!("{}/api/v3/klines", self.base_url);
        let symbol = instrument.to_ascii_uppercase();
        let limit = KLINE_LIMIT.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol.as_str()),
                ("interval", timeframe.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(EngineError::Fetch(format!(
                "klines {instrument} {timeframe} HTTP {status}"
            )));
        }
        let body: Value = resp.json().await?;
        let rows = body
            .as_array()
            .ok_or_else(|| EngineError::Malformed("klines response is not an array".into()))?;

        let mut candles = Vec::with_capacity(rows.len());
        for row in rows {
            candles.push(parse_kline(row)?);
        }
        validate_ascending(&candles)?;
        tracing::debug!(
            instrument,
            timeframe = %timeframe,
            bars = candles.len(),
            "fetched klines"
        );
        Ok(candles)
    }
}

/// One kline row is a JSON array: open time (ms), then OHLC and volume as
/// decimal strings.
fn parse_kline(row: &Value) -> Result<Candle, EngineError> {
    let cells = row
        .as_array()
        .filter(|c| c.len() >= 6)
        .ok_or_else(|| EngineError::Malformed(format!("short kline row: {row}")))?;

    let time_ms = parse_i64(&cells[0])
        .ok_or_else(|| EngineError::Malformed(format!("bad kline open time: {}", cells[0])))?;
    let field = |idx: usize, name: &str| {
        parse_f64(&cells[idx])
            .ok_or_else(|| EngineError::Malformed(format!("bad kline {name}: {}", cells[idx])))
    };

    Ok(Candle {
        time: time_ms / 1000,
        open: field(1, "open")?,
        high: field(2, "high")?,
        low: field(3, "low")?,
        close: field(4, "close")?,
        volume: Some(field(5, "volume")?),
    })
}

fn validate_ascending(candles: &[Candle]) -> Result<(), EngineError> {
    for pair in candles.windows(2) {
        if pair[1].time <= pair[0].time {
            return Err(EngineError::Malformed(format!(
                "klines not strictly ascending: {} then {}",
                pair[0].time, pair[1].time
            )));
        }
    }
    Ok(())
}

fn parse_f64(v: &Value) -> Option<f64> {
    if let Some(f) = v.as_f64() {
        return Some(f);
    }
    if let Some(s) = v.as_str() {
        return s.parse::<f64>().ok();
    }
    None
}

fn parse_i64(v: &Value) -> Option<i64> {
    if let Some(i) = v.as_i64() {
        return Some(i);
    }
    if let Some(s) = v.as_str() {
        return s.parse::<i64>().ok();
    }
    None
}
