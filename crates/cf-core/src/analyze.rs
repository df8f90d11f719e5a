use crate::config::TradingConfig;
use crate::confluence::{RuleCtx, RuleSet};
use crate::enrich;
use crate::error::EngineError;
use crate::levels;
use crate::provider::CandleProvider;
use crate::risk;
use crate::signal::{self, Signal, TradingSignal};
use crate::timeframe::Timeframe;
use crate::trend;

/// Bars required on the entry timeframe before any directional call. Below
/// this the EMA-200 is undefined and the verdict would be noise.
pub const MIN_CANDLES: usize = 200;

/// Run the standard confluence battery for one instrument on one timeframe.
///
/// Fetches the entry timeframe and its fixed higher-timeframe companion
/// concurrently, enriches both, and resolves the scorecard into a
/// `TradingSignal`. Data shortfalls come back as a `None` signal with a
/// diagnostic confluence string; only transport and parse failures are errors.
pub async fn analyze_confluences<P: CandleProvider>(
    provider: &P,
    instrument: &str,
    timeframe: Timeframe,
    config: &TradingConfig,
) -> Result<TradingSignal, EngineError> {
    analyze_with_rules(provider, instrument, timeframe, config, &RuleSet::standard()).await
}

/// Same orchestration with a caller-chosen rule battery.
pub async fn analyze_with_rules<P: CandleProvider>(
    provider: &P,
    instrument: &str,
    timeframe: Timeframe,
    config: &TradingConfig,
    rules: &RuleSet,
) -> Result<TradingSignal, EngineError> {
    let higher = timeframe.higher();
    let (entry_candles, htf_candles) = tokio::try_join!(
        provider.fetch_candles(instrument, timeframe),
        provider.fetch_candles(instrument, higher),
    )?;

    if entry_candles.len() < MIN_CANDLES || htf_candles.len() < MIN_CANDLES {
        tracing::warn!(
            instrument,
            timeframe = %timeframe,
            entry_bars = entry_candles.len(),
            htf_bars = htf_candles.len(),
            min = MIN_CANDLES,
            "not enough history"
        );
        return Ok(TradingSignal::none(vec![
            "Insufficient data for analysis - Equal buy/sell pressure".to_string(),
        ]));
    }

    let series = enrich::enrich(&entry_candles);
    let htf_series = enrich::enrich_emas(&htf_candles);

    let last = series
        .last()
        .ok_or_else(|| EngineError::Malformed("empty enriched series".into()))?;
    if last.ema50.is_none() || last.rsi14.is_none() {
        return Ok(TradingSignal::none(vec![
            "Incomplete indicator data - Equal buy/sell pressure".to_string(),
        ]));
    }

    let entry_trend = trend::detect_trend(&series);
    let htf_trend = trend::detect_trend(&htf_series);
    let key_levels = levels::find_key_levels(&series, levels::KEY_LEVEL_LOOKBACK);

    let card = rules.evaluate(&RuleCtx {
        last,
        series: &series,
        trend: entry_trend,
        htf_trend,
        levels: &key_levels,
        config,
    });
    let (decision, confluences) = crate::confluence::decide(&card, config);

    tracing::info!(
        instrument,
        timeframe = %timeframe,
        trend = ?entry_trend,
        htf_trend = ?htf_trend,
        bull = card.bull.len(),
        bear = card.bear.len(),
        signal = ?decision,
        "confluence verdict"
    );

    if decision == Signal::None {
        return Ok(TradingSignal::none(confluences));
    }

    let Some(risk_levels) = risk::compute_risk(decision, &series, entry_trend, config) else {
        return Ok(TradingSignal::none(confluences));
    };

    Ok(TradingSignal {
        signal: decision,
        strength: signal::strength_from(confluences.len()),
        stop_loss: risk_levels.stop_loss,
        take_profit: risk_levels.take_profit,
        entry_price: last.candle.close,
        confluences,
        risk_reward_ratio: risk_levels.risk_reward_ratio,
    })
}
