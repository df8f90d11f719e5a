//! CLI entry point for the confluence signal engine.
//!
//! Subcommands:
//!   - `analyze` — Run the confluence battery for one symbol/timeframe
//!   - `symbols` — List actively trading USDT spot symbols

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cf_core::analyze::analyze_confluences;
use cf_core::binance::BinanceProvider;
use cf_core::config::TradingConfig;
use cf_core::confluence::RuleSet;
use cf_core::signal::TradingSignal;
use cf_core::timeframe::Timeframe;

const VERSION: &str = "0.1.0";

#[derive(Parser)]
#[command(
    name = "confluence",
    version = VERSION,
    about = "Multi-timeframe confluence signal engine for spot markets",
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one instrument and print the resulting signal
    Analyze(AnalyzeArgs),
    /// List actively trading USDT-quoted symbols
    Symbols(SymbolsArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// Instrument symbol, e.g. BTCUSDT
    symbol: String,

    /// Entry timeframe (1m, 5m, 15m, 30m, 1h, 4h, 1d)
    #[arg(long, default_value = "1h")]
    timeframe: Timeframe,

    /// Optional YAML file overriding trading parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the extended rule battery (trend alignment, levels, volume,
    /// divergence) instead of the standard one
    #[arg(long)]
    extended: bool,

    /// Emit the signal as pretty-printed JSON
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct SymbolsArgs {
    /// Print at most this many symbols
    #[arg(long, default_value_t = 50)]
    limit: usize,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => run_analyze(args).await,
        Commands::Symbols(args) => run_symbols(args).await,
    }
}

async fn run_analyze(args: AnalyzeArgs) {
    let config = match &args.config {
        Some(path) => TradingConfig::from_yaml_file(path).unwrap_or_else(|e| {
            eprintln!("[error] Cannot load config {:?}: {}", path, e);
            process::exit(1);
        }),
        None => TradingConfig::default(),
    };

    let provider = BinanceProvider::mainnet().unwrap_or_else(|e| {
        eprintln!("[error] Cannot build HTTP client: {e}");
        process::exit(1);
    });
    let result = if args.extended {
        cf_core::analyze::analyze_with_rules(
            &provider,
            &args.symbol,
            args.timeframe,
            &config,
            &RuleSet::extended(),
        )
        .await
    } else {
        analyze_confluences(&provider, &args.symbol, args.timeframe, &config).await
    };

    let signal = result.unwrap_or_else(|e| {
        eprintln!("[error] Analysis failed for {}: {}", args.symbol, e);
        process::exit(1);
    });

    if args.json {
        match serde_json::to_string_pretty(&signal) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("[error] Cannot serialize signal: {e}");
                process::exit(1);
            }
        }
    } else {
        print_signal(&args.symbol, args.timeframe, &signal);
    }
}

fn print_signal(symbol: &str, timeframe: Timeframe, signal: &TradingSignal) {
    println!("{symbol} {timeframe}: {:?} (strength {})", signal.signal, signal.strength);
    if signal.entry_price != 0.0 {
        println!(
            "  entry {:.6}  stop {:.6}  target {:.6}  rr {:.2}",
            signal.entry_price, signal.stop_loss, signal.take_profit, signal.risk_reward_ratio
        );
    }
    for confluence in &signal.confluences {
        println!("  - {confluence}");
    }
}

async fn run_symbols(args: SymbolsArgs) {
    let provider = BinanceProvider::mainnet().unwrap_or_else(|e| {
        eprintln!("[error] Cannot build HTTP client: {e}");
        process::exit(1);
    });
    let symbols = provider.top_symbols().await.unwrap_or_else(|e| {
        eprintln!("[error] Cannot list symbols: {e}");
        process::exit(1);
    });
    for info in symbols.iter().take(args.limit) {
        println!("{}\t{}/{}", info.symbol, info.base_asset, info.quote_asset);
    }
    tracing::info!(total = symbols.len(), shown = symbols.len().min(args.limit), "symbols listed");
}
