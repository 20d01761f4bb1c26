//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_market_data::{CsvMarketDataAdapter, MarketDataConfig};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_ledger_store::{DEFAULT_ACCOUNT, FileLedgerStore, LedgerStoreConfig};
use crate::adapters::text_report::TextReport;
use crate::domain::analysis::{self, Analysis, AnalysisConfig, DEFAULT_HISTORY_DAYS};
use crate::domain::config_validation::validate_config;
use crate::domain::error::PapertradeError;
use crate::domain::ledger::{DEFAULT_INITIAL_BALANCE, Ledger};
use crate::domain::quote::canonical_symbol;
use crate::domain::scoring::DEFAULT_INDUSTRY_PE;
use crate::domain::watchlist::{analysis_targets, parse_symbols};
use crate::ports::config_port::ConfigPort;
use crate::ports::ledger_store::LedgerStore;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "papertrade", about = "Paper-trading ledger with buy/hold/sell signals")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Buy shares at the current quote price
    Buy {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        shares: u64,
    },
    /// Sell shares at the current quote price
    Sell {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        shares: u64,
    },
    /// Mark holdings to market and print the portfolio
    Portfolio {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Analyze held, watched and requested symbols
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long = "symbol")]
        symbols: Vec<String>,
    },
    /// Reset the ledger to its initial balance and delete the saved file
    Reset {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// A filled market order.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub side: TradeSide,
    pub symbol: String,
    pub shares: u64,
    pub price: f64,
}

impl Fill {
    pub fn total(&self) -> f64 {
        self.shares as f64 * self.price
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Buy {
            config,
            symbol,
            shares,
        } => run_trade(&config, TradeSide::Buy, &symbol, shares),
        Command::Sell {
            config,
            symbol,
            shares,
        } => run_trade(&config, TradeSide::Sell, &symbol, shares),
        Command::Portfolio { config } => run_portfolio(&config),
        Command::Analyze { config, symbols } => run_analyze(&config, &symbols),
        Command::Reset { config } => run_reset(&config),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<FileConfigAdapter, PapertradeError> {
    let adapter = FileConfigAdapter::from_file(path)?;
    validate_config(&adapter)?;
    Ok(adapter)
}

pub fn build_store_config(config: &dyn ConfigPort) -> LedgerStoreConfig {
    LedgerStoreConfig {
        data_dir: PathBuf::from(config.get_string_or("ledger", "data_dir", ".")),
        account: config.get_string_or("ledger", "account", DEFAULT_ACCOUNT),
    }
}

pub fn build_market_config(config: &dyn ConfigPort) -> Result<MarketDataConfig, PapertradeError> {
    let data_dir = config
        .get_string("market", "data_dir")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PapertradeError::ConfigMissing {
            section: "market".into(),
            key: "data_dir".into(),
        })?;
    Ok(MarketDataConfig {
        data_dir: PathBuf::from(data_dir),
    })
}

pub fn build_analysis_config(config: &dyn ConfigPort) -> AnalysisConfig {
    let history_days = config.get_int("analysis", "history_days", DEFAULT_HISTORY_DAYS as i64);
    AnalysisConfig {
        industry_pe: config.get_double("analysis", "industry_pe", DEFAULT_INDUSTRY_PE),
        history_days: usize::try_from(history_days.max(1)).unwrap_or(DEFAULT_HISTORY_DAYS),
        ..AnalysisConfig::default()
    }
}

pub fn initial_balance(config: &dyn ConfigPort) -> f64 {
    config.get_double("ledger", "initial_balance", DEFAULT_INITIAL_BALANCE)
}

pub fn watchlist(config: &dyn ConfigPort) -> Result<Vec<String>, PapertradeError> {
    match config.get_string("analysis", "watchlist") {
        Some(list) => Ok(parse_symbols(&list)?),
        None => Ok(Vec::new()),
    }
}

/// Fresh ledger with any saved state restored on top.
pub fn load_ledger(store: &dyn LedgerStore, initial_balance: f64) -> Result<Ledger, PapertradeError> {
    let mut ledger = Ledger::new(initial_balance);
    if let Some(snapshot) = store.load()? {
        ledger.restore(&snapshot);
    }
    Ok(ledger)
}

/// Fill a market order at the current quote and persist the ledger.
/// A rejected order leaves both the ledger and the store untouched.
pub fn execute_trade(
    ledger: &mut Ledger,
    side: TradeSide,
    symbol: &str,
    shares: u64,
    market: &dyn MarketDataPort,
    store: &dyn LedgerStore,
) -> Result<Fill, PapertradeError> {
    let symbol = canonical_symbol(symbol);
    let quote = market
        .fetch_quote(&symbol)?
        .ok_or_else(|| PapertradeError::NoQuote {
            symbol: symbol.clone(),
        })?;

    match side {
        TradeSide::Buy => ledger.buy(&symbol, shares, quote.price)?,
        TradeSide::Sell => ledger.sell(&symbol, shares, quote.price)?,
    }
    store.save(&ledger.snapshot())?;

    Ok(Fill {
        side,
        symbol,
        shares,
        price: quote.price,
    })
}

/// Mark every held symbol at its current quote. Symbols without a quote keep
/// their previous mark.
pub fn mark_to_market(ledger: &mut Ledger, market: &dyn MarketDataPort) -> Result<(), PapertradeError> {
    let mut prices = HashMap::new();
    for symbol in ledger.symbols() {
        match market.fetch_quote(symbol)? {
            Some(quote) => {
                prices.insert(symbol.to_string(), quote.price);
            }
            None => tracing::warn!(%symbol, "no quote, keeping last mark"),
        }
    }
    ledger.mark_prices(&prices);
    Ok(())
}

/// Analyze each symbol in order, skipping those without a usable quote.
pub fn analyze_symbols(
    symbols: &[String],
    market: &dyn MarketDataPort,
    config: &AnalysisConfig,
) -> Result<Vec<Analysis>, PapertradeError> {
    let mut analyses = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let Some(quote) = market.fetch_quote(symbol)? else {
            tracing::info!(%symbol, "no quote, skipping");
            continue;
        };
        let history = market.fetch_history(symbol, config.history_days)?;
        if let Some(result) = analysis::analyze(&quote, &history, config) {
            analyses.push(result);
        }
    }
    Ok(analyses)
}

fn run_trade(
    config_path: &Path,
    side: TradeSide,
    symbol: &str,
    shares: u64,
) -> Result<(), PapertradeError> {
    let config = load_config(config_path)?;
    let store = FileLedgerStore::new(build_store_config(&config));
    let market = CsvMarketDataAdapter::new(build_market_config(&config)?);
    let mut ledger = load_ledger(&store, initial_balance(&config))?;

    let fill = execute_trade(&mut ledger, side, symbol, shares, &market, &store)?;
    let verb = match fill.side {
        TradeSide::Buy => "Bought",
        TradeSide::Sell => "Sold",
    };
    println!(
        "{} {} shares of {} at ${:.2} each. Total: ${:.2}",
        verb,
        fill.shares,
        fill.symbol,
        fill.price,
        fill.total()
    );
    println!("Cash balance: ${:.2}", ledger.cash_balance());
    Ok(())
}

fn run_portfolio(config_path: &Path) -> Result<(), PapertradeError> {
    let config = load_config(config_path)?;
    let store = FileLedgerStore::new(build_store_config(&config));
    let market = CsvMarketDataAdapter::new(build_market_config(&config)?);
    let mut ledger = load_ledger(&store, initial_balance(&config))?;

    mark_to_market(&mut ledger, &market)?;
    print!("{}", TextReport::new().render_portfolio(&ledger));
    Ok(())
}

fn run_analyze(config_path: &Path, requested: &[String]) -> Result<(), PapertradeError> {
    let config = load_config(config_path)?;
    let store = FileLedgerStore::new(build_store_config(&config));
    let market = CsvMarketDataAdapter::new(build_market_config(&config)?);
    let ledger = load_ledger(&store, initial_balance(&config))?;

    let targets = analysis_targets(ledger.symbols(), &watchlist(&config)?, requested);
    tracing::info!(count = targets.len(), "analyzing symbols");

    let analyses = analyze_symbols(&targets, &market, &build_analysis_config(&config))?;
    print!("{}", TextReport::new().render_analyses(&analyses));
    Ok(())
}

fn run_reset(config_path: &Path) -> Result<(), PapertradeError> {
    let config = load_config(config_path)?;
    let store = FileLedgerStore::new(build_store_config(&config));

    let mut ledger = load_ledger(&store, initial_balance(&config))?;
    ledger.clear();
    store.remove()?;

    println!(
        "Ledger reset. Cash balance: ${:.2}",
        ledger.cash_balance()
    );
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), PapertradeError> {
    eprintln!("Validating config: {}", config_path.display());
    let config = load_config(config_path)?;

    let store = build_store_config(&config);
    let market = build_market_config(&config)?;
    let analysis = build_analysis_config(&config);
    let watched = watchlist(&config)?;

    eprintln!("  ledger:    {}/{}", store.data_dir.display(), store.account);
    eprintln!("  market:    {}", market.data_dir.display());
    eprintln!(
        "  analysis:  industry P/E {:.2}, {} days of history",
        analysis.industry_pe, analysis.history_days
    );
    eprintln!("  watchlist: {}", watched.join(", "));
    eprintln!("\nConfiguration is valid.");
    Ok(())
}
