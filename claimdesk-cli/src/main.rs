use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use claimdesk_core::{ClassificationResult, TradeRecord};
use claimdesk_engine::{ClaimEngine, ClaimSummary};
use claimdesk_ingest::{detect_csv_mapping, load_trades};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod output;

use config::{Config, init_config, load_config, resolve_config_path};

#[derive(Parser, Debug)]
#[command(name = "claimdesk", version, about = "Trade claim classification for FX/brokerage operations")]
struct Cli {
    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.claimdesk/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify every trade in a CSV or JSON export
    Classify {
        /// Trade export (.csv, or .json for document dumps)
        #[arg(long)]
        input: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Only print Receivable/Payable claims
        #[arg(long)]
        claims_only: bool,

        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Claim KPIs: totals by direction, category, and counterparty
    Summary {
        #[arg(long)]
        input: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show how CSV headers map onto trade fields
    Mapping {
        #[arg(long)]
        input: PathBuf,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config file path
    Path,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = resolve_config_path(cli.config.as_deref())?;

    match cli.command {
        Command::Classify {
            input,
            format,
            claims_only,
            out,
        } => {
            let cfg = load_config(&config_path)?;
            let mut results = classify_file(&input, &cfg)?;
            if claims_only {
                results.retain(ClassificationResult::is_claim);
            }

            let writer = open_output(out.as_deref())?;
            match format {
                Format::Table => output::write_table(&results, writer)?,
                Format::Json => output::write_json(&results, writer)?,
                Format::Csv => output::write_csv(&results, writer)?,
            }

            if let Some(path) = out {
                println!("Wrote {} results to {}", results.len(), path.display());
            }
        }

        Command::Summary { input, json } => {
            let cfg = load_config(&config_path)?;
            let results = classify_file(&input, &cfg)?;
            let summary = ClaimSummary::from_results(&results);
            let mut stdout = io::stdout().lock();
            if json {
                output::write_json(&summary, &mut stdout)?;
            } else {
                writeln!(stdout, "Classified {} trades from {}\n", results.len(), input.display())?;
                output::write_summary(&summary, &mut stdout)?;
            }
        }

        Command::Mapping { input } => {
            ensure_exists(&input)?;
            let mapping = detect_csv_mapping(&input)?;
            output::write_mapping(&mapping, io::stdout().lock())?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                let cfg = load_config(&config_path)?;
                let s = toml::to_string_pretty(&cfg).context("serialize config")?;
                println!("# {}\n{}", config_path.display(), s);
            }
            ConfigCommand::Path => println!("{}", config_path.display()),
        },
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn ensure_exists(input: &Path) -> Result<()> {
    if !input.exists() {
        bail!("input not found: {} (pass --input <path>)", input.display());
    }
    Ok(())
}

fn classify_file(input: &Path, cfg: &Config) -> Result<Vec<ClassificationResult>> {
    ensure_exists(input)?;
    let trades: Vec<TradeRecord> =
        load_trades(input).with_context(|| format!("loading {}", input.display()))?;

    let engine = ClaimEngine::new(cfg.engine, cfg.interest.rate_provider());
    debug!(
        grace_days = engine.config().grace_days,
        counterparty_rates = cfg.interest.counterparty_rates.len(),
        "engine configured"
    );

    let results = engine.classify_all(&trades);
    info!(
        trades = trades.len(),
        claims = results.iter().filter(|r| r.is_claim()).count(),
        "classified {}",
        input.display()
    );
    Ok(results)
}

fn open_output(out: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match out {
        Some(p) => {
            let f = File::create(p).with_context(|| format!("create {}", p.display()))?;
            Box::new(BufWriter::new(f))
        }
        None => Box::new(io::stdout().lock()),
    })
}
