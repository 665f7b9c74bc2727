//! Coin Ledger CLI
//!
//! Run modes:
//!   coin-ledger replay <requests.json>   - Execute a request batch, print responses + audit
//!   coin-ledger derive <identity-hex>    - Show the settings and account addresses

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use coin_ledger::common::{
    init_from_config, log_system_event, CoinLedgerError, LedgerConfig, LogFormat, LogLevel,
    Result,
};
use coin_ledger::{AddressResolver, Identity, Ledger, LedgerRequest, MemoryRecordStore};

#[derive(Parser)]
#[command(name = "coin-ledger")]
#[command(about = "Fungible coin ledger: request replay and address tooling")]
struct Cli {
    /// Log level (overrides COIN_LEDGER_LOG_LEVEL)
    #[arg(long, global = true, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    /// Emit JSON logs (overrides COIN_LEDGER_LOG_FORMAT)
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a JSON array of requests against a fresh in-memory ledger
    Replay {
        /// Path to the request file
        file: PathBuf,
    },

    /// Print the settings address and the account address of a holder
    Derive {
        /// Holder identity (64 hex chars)
        identity: String,
    },
}

fn parse_log_level(value: &str) -> std::result::Result<LogLevel, String> {
    value.parse::<LogLevel>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error [{}]: {}", e.error_code(), e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = LedgerConfig::from_env()?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if cli.json {
        config.log_format = LogFormat::Json;
    }
    init_from_config(&config)?;

    match cli.command {
        Commands::Replay { file } => replay(&config, &file).await,
        Commands::Derive { identity } => derive(&config, &identity),
    }
}

async fn replay(config: &LedgerConfig, file: &Path) -> Result<ExitCode> {
    let raw = std::fs::read_to_string(file)?;
    let requests: Vec<LedgerRequest> = serde_json::from_str(&raw)?;

    log_system_event(
        "replay_started",
        serde_json::json!({ "file": file.display().to_string(), "requests": requests.len() }),
        false,
    );

    let ledger = Ledger::new(MemoryRecordStore::new(), config.resolver());
    let responses = ledger.execute_all(&requests).await;

    for (index, (request, response)) in requests.iter().zip(&responses).enumerate() {
        let line = serde_json::json!({
            "index": index,
            "op": request.name(),
            "response": response,
        });
        println!("{}", line);
    }

    let report = ledger.audit().await?;
    log_system_event(
        "replay_audited",
        serde_json::json!({ "audit": report }),
        !report.is_balanced(),
    );
    println!("{}", serde_json::json!({ "audit": report }));

    if report.is_balanced() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn derive(config: &LedgerConfig, identity: &str) -> Result<ExitCode> {
    let holder: Identity = identity
        .parse()
        .map_err(|e| CoinLedgerError::validation(format!("identity: {}", e)))?;
    let resolver = config.resolver();

    println!(
        "{}",
        serde_json::json!({
            "namespace": hex::encode(resolver.namespace()),
            "settings": resolver.settings_address(),
            "holder": holder,
            "account": resolver.account_address(&holder),
        })
    );
    Ok(ExitCode::SUCCESS)
}
