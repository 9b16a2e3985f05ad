//! ClauseWatch — document compliance analysis server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clausewatch_core::{ClauseWatchConfig, RuleSet};
use clausewatch_runtime::AnalysisRequest;
use clausewatch_server::{build_router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn resolve_data_dir() -> PathBuf {
    std::env::var("CLAUSEWATCH_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn print_help() {
    println!("ClauseWatch — document compliance analysis");
    println!();
    println!("Usage: clausewatch [command]");
    println!();
    println!("Commands:");
    println!("  (none)                       Start the server");
    println!("  check <file> [kw1,kw2,...]   Analyze a document and print the report");
    println!("  help                         Show this help message");
}

/// `clausewatch check <file> [keywords]` — one-shot analysis printed as JSON.
async fn run_check(args: &[String]) -> anyhow::Result<()> {
    let path = args
        .first()
        .map(PathBuf::from)
        .context("Usage: clausewatch check <file> [kw1,kw2,...]")?;
    let rules = args
        .get(1)
        .map(|raw| RuleSet::from_comma_list(raw))
        .unwrap_or_default();

    let config = ClauseWatchConfig::from_env(resolve_data_dir())?;
    let state = AppState::new(config);

    let report = state
        .coordinator
        .analyze(AnalysisRequest::from_file(&path, rules))
        .await
        .with_context(|| format!("Failed to analyze {}", path.display()))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "check" => return run_check(&args[2..]).await,
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'clausewatch help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    // Normal server startup
    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = ClauseWatchConfig::from_env(&data_dir)?;
    let port = config.port;

    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("ClauseWatch server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
