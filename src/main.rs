mod cli;
mod config;
mod logging;
mod map;
mod search;
mod symbols;
mod tui;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{ArgAction, Parser};
use dotenvy::dotenv;
use tokio::sync::Mutex;
use tracing::info;

use crate::cli::OutputFormat;
use crate::config::{AppConfig, Overrides};
use crate::map::{MapPresenter, MarkerLayer};
use crate::search::SearchController;
use crate::symbols::SymbolSearchClient;
use crate::tui::MapApp;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "symap",
    version,
    about = "Search a symbol catalog and pin the results on a map (TUI)"
)]
pub struct Cli {
    /// Run one search and print the markers instead of starting the TUI
    #[arg(long, action = ArgAction::SetTrue)]
    no_tui: bool,

    /// Search term for --no-tui mode (omit for an unfiltered search)
    #[arg(short, long)]
    query: Option<String>,

    /// Output format for --no-tui mode
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Symbol search endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Color theme (dark, light)
    #[arg(long)]
    theme: Option<String>,

    /// Log level or filter directive (error,warn,info,debug,trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Log file used in TUI mode
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            theme: self.theme.clone(),
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv().ok();
    let cli = Cli::parse();
    let (cfg, notes) = AppConfig::load(cli.overrides())?;

    if cli.no_tui {
        logging::init_stderr_logging(&cfg.log_level)?;
    } else {
        logging::init_file_logging(&cfg.log_file, &cfg.log_level)?;
    }
    for note in &notes {
        note.log();
    }
    info!(?cfg, "app config");

    let client =
        SymbolSearchClient::new(cfg.endpoint.clone())?.with_http_config(cfg.http.clone());
    let presenter = Arc::new(Mutex::new(MapPresenter::new(MarkerLayer::new())));
    let controller = SearchController::new(client, presenter);

    if cli.no_tui {
        let ok = crate::cli::run_once(&controller, cli.query.as_deref(), cli.format).await?;
        return Ok(if ok {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let mut app = MapApp::new("symap - symbol map", controller, &cfg.theme);
    app.run().await?;
    Ok(ExitCode::SUCCESS)
}
