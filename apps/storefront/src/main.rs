//! # ShopGrid Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShopGrid Terminal Storefront                     │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  stdin / stdout                                                  │  │
//! │  │    shell.rs ────► parses "add 5 2", "checkout", "track SG…"      │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  commands/ ──► catalog, cart, auth, checkout, orders, config     │  │
//! │  │  state/ ─────► CartState, AuthState, OrderState, CheckoutState   │  │
//! │  │  views.rs ───► text rendering (or JSON with --json)              │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  shopgrid-orders: OrderBook + TokioScheduler (2s/5s/8s timers)   │  │
//! │  │  shopgrid-core:   catalog, cart, pricing, validation             │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr)
//! 3. Load configuration
//! 4. Build state objects
//! 5. Run the shell until EOF or `quit`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use shopgrid_storefront::config::StorefrontConfig;
use shopgrid_storefront::shell::Shell;
use shopgrid_storefront::{init_tracing, AppState};
use tokio::io::BufReader;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "shopgrid")]
#[command(author, version, about = "ShopGrid terminal storefront")]
struct Cli {
    /// Config file (default: storefront.toml in the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print command results as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    // An explicit --config must load; the default location may be absent
    let config = match cli.config {
        Some(path) => match StorefrontConfig::load(Some(path)) {
            Ok(config) => config,
            Err(e) => {
                error!(error = %e, "Failed to load configuration");
                return ExitCode::FAILURE;
            }
        },
        None => StorefrontConfig::load_or_default(None),
    };

    info!(store = %config.store.name, json = cli.json, "Starting storefront");

    let state = AppState::new(config);
    let mut shell = Shell::new(state, cli.json);

    let stdin = BufReader::new(tokio::io::stdin());
    if let Err(e) = shell.run(stdin, tokio::io::stdout()).await {
        error!(error = %e, "Shell I/O failed");
        return ExitCode::FAILURE;
    }

    info!("Storefront closed");
    ExitCode::SUCCESS
}
