//! # ShopGrid Storefront Library
//!
//! Everything the `shopgrid` binary runs, as a library so tests can drive it
//! without a terminal.
//!
//! ## Module Organization
//! ```text
//! shopgrid_storefront/
//! ├── lib.rs            ◄─── You are here (AppState, tracing setup)
//! ├── config.rs         ◄─── StorefrontConfig: defaults → TOML → env
//! ├── collaborators.rs  ◄─── IdentityProvider, PaymentGateway (+ mocks)
//! ├── state/
//! │   ├── cart.rs       ◄─── CartState
//! │   ├── auth.rs       ◄─── AuthState
//! │   ├── orders.rs     ◄─── OrderState (OrderBook)
//! │   ├── checkout.rs   ◄─── CheckoutState (wizard)
//! │   └── config.rs     ◄─── ConfigState
//! ├── commands/         ◄─── catalog, cart, auth, checkout, orders
//! ├── views.rs          ◄─── Plain-text rendering of command results
//! ├── shell.rs          ◄─── Line-oriented REPL
//! └── error.rs          ◄─── ApiError and collaborator errors
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()          EnvFilter, RUST_LOG override, to stderr     │
//! │  2. StorefrontConfig::load  defaults → storefront.toml → SHOPGRID_*    │
//! │  3. AppState::new(config)   SystemClock + TokioScheduler + mocks       │
//! │  4. Shell::run(stdin, stdout)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod collaborators;
pub mod commands;
pub mod config;
pub mod error;
pub mod shell;
pub mod state;
pub mod views;

use std::sync::Arc;

use shopgrid_orders::{Clock, OrderBook, Scheduler, SystemClock, TokioScheduler};
use tracing_subscriber::EnvFilter;

use collaborators::{IdentityProvider, MockIdentityProvider, MockPaymentGateway, PaymentGateway};
use config::StorefrontConfig;
use state::{AuthState, CartState, CheckoutState, ConfigState, OrderState};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,shopgrid=debug";

/// Root of all session state. Commands borrow the parts they need.
#[derive(Clone)]
pub struct AppState {
    pub config: ConfigState,
    pub cart: CartState,
    pub auth: AuthState,
    pub orders: OrderState,
    pub checkout: CheckoutState,
    pub identity: Arc<dyn IdentityProvider>,
    pub payments: Arc<dyn PaymentGateway>,
}

impl AppState {
    /// Production wiring: system clock, tokio timers, mock collaborators.
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_runtime(config, Arc::new(SystemClock), Arc::new(TokioScheduler))
    }

    /// Wiring with an explicit clock and scheduler, e.g. a
    /// [`ManualScheduler`](shopgrid_orders::ManualScheduler) in tests.
    pub fn with_runtime(
        config: StorefrontConfig,
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        let book = OrderBook::new(clock, scheduler, config.lifecycle_settings());
        let identity = Arc::new(MockIdentityProvider::new(config.demo.clone()));

        AppState {
            config: ConfigState::new(config),
            cart: CartState::new(),
            auth: AuthState::new(),
            orders: OrderState::new(book),
            checkout: CheckoutState::new(),
            identity,
            payments: Arc::new(MockPaymentGateway),
        }
    }

    /// Swaps in other collaborators.
    pub fn with_collaborators(
        mut self,
        identity: Arc<dyn IdentityProvider>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        self.identity = identity;
        self.payments = payments;
        self
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopgrid_orders=trace` - Trace the order lifecycle only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Output goes to stderr so the shell's stdout stays readable.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
