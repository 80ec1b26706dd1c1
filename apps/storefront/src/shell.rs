//! # Shell
//!
//! Line-oriented front end: one command per line, one rendered result per
//! command.
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin line ──► Command::parse ──► Shell::dispatch ──► commands::*     │
//! │                      │                                    │             │
//! │                 usage errors                         Result<DTO,       │
//! │                      │                               ApiError>          │
//! │                      ▼                                    │             │
//! │               ApiError ◄──────────────────────────────────┤             │
//! │                      │                                    ▼             │
//! │                      └──────────► text: views::render_*  (default)     │
//! │                                   json: serde_json       (--json)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The shell owns the grid filters ([`CatalogQuery`]) since they are view
//! state; everything else lives in [`AppState`].

use serde::Serialize;
use shopgrid_core::catalog::{CatalogQuery, CategoryFilter, SortBy};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::commands::{auth, cart, catalog, checkout, config, orders};
use crate::error::ApiError;
use crate::state::CheckoutStep;
use crate::views;
use crate::AppState;

// =============================================================================
// Parsing
// =============================================================================

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Help,
    Quit,
    Products,
    Search(String),
    Category(String),
    Categories,
    Sort(String),
    Product(String),
    Cart,
    Add { product_id: String, quantity: Option<i64> },
    Update { product_id: String, quantity: i64 },
    Remove(String),
    Clear,
    Login { email: String, password: String },
    Signup { email: String, password: String, name: String },
    Logout,
    WhoAmI,
    Checkout,
    Set { field: String, value: String },
    Pay(String),
    Next,
    Back,
    Place,
    Abort,
    Track(Option<String>),
    Orders,
    Status { order_number: String, status: String },
    Cancel(String),
    Config,
}

fn usage(text: &str) -> ApiError {
    ApiError::validation(format!("Usage: {}", text))
}

fn parse_quantity(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation(format!("Quantity must be a whole number, got '{}'", raw)))
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, ApiError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word.to_lowercase().as_str() {
            "" => Command::Empty,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "products" | "list" => Command::Products,
            "search" => Command::Search(rest.to_string()),
            "category" => Command::Category(rest.to_string()),
            "categories" => Command::Categories,
            "sort" => Command::Sort(rest.to_string()),
            "product" | "show" => match args.as_slice() {
                [id] => Command::Product(id.to_string()),
                _ => return Err(usage("product <id>")),
            },
            "cart" => Command::Cart,
            "add" => match args.as_slice() {
                [id] => Command::Add {
                    product_id: id.to_string(),
                    quantity: None,
                },
                [id, qty] => Command::Add {
                    product_id: id.to_string(),
                    quantity: Some(parse_quantity(qty)?),
                },
                _ => return Err(usage("add <id> [qty]")),
            },
            "update" => match args.as_slice() {
                [id, qty] => Command::Update {
                    product_id: id.to_string(),
                    quantity: parse_quantity(qty)?,
                },
                _ => return Err(usage("update <id> <qty>")),
            },
            "remove" => match args.as_slice() {
                [id] => Command::Remove(id.to_string()),
                _ => return Err(usage("remove <id>")),
            },
            "clear" => Command::Clear,
            "login" => match args.as_slice() {
                [email, password] => Command::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                },
                [email] => Command::Login {
                    email: email.to_string(),
                    password: String::new(),
                },
                _ => return Err(usage("login <email> <password>")),
            },
            "signup" => match args.as_slice() {
                [email, password, name @ ..] => Command::Signup {
                    email: email.to_string(),
                    password: password.to_string(),
                    name: name.join(" "),
                },
                _ => return Err(usage("signup <email> <password> <name...>")),
            },
            "logout" => Command::Logout,
            "whoami" => Command::WhoAmI,
            "checkout" => Command::Checkout,
            "set" => match rest.split_once(char::is_whitespace) {
                Some((field, value)) => Command::Set {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                },
                None if !rest.is_empty() => Command::Set {
                    field: rest.to_string(),
                    value: String::new(),
                },
                None => return Err(usage("set <field> <value>")),
            },
            "pay" => match args.as_slice() {
                [method] => Command::Pay(method.to_string()),
                _ => return Err(usage("pay <cod|upi|card>")),
            },
            "next" => Command::Next,
            "back" => Command::Back,
            "place" => Command::Place,
            "abort" => Command::Abort,
            "track" => Command::Track(args.first().map(|n| n.to_string())),
            "orders" => Command::Orders,
            "status" => match args.as_slice() {
                [number, status @ ..] if !status.is_empty() => Command::Status {
                    order_number: number.to_string(),
                    status: status.join(" "),
                },
                _ => return Err(usage("status <order-number> <status>")),
            },
            "cancel" => match args.as_slice() {
                [number] => Command::Cancel(number.to_string()),
                _ => return Err(usage("cancel <order-number>")),
            },
            "config" => Command::Config,
            other => {
                return Err(ApiError::validation(format!(
                    "Unknown command '{}'. Type 'help' for commands.",
                    other
                )))
            }
        };
        Ok(command)
    }
}

// =============================================================================
// Shell
// =============================================================================

/// What a line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Output(String),
    Quit,
}

pub struct Shell {
    state: AppState,
    query: CatalogQuery,
    json: bool,
}

impl Shell {
    pub fn new(state: AppState, json: bool) -> Self {
        Shell {
            state,
            query: CatalogQuery::default(),
            json,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Serializes `value` in JSON mode, otherwise renders it with `text`.
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce(&T) -> String) -> Result<String, ApiError> {
        if self.json {
            serde_json::to_string_pretty(value).map_err(|e| ApiError::internal(e.to_string()))
        } else {
            Ok(text(value))
        }
    }

    fn render_error(&self, err: &ApiError) -> String {
        if self.json {
            serde_json::to_string_pretty(err).unwrap_or_else(|_| err.to_string())
        } else {
            views::render_error(err)
        }
    }

    /// Runs `query` and keeps it as the grid filters only if it is valid.
    fn show_products(&mut self, query: CatalogQuery) -> Result<String, ApiError> {
        let response = catalog::list_products(&query)?;
        self.query = response.query.clone();
        self.emit(&response, |r| views::render_products(&self.state.config, r))
    }

    fn show_checkout(&self) -> Result<String, ApiError> {
        let view = checkout::current_checkout(&self.state)?;
        self.emit(&view, |v| views::render_checkout(&self.state.config, v))
    }

    /// Runs one line.
    pub async fn execute(&mut self, line: &str) -> Step {
        let command = match Command::parse(line) {
            Ok(Command::Quit) => return Step::Quit,
            Ok(command) => command,
            Err(err) => return Step::Output(self.render_error(&err)),
        };
        debug!(?command, "Shell command");

        match self.dispatch(command).await {
            Ok(text) => Step::Output(text),
            Err(err) => Step::Output(self.render_error(&err)),
        }
    }

    async fn dispatch(&mut self, command: Command) -> Result<String, ApiError> {
        let state = self.state.clone();
        let cfg = &state.config;

        match command {
            Command::Empty | Command::Quit => Ok(String::new()),
            Command::Help => Ok(views::HELP.to_string()),

            // -- catalog --------------------------------------------------
            Command::Products => self.show_products(self.query.clone()),
            Command::Search(search) => {
                let query = CatalogQuery {
                    search,
                    ..self.query.clone()
                };
                self.show_products(query)
            }
            Command::Category(name) => {
                let category = if name.is_empty() {
                    CategoryFilter::All
                } else {
                    name.parse()?
                };
                let query = CatalogQuery {
                    category,
                    ..self.query.clone()
                };
                self.show_products(query)
            }
            Command::Categories => {
                let categories = catalog::list_categories();
                self.emit(&categories, |c| views::render_categories(c))
            }
            Command::Sort(key) => {
                let query = CatalogQuery {
                    sort: key.parse::<SortBy>()?,
                    ..self.query.clone()
                };
                self.show_products(query)
            }
            Command::Product(id) => {
                let view = catalog::get_product(&id)?;
                self.emit(&view, |v| views::render_product(cfg, v))
            }

            // -- cart -----------------------------------------------------
            Command::Cart => {
                let response = cart::get_cart(&state.cart, cfg);
                self.emit(&response, |r| views::render_cart(cfg, r))
            }
            Command::Add {
                product_id,
                quantity,
            } => {
                let response = cart::add_to_cart(&state.cart, cfg, &product_id, quantity)?;
                self.emit(&response, |r| views::render_cart(cfg, r))
            }
            Command::Update {
                product_id,
                quantity,
            } => {
                let response = cart::update_cart_item(&state.cart, cfg, &product_id, quantity);
                self.emit(&response, |r| views::render_cart(cfg, r))
            }
            Command::Remove(product_id) => {
                let response = cart::remove_from_cart(&state.cart, cfg, &product_id);
                self.emit(&response, |r| views::render_cart(cfg, r))
            }
            Command::Clear => {
                let response = cart::clear_cart(&state.cart, cfg);
                self.emit(&response, |r| views::render_cart(cfg, r))
            }

            // -- account --------------------------------------------------
            Command::Login { email, password } => {
                let user = auth::login(&state.auth, state.identity.as_ref(), &email, &password).await?;
                self.emit(&user, |u| views::render_user(Some(u)))
            }
            Command::Signup {
                email,
                password,
                name,
            } => {
                let user =
                    auth::signup(&state.auth, state.identity.as_ref(), &name, &email, &password)
                        .await?;
                self.emit(&user, |u| views::render_user(Some(u)))
            }
            Command::Logout => {
                let user = auth::logout(&state.auth);
                self.emit(&user, |u| match u {
                    Some(_) => "Signed out".to_string(),
                    None => "Nobody is signed in".to_string(),
                })
            }
            Command::WhoAmI => {
                let user = auth::current_user(&state.auth);
                self.emit(&user, |u| views::render_user(u.as_ref()))
            }

            // -- checkout -------------------------------------------------
            Command::Checkout => {
                let view = checkout::begin_checkout(&state)?;
                self.emit(&view, |v| views::render_checkout(cfg, v))
            }
            Command::Set { field, value } => {
                checkout::set_checkout_field(&state.checkout, &field, &value)?;
                self.show_checkout()
            }
            Command::Pay(method) => {
                checkout::choose_payment(&state.checkout, &method)?;
                self.show_checkout()
            }
            Command::Next => {
                checkout::next_step(&state.checkout)?;
                self.show_checkout()
            }
            Command::Back => {
                checkout::previous_step(&state.checkout)?;
                self.show_checkout()
            }
            Command::Place => {
                let placed = checkout::place_order(&state).await?;
                self.emit(&placed, |p| views::render_placed(cfg, p))
            }
            Command::Abort => {
                let closed = checkout::cancel_checkout(&state.checkout);
                self.emit(&closed, |closed| {
                    if *closed {
                        "Checkout closed".to_string()
                    } else {
                        "No checkout in progress".to_string()
                    }
                })
            }

            // -- orders ---------------------------------------------------
            Command::Track(number) => {
                let order = orders::track_order(&state.orders, number.as_deref())?;
                self.emit(&order, |o| views::render_tracking(cfg, o))
            }
            Command::Orders => {
                let all = orders::list_orders(&state.orders);
                self.emit(&all, |o| views::render_orders(cfg, o))
            }
            Command::Status {
                order_number,
                status,
            } => {
                let order = orders::update_order_status(&state.orders, &order_number, &status)?;
                self.emit(&order, |o| views::render_tracking(cfg, o))
            }
            Command::Cancel(order_number) => {
                let order = orders::cancel_order(&state.orders, &order_number)?;
                self.emit(&order, |o| views::render_tracking(cfg, o))
            }

            Command::Config => {
                if self.json {
                    self.emit(&config::get_config(cfg), |_| String::new())
                } else {
                    config::export_config(cfg)
                }
            }
        }
    }

    /// Whether `line` places an order from the review step and so waits out
    /// the processing delay.
    fn awaits_processing(&self, line: &str) -> bool {
        matches!(Command::parse(line), Ok(Command::Place))
            && self
                .state
                .checkout
                .current()
                .is_some_and(|draft| draft.step == CheckoutStep::Review)
    }

    fn prompt(&self) -> String {
        format!("{} [cart: {}]> ", self.state.config.store.name, self.state.cart.item_count())
    }

    /// Reads commands from `input` until EOF or `quit`, writing results to
    /// `output`. JSON mode prints no banner or prompt.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if !self.json {
            let banner = format!(
                "Welcome to {}. Type 'help' for commands.\n",
                self.state.config.store.name
            );
            output.write_all(banner.as_bytes()).await?;
            output.write_all(self.prompt().as_bytes()).await?;
            output.flush().await?;
        }

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if !self.json && self.awaits_processing(&line) {
                output.write_all(views::PROCESSING_MESSAGE.as_bytes()).await?;
                output.write_all(b"\n").await?;
                output.flush().await?;
            }
            let text = match self.execute(&line).await {
                Step::Quit => break,
                Step::Output(text) => text,
            };
            if !text.is_empty() {
                output.write_all(text.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }
            if !self.json {
                output.write_all(self.prompt().as_bytes()).await?;
            }
            output.flush().await?;
        }

        output.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use shopgrid_orders::{ManualClock, ManualScheduler};
    use std::sync::Arc;
    use std::time::Duration;

    fn shell(json: bool) -> (Shell, ManualScheduler) {
        let clock = ManualClock::fixed();
        let scheduler = ManualScheduler::new(clock.clone());
        let state = AppState::with_runtime(
            StorefrontConfig::default(),
            Arc::new(clock),
            Arc::new(scheduler.clone()),
        );
        (Shell::new(state, json), scheduler)
    }

    async fn output(shell: &mut Shell, line: &str) -> String {
        match shell.execute(line).await {
            Step::Output(text) => text,
            Step::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("  ").unwrap(), Command::Empty);
        assert_eq!(
            Command::parse("add 5 2").unwrap(),
            Command::Add {
                product_id: "5".to_string(),
                quantity: Some(2)
            }
        );
        assert_eq!(
            Command::parse("signup ann@example.com pw Ann Lee").unwrap(),
            Command::Signup {
                email: "ann@example.com".to_string(),
                password: "pw".to_string(),
                name: "Ann Lee".to_string()
            }
        );
        assert_eq!(
            Command::parse("set street 12 MG Road").unwrap(),
            Command::Set {
                field: "street".to_string(),
                value: "12 MG Road".to_string()
            }
        );
        assert_eq!(
            Command::parse("status SG1 out for delivery").unwrap(),
            Command::Status {
                order_number: "SG1".to_string(),
                status: "out for delivery".to_string()
            }
        );
        assert_eq!(Command::parse("track").unwrap(), Command::Track(None));
        assert_eq!(Command::parse("EXIT").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("add").unwrap_err().message,
            "Usage: add <id> [qty]"
        );
        assert!(Command::parse("add 5 lots").is_err());
        assert!(Command::parse("dance")
            .unwrap_err()
            .message
            .starts_with("Unknown command 'dance'"));
    }

    #[tokio::test]
    async fn test_filters_persist_between_commands() {
        let (mut shell, _) = shell(false);

        let text = output(&mut shell, "category Fashion").await;
        assert!(text.starts_with("3 products · Fashion"));

        let text = output(&mut shell, "sort price-high").await;
        assert!(text.starts_with("3 products · Fashion · sort: price-high"));

        output(&mut shell, "category all").await;
        assert_eq!(shell.query().category, CategoryFilter::All);
        assert_eq!(shell.query().sort, SortBy::PriceHigh);
    }

    #[tokio::test]
    async fn test_rejected_search_keeps_filters() {
        let (mut shell, _) = shell(false);
        output(&mut shell, "search sony").await;

        let long = format!("search {}", "x".repeat(150));
        assert!(output(&mut shell, &long).await.starts_with('!'));
        assert_eq!(shell.query().search, "sony");
    }

    #[tokio::test]
    async fn test_errors_render_as_alerts() {
        let (mut shell, _) = shell(false);
        assert_eq!(
            output(&mut shell, "track SG000000000").await,
            "! Order not found. Please check your order number."
        );
        assert_eq!(
            output(&mut shell, "login ann@example.com").await,
            "! Please enter your password"
        );
        assert_eq!(output(&mut shell, "login").await, "! Usage: login <email> <password>");
    }

    #[tokio::test]
    async fn test_json_mode() {
        let (mut shell, _) = shell(true);

        let text = output(&mut shell, "add 5").await;
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["totals"]["itemCount"], 1);

        let text = output(&mut shell, "track nope").await;
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_purchase_session() {
        let (mut shell, scheduler) = shell(false);
        let script = [
            "login ann@example.com secret",
            "add 3",
            "checkout",
            "set street 12 MG Road",
            "set city Pune",
            "set state Maharashtra",
            "set pincode 411001",
            "next",
            "pay card",
            "next",
        ];
        for line in script {
            let text = output(&mut shell, line).await;
            assert!(!text.starts_with('!'), "{} failed: {}", line, text);
        }

        let text = output(&mut shell, "place").await;
        assert!(text.starts_with(views::ORDER_PLACED_HEADING));
        assert_eq!(shell.state().cart.item_count(), 0);

        scheduler.advance(Duration::from_secs(8));
        let text = output(&mut shell, "track").await;
        assert!(text.contains("(Shipped)"));
        assert!(text.contains("Mumbai, Maharashtra"));
    }

    #[tokio::test]
    async fn test_run_reads_until_quit() {
        let (mut shell, _) = shell(false);
        let input: &[u8] = b"add 5 2\ncart\nquit\nadd 1\n";
        let mut out: Vec<u8> = Vec::new();

        shell.run(input, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Welcome to ShopGrid."));
        assert!(text.contains("Shopping Cart (2 items)"));
        assert_eq!(shell.state().cart.item_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_announces_processing_before_placing() {
        let (mut shell, _) = shell(false);
        let input: &[u8] = b"login ann@example.com secret\n\
            add 3\n\
            checkout\n\
            set street 12 MG Road\n\
            set city Pune\n\
            set state Maharashtra\n\
            set pincode 411001\n\
            next\n\
            next\n\
            place\n";
        let mut out: Vec<u8> = Vec::new();

        shell.run(input, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        let processing = text.find(views::PROCESSING_MESSAGE).unwrap();
        let placed = text.find(views::ORDER_PLACED_HEADING).unwrap();
        assert!(processing < placed);
        assert_eq!(text.matches(views::PROCESSING_MESSAGE).count(), 1);
    }

    #[tokio::test]
    async fn test_run_skips_processing_without_review_step() {
        let (mut shell, _) = shell(false);
        let input: &[u8] = b"add 3\nplace\n";
        let mut out: Vec<u8> = Vec::new();

        shell.run(input, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains(views::PROCESSING_MESSAGE));
        assert!(!text.contains(views::ORDER_PLACED_HEADING));
    }
}
