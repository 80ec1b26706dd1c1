//! # shopgrid-orders: Order Lifecycle
//!
//! Placed orders, their customer-facing numbers, and the simulated
//! fulfillment pipeline that advances them on timers.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌───────────────┐   create_order    ┌──────────────────────────────┐ │
//! │   │   Checkout    │ ────────────────► │          OrderBook           │ │
//! │   └───────────────┘                   │                              │ │
//! │                                       │  Arc<Shared>                 │ │
//! │   ┌───────────────┐   update_status   │   ├── Mutex<Vec<Order>>      │ │
//! │   │ Tracking view │ ────────────────► │   ├── Arc<dyn Clock>         │ │
//! │   └───────────────┘                   │   └── LifecycleSettings      │ │
//! │                                       └──────────────┬───────────────┘ │
//! │                                                      │ schedule(plan)  │
//! │                                       ┌──────────────▼───────────────┐ │
//! │                                       │    Arc<dyn Scheduler>        │ │
//! │                                       │  TokioScheduler (app)        │ │
//! │                                       │  ManualScheduler (tests)     │ │
//! │                                       └──────────────────────────────┘ │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`book`] - `OrderBook`: create, advance, look up
//! - [`plan`] - `FulfillmentPlan` and `LifecycleSettings`
//! - [`scheduler`] - `Scheduler` trait, tokio and manual implementations
//! - [`clock`] - `Clock` trait, system and manual implementations
//! - [`numbers`] - `SG…` order numbers and `TRK…` tracking numbers
//! - [`error`] - `OrderError`
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use shopgrid_core::{Address, Money, OrderStatus, PaymentMethod};
//! use shopgrid_orders::{LifecycleSettings, ManualClock, ManualScheduler, NewOrder, OrderBook};
//!
//! let clock = ManualClock::fixed();
//! let scheduler = ManualScheduler::new(clock.clone());
//! let book = OrderBook::new(Arc::new(clock), Arc::new(scheduler.clone()), LifecycleSettings::default());
//!
//! let order = book.create_order(NewOrder {
//!     items: Vec::new(),
//!     total: Money::from_minor(540),
//!     payment_method: PaymentMethod::Cod,
//!     shipping_address: Address::default(),
//! });
//!
//! scheduler.advance(Duration::from_secs(8));
//! let order = book.get_order_by_number(&order.order_number).unwrap();
//! assert_eq!(order.status, OrderStatus::Shipped);
//! ```

pub mod book;
pub mod clock;
pub mod error;
pub mod numbers;
pub mod plan;
pub mod scheduler;

pub use book::{NewOrder, OrderBook};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{OrderError, OrderResult};
pub use plan::{FulfillmentPlan, FulfillmentStep, LifecycleSettings};
pub use scheduler::{ManualScheduler, Scheduler, Task, TokioScheduler};
