//! # Order Book
//!
//! Owns every order placed in this session and moves them through the
//! fulfillment lifecycle.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Lifecycle                                  │
//! │                                                                         │
//! │  create_order(NewOrder)                                                │
//! │     ├── id = UUID v4, number = SG…, tracking = TRK…                    │
//! │     ├── status Pending, tracking ["Order Placed"]                      │
//! │     ├── estimated delivery = created + 3 days                          │
//! │     └── schedule plan ──► (2s) confirmed                               │
//! │                          (5s) processing                               │
//! │                          (8s) shipped                                  │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │  update_status(id, status)                                             │
//! │     ├── unknown id ──────────────► Ok(None), nothing happens           │
//! │     ├── backward / from terminal ► Err(InvalidTransition)              │
//! │     └── otherwise ───────────────► status set, update appended         │
//! │                                                                         │
//! │  Timers hold a Weak handle: if the book is gone, the advance is lost.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use chrono::Duration;
use shopgrid_core::{
    Address, CartItem, Money, Order, OrderStatus, PaymentMethod, TrackingUpdate,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::{OrderError, OrderResult};
use crate::numbers::{normalize_order_number, order_number, tracking_number};
use crate::plan::LifecycleSettings;
use crate::scheduler::{Scheduler, TokioScheduler};

/// Label of the tracking entry every order starts with.
pub const ORDER_PLACED_LABEL: &str = "Order Placed";

/// Description of the tracking entry every order starts with.
pub const ORDER_PLACED_DESCRIPTION: &str =
    "Your order has been successfully placed and is being processed.";

/// What checkout hands over to create an order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// Snapshot of the cart lines.
    pub items: Vec<CartItem>,
    /// Subtotal plus delivery fee.
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub shipping_address: Address,
}

struct Shared {
    orders: Mutex<Vec<Order>>,
    clock: Arc<dyn Clock>,
    settings: LifecycleSettings,
}

impl Shared {
    fn orders(&self) -> MutexGuard<'_, Vec<Order>> {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> OrderResult<Option<TrackingUpdate>> {
        let now = self.clock.now();
        let mut orders = self.orders();

        let Some(order) = orders.iter_mut().find(|o| o.id == order_id) else {
            debug!(order_id, %status, "Status update for unknown order ignored");
            return Ok(None);
        };

        if !order.status.can_transition_to(status) {
            return Err(OrderError::InvalidTransition {
                order_number: order.order_number.clone(),
                from: order.status,
                to: status,
            });
        }

        let update = TrackingUpdate {
            id: order.tracking_updates.len() as u32 + 1,
            status: status.label().to_string(),
            description: status.description().to_string(),
            timestamp: now,
            location: Some(self.settings.location.clone()),
        };

        order.status = status;
        order.tracking_updates.push(update.clone());

        info!(
            order_number = %order.order_number,
            %status,
            update_id = update.id,
            "Order status updated"
        );
        Ok(Some(update))
    }
}

/// The session's orders.
///
/// Cheap to clone; clones share the same orders. Scheduled advances keep
/// only a weak reference, so dropping the last clone cancels them in effect.
#[derive(Clone)]
pub struct OrderBook {
    shared: Arc<Shared>,
    scheduler: Arc<dyn Scheduler>,
}

impl std::fmt::Debug for OrderBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBook")
            .field("orders", &self.order_count())
            .field("settings", &self.shared.settings)
            .finish()
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        OrderBook::new(
            Arc::new(SystemClock),
            Arc::new(TokioScheduler),
            LifecycleSettings::default(),
        )
    }
}

impl OrderBook {
    pub fn new(
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn Scheduler>,
        settings: LifecycleSettings,
    ) -> Self {
        OrderBook {
            shared: Arc::new(Shared {
                orders: Mutex::new(Vec::new()),
                clock,
                settings,
            }),
            scheduler,
        }
    }

    pub fn settings(&self) -> &LifecycleSettings {
        &self.shared.settings
    }

    /// Records a new order and schedules its automatic advances.
    ///
    /// Returns a copy of the created order; `order_number` is what the
    /// customer sees.
    pub fn create_order(&self, new_order: NewOrder) -> Order {
        let now = self.shared.clock.now();
        let settings = &self.shared.settings;

        let order = Order {
            id: Uuid::new_v4().to_string(),
            order_number: order_number(),
            tracking_number: tracking_number(),
            items: new_order.items,
            total: new_order.total,
            status: OrderStatus::Pending,
            payment_method: new_order.payment_method,
            payment_status: new_order.payment_method.initial_payment_status(),
            created_at: now,
            estimated_delivery: now + Duration::days(i64::from(settings.estimated_delivery_days)),
            shipping_address: new_order.shipping_address,
            tracking_updates: vec![TrackingUpdate {
                id: 1,
                status: ORDER_PLACED_LABEL.to_string(),
                description: ORDER_PLACED_DESCRIPTION.to_string(),
                timestamp: now,
                location: Some(settings.location.clone()),
            }],
        };

        self.shared.orders().push(order.clone());

        info!(
            order_number = %order.order_number,
            tracking_number = %order.tracking_number,
            total = %order.total,
            payment = %order.payment_method,
            items = order.item_count(),
            "Order created"
        );

        self.schedule_plan(&order.id);
        order
    }

    fn schedule_plan(&self, order_id: &str) {
        for step in self.shared.settings.plan.steps() {
            let book: Weak<Shared> = Arc::downgrade(&self.shared);
            let order_id = order_id.to_string();
            let status = step.status;

            self.scheduler.schedule(
                step.delay(),
                Box::new(move || {
                    let Some(shared) = book.upgrade() else {
                        debug!(%order_id, %status, "Order book dropped; advance lost");
                        return;
                    };
                    if let Err(e) = shared.apply_status(&order_id, status) {
                        warn!(error = %e, "Scheduled advance rejected");
                    }
                }),
            );
        }
    }

    /// Moves an order to `status` and appends a tracking update.
    ///
    /// Returns `Ok(None)` when no order has this id.
    pub fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> OrderResult<Option<TrackingUpdate>> {
        self.shared.apply_status(order_id, status)
    }

    /// Shorthand for `update_status(id, Cancelled)`.
    pub fn cancel(&self, order_id: &str) -> OrderResult<Option<TrackingUpdate>> {
        self.update_status(order_id, OrderStatus::Cancelled)
    }

    pub fn get_order(&self, order_id: &str) -> Option<Order> {
        self.shared
            .orders()
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
    }

    /// Looks an order up by the number printed on the success page.
    /// Case and surrounding whitespace are ignored.
    pub fn get_order_by_number(&self, order_number: &str) -> Option<Order> {
        let wanted = normalize_order_number(order_number);
        self.shared
            .orders()
            .iter()
            .find(|o| o.order_number == wanted)
            .cloned()
    }

    /// Like [`get_order_by_number`](Self::get_order_by_number) but an error
    /// when absent.
    pub fn require_by_number(&self, order_number: &str) -> OrderResult<Order> {
        self.get_order_by_number(order_number)
            .ok_or_else(|| OrderError::NotFound(order_number.trim().to_string()))
    }

    /// All orders, oldest first.
    pub fn orders(&self) -> Vec<Order> {
        self.shared.orders().clone()
    }

    pub fn order_count(&self) -> usize {
        self.shared.orders().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::plan::FulfillmentPlan;
    use crate::scheduler::ManualScheduler;
    use shopgrid_core::catalog;
    use shopgrid_core::PaymentStatus;
    use std::time::Duration as StdDuration;

    fn manual_book() -> (OrderBook, ManualScheduler) {
        let clock = ManualClock::fixed();
        let scheduler = ManualScheduler::new(clock.clone());
        let book = OrderBook::new(
            Arc::new(clock),
            Arc::new(scheduler.clone()),
            LifecycleSettings::default(),
        );
        (book, scheduler)
    }

    fn new_order(method: PaymentMethod) -> NewOrder {
        let product = catalog::find_product("5").unwrap().clone();
        NewOrder {
            items: vec![CartItem::new(product, 2)],
            total: Money::from_minor(1000),
            payment_method: method,
            shipping_address: Address {
                street: "12 MG Road".to_string(),
                city: "Pune".to_string(),
                state: "Maharashtra".to_string(),
                postal_code: "411001".to_string(),
                country: "India".to_string(),
            },
        }
    }

    #[test]
    fn test_create_cod_order() {
        let (book, _scheduler) = manual_book();
        let order = book.create_order(new_order(PaymentMethod::Cod));

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.tracking_updates.len(), 1);
        assert_eq!(order.estimated_delivery - order.created_at, Duration::days(3));
        assert_eq!(order.total.minor_units(), 1000);
        assert_eq!(order.item_count(), 2);

        let placed = &order.tracking_updates[0];
        assert_eq!(placed.id, 1);
        assert_eq!(placed.status, ORDER_PLACED_LABEL);
        assert_eq!(placed.description, ORDER_PLACED_DESCRIPTION);
        assert_eq!(placed.timestamp, order.created_at);
        assert_eq!(placed.location.as_deref(), Some("Mumbai, Maharashtra"));
    }

    #[test]
    fn test_prepaid_order_is_paid() {
        let (book, _scheduler) = manual_book();
        let order = book.create_order(new_order(PaymentMethod::Upi));
        assert_eq!(order.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_scheduled_advances() {
        let (book, scheduler) = manual_book();
        let order = book.create_order(new_order(PaymentMethod::Cod));
        assert_eq!(scheduler.pending(), 3);

        scheduler.advance(StdDuration::from_secs(2));
        assert_eq!(book.get_order(&order.id).unwrap().status, OrderStatus::Confirmed);

        scheduler.advance(StdDuration::from_secs(3));
        assert_eq!(book.get_order(&order.id).unwrap().status, OrderStatus::Processing);

        scheduler.advance(StdDuration::from_secs(3));
        let shipped = book.get_order(&order.id).unwrap();
        assert_eq!(shipped.status, OrderStatus::Shipped);

        let labels: Vec<&str> = shipped.tracking_updates.iter().map(|u| u.status.as_str()).collect();
        assert_eq!(labels, vec!["Order Placed", "Confirmed", "Processing", "Shipped"]);

        let ids: Vec<u32> = shipped.tracking_updates.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        assert!(shipped
            .tracking_updates
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(
            shipped.tracking_updates[3].timestamp - shipped.created_at,
            Duration::seconds(8)
        );
    }

    #[test]
    fn test_lookup_by_number() {
        let (book, _scheduler) = manual_book();
        let order = book.create_order(new_order(PaymentMethod::Card));

        let found = book.get_order_by_number(&order.order_number).unwrap();
        assert_eq!(found.id, order.id);

        let typed = format!("  {}  ", order.order_number.to_lowercase());
        assert_eq!(book.get_order_by_number(&typed).unwrap().id, order.id);

        assert!(book.get_order_by_number("SG000000000").is_none());
        assert!(book.require_by_number("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let (book, _scheduler) = manual_book();
        book.create_order(new_order(PaymentMethod::Cod));
        let before = book.orders();

        assert!(book.update_status("missing", OrderStatus::Shipped).unwrap().is_none());
        assert_eq!(book.orders(), before);
    }

    #[test]
    fn test_backward_transition_rejected() {
        let (book, scheduler) = manual_book();
        let order = book.create_order(new_order(PaymentMethod::Cod));
        scheduler.advance(StdDuration::from_secs(5));

        let result = book.update_status(&order.id, OrderStatus::Confirmed);
        assert!(matches!(result, Err(OrderError::InvalidTransition { .. })));

        let current = book.get_order(&order.id).unwrap();
        assert_eq!(current.status, OrderStatus::Processing);
        assert_eq!(current.tracking_updates.len(), 3);
    }

    #[test]
    fn test_cancel_stops_later_advances() {
        let (book, scheduler) = manual_book();
        let order = book.create_order(new_order(PaymentMethod::Cod));
        scheduler.advance(StdDuration::from_secs(2));

        let update = book.cancel(&order.id).unwrap().unwrap();
        assert_eq!(update.status, "Cancelled");
        assert_eq!(update.id, 3);

        scheduler.run_all();
        let current = book.get_order(&order.id).unwrap();
        assert_eq!(current.status, OrderStatus::Cancelled);
        assert_eq!(current.tracking_updates.len(), 3);

        assert!(book.cancel(&order.id).is_err());
    }

    #[test]
    fn test_manual_delivery_updates() {
        let (book, scheduler) = manual_book();
        let order = book.create_order(new_order(PaymentMethod::Cod));
        scheduler.run_all();

        let out = book
            .update_status(&order.id, OrderStatus::OutForDelivery)
            .unwrap()
            .unwrap();
        assert_eq!(out.status, "Out for delivery");
        assert_eq!(out.description, "Your order is out for delivery.");

        book.update_status(&order.id, OrderStatus::Delivered).unwrap();
        assert!(book.update_status(&order.id, OrderStatus::Cancelled).is_err());
    }

    #[test]
    fn test_dropped_book_loses_advances() {
        let (book, scheduler) = manual_book();
        book.create_order(new_order(PaymentMethod::Cod));
        drop(book);

        assert_eq!(scheduler.advance(StdDuration::from_secs(10)), 3);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_orders_listed_oldest_first() {
        let (book, _scheduler) = manual_book();
        let first = book.create_order(new_order(PaymentMethod::Cod));
        let second = book.create_order(new_order(PaymentMethod::Upi));

        let numbers: Vec<String> = book.orders().into_iter().map(|o| o.order_number).collect();
        assert_eq!(numbers, vec![first.order_number, second.order_number]);
        assert_eq!(book.order_count(), 2);
    }

    #[test]
    fn test_custom_settings() {
        let clock = ManualClock::fixed();
        let scheduler = ManualScheduler::new(clock.clone());
        let book = OrderBook::new(
            Arc::new(clock),
            Arc::new(scheduler.clone()),
            LifecycleSettings {
                location: "Pune, Maharashtra".to_string(),
                estimated_delivery_days: 5,
                plan: FulfillmentPlan::none(),
            },
        );

        let order = book.create_order(new_order(PaymentMethod::Cod));
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(order.estimated_delivery - order.created_at, Duration::days(5));
        assert_eq!(
            order.tracking_updates[0].location.as_deref(),
            Some("Pune, Maharashtra")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_timers_advance_order() {
        let book = OrderBook::default();
        let order = book.create_order(new_order(PaymentMethod::Cod));

        tokio::time::sleep(StdDuration::from_millis(2_100)).await;
        assert_eq!(book.get_order(&order.id).unwrap().status, OrderStatus::Confirmed);

        tokio::time::sleep(StdDuration::from_secs(6)).await;
        let shipped = book.get_order(&order.id).unwrap();
        assert_eq!(shipped.status, OrderStatus::Shipped);
        assert_eq!(shipped.tracking_updates.len(), 4);
    }
}
