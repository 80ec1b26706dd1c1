//! # Checkout Commands
//!
//! Drives the three-step wizard in [`CheckoutState`] and places the order.
//!
//! ## Place Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_order(&state)                                                    │
//! │     │                                                                   │
//! │     ├── no wizard / not on Review ───────► VALIDATION_ERROR             │
//! │     ├── cart empty ──────────────────────► CART_ERROR "Your cart is…"   │
//! │     │                                                                   │
//! │     ├── sleep(checkout.processing_delay_ms)      "Processing..."        │
//! │     ├── PaymentGateway::charge(total, method)                           │
//! │     │       └── failure ─────────────────► PAYMENT_ERROR, cart kept    │
//! │     ├── OrderBook::create_order(cart snapshot)                          │
//! │     │       └── timers: confirmed · processing · shipped                │
//! │     └── clear cart, close wizard, remember order number                 │
//! │                                                                         │
//! │  ──► "Order Placed Successfully!"  Order Number: SG…                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopgrid_core::{CoreError, Order, PaymentMethod};
use shopgrid_orders::NewOrder;
use tracing::{debug, info};

use crate::collaborators::PaymentReceipt;
use crate::commands::cart::{get_cart, CartResponse};
use crate::error::ApiError;
use crate::state::{AddressField, CheckoutDraft, CheckoutState, CheckoutStep};
use crate::AppState;

/// Raised when a wizard command runs with no checkout open.
pub const NO_CHECKOUT_MESSAGE: &str = "No checkout in progress. Type 'checkout' to start.";

/// The wizard plus the cart it will order, for the review screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutView {
    pub draft: CheckoutDraft,
    pub cart: CartResponse,
}

/// A successfully placed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order: Order,
    pub receipt: PaymentReceipt,
}

fn no_checkout() -> ApiError {
    ApiError::validation(NO_CHECKOUT_MESSAGE)
}

fn with_draft<R>(
    checkout: &CheckoutState,
    f: impl FnOnce(&mut CheckoutDraft) -> Result<R, ApiError>,
) -> Result<R, ApiError> {
    checkout.with_draft_mut(f).unwrap_or_else(|| Err(no_checkout()))
}

fn view(state: &AppState, draft: CheckoutDraft) -> CheckoutView {
    CheckoutView {
        draft,
        cart: get_cart(&state.cart, &state.config),
    }
}

/// Opens the wizard on the address step.
///
/// Restarting discards whatever was entered before. Guests may check out;
/// a signed-in customer gets name and phone prefilled.
pub fn begin_checkout(state: &AppState) -> Result<CheckoutView, ApiError> {
    if state.cart.with_cart(|c| c.is_empty()) {
        return Err(CoreError::EmptyCart.into());
    }

    let user = state.auth.current_user();
    let draft = CheckoutDraft::start(user.as_ref(), &state.config.checkout.default_country);
    debug!(signed_in = user.is_some(), "begin_checkout command");

    state.checkout.begin(draft.clone());
    Ok(view(state, draft))
}

/// Current wizard contents with the live cart.
pub fn current_checkout(state: &AppState) -> Result<CheckoutView, ApiError> {
    let draft = state.checkout.current().ok_or_else(no_checkout)?;
    Ok(view(state, draft))
}

/// Sets one address-step field by name (`name`, `phone`, `street`, `city`,
/// `state`, `pincode`, `country`).
pub fn set_checkout_field(
    checkout: &CheckoutState,
    field: &str,
    value: &str,
) -> Result<CheckoutDraft, ApiError> {
    let field: AddressField = field.parse()?;
    debug!(field = field.as_str(), "set_checkout_field command");

    with_draft(checkout, |draft| {
        draft.set_field(field, value);
        Ok(draft.clone())
    })
}

/// Picks `cod`, `upi` or `card`.
pub fn choose_payment(checkout: &CheckoutState, method: &str) -> Result<CheckoutDraft, ApiError> {
    let method: PaymentMethod = method.parse()?;
    debug!(%method, "choose_payment command");

    with_draft(checkout, |draft| {
        draft.choose_payment(method)?;
        Ok(draft.clone())
    })
}

/// Continue button. Leaving the address step validates it.
pub fn next_step(checkout: &CheckoutState) -> Result<CheckoutDraft, ApiError> {
    with_draft(checkout, |draft| {
        let step = draft.next()?;
        debug!(%step, "next_step command");
        Ok(draft.clone())
    })
}

/// Back button.
pub fn previous_step(checkout: &CheckoutState) -> Result<CheckoutDraft, ApiError> {
    with_draft(checkout, |draft| {
        let step = draft.back();
        debug!(%step, "previous_step command");
        Ok(draft.clone())
    })
}

/// Closes the wizard without ordering. Returns whether one was open.
pub fn cancel_checkout(checkout: &CheckoutState) -> bool {
    checkout.finish().is_some()
}

/// Places the order from the review step.
///
/// ## Behavior
/// - Waits `checkout.processing_delay_ms` before charging
/// - On success the cart is emptied and the wizard closed
/// - On payment failure the cart and wizard are left as they were
pub async fn place_order(state: &AppState) -> Result<PlacedOrder, ApiError> {
    let draft = state.checkout.current().ok_or_else(no_checkout)?;
    if draft.step != CheckoutStep::Review {
        return Err(ApiError::validation(format!(
            "Finish the {} step before placing the order",
            draft.step
        )));
    }
    draft.validate_address_step()?;

    if state.cart.with_cart(|c| c.is_empty()) {
        return Err(CoreError::EmptyCart.into());
    }

    debug!(delay_ms = state.config.checkout.processing_delay_ms, "place_order command");
    tokio::time::sleep(state.config.checkout_delay()).await;

    let cart = get_cart(&state.cart, &state.config);
    if cart.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let receipt = state
        .payments
        .charge(cart.totals.total, draft.payment_method)
        .await?;

    let order = state.orders.book().create_order(NewOrder {
        items: cart.items,
        total: cart.totals.total,
        payment_method: draft.payment_method,
        shipping_address: draft.address,
    });

    state.cart.with_cart_mut(|c| c.clear());
    state.checkout.finish();
    state.orders.remember_placed(&order.order_number);

    info!(order_number = %order.order_number, total = %order.total, "Order placed");
    Ok(PlacedOrder { order, receipt })
}
