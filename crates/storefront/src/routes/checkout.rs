//! Checkout route handlers.
//!
//! Three steps: cart review, payment selection, confirmation. Payment is
//! simulated.

use axum::Json;
use bazaar_core::{CheckoutStep, PaymentMethod};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::checkout::OrderConfirmation;
use crate::error::{Result, add_breadcrumb};
use crate::middleware::VisitorSession;

/// Checkout display data.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    pub step: CheckoutStep,
    pub step_number: u8,
    pub progress_percent: f64,
    pub payment_method: Option<PaymentMethod>,
    pub payment_methods: [PaymentMethod; 5],
    pub subtotal: String,
    pub item_count: u32,
    pub confirmation: Option<OrderConfirmation>,
}

impl From<&VisitorSession> for CheckoutView {
    fn from(visitor: &VisitorSession) -> Self {
        let flow = &visitor.checkout;
        Self {
            step: flow.step(),
            step_number: flow.step().number(),
            progress_percent: flow.progress_percent(),
            payment_method: flow.payment(),
            payment_methods: PaymentMethod::ALL,
            subtotal: visitor.store.cart_total().display(),
            item_count: visitor.store.cart_item_count(),
            confirmation: flow.confirmation().cloned(),
        }
    }
}

/// Payment selection request body.
#[derive(Debug, Deserialize)]
pub struct SelectPaymentRequest {
    pub method: PaymentMethod,
}

/// Current checkout state.
#[instrument(skip(visitor))]
pub async fn show(visitor: VisitorSession) -> Json<CheckoutView> {
    Json(CheckoutView::from(&visitor))
}

/// Proceed from the cart to payment selection.
#[instrument(skip(visitor))]
pub async fn payment(mut visitor: VisitorSession) -> Result<Json<CheckoutView>> {
    visitor.checkout.proceed_to_payment(&visitor.store)?;
    visitor.save().await?;
    Ok(Json(CheckoutView::from(&visitor)))
}

/// Choose a payment method.
#[instrument(skip(visitor))]
pub async fn select(
    mut visitor: VisitorSession,
    Json(request): Json<SelectPaymentRequest>,
) -> Result<Json<CheckoutView>> {
    visitor.checkout.select_payment(request.method)?;
    visitor.save().await?;
    Ok(Json(CheckoutView::from(&visitor)))
}

/// Place the order and empty the cart.
#[instrument(skip(visitor))]
pub async fn complete(mut visitor: VisitorSession) -> Result<Json<CheckoutView>> {
    let order_number = visitor
        .checkout
        .complete(&mut visitor.store)?
        .order_number
        .to_string();
    visitor.save().await?;

    add_breadcrumb(
        "checkout",
        "Order placed",
        Some(&[("order_number", &order_number)]),
    );
    Ok(Json(CheckoutView::from(&visitor)))
}

/// Back to the cart step ("continue shopping").
#[instrument(skip(visitor))]
pub async fn reset(mut visitor: VisitorSession) -> Result<Json<CheckoutView>> {
    visitor.checkout.reset();
    visitor.save().await?;
    Ok(Json(CheckoutView::from(&visitor)))
}
