//! Simulated checkout: cart review, payment selection, confirmation.
//!
//! No payment gateway is contacted. Completing the order records a
//! confirmation with a random order number and empties the visitor's cart.

use bazaar_core::{CartLineItem, CheckoutStep, OrderNumber, PaymentMethod, Price};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::store::{Store, StoreAction, StoreError};

/// Range order numbers are drawn from.
const ORDER_NUMBER_RANGE: std::ops::RangeInclusive<i32> = 100_000..=1_099_999;

/// Checkout errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Checkout is at the {actual:?} step, expected {expected:?}")]
    WrongStep {
        expected: CheckoutStep,
        actual: CheckoutStep,
    },

    #[error("Please select a payment method")]
    NoPaymentMethod,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A placed order, kept for the confirmation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_number: OrderNumber,
    pub payment_method: PaymentMethod,
    pub total: Price,
    pub item_count: u32,
    pub lines: Vec<CartLineItem>,
    pub placed_at: DateTime<Utc>,
}

/// Per-visitor checkout progress, stored in the session next to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    payment: Option<PaymentMethod>,
    confirmation: Option<OrderConfirmation>,
}

impl CheckoutFlow {
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub const fn payment(&self) -> Option<PaymentMethod> {
        self.payment
    }

    #[must_use]
    pub const fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    /// Progress bar fill for the current step.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        f64::from(self.step.number()) * 33.33
    }

    /// Move from the cart to payment selection.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart has no lines, or
    /// `WrongStep` once the order has been placed.
    pub fn proceed_to_payment(&mut self, store: &Store) -> Result<(), CheckoutError> {
        if self.step == CheckoutStep::Confirmation {
            return Err(CheckoutError::WrongStep {
                expected: CheckoutStep::Cart,
                actual: self.step,
            });
        }
        if store.is_cart_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Choose how the order will be paid.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::WrongStep` outside the payment step.
    pub fn select_payment(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Payment)?;
        self.payment = Some(method);
        Ok(())
    }

    /// Place the order and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `WrongStep` outside the payment step, `NoPaymentMethod` if none
    /// was selected, or `EmptyCart` if the cart was emptied meanwhile.
    pub fn complete(&mut self, store: &mut Store) -> Result<&OrderConfirmation, CheckoutError> {
        self.expect_step(CheckoutStep::Payment)?;
        let payment_method = self.payment.ok_or(CheckoutError::NoPaymentMethod)?;
        if store.is_cart_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let confirmation = OrderConfirmation {
            order_number: OrderNumber::new(rand::rng().random_range(ORDER_NUMBER_RANGE)),
            payment_method,
            total: store.cart_total(),
            item_count: store.cart_item_count(),
            lines: store.cart().to_vec(),
            placed_at: Utc::now(),
        };
        store.dispatch(StoreAction::ClearCart)?;

        info!(
            order_number = %confirmation.order_number,
            payment_method = %payment_method,
            total = %confirmation.total,
            "Order placed"
        );

        self.step = CheckoutStep::Confirmation;
        Ok(self.confirmation.insert(confirmation))
    }

    /// Return to the cart step ("continue shopping").
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn expect_step(&self, expected: CheckoutStep) -> Result<(), CheckoutError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CheckoutError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }
}
