//! Status enums for the checkout flow.

use serde::{Deserialize, Serialize};

/// Where a visitor is in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Reviewing the cart.
    #[default]
    Cart,
    /// Choosing a payment method.
    Payment,
    /// Order placed.
    Confirmation,
}

impl CheckoutStep {
    /// One-based position of the step, as shown in the progress bar.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Cart => 1,
            Self::Payment => 2,
            Self::Confirmation => 3,
        }
    }
}

/// Payment methods offered at checkout.
///
/// Payment is simulated; no gateway is contacted for any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    Mastercard,
    Paymob,
    /// Pay on delivery.
    Cash,
}

impl PaymentMethod {
    /// All methods, in display order.
    pub const ALL: [Self; 5] = [
        Self::CreditCard,
        Self::Paypal,
        Self::Mastercard,
        Self::Paymob,
        Self::Cash,
    ];
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreditCard => write!(f, "credit_card"),
            Self::Paypal => write!(f, "paypal"),
            Self::Mastercard => write!(f, "mastercard"),
            Self::Paymob => write!(f, "paymob"),
            Self::Cash => write!(f, "cash"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit_card" => Ok(Self::CreditCard),
            "paypal" => Ok(Self::Paypal),
            "mastercard" => Ok(Self::Mastercard),
            "paymob" => Ok(Self::Paymob),
            "cash" => Ok(Self::Cash),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_display_parse() {
        for method in PaymentMethod::ALL {
            let parsed: PaymentMethod = method.to_string().parse().unwrap();
            assert_eq!(parsed, method);
        }
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_serde_matches_display() {
        let json = serde_json::to_string(&PaymentMethod::CreditCard).unwrap();
        assert_eq!(json, "\"credit_card\"");
    }

    #[test]
    fn test_checkout_step_number() {
        assert_eq!(CheckoutStep::default(), CheckoutStep::Cart);
        assert_eq!(CheckoutStep::Payment.number(), 2);
        assert_eq!(CheckoutStep::Confirmation.number(), 3);
    }
}
