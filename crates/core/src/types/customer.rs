//! Checkout customer details.

use core::fmt;

use serde::{Deserialize, Serialize};

/// How the customer pays on delivery.
///
/// Serialized as `"cash"` or `"whishMoney"`. The misspelled `"wishMoney"` is
/// still accepted when reading older order data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "cash")]
    Cash,
    #[serde(rename = "whishMoney", alias = "wishMoney")]
    WhishMoney,
}

impl PaymentMethod {
    /// Wire value of the payment method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::WhishMoney => "whishMoney",
        }
    }

    /// Translation key for the payment method label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Cash => "cart.cash",
            Self::WhishMoney => "cart.whishMoney",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "whishMoney" | "wishMoney" => Ok(Self::WhishMoney),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// Customer information captured at checkout.
///
/// `name`, `phone` and `city` are required; the delivery details are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl CustomerInfo {
    /// Optional delivery fields that are present, as `(translation key, value)`.
    #[must_use]
    pub fn delivery_details(&self) -> Vec<(&'static str, &str)> {
        [
            ("cart.street", self.street.as_deref()),
            ("cart.building", self.building.as_deref()),
            ("cart.floor", self.floor.as_deref()),
            ("cart.landmark", self.landmark.as_deref()),
            ("cart.notes", self.notes.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.trim().is_empty()).map(|v| (key, v)))
        .collect()
    }
}
