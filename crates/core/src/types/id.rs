//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create string-backed ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, `Display` and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use sts_core::define_id;
/// define_id!(SkuId);
///
/// let sku = SkuId::new("sku-1");
/// assert_eq!(sku.as_str(), "sku-1");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderNumber);

/// Prefix carried by every generated order number.
pub const ORDER_NUMBER_PREFIX: &str = "STS-";

impl OrderNumber {
    /// Build an order number from a Unix timestamp in milliseconds.
    ///
    /// The timestamp is rendered in upper-case base 36, e.g. `STS-LZ8K2Q1A`.
    #[must_use]
    pub fn from_timestamp_millis(millis: i64) -> Self {
        let millis = u64::try_from(millis).unwrap_or(0);
        Self(format!("{ORDER_NUMBER_PREFIX}{}", to_base36(millis)))
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        #[allow(clippy::cast_possible_truncation)] // remainder is always < 36
        let digit = (value % 36) as usize;
        out.push(DIGITS.get(digit).copied().unwrap_or(b'0'));
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display_and_serde() {
        let id = ProductId::new("7");
        assert_eq!(id.to_string(), "7");
        assert_eq!(serde_json::to_string(&id).unwrap_or_default(), "\"7\"");
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_295), "ZZ");
    }

    #[test]
    fn test_order_number_format() {
        let number = OrderNumber::from_timestamp_millis(1_700_000_000_000);
        assert!(number.as_str().starts_with(ORDER_NUMBER_PREFIX));
        assert_eq!(number.as_str(), "STS-LOYW3V28");
    }

    #[test]
    fn test_order_number_negative_timestamp_clamps() {
        assert_eq!(OrderNumber::from_timestamp_millis(-5).as_str(), "STS-0");
    }
}
