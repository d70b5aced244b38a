use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::*;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PurchaseError;

pub const PRICE_DECIMAL_PLACES: u32 = 2;
pub const RATING_DECIMAL_PLACES: u32 = 1;

/// Digits used when zero-padding sequential identifiers. Longer sequences are not truncated.
pub const ID_WIDTH: usize = 4;

/// A non-negative decimal with exactly `PLACES` fractional digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rounded<const PLACES: u32>(Decimal);

pub type Price = Rounded<PRICE_DECIMAL_PLACES>;
pub type Rating = Rounded<RATING_DECIMAL_PLACES>;

macro_rules! sequential_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal, $sequence:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub const PREFIX: char = $prefix;

            #[must_use]
            pub fn from_sequence(sequence: $sequence) -> Self {
                $name(format!("{}{:0width$}", Self::PREFIX, sequence, width = ID_WIDTH))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

sequential_id!(
    /// `P0001`, `P0002`, ... assigned once per (category, product) pair.
    ProductId,
    'P',
    usize
);
sequential_id!(
    /// `C0001`, `C0002`, ... one per simulated customer.
    CustomerId,
    'C',
    u32
);

/// Field order of a purchase row. Must match the declaration order of [`PurchaseRecord`].
pub const HEADER: [&str; 8] = [
    "customer_id",
    "customer_name",
    "product_id",
    "product_name",
    "category",
    "price",
    "brand",
    "rating",
];

#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub category: String,
    pub price: Price,
    pub brand: String,
    pub rating: Rating,
}

#[must_use]
pub fn customer_name(sequence: u32) -> String {
    format!("Customer {}", sequence)
}

impl<const PLACES: u32> Rounded<PLACES> {
    #[must_use]
    pub fn decimal(&self) -> Decimal {
        self.0
    }
}

impl<const PLACES: u32> TryFrom<Decimal> for Rounded<PLACES> {
    type Error = PurchaseError;
    fn try_from(decimal: Decimal) -> Result<Self, Self::Error> {
        if decimal >= Decimal::ZERO {
            let mut decimal = decimal.round_dp(PLACES);
            decimal.rescale(PLACES);
            Ok(Rounded(decimal))
        } else {
            Err(PurchaseError::InvalidAmount)
        }
    }
}

/// Rounds half-to-even on the exact binary value of `value`, so `2.675` becomes `2.67`.
impl<const PLACES: u32> TryFrom<f64> for Rounded<PLACES> {
    type Error = PurchaseError;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Rounded::try_from(Decimal::from_f64_retain(value).ok_or(PurchaseError::InvalidAmount)?)
    }
}

impl<const PLACES: u32> fmt::Display for Rounded<PLACES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<const PLACES: u32> Serialize for Rounded<PLACES> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de, const PLACES: u32> Deserialize<'de> for Rounded<PLACES> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let decimal = Decimal::from_str(raw.trim()).map_err(de::Error::custom)?;
        Rounded::try_from(decimal).map_err(de::Error::custom)
    }
}
