use std::collections::HashSet;
use std::fmt;

use rust_decimal::prelude::*;

use crate::purchase::PurchaseRecord;

/// Counts describing a generated dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    pub total_purchases: usize,
    pub unique_customers: usize,
    pub unique_products: usize,
    pub categories: usize,
}

impl DatasetSummary {
    #[must_use]
    pub fn from_records(purchases: &[PurchaseRecord]) -> Self {
        let customers: HashSet<_> = purchases.iter().map(|p| &p.customer_id).collect();
        let products: HashSet<_> = purchases.iter().map(|p| &p.product_id).collect();
        let categories: HashSet<_> = purchases.iter().map(|p| p.category.as_str()).collect();
        DatasetSummary {
            total_purchases: purchases.len(),
            unique_customers: customers.len(),
            unique_products: products.len(),
            categories: categories.len(),
        }
    }

    /// Purchases divided by distinct customers, to one decimal place. Zero for an empty dataset.
    #[must_use]
    pub fn average_purchases_per_customer(&self) -> Decimal {
        if self.unique_customers == 0 {
            return Decimal::ZERO;
        }
        let mut average =
            (Decimal::from(self.total_purchases) / Decimal::from(self.unique_customers)).round_dp(1);
        average.rescale(1);
        average
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset Statistics:")?;
        writeln!(f, "  - Total Customers: {}", self.unique_customers)?;
        writeln!(f, "  - Unique Products: {}", self.unique_products)?;
        writeln!(f, "  - Categories: {}", self.categories)?;
        writeln!(f, "  - Total Purchases: {}", self.total_purchases)?;
        write!(
            f,
            "  - Avg Purchases per Customer: {}",
            self.average_purchases_per_customer()
        )
    }
}

/// One line per record for the first `count` purchases, numbered from 1.
#[must_use]
pub fn preview(purchases: &[PurchaseRecord], count: usize) -> Vec<String> {
    purchases
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, p)| {
            format!(
                "{}. {} bought {} ({}) for ${}",
                i + 1,
                p.customer_name,
                p.product_name,
                p.category,
                p.price
            )
        })
        .collect()
}
