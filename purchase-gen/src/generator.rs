use std::convert::TryFrom;

use log::{debug, info};
use rand::Rng;

use crate::catalog::{Catalog, ProductIds};
use crate::error::PurchaseError;
use crate::purchase::{customer_name, CustomerId, Price, PurchaseRecord, Rating};

pub const DEFAULT_CUSTOMERS: u32 = 100;
pub const DEFAULT_MIN_PURCHASES: u32 = 3;
pub const DEFAULT_MAX_PURCHASES: u32 = 15;

/// Bounds of the uniform rating draw, shared by every product.
pub const RATING_RANGE: (f64, f64) = (3.5, 5.0);

/// Source of the random draws a generation run consumes.
///
/// Every [`rand::Rng`] is a `Sampler`; pass a seeded `StdRng` for reproducible output.
pub trait Sampler {
    /// Uniform integer in `min..=max`
    fn gen_count(&mut self, min: u32, max: u32) -> u32;

    /// Uniform index in `0..len`. Callers never pass a zero `len`.
    fn gen_index(&mut self, len: usize) -> usize;

    /// Uniform real between `low` and `high`
    fn gen_uniform(&mut self, low: f64, high: f64) -> f64;

    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.gen_index(items.len()))
        }
    }
}

impl<R: Rng> Sampler for R {
    fn gen_count(&mut self, min: u32, max: u32) -> u32 {
        self.gen_range(min..=max)
    }

    fn gen_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn gen_uniform(&mut self, low: f64, high: f64) -> f64 {
        self.gen_range(low..=high)
    }
}

/// Inclusive bounds on how many purchases a single customer makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseRange {
    min: u32,
    max: u32,
}

impl PurchaseRange {
    /// # Errors
    /// Errors when `min` is zero or greater than `max`
    pub fn new(min: u32, max: u32) -> Result<Self, PurchaseError> {
        if min >= 1 && min <= max {
            Ok(PurchaseRange { min, max })
        } else {
            Err(PurchaseError::InvalidPurchaseRange { min, max })
        }
    }

    #[must_use]
    pub fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }
}

impl Default for PurchaseRange {
    fn default() -> Self {
        PurchaseRange {
            min: DEFAULT_MIN_PURCHASES,
            max: DEFAULT_MAX_PURCHASES,
        }
    }
}

#[derive(Debug)]
pub struct PurchaseGenerator<'a> {
    catalog: &'a Catalog,
    product_ids: ProductIds,
}

impl<'a> PurchaseGenerator<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        PurchaseGenerator {
            catalog,
            product_ids: ProductIds::assign(catalog),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    #[must_use]
    pub fn product_ids(&self) -> &ProductIds {
        &self.product_ids
    }

    /// Simulates customers `1..=num_customers`, each making a number of purchases drawn from
    /// `purchases_per_customer`. Records come back customer-major, then in draw order.
    ///
    /// # Errors
    /// Errors when `num_customers` is zero, or when the catalog cannot be sampled from
    pub fn generate<S: Sampler>(
        &self,
        num_customers: u32,
        purchases_per_customer: PurchaseRange,
        sampler: &mut S,
    ) -> Result<Vec<PurchaseRecord>, PurchaseError> {
        if num_customers < 1 {
            return Err(PurchaseError::InvalidCustomerCount);
        }

        let mut purchases = Vec::new();
        for customer in 1..=num_customers {
            let num_purchases =
                sampler.gen_count(purchases_per_customer.min, purchases_per_customer.max);
            debug!("Customer {} makes {} purchases", customer, num_purchases);
            for _ in 0..num_purchases {
                purchases.push(self.purchase(customer, sampler)?);
            }
        }
        info!(
            "Generated {} purchases for {} customers",
            purchases.len(),
            num_customers
        );

        Ok(purchases)
    }

    fn purchase<S: Sampler>(
        &self,
        customer: u32,
        sampler: &mut S,
    ) -> Result<PurchaseRecord, PurchaseError> {
        let category = sampler
            .choose(self.catalog.entries())
            .ok_or(PurchaseError::EmptyCatalog)?;
        let product = sampler
            .choose(category.products())
            .ok_or_else(|| PurchaseError::EmptyCategory(category.name().to_owned()))?;
        let product_id = self
            .product_ids
            .id_for(category.name(), product.name())
            .ok_or_else(|| PurchaseError::UnknownProduct {
                category: category.name().to_owned(),
                product: product.name().to_owned(),
            })?;

        let range = product.price_range();
        let price = Price::try_from(
            sampler.gen_uniform(f64::from(range.low()), f64::from(range.high())),
        )?;
        let rating = Rating::try_from(sampler.gen_uniform(RATING_RANGE.0, RATING_RANGE.1))?;

        Ok(PurchaseRecord {
            customer_id: CustomerId::from_sequence(customer),
            customer_name: customer_name(customer),
            product_id: product_id.clone(),
            product_name: product.name().to_owned(),
            category: category.name().to_owned(),
            price,
            brand: product.brand().to_owned(),
            rating,
        })
    }
}
