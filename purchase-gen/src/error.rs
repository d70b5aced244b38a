use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PurchaseError {
    #[error("CSV Error")]
    CsvError(#[from] csv::Error),
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("At least one customer is required")]
    InvalidCustomerCount,
    #[error("Purchase range {min}..={max} must have 1 <= min <= max")]
    InvalidPurchaseRange { min: u32, max: u32 },
    #[error("Price range {low}..={high} of {product} must have 0 < low <= high")]
    InvalidPriceRange { product: String, low: u32, high: u32 },
    #[error("The catalog has no categories")]
    EmptyCatalog,
    #[error("Category {0} has no products")]
    EmptyCategory(String),
    #[error("No product id was assigned to {product} in {category}")]
    UnknownProduct { category: String, product: String },
    #[error("Prices and ratings must be non-negative finite amounts")]
    InvalidAmount,
    #[error("No purchase history found for customer {0}")]
    NoPurchaseHistory(String),
    #[error("Customer {0} has purchased every available product")]
    NothingToRecommend(String),
}
