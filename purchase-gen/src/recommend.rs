//! Content-based recommendations over a purchase dataset.
//!
//! Products are grouped by (name, category), tagged with a small set of features, and every
//! product a customer has not bought yet is scored by its average similarity to the products
//! they did buy.

use std::collections::HashMap;
use std::fmt;

use log::debug;
use rust_decimal::prelude::*;

use crate::error::PurchaseError;
use crate::purchase::{Price, ProductId, PurchaseRecord, Rating};

pub const DEFAULT_RECOMMENDATIONS: usize = 10;

const KEYWORDS: [&str; 22] = [
    "wireless",
    "bluetooth",
    "smart",
    "digital",
    "portable",
    "cotton",
    "leather",
    "denim",
    "silk",
    "wool",
    "running",
    "casual",
    "formal",
    "sport",
    "athletic",
    "waterproof",
    "vintage",
    "modern",
    "classic",
    "comfortable",
    "lightweight",
    "premium",
];

/// A distinct product seen in the dataset. Price and rating come from its first row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductProfile {
    key: String,
    product_id: ProductId,
    name: String,
    category: String,
    brand: String,
    price: Price,
    rating: Rating,
    features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerHistory {
    customer_id: String,
    customer_name: String,
    /// Indices into the recommender's products, first purchase first, without repeats
    purchases: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation<'a> {
    pub product: &'a ProductProfile,
    pub score: Decimal,
}

#[derive(Debug, Default)]
pub struct Recommender {
    products: Vec<ProductProfile>,
    product_index: HashMap<String, usize>,
    customers: Vec<CustomerHistory>,
    customer_index: HashMap<String, usize>,
}

/// `"Fiction Novel", "Books & Media"` becomes `fiction_novel_books_&_media`.
#[must_use]
pub fn product_key(name: &str, category: &str) -> String {
    format!("{} {}", name, category)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// The category slug followed by every keyword found in the name or category, without repeats.
#[must_use]
pub fn extract_features(name: &str, category: &str) -> Vec<String> {
    let text = format!("{} {}", name, category).to_lowercase();
    let mut features = vec![category
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")];
    for keyword in KEYWORDS {
        if text.contains(keyword) && !features.iter().any(|f| f == keyword) {
            features.push(keyword.to_owned());
        }
    }
    features
}

/// Scores how close `candidate` is to an already `purchased` product:
/// * 3 per shared feature
/// * 4 for the same category
/// * 1.5 for the same brand
/// * 1 when the prices differ by less than 40% of the purchased price
/// * 0.5 when the ratings differ by less than 0.5
#[must_use]
pub fn similarity(purchased: &ProductProfile, candidate: &ProductProfile) -> Decimal {
    let shared = purchased
        .features
        .iter()
        .filter(|f| candidate.features.contains(*f))
        .count();
    let mut score = Decimal::from(shared) * Decimal::new(3, 0);

    if purchased.category == candidate.category {
        score += Decimal::new(4, 0);
    }
    if purchased.brand == candidate.brand {
        score += Decimal::new(15, 1);
    }

    let (price, other_price) = (purchased.price.decimal(), candidate.price.decimal());
    if price > Decimal::ZERO
        && other_price > Decimal::ZERO
        && (price - other_price).abs() / price < Decimal::new(4, 1)
    {
        score += Decimal::ONE;
    }

    if (purchased.rating.decimal() - candidate.rating.decimal()).abs() < Decimal::new(5, 1) {
        score += Decimal::new(5, 1);
    }

    score
}

impl ProductProfile {
    #[must_use]
    pub fn from_record(record: &PurchaseRecord) -> Self {
        ProductProfile {
            key: product_key(&record.product_name, &record.category),
            product_id: record.product_id.clone(),
            name: record.product_name.clone(),
            category: record.category.clone(),
            brand: record.brand.clone(),
            price: record.price,
            rating: record.rating,
            features: extract_features(&record.product_name, &record.category),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    #[must_use]
    pub fn features(&self) -> &[String] {
        &self.features
    }
}

impl CustomerHistory {
    #[must_use]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    #[must_use]
    pub fn purchase_count(&self) -> usize {
        self.purchases.len()
    }
}

impl fmt::Display for Recommendation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut score = self.score.round_dp(1);
        score.rescale(1);
        write!(
            f,
            "{} ({}) for ${}, match {}",
            self.product.name, self.product.category, self.product.price, score
        )
    }
}

impl Recommender {
    #[must_use]
    pub fn from_records(purchases: &[PurchaseRecord]) -> Self {
        let mut recommender = Recommender::default();
        for record in purchases {
            let key = product_key(&record.product_name, &record.category);
            let product = match recommender.product_index.get(&key) {
                Some(&index) => index,
                None => {
                    let index = recommender.products.len();
                    recommender.products.push(ProductProfile::from_record(record));
                    recommender.product_index.insert(key, index);
                    index
                }
            };

            let customer = match recommender.customer_index.get(record.customer_id.as_str()) {
                Some(&index) => index,
                None => {
                    let index = recommender.customers.len();
                    recommender.customers.push(CustomerHistory {
                        customer_id: record.customer_id.to_string(),
                        customer_name: record.customer_name.clone(),
                        purchases: Vec::new(),
                    });
                    recommender
                        .customer_index
                        .insert(record.customer_id.to_string(), index);
                    index
                }
            };
            let history = &mut recommender.customers[customer];
            if !history.purchases.contains(&product) {
                history.purchases.push(product);
            }
        }
        debug!(
            "Indexed {} products and {} customers",
            recommender.products.len(),
            recommender.customers.len()
        );
        recommender
    }

    /// Products in first-seen order.
    #[must_use]
    pub fn products(&self) -> &[ProductProfile] {
        &self.products
    }

    /// Customers in first-seen order.
    #[must_use]
    pub fn customers(&self) -> &[CustomerHistory] {
        &self.customers
    }

    #[must_use]
    pub fn history(&self, customer_id: &str) -> Option<Vec<&ProductProfile>> {
        let history = &self.customers[*self.customer_index.get(customer_id)?];
        Some(history.purchases.iter().map(|&i| &self.products[i]).collect())
    }

    /// Up to `limit` products the customer has not bought, best average similarity first.
    /// Equal scores keep first-seen product order.
    ///
    /// # Errors
    /// 1. The customer has no purchases in the dataset
    /// 2. The customer already bought every product
    pub fn recommend(
        &self,
        customer_id: &str,
        limit: usize,
    ) -> Result<Vec<Recommendation<'_>>, PurchaseError> {
        let history = self
            .customer_index
            .get(customer_id)
            .map(|&index| &self.customers[index])
            .filter(|history| !history.purchases.is_empty())
            .ok_or_else(|| PurchaseError::NoPurchaseHistory(customer_id.to_owned()))?;

        let purchased: Vec<&ProductProfile> =
            history.purchases.iter().map(|&i| &self.products[i]).collect();
        let count = Decimal::from(purchased.len());
        let mut scored: Vec<Recommendation<'_>> = self
            .products
            .iter()
            .enumerate()
            .filter(|(index, _)| !history.purchases.contains(index))
            .map(|(_, candidate)| {
                let total: Decimal = purchased
                    .iter()
                    .map(|product| similarity(product, candidate))
                    .sum();
                Recommendation {
                    product: candidate,
                    score: total / count,
                }
            })
            .collect();
        if scored.is_empty() {
            return Err(PurchaseError::NothingToRecommend(customer_id.to_owned()));
        }

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(limit);
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::*;
    use crate::purchase::{customer_name, CustomerId};

    fn make_purchase(
        customer: u32,
        product_name: &str,
        category: &str,
        brand: &str,
        price: f64,
        rating: f64,
    ) -> PurchaseRecord {
        PurchaseRecord {
            customer_id: CustomerId::from_sequence(customer),
            customer_name: customer_name(customer),
            product_id: ProductId::from_sequence(1),
            product_name: product_name.to_owned(),
            category: category.to_owned(),
            price: Price::try_from(price).unwrap(),
            brand: brand.to_owned(),
            rating: Rating::try_from(rating).unwrap(),
        }
    }

    fn make_profile(
        product_name: &str,
        category: &str,
        brand: &str,
        price: f64,
        rating: f64,
    ) -> ProductProfile {
        ProductProfile::from_record(&make_purchase(1, product_name, category, brand, price, rating))
    }

    fn make_dataset() -> Vec<PurchaseRecord> {
        vec![
            make_purchase(1, "Yoga Mat", "Sports & Fitness", "FitLife", 20.0, 4.0),
            make_purchase(2, "Foam Roller", "Sports & Fitness", "RecoverPro", 25.0, 4.2),
            make_purchase(2, "Wireless Mouse", "Electronics", "ClickTech", 30.0, 4.1),
            // repeated purchase at another price
            make_purchase(1, "Yoga Mat", "Sports & Fitness", "FitLife", 48.0, 3.5),
            make_purchase(3, "Yoga Mat", "Sports & Fitness", "FitLife", 22.0, 4.4),
            make_purchase(3, "Foam Roller", "Sports & Fitness", "RecoverPro", 21.0, 3.9),
            make_purchase(3, "Wireless Mouse", "Electronics", "ClickTech", 16.0, 4.7),
        ]
    }

    #[test]
    fn test_product_key() {
        assert_eq!(
            product_key("Fiction Novel", "Books & Media"),
            "fiction_novel_books_&_media"
        );
        assert_eq!(product_key("USB-C  Hub", "Electronics"), "usb-c_hub_electronics");
    }

    #[test]
    fn test_extract_features() {
        assert_eq!(
            extract_features("Wireless Headphones", "Electronics"),
            vec!["electronics", "wireless"]
        );
        assert_eq!(
            extract_features("Running Shoes", "Sports & Fitness"),
            vec!["sports-&-fitness", "running", "sport"]
        );
        assert_eq!(
            extract_features("Smart Watch", "Electronics"),
            vec!["electronics", "smart"]
        );
        assert_eq!(extract_features("Cookbook", "Books & Media"), vec!["books-&-media"]);
    }

    #[test]
    fn test_similarity_weights() {
        let yoga_mat = make_profile("Yoga Mat", "Sports & Fitness", "FitLife", 20.0, 4.0);
        let foam_roller = make_profile("Foam Roller", "Sports & Fitness", "FitLife", 25.0, 4.2);
        // 2 shared features, category, brand, price and rating
        assert_eq!(similarity(&yoga_mat, &foam_roller), Decimal::new(130, 1));

        let mouse = make_profile("Wireless Mouse", "Electronics", "ClickTech", 100.0, 3.0);
        assert_eq!(similarity(&yoga_mat, &mouse), Decimal::ZERO);

        let same_brand = make_profile("Wireless Mouse", "Electronics", "FitLife", 100.0, 3.0);
        assert_eq!(similarity(&yoga_mat, &same_brand), Decimal::new(15, 1));
    }

    #[test]
    fn test_similarity_price_is_relative_to_purchase() {
        let expensive = make_profile("Cookbook", "Books & Media", "A", 100.0, 1.0);
        let cheaper = make_profile("Cookbook", "Books & Media", "B", 65.0, 3.0);
        // 35 / 100 is close, 35 / 65 is not
        assert_eq!(similarity(&expensive, &cheaper), Decimal::new(8, 0));
        assert_eq!(similarity(&cheaper, &expensive), Decimal::new(7, 0));
    }

    #[test]
    fn test_similarity_thresholds_are_strict() {
        let base = make_profile("Art Book", "Books & Media", "A", 10.0, 4.0);
        let half_point_apart = make_profile("Art Book", "Books & Media", "B", 14.0, 4.5);
        // price differs by exactly 40% and rating by exactly 0.5
        assert_eq!(similarity(&base, &half_point_apart), Decimal::new(7, 0));
    }

    #[test]
    fn test_from_records_groups_products_and_histories() {
        let recommender = Recommender::from_records(&make_dataset());
        let names: Vec<&str> = recommender.products().iter().map(ProductProfile::name).collect();
        assert_eq!(names, vec!["Yoga Mat", "Foam Roller", "Wireless Mouse"]);
        assert_eq!(recommender.products()[0].price().to_string(), "20.00");

        let customers: Vec<(&str, usize)> = recommender
            .customers()
            .iter()
            .map(|c| (c.customer_id(), c.purchase_count()))
            .collect();
        assert_eq!(customers, vec![("C0001", 1), ("C0002", 2), ("C0003", 3)]);
        assert_eq!(recommender.customers()[1].customer_name(), "Customer 2");

        let history = recommender.history("C0002").unwrap();
        assert_eq!(history[0].name(), "Foam Roller");
        assert!(recommender.history("C0099").is_none());
    }

    #[test]
    fn test_recommend_excludes_purchased_and_sorts() {
        let recommender = Recommender::from_records(&make_dataset());
        let recommendations = recommender
            .recommend("C0001", DEFAULT_RECOMMENDATIONS)
            .unwrap();
        let ranked: Vec<(&str, Decimal)> = recommendations
            .iter()
            .map(|r| (r.product.name(), r.score))
            .collect();
        assert_eq!(
            ranked,
            vec![
                ("Foam Roller", Decimal::new(115, 1)),
                ("Wireless Mouse", Decimal::new(5, 1)),
            ]
        );
        assert_eq!(
            recommendations[0].to_string(),
            "Foam Roller (Sports & Fitness) for $25.00, match 11.5"
        );

        let top = recommender.recommend("C0001", 1).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].product.name(), "Foam Roller");
    }

    #[test]
    fn test_recommend_averages_over_history() {
        let recommender = Recommender::from_records(&make_dataset());
        let recommendations = recommender.recommend("C0002", 10).unwrap();
        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].product.name(), "Yoga Mat");
        // (11.5 against the foam roller + 1.5 against the mouse) / 2
        assert_eq!(recommendations[0].score, Decimal::new(65, 1));
    }

    #[test]
    fn test_recommend_errors() {
        let recommender = Recommender::from_records(&make_dataset());
        assert!(matches!(
            recommender.recommend("C0099", 10),
            Err(PurchaseError::NoPurchaseHistory(id)) if id == "C0099"
        ));
        assert!(matches!(
            recommender.recommend("C0003", 10),
            Err(PurchaseError::NothingToRecommend(id)) if id == "C0003"
        ));

        let empty = Recommender::from_records(&[]);
        assert!(empty.recommend("C0001", 10).is_err());
    }
}
