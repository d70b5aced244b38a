use std::collections::HashMap;

use log::debug;

use crate::error::PurchaseError;
use crate::purchase::ProductId;

/// Inclusive price bounds of a [`Product`], in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    low: u32,
    high: u32,
}

/// A product template. Purchases are sampled from it; it is never a purchase itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    name: String,
    brand: String,
    price_range: PriceRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    products: Vec<Product>,
}

/// Immutable registry of categories and their products, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

/// Identifiers of every (category, product name) pair of a [`Catalog`].
///
/// Built in a single walk by [`ProductIds::assign`]; afterwards only looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductIds {
    /// Map of `category -> product name -> id`
    ids: HashMap<String, HashMap<String, ProductId>>,
    len: usize,
}

type ProductRow = (&'static str, &'static str, u32, u32);

const STANDARD_CATALOG: &[(&str, &[ProductRow])] = &[
    (
        "Electronics",
        &[
            ("Wireless Headphones", "TechSound", 50, 150),
            ("Bluetooth Speaker", "AudioPro", 30, 100),
            ("Smart Watch", "TechTime", 150, 400),
            ("Laptop Stand", "DeskPro", 25, 60),
            ("Wireless Mouse", "ClickTech", 15, 50),
            ("USB-C Hub", "ConnectPlus", 20, 80),
            ("Portable Charger", "PowerBank", 25, 70),
            ("Webcam HD", "VisionCam", 40, 120),
            ("Mechanical Keyboard", "KeyMaster", 60, 180),
            ("Noise Cancelling Earbuds", "SoundWave", 80, 200),
        ],
    ),
    (
        "Home Appliances",
        &[
            ("Coffee Maker", "BrewMaster", 40, 120),
            ("Blender", "BlendPro", 30, 90),
            ("Air Fryer", "CrispyCook", 60, 150),
            ("Vacuum Cleaner", "CleanHome", 80, 250),
            ("Toaster Oven", "QuickBake", 50, 130),
            ("Electric Kettle", "BoilFast", 20, 60),
            ("Food Processor", "ChopMaster", 70, 180),
            ("Rice Cooker", "PerfectRice", 35, 100),
            ("Microwave Oven", "QuickHeat", 80, 200),
            ("Stand Mixer", "BakePro", 150, 400),
        ],
    ),
    (
        "Sports & Fitness",
        &[
            ("Yoga Mat", "FitLife", 20, 50),
            ("Running Shoes", "SportFit", 60, 150),
            ("Dumbbells Set", "IronFit", 40, 120),
            ("Resistance Bands", "FlexFit", 15, 40),
            ("Jump Rope", "CardioMax", 10, 30),
            ("Foam Roller", "RecoverPro", 20, 50),
            ("Gym Bag", "CarryFit", 25, 70),
            ("Water Bottle", "HydratePlus", 15, 40),
            ("Tennis Racket", "CourtMaster", 50, 200),
            ("Bicycle Helmet", "SafeRide", 30, 100),
        ],
    ),
    (
        "Kitchen & Dining",
        &[
            ("Stainless Steel Pan", "CookPro", 30, 100),
            ("Knife Set", "SharpEdge", 40, 150),
            ("Cutting Board", "ChopWell", 15, 50),
            ("Mixing Bowls Set", "MixMaster", 20, 60),
            ("Glass Storage Containers", "FreshKeep", 25, 70),
            ("Utensil Set", "ServeRight", 20, 60),
            ("Dinner Plates Set", "DineWell", 40, 120),
            ("Wine Glasses", "CrystalClear", 30, 90),
            ("Spice Rack", "FlavorOrganize", 25, 70),
            ("Coffee Grinder", "BeanCrush", 35, 100),
        ],
    ),
    (
        "Personal Care",
        &[
            ("Electric Toothbrush", "SmileBright", 30, 120),
            ("Hair Dryer", "QuickDry", 25, 80),
            ("Massage Gun", "RelaxPro", 80, 200),
            ("Facial Steamer", "GlowSkin", 30, 90),
            ("Electric Shaver", "SmoothShave", 40, 150),
            ("Body Scale", "WeighRight", 20, 60),
            ("Nail Care Kit", "ManicurePro", 15, 45),
            ("Aromatherapy Diffuser", "CalmScent", 25, 70),
            ("LED Mirror", "ReflectWell", 35, 100),
            ("Heating Pad", "WarmComfort", 20, 60),
        ],
    ),
    (
        "Home & Garden",
        &[
            ("Plant Pot Set", "GreenThumb", 20, 60),
            ("Garden Tools Set", "DigPro", 30, 90),
            ("LED String Lights", "GlowHome", 15, 50),
            ("Throw Pillows", "CozyLiving", 20, 60),
            ("Storage Baskets", "OrganizeIt", 25, 70),
            ("Wall Clock", "TimePiece", 20, 80),
            ("Picture Frames Set", "MemoryKeep", 25, 70),
            ("Candle Set", "WarmGlow", 20, 60),
            ("Area Rug", "ComfortFloor", 50, 200),
            ("Curtains", "WindowDress", 30, 100),
        ],
    ),
    (
        "Office Supplies",
        &[
            ("Desk Organizer", "NeatDesk", 15, 50),
            ("Ergonomic Chair Cushion", "SitComfort", 25, 70),
            ("Notebook Set", "WriteWell", 10, 30),
            ("Pen Holder", "DeskTidy", 10, 30),
            ("Desk Lamp", "BrightWork", 25, 80),
            ("File Folders", "OrganizePro", 15, 40),
            ("Whiteboard", "WriteErase", 20, 70),
            ("Paper Shredder", "SecureShred", 40, 120),
            ("Stapler Set", "BindTight", 15, 40),
            ("Monitor Stand", "ViewRise", 30, 90),
        ],
    ),
    (
        "Books & Media",
        &[
            ("Fiction Novel", "ReadMore", 10, 25),
            ("Cookbook", "TasteGuide", 15, 35),
            ("Self-Help Book", "GrowWise", 12, 30),
            ("Biography", "LifeStory", 15, 35),
            ("Art Book", "CreativeView", 25, 60),
            ("Travel Guide", "ExploreWorld", 15, 40),
            ("Children's Book", "KidRead", 8, 20),
            ("Photography Book", "CaptureMoments", 30, 80),
            ("Science Book", "KnowMore", 20, 50),
            ("History Book", "PastLessons", 18, 45),
        ],
    ),
];

impl PriceRange {
    #[must_use]
    pub fn new(low: u32, high: u32) -> Self {
        PriceRange { low, high }
    }

    #[must_use]
    pub fn low(&self) -> u32 {
        self.low
    }

    #[must_use]
    pub fn high(&self) -> u32 {
        self.high
    }

    fn is_valid(self) -> bool {
        self.low > 0 && self.low <= self.high
    }
}

impl Product {
    #[must_use]
    pub fn new(name: impl Into<String>, brand: impl Into<String>, price_range: PriceRange) -> Self {
        Product {
            name: name.into(),
            brand: brand.into(),
            price_range,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    #[must_use]
    pub fn price_range(&self) -> PriceRange {
        self.price_range
    }
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>, products: Vec<Product>) -> Self {
        Category {
            name: name.into(),
            products,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

impl Catalog {
    /// # Errors
    /// Errors when the catalog could not be sampled from:
    /// 1. There are no categories
    /// 2. A category has no products
    /// 3. A price range is zero or inverted
    pub fn new(categories: Vec<Category>) -> Result<Self, PurchaseError> {
        if categories.is_empty() {
            return Err(PurchaseError::EmptyCatalog);
        }
        for category in &categories {
            if category.products.is_empty() {
                return Err(PurchaseError::EmptyCategory(category.name.clone()));
            }
            if let Some(product) = category
                .products
                .iter()
                .find(|p| !p.price_range.is_valid())
            {
                return Err(PurchaseError::InvalidPriceRange {
                    product: product.name.clone(),
                    low: product.price_range.low,
                    high: product.price_range.high,
                });
            }
        }
        Ok(Catalog { categories })
    }

    /// The built-in catalog of eight categories with ten products each.
    #[must_use]
    pub fn standard() -> Self {
        let categories = STANDARD_CATALOG
            .iter()
            .map(|&(name, rows)| {
                let products = rows
                    .iter()
                    .map(|&(product, brand, low, high)| {
                        Product::new(product, brand, PriceRange::new(low, high))
                    })
                    .collect();
                Category::new(name, products)
            })
            .collect();
        Catalog { categories }
    }

    /// Category names in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.categories.iter().map(Category::name)
    }

    #[must_use]
    pub fn entries(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn products_in(&self, category: &str) -> Option<&[Product]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(Category::products)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}

impl ProductIds {
    /// Walks categories then products in declaration order, giving each newly seen
    /// (category, product name) pair the next sequence number. Repeated pairs keep their first id.
    #[must_use]
    pub fn assign(catalog: &Catalog) -> Self {
        let mut product_ids = ProductIds::default();
        for category in &catalog.categories {
            for product in &category.products {
                let by_name = product_ids.ids.entry(category.name.clone()).or_default();
                if !by_name.contains_key(&product.name) {
                    product_ids.len += 1;
                    by_name.insert(
                        product.name.clone(),
                        ProductId::from_sequence(product_ids.len),
                    );
                }
            }
        }
        debug!("Assigned {} product ids", product_ids.len);
        product_ids
    }

    #[must_use]
    pub fn id_for(&self, category: &str, product_name: &str) -> Option<&ProductId> {
        self.ids.get(category)?.get(product_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
