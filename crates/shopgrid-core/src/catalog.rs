//! # Catalog
//!
//! The static demo catalog and the stateless queries the product grid runs
//! over it.
//!
//! ## Query Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   products()                                                            │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │   search("sony")          name or category, case-insensitive            │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │   category filter         "All Categories" or exact label               │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │   sort                    popular | price-low | price-high |            │
//! │                           rating | newest (stable)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::ALL_CATEGORIES;

// =============================================================================
// Static Data
// =============================================================================

/// Category labels shown above the product grid, "All Categories" first.
/// Some have no products yet; filtering by them yields an empty grid.
pub const CATEGORIES: [&str; 7] = [
    ALL_CATEGORIES,
    "Electronics",
    "Fashion",
    "Home & Kitchen",
    "Sports",
    "Books",
    "Beauty",
];

struct Seed {
    id: &'static str,
    name: &'static str,
    price: i64,
    original_price: Option<i64>,
    description: &'static str,
    photo: u32,
    category: &'static str,
    rating: f64,
    reviews: u32,
    features: &'static [&'static str],
}

const SEEDS: [Seed; 8] = [
    Seed {
        id: "1",
        name: "Samsung Galaxy S24 Ultra",
        price: 124999,
        original_price: Some(134999),
        description: "Latest flagship smartphone with AI-powered camera and S Pen",
        photo: 404280,
        category: "Electronics",
        rating: 4.8,
        reviews: 2456,
        features: &["256GB Storage", "12GB RAM", "200MP Camera", "S Pen Included"],
    },
    Seed {
        id: "2",
        name: "Apple MacBook Air M3",
        price: 114900,
        original_price: Some(119900),
        description: "Supercharged by M3 chip with 15-inch Liquid Retina display",
        photo: 205421,
        category: "Electronics",
        rating: 4.9,
        reviews: 1823,
        features: &["M3 Chip", "8GB RAM", "256GB SSD", "15-inch Display"],
    },
    Seed {
        id: "3",
        name: "Sony WH-1000XM5 Headphones",
        price: 29990,
        original_price: Some(34990),
        description: "Industry-leading noise canceling with premium sound quality",
        photo: 3587478,
        category: "Electronics",
        rating: 4.7,
        reviews: 3421,
        features: &["30hr Battery", "Noise Canceling", "Quick Charge", "Premium Sound"],
    },
    Seed {
        id: "4",
        name: "Nike Air Max 270",
        price: 12995,
        original_price: Some(14995),
        description: "Comfortable lifestyle shoe with Max Air cushioning",
        photo: 2529148,
        category: "Fashion",
        rating: 4.6,
        reviews: 1567,
        features: &["Max Air Cushioning", "Breathable Mesh", "Durable Rubber Sole"],
    },
    Seed {
        id: "5",
        name: "Levi's 511 Slim Jeans",
        price: 2999,
        original_price: Some(3999),
        description: "Classic slim-fit jeans with modern stretch comfort",
        photo: 1598505,
        category: "Fashion",
        rating: 4.4,
        reviews: 892,
        features: &["Slim Fit", "Stretch Denim", "Classic 5-Pocket", "Machine Washable"],
    },
    Seed {
        id: "6",
        name: "Instant Pot Duo 7-in-1",
        price: 8999,
        original_price: Some(10999),
        description: "Multi-functional pressure cooker for quick and easy meals",
        photo: 4226924,
        category: "Home & Kitchen",
        rating: 4.8,
        reviews: 2134,
        features: &["7-in-1 Functions", "6L Capacity", "Stainless Steel", "Smart Programs"],
    },
    Seed {
        id: "7",
        name: "Dyson V11 Vacuum Cleaner",
        price: 45900,
        original_price: Some(49900),
        description: "Powerful cordless vacuum with intelligent suction",
        photo: 4099354,
        category: "Home & Kitchen",
        rating: 4.9,
        reviews: 1456,
        features: &["Cordless Design", "60min Runtime", "HEPA Filter", "LCD Display"],
    },
    Seed {
        id: "8",
        name: "Adidas Ultraboost 23",
        price: 16999,
        original_price: Some(18999),
        description: "Premium running shoe with responsive Boost cushioning",
        photo: 1478442,
        category: "Fashion",
        rating: 4.7,
        reviews: 967,
        features: &["Boost Cushioning", "Primeknit Upper", "Continental Rubber", "Energy Return"],
    },
];

impl Seed {
    fn to_product(&self) -> Product {
        Product {
            id: self.id.to_string(),
            name: self.name.to_string(),
            price: Money::from_minor(self.price),
            original_price: self.original_price.map(Money::from_minor),
            description: self.description.to_string(),
            image: format!(
                "https://images.pexels.com/photos/{id}/pexels-photo-{id}.jpeg?auto=compress&cs=tinysrgb&w=800",
                id = self.photo
            ),
            category: self.category.to_string(),
            rating: self.rating,
            reviews: self.reviews,
            in_stock: true,
            features: self.features.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// The full catalog, built on first access and immutable afterwards.
pub fn products() -> &'static [Product] {
    static CATALOG: OnceLock<Vec<Product>> = OnceLock::new();
    CATALOG.get_or_init(|| SEEDS.iter().map(Seed::to_product).collect())
}

/// Looks a product up by id.
pub fn find_product(id: &str) -> Option<&'static Product> {
    products().iter().find(|p| p.id == id.trim())
}

// =============================================================================
// Category Filter
// =============================================================================

/// Which category the grid shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") || s == ALL_CATEGORIES {
            return Ok(CategoryFilter::All);
        }

        // Accept any casing from the shell, but filter on the canonical label
        CATEGORIES
            .iter()
            .skip(1)
            .find(|label| label.eq_ignore_ascii_case(s))
            .map(|label| CategoryFilter::Only(label.to_string()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: CATEGORIES.iter().map(|c| c.to_string()).collect(),
            })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

// =============================================================================
// Sort Order
// =============================================================================

/// Product grid ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Most reviewed first.
    #[default]
    Popular,
    PriceLow,
    PriceHigh,
    Rating,
    /// Descending id string.
    Newest,
}

impl SortBy {
    pub const ALL: [SortBy; 5] = [
        SortBy::Popular,
        SortBy::PriceLow,
        SortBy::PriceHigh,
        SortBy::Rating,
        SortBy::Newest,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SortBy::Popular => "popular",
            SortBy::PriceLow => "price-low",
            SortBy::PriceHigh => "price-high",
            SortBy::Rating => "rating",
            SortBy::Newest => "newest",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortBy::Popular => b.reviews.cmp(&a.reviews),
            SortBy::PriceLow => a.price.cmp(&b.price),
            SortBy::PriceHigh => b.price.cmp(&a.price),
            SortBy::Rating => b.rating.total_cmp(&a.rating),
            SortBy::Newest => b.id.cmp(&a.id),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "popular" | "relevance" => Ok(SortBy::Popular),
            "price-low" => Ok(SortBy::PriceLow),
            "price-high" => Ok(SortBy::PriceHigh),
            "rating" => Ok(SortBy::Rating),
            "newest" => Ok(SortBy::Newest),
            _ => Err(ValidationError::NotAllowed {
                field: "sort".to_string(),
                allowed: SortBy::ALL.iter().map(|s| s.as_str().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Products whose name or category contains `query`, ignoring case.
/// A blank query matches everything.
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Keeps products in the selected category.
pub fn filter_by_category<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    filter: &CategoryFilter,
) -> Vec<&'a Product> {
    products.into_iter().filter(|p| filter.matches(p)).collect()
}

/// Sorts in place. Stable, so ties keep catalog order.
pub fn sort_products(products: &mut [&Product], sort: SortBy) {
    products.sort_by(|a, b| sort.compare(a, b));
}

/// Everything the product grid needs to pick and order its cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortBy,
}

impl CatalogQuery {
    /// Runs search, then category filter, then sort.
    ///
    /// ## Example
    /// ```rust
    /// use shopgrid_core::catalog::{self, CatalogQuery, SortBy};
    ///
    /// let query = CatalogQuery {
    ///     sort: SortBy::PriceLow,
    ///     ..CatalogQuery::default()
    /// };
    /// let grid = query.run(catalog::products());
    /// assert_eq!(grid[0].name, "Levi's 511 Slim Jeans");
    /// ```
    pub fn run<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut matched = filter_by_category(search(products, &self.search), &self.category);
        sort_products(&mut matched, self.sort);
        matched
    }
}
