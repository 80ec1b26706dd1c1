//! # Catalog Commands
//!
//! Product grid and product detail.
//!
//! ## Browse Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  search sony ──┐                                                        │
//! │  category … ───┼──► CatalogQuery { search, category, sort }            │
//! │  sort rating ──┘            │                                           │
//! │                             ▼                                           │
//! │                  list_products(&query)                                  │
//! │                             │                                           │
//! │                             ▼                                           │
//! │      "8 products"  ·  card per product (price, MRP, % off, rating)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopgrid_core::catalog::{self, CatalogQuery, CATEGORIES};
use shopgrid_core::validation::validate_search_query;
use shopgrid_core::{CoreError, Product};
use tracing::debug;

use crate::error::ApiError;

/// A product as shown on a grid card or the detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    /// Whole percent off the original price, when there is one.
    pub discount_percent: Option<i64>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        ProductView {
            product: product.clone(),
            discount_percent: product.discount_percent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub query: CatalogQuery,
    pub products: Vec<ProductView>,
}

/// Runs the grid query over the demo catalog.
pub fn list_products(query: &CatalogQuery) -> Result<CatalogResponse, ApiError> {
    let search = validate_search_query(&query.search)?;
    let query = CatalogQuery {
        search,
        ..query.clone()
    };
    debug!(search = %query.search, category = %query.category, sort = %query.sort, "list_products command");

    let products = query
        .run(catalog::products())
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(CatalogResponse { query, products })
}

/// One product by id.
pub fn get_product(product_id: &str) -> Result<ProductView, ApiError> {
    debug!(product_id, "get_product command");
    catalog::find_product(product_id)
        .map(ProductView::from)
        .ok_or_else(|| CoreError::ProductNotFound(product_id.trim().to_string()).into())
}

/// Category labels, "All Categories" first.
pub fn list_categories() -> Vec<&'static str> {
    CATEGORIES.to_vec()
}
