//! Product Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{catalog::CatalogBuilder, fixtures::FixtureError, products::Sku};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of SKU -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Standard unit price in minor units
    pub price: u64,
}

impl ProductsFixture {
    /// Add every product to `builder`, ordered by SKU.
    ///
    /// # Errors
    ///
    /// Returns an error if a SKU is not a single character or is already in the builder.
    pub fn add_to(self, builder: &mut CatalogBuilder) -> Result<(), FixtureError> {
        let mut products = self
            .products
            .into_iter()
            .map(|(sku, product)| Ok((parse_sku(&sku)?, product)))
            .collect::<Result<Vec<_>, FixtureError>>()?;

        products.sort_unstable_by_key(|(sku, _)| *sku);

        for (sku, product) in products {
            builder.product(sku, product.name, product.price)?;
        }

        Ok(())
    }
}

/// Parse a SKU that must be exactly one character
///
/// # Errors
///
/// Returns [`FixtureError::InvalidSku`] for empty or multi-character text.
pub fn parse_sku(text: &str) -> Result<Sku, FixtureError> {
    Sku::parse(text).ok_or_else(|| FixtureError::InvalidSku(text.to_string()))
}
