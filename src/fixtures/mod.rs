//! Fixtures
//!
//! Catalog configuration stored as YAML fixture sets:
//!
//! ```text
//! <base>/products/<set>.yml
//! <base>/promotions/<set>.yml
//! ```

use std::{fs, path::PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogBuilder, CatalogError},
    fixtures::{products::ProductsFixture, promotions::PromotionsFixture},
};

pub mod products;
pub mod promotions;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A SKU that is not exactly one character
    #[error("Invalid SKU: {0:?}")]
    InvalidSku(String),

    /// The fixture describes an invalid catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog assembled from the files loaded so far
    builder: CatalogBuilder,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            builder: Catalog::builder(),
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a product is invalid.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        debug!(path = %file_path.display(), products = fixture.products.len(), "loaded products");

        fixture.add_to(&mut self.builder)?;

        Ok(self)
    }

    /// Load promotions from a YAML fixture file
    ///
    /// Products must be loaded first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a promotion is invalid.
    pub fn load_promotions(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("promotions")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let fixture: PromotionsFixture = serde_norway::from_str(&contents)?;

        debug!(
            path = %file_path.display(),
            promotions = fixture.promotions.len(),
            "loaded promotions"
        );

        fixture.add_to(&mut self.builder)?;

        Ok(self)
    }

    /// Load a complete fixture set (products and promotions with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture.load_products(name)?.load_promotions(name)?;

        Ok(fixture)
    }

    /// Finish loading and return the catalog
    pub fn build(self) -> Catalog {
        self.builder.build()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
