//! Basket
//!
//! Parsing raw baskets into per-product unit counts. [`BasketCounts`] is the only mutable
//! state in a pricing run: each promotion stage takes it by exclusive reference and the
//! final stage consumes it.

use serde_norway::Value;
use slotmap::{SecondaryMap, secondary};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogId},
    products::{ProductKey, Sku},
};

/// Errors related to basket parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BasketError {
    /// A SKU that is not in the catalog (SKU, character position).
    #[error("unknown SKU {sku} at position {position}")]
    UnknownSku {
        /// The unrecognised SKU
        sku: Sku,

        /// Zero-based position in the basket
        position: usize,
    },

    /// The input is not a string or a sequence of single-character SKUs.
    #[error("basket must be a string or a sequence of single-character SKUs, got {0}")]
    InvalidInput(String),

    /// The counts were tallied against a different catalog.
    #[error("basket was tallied against another catalog")]
    ForeignCatalog,
}

/// Remaining units per product.
///
/// Product keys are only meaningful to the catalog that issued them, so counts
/// remember which catalog they were tallied against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketCounts {
    catalog: CatalogId,
    counts: SecondaryMap<ProductKey, u64>,
}

impl BasketCounts {
    /// Create empty counts for `catalog`.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            catalog: catalog.id(),
            counts: SecondaryMap::new(),
        }
    }

    /// Catalog these counts belong to.
    pub fn catalog(&self) -> CatalogId {
        self.catalog
    }

    /// Check that these counts were tallied against `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::ForeignCatalog`] if they were not.
    pub fn ensure_catalog(&self, catalog: &Catalog) -> Result<(), BasketError> {
        if self.catalog == catalog.id() {
            Ok(())
        } else {
            Err(BasketError::ForeignCatalog)
        }
    }

    /// Tally a basket written as a string with one character per unit.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::UnknownSku`] for the first character not in `catalog`.
    pub fn parse(catalog: &Catalog, skus: &str) -> Result<Self, BasketError> {
        Self::from_skus(catalog, skus.chars().map(Sku::new))
    }

    /// Tally a sequence of SKUs.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::UnknownSku`] for the first SKU not in `catalog`.
    pub fn from_skus(
        catalog: &Catalog,
        skus: impl IntoIterator<Item = Sku>,
    ) -> Result<Self, BasketError> {
        let mut counts = Self::new(catalog);

        for (position, sku) in skus.into_iter().enumerate() {
            let key = catalog
                .key(sku)
                .ok_or(BasketError::UnknownSku { sku, position })?;

            counts.add(key, 1);
        }

        Ok(counts)
    }

    /// Tally a loosely-typed basket, such as one decoded from a YAML or JSON document.
    ///
    /// Accepts a string (one character per unit) or a sequence of single-character strings.
    ///
    /// # Errors
    ///
    /// - [`BasketError::InvalidInput`]: any other shape of value.
    /// - [`BasketError::UnknownSku`]: a SKU not in `catalog`.
    pub fn from_value(catalog: &Catalog, value: &Value) -> Result<Self, BasketError> {
        match value {
            Value::String(skus) => Self::parse(catalog, skus),
            Value::Sequence(entries) => {
                let skus = entries
                    .iter()
                    .map(|entry| match entry {
                        Value::String(text) => Sku::parse(text)
                            .ok_or_else(|| BasketError::InvalidInput(format!("SKU {text:?}"))),
                        other => Err(BasketError::InvalidInput(describe(other).to_string())),
                    })
                    .collect::<Result<SmallVec<[Sku; 16]>, _>>()?;

                Self::from_skus(catalog, skus)
            }
            other => Err(BasketError::InvalidInput(describe(other).to_string())),
        }
    }

    /// Units of `product` remaining.
    pub fn get(&self, product: ProductKey) -> u64 {
        self.counts.get(product).copied().unwrap_or(0)
    }

    /// Add `quantity` units of `product`.
    pub fn add(&mut self, product: ProductKey, quantity: u64) {
        if quantity == 0 {
            return;
        }

        if let Some(count) = self.counts.get_mut(product) {
            *count = count.saturating_add(quantity);
        } else {
            self.counts.insert(product, quantity);
        }
    }

    /// Remove up to `quantity` units of `product`, returning how many were removed.
    ///
    /// Never takes a count below zero; a product whose count reaches zero is dropped.
    pub fn remove_up_to(&mut self, product: ProductKey, quantity: u64) -> u64 {
        let Some(count) = self.counts.get_mut(product) else {
            return 0;
        };

        let removed = quantity.min(*count);
        *count -= removed;

        if *count == 0 {
            self.counts.remove(product);
        }

        removed
    }

    /// Iterate over `(product, units)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, u64)> + '_ {
        self.counts.iter().map(|(product, count)| (product, *count))
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no units remain.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total units across all products.
    pub fn total_units(&self) -> u64 {
        self.counts.values().fold(0, |acc, count| acc.saturating_add(*count))
    }
}

impl IntoIterator for BasketCounts {
    type Item = (ProductKey, u64);
    type IntoIter = secondary::IntoIter<ProductKey, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
