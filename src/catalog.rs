//! Catalog
//!
//! The immutable pricing configuration: products keyed by SKU plus the promotion
//! tables that apply to them. A [`Catalog`] is assembled once with a
//! [`CatalogBuilder`] and then shared read-only by every pricing run.

use std::{
    num::NonZeroU64,
    sync::atomic::{AtomicU64, Ordering},
};

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    prices::Price,
    products::{Product, ProductKey, Sku},
    promotions::{Giveaway, GroupBundle, Promotions, TierError, TierSchedule},
};

/// Errors raised while assembling a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A product with this SKU has already been added.
    #[error("SKU {0} is already in the catalog")]
    DuplicateSku(Sku),

    /// A promotion references a SKU with no product.
    #[error("SKU {0} is not in the catalog")]
    UnknownSku(Sku),

    /// A product already has a tier schedule.
    #[error("tiers for SKU {0} are already configured")]
    DuplicateTiers(Sku),

    /// A tier schedule is malformed.
    #[error("invalid tiers for SKU {sku}: {source}")]
    InvalidTier {
        /// Product the schedule was for
        sku: Sku,

        /// What was wrong with it
        #[source]
        source: TierError,
    },

    /// A giveaway rule is malformed.
    #[error("invalid giveaway: {0}")]
    InvalidGiveaway(&'static str),

    /// A group bundle rule is malformed.
    #[error("invalid group bundle: {0}")]
    InvalidGroupBundle(&'static str),
}

static NEXT_CATALOG_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies the catalog that issued a set of product keys.
///
/// Every [`CatalogBuilder::build`] yields a fresh id; clones share it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CatalogId(u64);

impl CatalogId {
    fn next() -> Self {
        CatalogId(NEXT_CATALOG_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Products and promotions used to price baskets.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    id: CatalogId,
    products: SlotMap<ProductKey, Product>,
    skus: FxHashMap<Sku, ProductKey>,
    promotions: Promotions,
}

impl Catalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Identity of this catalog.
    pub fn id(&self) -> CatalogId {
        self.id
    }

    /// Look up the key for a SKU.
    pub fn key(&self, sku: Sku) -> Option<ProductKey> {
        self.skus.get(&sku).copied()
    }

    /// Look up a product by key.
    pub fn product(&self, key: ProductKey) -> Option<&Product> {
        self.products.get(key)
    }

    /// Look up a product by SKU.
    pub fn product_by_sku(&self, sku: Sku) -> Option<&Product> {
        self.key(sku).and_then(|key| self.product(key))
    }

    /// Iterate over products in the order they were added.
    pub fn products(&self) -> impl Iterator<Item = (ProductKey, &Product)> {
        self.products.iter()
    }

    /// Promotion tables.
    pub fn promotions(&self) -> &Promotions {
        &self.promotions
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Validating builder for [`Catalog`].
///
/// Products must be added before promotions that reference them.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    /// Add a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateSku`] if the SKU is already present.
    pub fn product(
        &mut self,
        sku: impl Into<Sku>,
        name: impl Into<String>,
        price: u64,
    ) -> Result<&mut Self, CatalogError> {
        let sku = sku.into();

        if self.catalog.skus.contains_key(&sku) {
            return Err(CatalogError::DuplicateSku(sku));
        }

        let key = self.catalog.products.insert(Product {
            sku,
            name: name.into(),
            price: Price::new(price),
        });

        self.catalog.skus.insert(sku, key);

        Ok(self)
    }

    /// Attach `(quantity, price)` tiers to a product.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnknownSku`]: the SKU has no product.
    /// - [`CatalogError::DuplicateTiers`]: the product already has tiers.
    /// - [`CatalogError::InvalidTier`]: a tier has zero quantity or repeats a quantity.
    pub fn tiers(
        &mut self,
        sku: impl Into<Sku>,
        tiers: impl IntoIterator<Item = (u64, u64)>,
    ) -> Result<&mut Self, CatalogError> {
        let sku = sku.into();
        let key = self.key(sku)?;

        if self.catalog.promotions.tiers.contains_key(key) {
            return Err(CatalogError::DuplicateTiers(sku));
        }

        let schedule =
            TierSchedule::new(tiers).map_err(|source| CatalogError::InvalidTier { sku, source })?;

        self.catalog.promotions.tiers.insert(key, schedule);

        Ok(self)
    }

    /// Append a buy-`required`-`trigger`-get-`free_quantity`-`free` rule.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnknownSku`]: either SKU has no product.
    /// - [`CatalogError::InvalidGiveaway`]: `required` or `free_quantity` is zero.
    pub fn giveaway(
        &mut self,
        trigger: impl Into<Sku>,
        required: u64,
        free: impl Into<Sku>,
        free_quantity: u64,
    ) -> Result<&mut Self, CatalogError> {
        let trigger = self.key(trigger.into())?;
        let free = self.key(free.into())?;

        let required = NonZeroU64::new(required)
            .ok_or(CatalogError::InvalidGiveaway("required quantity must be positive"))?;
        let free_quantity = NonZeroU64::new(free_quantity)
            .ok_or(CatalogError::InvalidGiveaway("free quantity must be positive"))?;

        self.catalog
            .promotions
            .giveaways
            .push(Giveaway::new(trigger, required, free, free_quantity));

        Ok(self)
    }

    /// Append an any-`size`-of-`members`-for-`price` rule.
    ///
    /// Members are consumed in the order given.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnknownSku`]: a member has no product.
    /// - [`CatalogError::InvalidGroupBundle`]: no members, a repeated member, or zero size.
    pub fn group_bundle(
        &mut self,
        members: impl IntoIterator<Item = impl Into<Sku>>,
        size: u64,
        price: u64,
    ) -> Result<&mut Self, CatalogError> {
        let mut keys: SmallVec<[ProductKey; 5]> = SmallVec::new();

        for member in members {
            let key = self.key(member.into())?;

            if keys.contains(&key) {
                return Err(CatalogError::InvalidGroupBundle("member listed more than once"));
            }

            keys.push(key);
        }

        if keys.is_empty() {
            return Err(CatalogError::InvalidGroupBundle("no members"));
        }

        let size = NonZeroU64::new(size)
            .ok_or(CatalogError::InvalidGroupBundle("bundle size must be positive"))?;

        self.catalog
            .promotions
            .group_bundles
            .push(GroupBundle::new(keys, size, Price::new(price)));

        Ok(self)
    }

    /// Finish building.
    pub fn build(mut self) -> Catalog {
        self.catalog.id = CatalogId::next();
        self.catalog
    }

    fn key(&self, sku: Sku) -> Result<ProductKey, CatalogError> {
        self.catalog.key(sku).ok_or(CatalogError::UnknownSku(sku))
    }
}
