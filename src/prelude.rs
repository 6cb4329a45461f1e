//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{BasketCounts, BasketError},
    catalog::{Catalog, CatalogBuilder, CatalogError, CatalogId},
    fixtures::{Fixture, FixtureError},
    prices::Price,
    pricing::{ERROR_SENTINEL, checkout, checkout_value, price_basket, price_skus},
    products::{Product, ProductKey, Sku},
    promotions::{Giveaway, GroupBundle, Promotions, Tier, TierSchedule},
    receipt::{Receipt, ReceiptError},
};
