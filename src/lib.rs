//! Checkout
//!
//! A basket pricing engine for fixed catalogs with layered promotions.
//!
//! A basket is a string of single-character SKUs. Pricing runs in a fixed order:
//!
//! 1. Giveaways remove free units ("buy 2 E, get 1 B free").
//! 2. Group bundles price any N units from a set of products together.
//! 3. Tiers price the rest per product ("5 A for 200"), largest tier first, with the
//!    remainder at the standard unit price.
//!
//! ```
//! use checkout::prelude::*;
//!
//! # fn main() -> Result<(), CatalogError> {
//! let mut builder = Catalog::builder();
//!
//! builder
//!     .product('A', "A", 50)?
//!     .product('B', "B", 30)?
//!     .tiers('A', [(3, 130)])?
//!     .giveaway('A', 3, 'B', 1)?;
//!
//! let catalog = builder.build();
//!
//! assert_eq!(checkout(&catalog, "AAAB"), 130);
//! assert_eq!(checkout(&catalog, "AAAZ"), ERROR_SENTINEL);
//! # Ok(())
//! # }
//! ```

pub mod basket;
pub mod catalog;
pub mod fixtures;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod products;
pub mod promotions;
pub mod receipt;

#[cfg(test)]
mod test_support;
