//! Tiered Quantity Pricing
//!
//! Per-product "N units for a fixed price" offers. A product may carry several tiers;
//! they are applied greedily from the largest quantity downward and whatever is left
//! over is charged at the standard unit price.

use std::num::NonZeroU64;

use smallvec::SmallVec;
use thiserror::Error;

use crate::{basket::BasketCounts, catalog::Catalog, prices::Price, products::ProductKey};

/// Errors raised while assembling a tier schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TierError {
    /// A tier was configured with a quantity of zero.
    #[error("tier quantity must be greater than zero")]
    ZeroQuantity,

    /// Two tiers share the same quantity.
    #[error("more than one tier for quantity {0}")]
    DuplicateQuantity(u64),
}

/// A single "`quantity` units for `price`" offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    quantity: NonZeroU64,
    price: Price,
}

impl Tier {
    /// Create a new tier.
    pub const fn new(quantity: NonZeroU64, price: Price) -> Self {
        Self { quantity, price }
    }

    /// Number of units the tier prices together.
    pub const fn quantity(&self) -> NonZeroU64 {
        self.quantity
    }

    /// Price charged for `quantity` units.
    pub const fn price(&self) -> Price {
        self.price
    }
}

/// Tiers for a single product, ordered by descending quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierSchedule {
    tiers: SmallVec<[Tier; 3]>,
}

impl TierSchedule {
    /// Build a schedule from `(quantity, price)` pairs in any order.
    ///
    /// # Errors
    ///
    /// - [`TierError::ZeroQuantity`]: a pair has a quantity of zero.
    /// - [`TierError::DuplicateQuantity`]: two pairs share a quantity.
    pub fn new(tiers: impl IntoIterator<Item = (u64, u64)>) -> Result<Self, TierError> {
        let mut tiers = tiers
            .into_iter()
            .map(|(quantity, price)| {
                NonZeroU64::new(quantity)
                    .map(|quantity| Tier::new(quantity, Price::new(price)))
                    .ok_or(TierError::ZeroQuantity)
            })
            .collect::<Result<SmallVec<[Tier; 3]>, _>>()?;

        tiers.sort_unstable_by(|a, b| b.quantity.cmp(&a.quantity));

        let duplicate = tiers.windows(2).find_map(|pair| match pair {
            [first, second] if first.quantity == second.quantity => Some(first.quantity.get()),
            _ => None,
        });

        if let Some(quantity) = duplicate {
            return Err(TierError::DuplicateQuantity(quantity));
        }

        Ok(Self { tiers })
    }

    /// Tiers, largest quantity first.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// True when the schedule has no tiers.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Price `quantity` units of `product` against this schedule.
    pub fn price(&self, product: ProductKey, quantity: u64, unit_price: Price) -> TieredLine {
        let mut remaining = quantity;
        let mut applied = SmallVec::new();
        let mut subtotal = Price::ZERO;

        for tier in &self.tiers {
            let applications = remaining / tier.quantity;

            if applications == 0 {
                continue;
            }

            subtotal = subtotal + tier.price.times(applications);
            remaining -= applications * tier.quantity.get();

            applied.push(AppliedTier {
                tier: *tier,
                applications,
            });
        }

        TieredLine {
            product,
            quantity,
            tiers: applied,
            full_price_units: remaining,
            unit_price,
            subtotal: subtotal + unit_price.times(remaining),
        }
    }
}

/// A tier together with the number of times it was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedTier {
    /// The tier applied.
    pub tier: Tier,

    /// How many times it was applied.
    pub applications: u64,
}

/// Pricing outcome for one product after all other promotions have run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieredLine {
    product: ProductKey,
    quantity: u64,
    tiers: SmallVec<[AppliedTier; 3]>,
    full_price_units: u64,
    unit_price: Price,
    subtotal: Price,
}

impl TieredLine {
    /// The product priced.
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// Units priced on this line.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Tiers used, largest quantity first.
    pub fn tiers(&self) -> &[AppliedTier] {
        &self.tiers
    }

    /// Units left over after tiers, charged at the unit price.
    pub fn full_price_units(&self) -> u64 {
        self.full_price_units
    }

    /// Standard unit price of the product.
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Amount charged for the line.
    pub fn subtotal(&self) -> Price {
        self.subtotal
    }
}

/// Price every product left in `counts`, consuming them.
///
/// Products without a schedule are charged entirely at their unit price. `counts` must
/// have been tallied against `catalog`.
pub(crate) fn resolve_tiers(
    catalog: &Catalog,
    counts: BasketCounts,
) -> SmallVec<[TieredLine; 8]> {
    let no_tiers = TierSchedule::default();

    counts
        .into_iter()
        .filter_map(|(key, quantity)| {
            let product = catalog.product(key)?;
            let schedule = catalog.promotions().tiers(key).unwrap_or(&no_tiers);

            Some(schedule.price(key, quantity, product.price))
        })
        .collect()
}
