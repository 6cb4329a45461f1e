//! Promotion Fixtures

use serde::Deserialize;

use crate::{
    catalog::CatalogBuilder,
    fixtures::{FixtureError, products::parse_sku},
};

/// Wrapper for promotions in YAML
///
/// Promotions are a list because giveaways and group bundles are evaluated in the
/// order they are written.
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// Promotions, in evaluation order
    pub promotions: Vec<PromotionFixture>,
}

/// A single tier in YAML
#[derive(Debug, Deserialize)]
pub struct TierFixture {
    /// Units priced together
    pub quantity: u64,

    /// Price for `quantity` units
    pub price: u64,
}

/// Promotion fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionFixture {
    /// "N for a fixed price" tiers for one product
    Tiered {
        /// Product SKU
        sku: String,

        /// Tiers, in any order
        tiers: Vec<TierFixture>,
    },

    /// Buy `required` of `trigger`, get `quantity` of `free` free
    Giveaway {
        /// SKU that triggers the giveaway
        trigger: String,

        /// Trigger units required per application
        required: u64,

        /// SKU given away
        free: String,

        /// Units given away per application
        quantity: u64,
    },

    /// Any `size` of `members` for `price`
    GroupBundle {
        /// Member SKUs, in consumption order
        members: Vec<String>,

        /// Units per bundle
        size: u64,

        /// Bundle price
        price: u64,
    },
}

impl PromotionsFixture {
    /// Add every promotion to `builder`, preserving order.
    ///
    /// # Errors
    ///
    /// Returns an error if a SKU is malformed or a promotion is invalid.
    pub fn add_to(self, builder: &mut CatalogBuilder) -> Result<(), FixtureError> {
        self.promotions
            .into_iter()
            .try_for_each(|promotion| promotion.add_to(builder))
    }
}

impl PromotionFixture {
    /// Add this promotion to `builder`.
    ///
    /// # Errors
    ///
    /// Returns an error if a SKU is malformed or the promotion is invalid.
    pub fn add_to(self, builder: &mut CatalogBuilder) -> Result<(), FixtureError> {
        match self {
            PromotionFixture::Tiered { sku, tiers } => {
                builder.tiers(
                    parse_sku(&sku)?,
                    tiers.into_iter().map(|tier| (tier.quantity, tier.price)),
                )?;
            }
            PromotionFixture::Giveaway {
                trigger,
                required,
                free,
                quantity,
            } => {
                builder.giveaway(parse_sku(&trigger)?, required, parse_sku(&free)?, quantity)?;
            }
            PromotionFixture::GroupBundle {
                members,
                size,
                price,
            } => {
                let members = members
                    .iter()
                    .map(|member| parse_sku(member))
                    .collect::<Result<Vec<_>, _>>()?;

                builder.group_bundle(members, size, price)?;
            }
        }

        Ok(())
    }
}
