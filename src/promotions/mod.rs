//! Promotions
//!
//! Three classes of promotion are evaluated in a fixed order: giveaways first, then
//! group bundles, then per-product tiers on whatever is left.

use slotmap::SecondaryMap;

use crate::products::ProductKey;

pub mod giveaway;
pub mod group_bundle;
pub mod tiered;

pub use giveaway::{Giveaway, GiveawayApplication, resolve_giveaways};
pub use group_bundle::{GroupBundle, GroupBundleApplication, resolve_group_bundles};
pub(crate) use tiered::resolve_tiers;
pub use tiered::{AppliedTier, Tier, TierError, TierSchedule, TieredLine};

/// Promotion tables attached to a catalog.
#[derive(Debug, Clone, Default)]
pub struct Promotions {
    pub(crate) giveaways: Vec<Giveaway>,
    pub(crate) group_bundles: Vec<GroupBundle>,
    pub(crate) tiers: SecondaryMap<ProductKey, TierSchedule>,
}

impl Promotions {
    /// Giveaway rules, in evaluation order.
    pub fn giveaways(&self) -> &[Giveaway] {
        &self.giveaways
    }

    /// Group bundle rules, in evaluation order.
    pub fn group_bundles(&self) -> &[GroupBundle] {
        &self.group_bundles
    }

    /// Tier schedule for a product, if it has one.
    pub fn tiers(&self, product: ProductKey) -> Option<&TierSchedule> {
        self.tiers.get(product)
    }

    /// True when no promotions are configured.
    pub fn is_empty(&self) -> bool {
        self.giveaways.is_empty() && self.group_bundles.is_empty() && self.tiers.is_empty()
    }
}
