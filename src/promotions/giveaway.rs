//! Giveaway Promotion
//!
//! "Buy `required` of the trigger product, get `free_quantity` of another product free".
//! Free units are removed from the basket before any other promotion runs, so they
//! neither cost anything nor count towards later offers.

use std::num::NonZeroU64;

use smallvec::SmallVec;

use crate::{basket::BasketCounts, products::ProductKey};

/// A buy-X-get-Y-free rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Giveaway {
    trigger: ProductKey,
    required: NonZeroU64,
    free: ProductKey,
    free_quantity: NonZeroU64,
}

impl Giveaway {
    /// Create a new giveaway rule.
    pub const fn new(
        trigger: ProductKey,
        required: NonZeroU64,
        free: ProductKey,
        free_quantity: NonZeroU64,
    ) -> Self {
        Self {
            trigger,
            required,
            free,
            free_quantity,
        }
    }

    /// Product whose quantity triggers the rule.
    pub const fn trigger(&self) -> ProductKey {
        self.trigger
    }

    /// Trigger units required per application.
    pub const fn required(&self) -> NonZeroU64 {
        self.required
    }

    /// Product given away.
    pub const fn free(&self) -> ProductKey {
        self.free
    }

    /// Units given away per application.
    pub const fn free_quantity(&self) -> NonZeroU64 {
        self.free_quantity
    }

    /// True when the trigger and free product are the same.
    pub fn is_self_referential(&self) -> bool {
        self.trigger == self.free
    }

    /// Number of times the rule applies to `counts`.
    ///
    /// A self-referential rule draws the paid and free units from the same pool, so every
    /// application consumes `required + free_quantity` units.
    pub fn applications(&self, counts: &BasketCounts) -> u64 {
        let trigger_count = counts.get(self.trigger);

        if self.is_self_referential() {
            trigger_count / self.required.saturating_add(self.free_quantity.get())
        } else {
            trigger_count / self.required
        }
    }

    /// Apply the rule, removing free units from `counts`.
    pub fn apply(&self, counts: &mut BasketCounts) -> GiveawayApplication {
        let applications = self.applications(counts);
        let granted = applications.saturating_mul(self.free_quantity.get());
        let removed = counts.remove_up_to(self.free, granted);

        GiveawayApplication {
            trigger: self.trigger,
            free: self.free,
            applications,
            granted,
            removed,
        }
    }
}

/// Record of a giveaway rule that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GiveawayApplication {
    /// Product that triggered the rule.
    pub trigger: ProductKey,

    /// Product given away.
    pub free: ProductKey,

    /// Number of applications.
    pub applications: u64,

    /// Free units the applications entitle the basket to.
    pub granted: u64,

    /// Free units actually present and removed (never more than `granted`).
    pub removed: u64,
}

/// Apply `giveaways` in order, each seeing the counts left by the previous rule.
pub fn resolve_giveaways(
    giveaways: &[Giveaway],
    counts: &mut BasketCounts,
) -> SmallVec<[GiveawayApplication; 4]> {
    giveaways
        .iter()
        .map(|giveaway| giveaway.apply(counts))
        .filter(|application| application.applications > 0)
        .collect()
}
