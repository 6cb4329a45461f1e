//! Group Bundle Promotion
//!
//! "Any `size` products from a group for a fixed price". Members are consumed in the
//! order they are listed, so listing the most expensive members first gives the
//! customer the better deal.

use std::num::NonZeroU64;

use smallvec::SmallVec;

use crate::{basket::BasketCounts, prices::Price, products::ProductKey};

/// A fixed-price bundle drawn from a group of interchangeable products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBundle {
    members: SmallVec<[ProductKey; 5]>,
    size: NonZeroU64,
    price: Price,
}

impl GroupBundle {
    /// Create a new group bundle rule.
    pub fn new(members: SmallVec<[ProductKey; 5]>, size: NonZeroU64, price: Price) -> Self {
        Self {
            members,
            size,
            price,
        }
    }

    /// Member products, in consumption order.
    pub fn members(&self) -> &[ProductKey] {
        &self.members
    }

    /// Units per bundle.
    pub const fn size(&self) -> NonZeroU64 {
        self.size
    }

    /// Price of one bundle.
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Units of all members currently in `counts`.
    pub fn available(&self, counts: &BasketCounts) -> u64 {
        self.members
            .iter()
            .map(|member| counts.get(*member))
            .fold(0, u64::saturating_add)
    }

    /// Number of complete bundles `counts` can form.
    pub fn applications(&self, counts: &BasketCounts) -> u64 {
        self.available(counts) / self.size
    }

    /// Form as many bundles as possible, consuming members in listed order.
    pub fn apply(&self, counts: &mut BasketCounts) -> GroupBundleApplication {
        let applications = self.applications(counts);
        let mut outstanding = applications.saturating_mul(self.size.get());
        let mut consumed = SmallVec::new();

        for &member in &self.members {
            if outstanding == 0 {
                break;
            }

            let taken = counts.remove_up_to(member, outstanding);

            if taken > 0 {
                consumed.push((member, taken));
                outstanding -= taken;
            }
        }

        GroupBundleApplication {
            applications,
            size: self.size,
            price: self.price,
            consumed,
        }
    }
}

/// Record of a group bundle rule that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBundleApplication {
    /// Number of bundles formed.
    pub applications: u64,

    /// Units per bundle.
    pub size: NonZeroU64,

    /// Price of one bundle.
    pub price: Price,

    /// Units consumed from each member, in consumption order.
    pub consumed: SmallVec<[(ProductKey, u64); 5]>,
}

impl GroupBundleApplication {
    /// Amount charged for all bundles formed.
    pub fn subtotal(&self) -> Price {
        self.price.times(self.applications)
    }
}

/// Apply `bundles` in order, each seeing the counts left by the previous rule.
pub fn resolve_group_bundles(
    bundles: &[GroupBundle],
    counts: &mut BasketCounts,
) -> SmallVec<[GroupBundleApplication; 2]> {
    bundles
        .iter()
        .map(|bundle| bundle.apply(counts))
        .filter(|application| application.applications > 0)
        .collect()
}
