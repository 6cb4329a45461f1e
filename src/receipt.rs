//! Receipt

use std::io;

use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    catalog::Catalog,
    prices::Price,
    products::{Product, ProductKey},
    promotions::{GiveawayApplication, GroupBundleApplication, TieredLine},
};

/// Errors that can occur when rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A product referenced by the receipt is not in the catalog.
    #[error("missing product {0:?}")]
    MissingProduct(ProductKey),

    /// Writing the receipt failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Outcome of pricing one basket, stage by stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Giveaway rules that fired, in evaluation order
    giveaways: SmallVec<[GiveawayApplication; 4]>,

    /// Group bundle rules that fired, in evaluation order
    group_bundles: SmallVec<[GroupBundleApplication; 2]>,

    /// Per-product lines for everything left after giveaways and bundles
    lines: SmallVec<[TieredLine; 8]>,

    /// Cost of the basket at standard prices
    subtotal: Price,

    /// Amount payable
    total: Price,
}

impl Receipt {
    /// Create a receipt from the output of each stage.
    pub fn new(
        subtotal: Price,
        giveaways: SmallVec<[GiveawayApplication; 4]>,
        group_bundles: SmallVec<[GroupBundleApplication; 2]>,
        lines: SmallVec<[TieredLine; 8]>,
    ) -> Self {
        let total = group_bundles
            .iter()
            .map(GroupBundleApplication::subtotal)
            .chain(lines.iter().map(TieredLine::subtotal))
            .sum();

        Self {
            giveaways,
            group_bundles,
            lines,
            subtotal,
            total,
        }
    }

    /// Giveaway applications.
    pub fn giveaways(&self) -> &[GiveawayApplication] {
        &self.giveaways
    }

    /// Group bundle applications.
    pub fn group_bundles(&self) -> &[GroupBundleApplication] {
        &self.group_bundles
    }

    /// Per-product lines.
    pub fn lines(&self) -> &[TieredLine] {
        &self.lines
    }

    /// Amount charged for group bundles.
    pub fn group_bundle_subtotal(&self) -> Price {
        self.group_bundles
            .iter()
            .map(GroupBundleApplication::subtotal)
            .sum()
    }

    /// Amount charged for per-product lines.
    pub fn tiered_subtotal(&self) -> Price {
        self.lines.iter().map(TieredLine::subtotal).sum()
    }

    /// Cost of the basket at standard prices.
    pub fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// Amount payable.
    pub fn total(&self) -> Price {
        self.total
    }

    /// Difference between the standard-price subtotal and the total.
    pub fn savings(&self) -> Price {
        Price::new(self.subtotal.saturating_sub(*self.total))
    }

    /// Write a human-readable receipt.
    ///
    /// # Errors
    ///
    /// - [`ReceiptError::MissingProduct`]: a product is not in `catalog`.
    /// - [`ReceiptError::Io`]: writing to `out` failed.
    pub fn write_to(&self, mut out: impl io::Write, catalog: &Catalog) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record([
            "Item".to_string(),
            "Qty".to_string(),
            "Offer".to_string(),
            "Price".to_string(),
        ]);

        for giveaway in &self.giveaways {
            if giveaway.removed == 0 {
                continue;
            }

            let free = product(catalog, giveaway.free)?;
            let trigger = product(catalog, giveaway.trigger)?;

            builder.push_record([
                free.name.clone(),
                giveaway.removed.to_string(),
                format!("Free with {}", trigger.name),
                Price::ZERO.to_string(),
            ]);
        }

        for bundle in &self.group_bundles {
            let names = bundle
                .consumed
                .iter()
                .map(|(key, units)| Ok(format!("{} x{units}", product(catalog, *key)?.name)))
                .collect::<Result<Vec<_>, ReceiptError>>()?;

            builder.push_record([
                names.join("\n"),
                (bundle.applications * bundle.size.get()).to_string(),
                format!(
                    "{} x any {} for {}",
                    bundle.applications, bundle.size, bundle.price
                ),
                bundle.subtotal().to_string(),
            ]);
        }

        for line in &self.lines {
            let name = &product(catalog, line.product())?.name;

            for applied in line.tiers() {
                let quantity = applied.tier.quantity().get();

                builder.push_record([
                    name.clone(),
                    (applied.applications * quantity).to_string(),
                    format!(
                        "{} x {quantity} for {}",
                        applied.applications,
                        applied.tier.price()
                    ),
                    applied.tier.price().times(applied.applications).to_string(),
                ]);
            }

            if line.full_price_units() > 0 {
                builder.push_record([
                    name.clone(),
                    line.full_price_units().to_string(),
                    String::new(),
                    line.unit_price().times(line.full_price_units()).to_string(),
                ]);
            }
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..2), Alignment::right());
        table.modify(Columns::new(3..4), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out, " Subtotal: {}", self.subtotal)?;
        writeln!(out, " Savings:  {}", self.savings())?;
        writeln!(out, " Total:    {}", self.total)?;

        Ok(())
    }
}

fn product(catalog: &Catalog, key: ProductKey) -> Result<&Product, ReceiptError> {
    catalog
        .product(key)
        .ok_or(ReceiptError::MissingProduct(key))
}
