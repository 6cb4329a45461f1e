//! Pricing
//!
//! Composes the pricing pipeline: parse → giveaways → group bundles → tiers.
//!
//! [`price_basket`] and [`price_skus`] return a full [`Receipt`] and keep parsing
//! failures distinct. [`checkout`] and [`checkout_value`] collapse every failure to
//! [`ERROR_SENTINEL`] for callers that only deal in integers.

use serde_norway::Value;
use tracing::{debug, warn};

use crate::{
    basket::{BasketCounts, BasketError},
    catalog::Catalog,
    prices::Price,
    promotions::{resolve_giveaways, resolve_group_bundles, resolve_tiers},
    receipt::Receipt,
};

/// Returned by [`checkout`] and [`checkout_value`] when a basket is rejected.
pub const ERROR_SENTINEL: i64 = -1;

/// Price a tallied basket.
///
/// # Errors
///
/// Returns [`BasketError::ForeignCatalog`] if `counts` were tallied against a
/// different catalog.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(products = counts.len(), units = counts.total_units())
)]
pub fn price_basket(
    catalog: &Catalog,
    mut counts: BasketCounts,
) -> Result<Receipt, BasketError> {
    counts.ensure_catalog(catalog)?;

    let subtotal = standard_price(catalog, &counts);
    let promotions = catalog.promotions();

    let giveaways = resolve_giveaways(promotions.giveaways(), &mut counts);
    debug!(
        applied = giveaways.len(),
        remaining = counts.total_units(),
        "resolved giveaways"
    );

    let group_bundles = resolve_group_bundles(promotions.group_bundles(), &mut counts);
    debug!(
        applied = group_bundles.len(),
        remaining = counts.total_units(),
        "resolved group bundles"
    );

    let lines = resolve_tiers(catalog, counts);

    let receipt = Receipt::new(subtotal, giveaways, group_bundles, lines);
    debug!(subtotal = *receipt.subtotal(), total = *receipt.total(), "priced basket");

    Ok(receipt)
}

/// Parse and price a basket written as a string with one character per unit.
///
/// # Errors
///
/// Returns [`BasketError::UnknownSku`] if any SKU is not in `catalog`.
pub fn price_skus(catalog: &Catalog, skus: &str) -> Result<Receipt, BasketError> {
    let counts = BasketCounts::parse(catalog, skus)?;

    price_basket(catalog, counts)
}

/// Total price of `skus`, or [`ERROR_SENTINEL`] if the basket is rejected.
pub fn checkout(catalog: &Catalog, skus: &str) -> i64 {
    into_sentinel(price_skus(catalog, skus))
}

/// Total price of a loosely-typed basket, or [`ERROR_SENTINEL`] if it is rejected.
///
/// See [`BasketCounts::from_value`] for the accepted shapes.
pub fn checkout_value(catalog: &Catalog, value: &Value) -> i64 {
    into_sentinel(
        BasketCounts::from_value(catalog, value).and_then(|counts| price_basket(catalog, counts)),
    )
}

fn into_sentinel(result: Result<Receipt, BasketError>) -> i64 {
    match result {
        Ok(receipt) => i64::try_from(*receipt.total()).unwrap_or(i64::MAX),
        Err(error) => {
            warn!(%error, "rejected basket");
            ERROR_SENTINEL
        }
    }
}

fn standard_price(catalog: &Catalog, counts: &BasketCounts) -> Price {
    counts
        .iter()
        .filter_map(|(key, units)| catalog.product(key).map(|product| product.price.times(units)))
        .sum()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test_support::{extended_catalog, standard_catalog};

    use super::*;

    #[test]
    fn documented_scenarios() -> TestResult {
        let catalog = standard_catalog()?;

        let scenarios = [
            (String::new(), 0),
            ("ABZ".to_string(), -1),
            ("A".to_string(), 50),
            ("ABC".to_string(), 100),
            ("AAA".to_string(), 130),
            ("A".repeat(5), 200),
            ("A".repeat(6), 250),
            ("A".repeat(8), 330),
            ("A".repeat(11), 450),
            ("B".repeat(5), 120),
            ("EEEEBBB".to_string(), 4 * 40 + 30),
        ];

        for (skus, expected) in scenarios {
            assert_eq!(checkout(&catalog, &skus), expected, "{skus}");
        }

        Ok(())
    }

    #[test]
    fn non_string_input_returns_sentinel() -> TestResult {
        let catalog = standard_catalog()?;
        let value: Value = serde_norway::from_str("1")?;

        assert_eq!(checkout_value(&catalog, &value), ERROR_SENTINEL);

        Ok(())
    }

    #[test]
    fn string_value_is_priced() -> TestResult {
        let catalog = standard_catalog()?;
        let value: Value = serde_norway::from_str("AAA")?;

        assert_eq!(checkout_value(&catalog, &value), 130);

        Ok(())
    }

    #[test]
    fn unknown_sku_anywhere_returns_sentinel() -> TestResult {
        let catalog = standard_catalog()?;

        for position in 0..=4 {
            let mut skus: Vec<char> = "ABCD".chars().collect();
            skus.insert(position, 'Z');
            let skus: String = skus.into_iter().collect();

            assert_eq!(checkout(&catalog, &skus), ERROR_SENTINEL, "{skus}");
        }

        Ok(())
    }

    #[test]
    fn price_skus_keeps_error_cause() -> TestResult {
        let catalog = standard_catalog()?;

        assert!(matches!(
            price_skus(&catalog, "AZ"),
            Err(BasketError::UnknownSku { position: 1, .. })
        ));

        Ok(())
    }

    #[test]
    fn free_items_do_not_count_towards_tiers() -> TestResult {
        let catalog = standard_catalog()?;

        // Two Bs are free, the third cannot join a 2-for-45.
        assert_eq!(checkout(&catalog, "EEEEBBB"), 190);
        // One B free, the remaining two still make a 2-for-45.
        assert_eq!(checkout(&catalog, "EEBBB"), 80 + 45);

        Ok(())
    }

    #[test]
    fn self_referential_giveaway_totals() -> TestResult {
        let catalog = standard_catalog()?;

        assert_eq!(checkout(&catalog, "FF"), 20);
        assert_eq!(checkout(&catalog, "FFF"), 20);
        assert_eq!(checkout(&catalog, "FFFF"), 30);
        assert_eq!(checkout(&catalog, "FFFFFF"), 40);

        Ok(())
    }

    #[test]
    fn group_bundles_are_priced_before_tiers() -> TestResult {
        let catalog = extended_catalog()?;

        assert_eq!(checkout(&catalog, "STX"), 45);
        assert_eq!(checkout(&catalog, "STXYZ"), 45 + 20 + 17);
        assert_eq!(checkout(&catalog, "SSSZ"), 45 + 20);
        assert_eq!(checkout(&catalog, "ZZZS"), 45 + 20);

        Ok(())
    }

    #[test]
    fn catalog_order_does_not_change_totals() -> TestResult {
        let catalog = extended_catalog()?;

        assert_eq!(checkout(&catalog, "ABCDEF"), checkout(&catalog, "FEDCBA"));
        assert_eq!(checkout(&catalog, "NNNMRRRQ"), checkout(&catalog, "QRMRNRNN"));

        Ok(())
    }

    #[test]
    fn counts_from_another_catalog_are_rejected() -> TestResult {
        let mut builder = Catalog::builder();
        builder.product('A', "Apple", 50)?;
        let apples = builder.build();

        let mut builder = Catalog::builder();
        builder.product('Z', "Zest", 999)?;
        let zests = builder.build();

        let counts = BasketCounts::parse(&apples, "AA")?;

        assert_eq!(
            price_basket(&zests, counts.clone()),
            Err(BasketError::ForeignCatalog)
        );
        assert_eq!(*price_basket(&apples, counts)?.total(), 100);

        Ok(())
    }

    #[test]
    fn empty_catalog_prices_empty_basket() {
        let catalog = Catalog::default();

        assert_eq!(checkout(&catalog, ""), 0);
        assert_eq!(checkout(&catalog, "A"), ERROR_SENTINEL);
    }
}
