//! Integration tests for the standard fixture set (items A–F).
//!
//! Catalog: A=50, B=30, C=20, D=15, E=40, F=10.
//! Tiers: 5A for 200, 3A for 130, 2B for 45.
//! Giveaways: buy 2E get 1B free, buy 2F get 1F free.

use serde_norway::Value;
use testresult::TestResult;

use checkout::{
    catalog::Catalog,
    fixtures::Fixture,
    pricing::{ERROR_SENTINEL, checkout, checkout_value, price_skus},
};

fn catalog() -> Result<Catalog, checkout::fixtures::FixtureError> {
    Ok(Fixture::from_set("standard")?.build())
}

#[test]
fn empty_basket_costs_nothing() -> TestResult {
    assert_eq!(checkout(&catalog()?, ""), 0);

    Ok(())
}

#[test]
fn non_string_input_is_rejected() -> TestResult {
    let catalog = catalog()?;

    for yaml in ["1", "2.5", "null", "{A: 1}"] {
        let value: Value = serde_norway::from_str(yaml)?;

        assert_eq!(checkout_value(&catalog, &value), ERROR_SENTINEL, "{yaml}");
    }

    Ok(())
}

#[test]
fn unrecognised_sku_is_rejected() -> TestResult {
    let catalog = catalog()?;

    assert_eq!(checkout(&catalog, "ABZ"), ERROR_SENTINEL);
    assert_eq!(checkout(&catalog, "-"), ERROR_SENTINEL);
    assert_eq!(checkout(&catalog, "a"), ERROR_SENTINEL);

    Ok(())
}

#[test]
fn single_item() -> TestResult {
    assert_eq!(checkout(&catalog()?, "A"), 50);

    Ok(())
}

#[test]
fn no_special_offers_met() -> TestResult {
    assert_eq!(checkout(&catalog()?, "ABC"), 100);

    Ok(())
}

#[test]
fn special_offer() -> TestResult {
    assert_eq!(checkout(&catalog()?, "AAA"), 130);

    Ok(())
}

#[test]
fn largest_offer_is_used_first() -> TestResult {
    let catalog = catalog()?;

    assert_eq!(checkout(&catalog, &"A".repeat(5)), 200);
    // 5 for 200 + 1 at 50, not 2 x 3 for 130
    assert_eq!(checkout(&catalog, &"A".repeat(6)), 250);
    assert_eq!(checkout(&catalog, &"A".repeat(11)), 450);

    Ok(())
}

#[test]
fn offers_apply_repeatedly() -> TestResult {
    assert_eq!(checkout(&catalog()?, &"B".repeat(5)), 120);

    Ok(())
}

#[test]
fn smaller_offers_take_the_remainder() -> TestResult {
    // 5 for 200 + 3 for 130
    assert_eq!(checkout(&catalog()?, &"A".repeat(8)), 330);

    Ok(())
}

#[test]
fn free_items_are_removed_before_other_offers() -> TestResult {
    let catalog = catalog()?;

    assert_eq!(checkout(&catalog, "EEEEBBB"), 4 * 40 + 30);

    let receipt = price_skus(&catalog, "EEEEBBB")?;
    let giveaway = receipt.giveaways().first().ok_or("expected a giveaway")?;

    assert_eq!(giveaway.applications, 2);
    assert_eq!(giveaway.removed, 2);

    Ok(())
}

#[test]
fn order_of_skus_does_not_matter() -> TestResult {
    let catalog = catalog()?;

    assert_eq!(checkout(&catalog, "BEBEEBE"), checkout(&catalog, "EEEEBBB"));
    assert_eq!(checkout(&catalog, "AFAFAF"), checkout(&catalog, "AAAFFF"));

    Ok(())
}

#[test]
fn adding_a_unit_never_lowers_an_items_price() -> TestResult {
    let catalog = catalog()?;

    for sku in ["A", "B", "C", "D"] {
        let mut previous = 0;

        for n in 0..25 {
            let total = checkout(&catalog, &sku.repeat(n));

            assert!(total >= previous, "{sku} x {n}");
            previous = total;
        }
    }

    Ok(())
}
