use crate::{
    catalog::{Catalog, CatalogBuilder, CatalogError},
    products::{ProductKey, Sku},
};

fn standard_products(builder: &mut CatalogBuilder) -> Result<(), CatalogError> {
    builder
        .product('A', "A", 50)?
        .product('B', "B", 30)?
        .product('C', "C", 20)?
        .product('D', "D", 15)?
        .product('E', "E", 40)?
        .product('F', "F", 10)?;

    Ok(())
}

fn standard_promotions(builder: &mut CatalogBuilder) -> Result<(), CatalogError> {
    builder
        .tiers('A', [(5, 200), (3, 130)])?
        .tiers('B', [(2, 45)])?
        .giveaway('E', 2, 'B', 1)?
        .giveaway('F', 2, 'F', 1)?;

    Ok(())
}

/// Catalog A–F with tiered and giveaway offers.
pub(crate) fn standard_catalog() -> Result<Catalog, CatalogError> {
    let mut builder = Catalog::builder();

    standard_products(&mut builder)?;
    standard_promotions(&mut builder)?;

    Ok(builder.build())
}

/// Standard catalog plus S, T, X, Y, Z and an any-3-for-45 group bundle.
pub(crate) fn extended_catalog() -> Result<Catalog, CatalogError> {
    let mut builder = Catalog::builder();

    standard_products(&mut builder)?;
    builder
        .product('M', "M", 15)?
        .product('N', "N", 40)?
        .product('Q', "Q", 30)?
        .product('R', "R", 50)?
        .product('S', "S", 20)?
        .product('T', "T", 20)?
        .product('X', "X", 17)?
        .product('Y', "Y", 20)?
        .product('Z', "Z", 21)?;

    standard_promotions(&mut builder)?;
    builder
        .tiers('Q', [(3, 80)])?
        .giveaway('N', 3, 'M', 1)?
        .giveaway('R', 3, 'Q', 1)?
        .group_bundle(['Z', 'S', 'T', 'Y', 'X'], 3, 45)?;

    Ok(builder.build())
}

pub(crate) fn key(catalog: &Catalog, sku: char) -> Result<ProductKey, CatalogError> {
    let sku = Sku::new(sku);

    catalog.key(sku).ok_or(CatalogError::UnknownSku(sku))
}
