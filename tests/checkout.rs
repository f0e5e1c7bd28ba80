//! Integration test for a checkout shipping quote.
//!
//! Two units of a 15x10x5cm, 500g candle priced at R150 are shipped to Cape Town:
//!
//! - combined volume 1500cm3, cube root 11.45, so the box is 15 x 10 x 7cm
//! - combined weight 1.0kg
//! - declared value R300.00
//!
//! The shipment is collected from the Sandton warehouse.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use testresult::TestResult;

use taper::prelude::*;

const CATALOG: &str = r#"
products:
  - id: P1
    name: Lavender Pillar
    price: 15000
    box_length_cm: 15
    box_width_cm: 10
    box_height_cm: 5
    box_weight_g: 500
"#;

fn cape_town() -> Destination {
    Destination {
        street_address: "1 Main Rd".to_string(),
        local_area: String::new(),
        city: "Cape Town".to_string(),
        zone: String::new(),
        country: "South Africa".to_string(),
        postal_code: "8001".to_string(),
    }
}

#[test]
fn two_candles_to_cape_town() -> TestResult {
    let catalog = Catalog::from_yaml(CATALOG)?;

    let cart = [CartLine {
        product_id: ProductId::from("P1"),
        quantity: NonZeroU32::new(2).ok_or("zero quantity")?,
    }];

    let items = catalog.line_items(&cart);
    let parcel = aggregate(&items);

    assert_eq!(
        (parcel.length_cm, parcel.width_cm, parcel.height_cm),
        (15, 10, 7)
    );
    assert!((parcel.weight_kg - 1.0).abs() < 1e-9);

    assert_eq!(major_units(declared_value(&items)), Decimal::from(300));

    let delivery = cape_town().to_address();
    let collection = warehouse_address();

    assert_eq!(delivery.country, "ZA");
    assert_eq!(delivery.kind, AddressKind::Residential);
    assert_eq!(collection.local_area, "Sandton");
    assert_eq!(collection.company.as_deref(), Some(STORE_NAME));

    Ok(())
}

#[test]
fn unknown_products_still_declare_a_nominal_value() -> TestResult {
    let catalog = Catalog::from_yaml(CATALOG)?;

    let cart = [CartLine {
        product_id: ProductId::from("RETIRED-9"),
        quantity: NonZeroU32::new(3).ok_or("zero quantity")?,
    }];

    let items = catalog.line_items(&cart);

    assert_eq!(items.len(), 1);
    assert_eq!(declared_value(&items), DEFAULT_DECLARED_VALUE);
    assert_eq!(major_units(declared_value(&items)), Decimal::from(500));

    Ok(())
}

#[test]
fn unquotable_cart_falls_back_to_flat_rates() -> TestResult {
    let now = jiff::Timestamp::now();
    let selection = RateSelection::from_quotes(Vec::new());

    assert!(selection.selected_quote().is_none());

    let fallback = RateSelection::fallback(now);
    let [standard, express] = fallback.quotes.as_slice() else {
        return Err("expected two fallback tiers".into());
    };

    assert_eq!(standard.service_level.code, "standard");
    assert_eq!(standard.total, zar(7_500));
    assert_eq!(express.service_level.code, "express");
    assert_eq!(express.total, zar(15_000));
    assert_eq!(fallback.selected.as_deref(), Some("standard"));
    assert_eq!(fallback.source, RateSource::Fallback);

    Ok(())
}

#[test]
fn order_total_includes_shipping_once() -> TestResult {
    let catalog = Catalog::from_yaml(CATALOG)?;
    let product = catalog.get(&ProductId::from("P1")).ok_or("missing product")?;

    let items = [OrderItem {
        product_id: product.id.clone(),
        name: product.name.clone(),
        price: product.price,
        quantity: NonZeroU32::new(3).ok_or("zero quantity")?,
    }];

    let totals = OrderTotals::compute(&items, None, 7_500)?;

    assert_eq!(totals.subtotal, 45_000);
    assert_eq!(totals.total, 52_500);

    let line_items: Vec<LineItem> = items.iter().map(|item| item.to_line_item(&catalog)).collect();

    assert_eq!(declared_value(&line_items), totals.subtotal);

    Ok(())
}
