//! Provider request builders

use smallvec::smallvec;
use taper::{
    addresses::{Contact, Destination, STORE_NAME, warehouse_address, warehouse_contact},
    catalog::Catalog,
    money::major_units,
    orders::OrderItem,
    parcels::{Parcel, aggregate},
    shipments::customer_reference,
};

use crate::{
    domain::orders::records::OrderRecord,
    shiplogic::wire::{RateRequest, ShipmentRequest, WireParcel},
};

/// Rate request from the warehouse to `destination` for one parcel.
pub fn rate_request(destination: &Destination, parcel: &Parcel, declared_value: u64) -> RateRequest {
    RateRequest {
        collection_address: warehouse_address(),
        delivery_address: destination.to_address(),
        parcels: smallvec![WireParcel::new(parcel, None)],
        declared_value: major_units(declared_value),
        collection_min_date: None,
        delivery_min_date: None,
    }
}

/// Parcel for the items stored on an order, packed per the catalog.
pub fn order_parcel(items: &[OrderItem], catalog: &Catalog) -> Parcel {
    let line_items: Vec<_> = items
        .iter()
        .map(|item| item.to_line_item(catalog))
        .collect();

    aggregate(&line_items)
}

/// Shipment request for a stored order with the chosen service level.
pub fn shipment_request(
    order: &OrderRecord,
    catalog: &Catalog,
    service_level_code: &str,
) -> ShipmentRequest {
    let parcel = order_parcel(&order.items, catalog);
    let description = format!("{STORE_NAME} Order #{}", order.order_number);

    ShipmentRequest {
        collection_address: warehouse_address(),
        collection_contact: warehouse_contact(),
        delivery_address: order.shipping_address.to_address(),
        delivery_contact: Contact {
            name: order.customer.name.clone(),
            mobile_number: Some(order.customer.phone.clone()).filter(|phone| !phone.is_empty()),
            email: order.customer.email.clone(),
        },
        parcels: smallvec![WireParcel::new(&parcel, Some(description))],
        service_level_code: service_level_code.trim().to_string(),
        declared_value: major_units(order.totals.total),
        customer_reference: customer_reference(&order.order_number),
        special_instructions_delivery: order.notes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use rust_decimal::Decimal;
    use taper::{
        addresses::AddressKind,
        catalog::{CatalogProduct, ProductId},
    };
    use testresult::TestResult;

    use crate::{
        domain::orders::data::NewOrder,
        test::helpers::{order_details, order_record},
    };

    use super::*;

    fn catalog() -> TestResult<Catalog> {
        Ok(Catalog::from_yaml(
            "products:\n  - id: P1\n    name: Vanilla Pillar\n    price: 15000\n    box_length_cm: 15\n    box_width_cm: 10\n    box_height_cm: 5\n    box_weight_g: 500\n",
        )?)
    }

    #[test]
    fn rate_request_collects_from_warehouse() -> TestResult {
        let destination = Destination {
            street_address: "1 Main Rd".to_string(),
            city: "Cape Town".to_string(),
            country: "Namibia".to_string(),
            postal_code: "9000".to_string(),
            ..Destination::default()
        };

        let request = rate_request(&destination, &Parcel::DEFAULT, 30_000);

        assert_eq!(request.collection_address, warehouse_address());
        assert_eq!(request.delivery_address.country, "NA");
        assert_eq!(request.delivery_address.kind, AddressKind::Residential);
        assert_eq!(request.declared_value, Decimal::from(300));
        assert_eq!(request.parcels.len(), 1);

        Ok(())
    }

    #[test]
    fn shipment_request_describes_the_order() -> TestResult {
        let order = order_record(&NewOrder::from_details(
            order_details(),
            jiff::Timestamp::now(),
        )?);

        let request = shipment_request(&order, &catalog()?, " ECO ");
        let reference = format!("Order #{}", order.order_number);

        assert_eq!(request.service_level_code, "ECO");
        assert_eq!(request.customer_reference, reference);
        assert_eq!(request.declared_value, Decimal::from(375));
        assert_eq!(request.special_instructions_delivery, "Leave with the concierge");
        assert_eq!(request.collection_contact, warehouse_contact());
        assert_eq!(request.delivery_contact.name, "Thandi Nkosi");
        assert_eq!(request.delivery_address.city, "Cape Town");
        assert_eq!(request.delivery_address.country, "ZA");

        let [parcel] = request.parcels.as_slice() else {
            return Err("expected one parcel".into());
        };

        assert_eq!(
            parcel.parcel_description.as_deref(),
            Some(format!("Umi Candles {reference}").as_str())
        );
        assert!((parcel.submitted_weight_kg - 1.0).abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn order_parcel_uses_catalog_boxes_for_stored_items() -> TestResult {
        let catalog = Catalog::new([CatalogProduct {
            id: ProductId::from("tall"),
            name: "Tall Taper".to_string(),
            price: 9_000,
            box_length_cm: Some(40),
            box_width_cm: Some(8),
            box_height_cm: Some(8),
            box_weight_g: Some(900),
        }])?;

        let items = [OrderItem {
            product_id: ProductId::from("tall"),
            name: "Tall Taper".to_string(),
            price: 9_000,
            quantity: NonZeroU32::MIN,
        }];

        let parcel = order_parcel(&items, &catalog);

        assert_eq!(
            (parcel.length_cm, parcel.width_cm, parcel.height_cm),
            (40, 8, 8)
        );
        assert!((parcel.weight_kg - 0.9).abs() < f64::EPSILON);

        Ok(())
    }
}
