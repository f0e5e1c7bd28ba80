//! Taper prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    addresses::{
        Address, AddressField, AddressKind, Contact, Destination, STORE_NAME, warehouse_address,
        warehouse_contact,
    },
    catalog::{CartLine, Catalog, CatalogError, CatalogProduct, ProductId},
    countries::{HOME_COUNTRY_CODE, country_code},
    money::{major_units, minor_units, store_currency, zar, zar_from_major},
    orders::{
        EventBooking, OrderItem, OrderStatus, OrderTotals, OrderTotalsError, TransitionPolicy,
        UnknownOrderStatus,
    },
    parcels::{BoxSpec, DEFAULT_DECLARED_VALUE, LineItem, Parcel, aggregate, declared_value},
    rates::{Courier, RateQuote, RateSelection, RateSource, ServiceLevel, cheapest},
    shipments::{
        BOOKING_SHIPPING_STATUS, SHIPPING_PROVIDER_NAME, Shipment, ShipmentUpdate,
        customer_reference,
    },
};
