//! Test helpers.

use std::{num::NonZeroU32, sync::Arc};

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use taper::{
    addresses::Destination,
    orders::{OrderItem, OrderStatus, OrderTotals},
};
use taper_app::{
    auth::{AdminIdentity, MockAuthService},
    context::AppContext,
    domain::{
        orders::{
            MockOrdersService,
            outbox::MockCheckoutService,
            records::{Customer, OrderRecord, OrderUuid},
        },
        shipping::MockShippingService,
        tracking::MockTrackingService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_ORDER_UUID: Uuid = Uuid::nil();

/// Mocked services behind a test router. Any call without an expectation fails the test.
#[derive(Default)]
pub(crate) struct TestServices {
    pub(crate) orders: MockOrdersService,
    pub(crate) checkout: MockCheckoutService,
    pub(crate) shipping: MockShippingService,
    pub(crate) tracking: MockTrackingService,
    pub(crate) auth: MockAuthService,
    pub(crate) expose_error_details: bool,
}

impl TestServices {
    pub(crate) fn state(self) -> Arc<State> {
        State::from_app_context(
            AppContext {
                orders: Arc::new(self.orders),
                checkout: Arc::new(self.checkout),
                shipping: Arc::new(self.shipping),
                tracking: Arc::new(self.tracking),
                auth: Arc::new(self.auth),
            },
            self.expose_error_details,
        )
    }

    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.state())).push(route))
    }

    /// Like [`Self::service`], with an authenticated admin already in the depot.
    pub(crate) fn admin_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.state()))
                .hoop(inject_admin)
                .push(route),
        )
    }
}

pub(crate) fn admin_identity() -> AdminIdentity {
    AdminIdentity {
        token: Uuid::nil().into(),
        name: "fulfilment desk".to_string(),
    }
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_admin(admin_identity());
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn destination() -> Destination {
    Destination {
        street_address: "1 Main Rd".to_string(),
        city: "Cape Town".to_string(),
        country: "South Africa".to_string(),
        postal_code: "8001".to_string(),
        ..Destination::default()
    }
}

pub(crate) fn make_order(order_number: &str) -> OrderRecord {
    let quantity = NonZeroU32::MIN.saturating_add(1);

    OrderRecord {
        uuid: OrderUuid::from(TEST_ORDER_UUID),
        order_number: order_number.to_string(),
        customer: Customer {
            name: "Thandi Nkosi".to_string(),
            email: "thandi@example.com".to_string(),
            phone: "0821234567".to_string(),
        },
        shipping_address: destination(),
        items: vec![OrderItem {
            product_id: "P1".into(),
            name: "Fig Candle".to_string(),
            price: 15_000,
            quantity,
        }],
        event_booking: None,
        totals: OrderTotals {
            subtotal: 30_000,
            shipping_cost: 7_500,
            total: 37_500,
        },
        payment_reference: "pay_123".to_string(),
        status: OrderStatus::Pending,
        tracking_number: None,
        shipping_provider: None,
        shipping_status: None,
        estimated_delivery: None,
        notes: String::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
