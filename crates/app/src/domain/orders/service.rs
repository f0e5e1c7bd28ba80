//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use taper::{
    orders::{OrderStatus, TransitionPolicy},
    shipments::ShipmentUpdate,
};
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::orders::{
        data::{NewOrder, PageRequest},
        errors::OrdersServiceError,
        records::{CustomerOrders, CustomerSummary, OrderRecord, OrderUuid, Page},
        repository::PgOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    policy: TransitionPolicy,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, policy: TransitionPolicy) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            policy,
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_order(&mut tx, &order).await?;

        tx.commit().await?;

        info!(order_number = %created.order_number, "order created");

        Ok(created)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn get_order_by_number(
        &self,
        order_number: &str,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self
            .repository
            .get_order_by_number(&mut tx, order_number.trim())
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .repository
            .list_orders_by_email(&mut tx, email.trim())
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_orders(
        &self,
        page: PageRequest,
        status: Option<OrderStatus>,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.repository.list_orders(&mut tx, page, status).await?;
        let total = self.repository.count_orders(&mut tx, status).await?;

        tx.commit().await?;

        Ok(Page {
            items,
            total,
            page: page.page(),
            limit: page.limit(),
        })
    }

    async fn list_customers(
        &self,
        page: PageRequest,
    ) -> Result<Page<CustomerSummary>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.repository.list_customers(&mut tx, page).await?;
        let total = self.repository.count_customers(&mut tx).await?;

        tx.commit().await?;

        Ok(Page {
            items,
            total,
            page: page.page(),
            limit: page.limit(),
        })
    }

    async fn get_customer(&self, email: &str) -> Result<CustomerOrders, OrdersServiceError> {
        let orders = self.list_orders_by_email(email).await?;

        CustomerOrders::from_orders(orders).ok_or(OrdersServiceError::NotFound)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_order_status(&mut tx, order).await?;

        if !self.policy.permits(current, status) {
            return Err(OrdersServiceError::TransitionNotAllowed {
                from: current,
                to: status,
            });
        }

        let updated = self.repository.update_status(&mut tx, order, status).await?;

        tx.commit().await?;

        info!(
            order_number = %updated.order_number,
            from = %current,
            to = %status,
            "order status updated"
        );

        Ok(updated)
    }

    async fn record_shipment(
        &self,
        order: OrderUuid,
        update: ShipmentUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .record_shipment(&mut tx, order, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn claim_shipment(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let claimed = self.repository.claim_shipment(&mut tx, order).await?;

        let Some(claimed) = claimed else {
            let current = self.repository.get_order(&mut tx, order).await?;

            tx.commit().await?;

            return Err(OrdersServiceError::ShipmentClaimed {
                tracking_number: current.tracking_number,
            });
        };

        tx.commit().await?;

        Ok(claimed)
    }

    async fn release_shipment_claim(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let released = self
            .repository
            .release_shipment_claim(&mut tx, order)
            .await?;

        tx.commit().await?;

        if !released {
            warn!(%order, "no shipment booking to release");
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Store a new order.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve an order by UUID.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve an order by its human-readable number.
    async fn get_order_by_number(
        &self,
        order_number: &str,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Orders placed with the given email address, newest first.
    async fn list_orders_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// A page of orders, newest first, optionally limited to one status.
    async fn list_orders(
        &self,
        page: PageRequest,
        status: Option<OrderStatus>,
    ) -> Result<Page<OrderRecord>, OrdersServiceError>;

    /// A page of customers, most recently active first.
    async fn list_customers(
        &self,
        page: PageRequest,
    ) -> Result<Page<CustomerSummary>, OrdersServiceError>;

    /// A customer and all of their orders.
    async fn get_customer(&self, email: &str) -> Result<CustomerOrders, OrdersServiceError>;

    /// Set the status of an order, subject to the transition policy.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Write shipment tracking details onto an order.
    async fn record_shipment(
        &self,
        order: OrderUuid,
        update: ShipmentUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Atomically mark an unshipped order as being booked. At most one caller holds the claim
    /// until tracking details are recorded or the claim is released.
    async fn claim_shipment(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Give up a booking claim that did not produce a shipment.
    async fn release_shipment_claim(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;
}
