//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    types::Json,
};
use taper::{
    orders::{OrderStatus, OrderTotals},
    shipments::{BOOKING_SHIPPING_STATUS, ShipmentUpdate},
};

use crate::domain::orders::{
    data::{NewOrder, PageRequest},
    records::{Customer, CustomerSummary, OrderRecord, OrderUuid},
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_BY_NUMBER_SQL: &str = include_str!("sql/get_order_by_number.sql");
const LIST_ORDERS_BY_EMAIL_SQL: &str = include_str!("sql/list_orders_by_email.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("sql/count_orders.sql");
const LIST_CUSTOMERS_SQL: &str = include_str!("sql/list_customers.sql");
const COUNT_CUSTOMERS_SQL: &str = include_str!("sql/count_customers.sql");
const LOCK_ORDER_STATUS_SQL: &str = include_str!("sql/lock_order_status.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const RECORD_SHIPMENT_SQL: &str = include_str!("sql/record_shipment.sql");
const CLAIM_SHIPMENT_SQL: &str = include_str!("sql/claim_shipment.sql");
const RELEASE_SHIPMENT_CLAIM_SQL: &str = include_str!("sql/release_shipment_claim.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(&order.order_number)
            .bind(&order.customer.name)
            .bind(&order.customer.email)
            .bind(&order.customer.phone)
            .bind(Json(&order.shipping_address))
            .bind(Json(&order.items))
            .bind(order.event_booking.as_ref().map(Json))
            .bind(to_column("subtotal", order.totals.subtotal)?)
            .bind(to_column("shipping_cost", order.totals.shipping_cost)?)
            .bind(to_column("total", order.totals.total)?)
            .bind(&order.payment_reference)
            .bind(&order.notes)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_by_number(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_number: &str,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_BY_NUMBER_SQL)
            .bind(order_number)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_BY_EMAIL_SQL)
            .bind(email)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(status.map(OrderStatus::as_str))
            .bind(i64::from(page.limit()))
            .bind(to_column("offset", page.offset())?)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<OrderStatus>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_ORDERS_SQL)
            .bind(status.map(OrderStatus::as_str))
            .fetch_one(&mut **tx)
            .await?;

        from_count("count", count)
    }

    pub(crate) async fn list_customers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<Vec<CustomerSummary>, sqlx::Error> {
        query_as::<Postgres, CustomerSummary>(LIST_CUSTOMERS_SQL)
            .bind(i64::from(page.limit()))
            .bind(to_column("offset", page.offset())?)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_customers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_CUSTOMERS_SQL)
            .fetch_one(&mut **tx)
            .await?;

        from_count("count", count)
    }

    /// Read the current status and hold a row lock until the transaction ends.
    pub(crate) async fn lock_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderStatus, sqlx::Error> {
        let status: String = query_scalar(LOCK_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        parse_status(&status)
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn record_shipment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        update: &ShipmentUpdate,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(RECORD_SHIPMENT_SQL)
            .bind(order.into_uuid())
            .bind(&update.tracking_number)
            .bind(&update.shipping_provider)
            .bind(&update.shipping_status)
            .bind(update.estimated_delivery.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    /// Mark an unshipped order as being booked. `None` when the order is missing, already
    /// shipped or claimed by another booking.
    pub(crate) async fn claim_shipment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CLAIM_SHIPMENT_SQL)
            .bind(order.into_uuid())
            .bind(BOOKING_SHIPPING_STATUS)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn release_shipment_claim(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<bool, sqlx::Error> {
        let result = query(RELEASE_SHIPMENT_CLAIM_SQL)
            .bind(order.into_uuid())
            .bind(BOOKING_SHIPPING_STATUS)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn to_column(column: &str, amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn amount(row: &PgRow, column: &str) -> Result<u64, sqlx::Error> {
    from_count(column, row.try_get(column)?)
}

fn from_count(column: &str, value: i64) -> Result<u64, sqlx::Error> {
    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn parse_status(status: &str) -> Result<OrderStatus, sqlx::Error> {
    status.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: row.try_get("order_number")?,
            customer: Customer {
                name: row.try_get("customer_name")?,
                email: row.try_get("customer_email")?,
                phone: row.try_get("customer_phone")?,
            },
            shipping_address: row.try_get::<Json<_>, _>("shipping_address")?.0,
            items: row.try_get::<Json<_>, _>("items")?.0,
            event_booking: row
                .try_get::<Option<Json<_>>, _>("event_booking")?
                .map(|booking| booking.0),
            totals: OrderTotals {
                subtotal: amount(row, "subtotal")?,
                shipping_cost: amount(row, "shipping_cost")?,
                total: amount(row, "total")?,
            },
            payment_reference: row.try_get("payment_reference")?,
            status: parse_status(row.try_get("status")?)?,
            tracking_number: row.try_get("tracking_number")?,
            shipping_provider: row.try_get("shipping_provider")?,
            shipping_status: row.try_get("shipping_status")?,
            estimated_delivery: row.try_get("estimated_delivery")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CustomerSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            customer: Customer {
                name: row.try_get("customer_name")?,
                email: row.try_get("customer_email")?,
                phone: row.try_get("customer_phone")?,
            },
            order_count: amount(row, "order_count")?,
            first_order_at: row.try_get::<SqlxTimestamp, _>("first_order_at")?.to_jiff(),
            last_order_at: row.try_get::<SqlxTimestamp, _>("last_order_at")?.to_jiff(),
        })
    }
}
