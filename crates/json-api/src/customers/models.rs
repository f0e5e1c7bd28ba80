//! Customer response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use taper_app::domain::orders::records::{CustomerOrders, CustomerSummary, Page};

use crate::orders::models::{CustomerBody, OrderResponse};

/// Someone who has ordered, with their latest contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerSummaryResponse {
    pub customer: CustomerBody,
    pub order_count: u64,
    pub first_order_at: String,
    pub last_order_at: String,
}

impl From<CustomerSummary> for CustomerSummaryResponse {
    fn from(summary: CustomerSummary) -> Self {
        Self {
            customer: summary.customer.into(),
            order_count: summary.order_count,
            first_order_at: summary.first_order_at.to_string(),
            last_order_at: summary.last_order_at.to_string(),
        }
    }
}

/// A page of customers, most recently active first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomersPageResponse {
    pub customers: Vec<CustomerSummaryResponse>,

    /// Customers across all pages
    pub total: u64,

    pub page: u32,
    pub limit: u32,
}

impl From<Page<CustomerSummary>> for CustomersPageResponse {
    fn from(page: Page<CustomerSummary>) -> Self {
        Self {
            customers: page
                .items
                .into_iter()
                .map(CustomerSummaryResponse::from)
                .collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
        }
    }
}

/// A customer and their orders, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub summary: CustomerSummaryResponse,

    pub orders: Vec<OrderResponse>,
}

impl From<CustomerOrders> for CustomerResponse {
    fn from(customer: CustomerOrders) -> Self {
        Self {
            summary: customer.summary.into(),
            orders: customer.orders.into_iter().map(OrderResponse::from).collect(),
        }
    }
}
