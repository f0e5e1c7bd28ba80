//! App Context

use std::{path::PathBuf, sync::Arc};

use sqlx::migrate::MigrateError;
use taper::{catalog::Catalog, orders::TransitionPolicy};
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        orders::{
            OrdersService, PgOrdersService,
            outbox::{CheckoutService, OrderOutbox, OutboxCheckoutService},
        },
        shipping::{ProviderShippingService, ShippingService},
        tracking::{ProviderTrackingService, TrackingService},
    },
    shiplogic::{ShiplogicClient, ShiplogicConfig, ShiplogicError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] MigrateError),

    #[error("failed to build shipping provider client")]
    Shiplogic(#[source] ShiplogicError),
}

/// Everything needed to wire the application services.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub shiplogic: ShiplogicConfig,
    pub catalog: Catalog,
    pub outbox_path: PathBuf,
    pub transition_policy: TransitionPolicy,
}

#[derive(Clone)]
pub struct AppContext {
    pub orders: Arc<dyn OrdersService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub shipping: Arc<dyn ShippingService>,
    pub tracking: Arc<dyn TrackingService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Connect to the database, apply migrations and build the services.
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unreachable, a migration fails or the HTTP
    /// client cannot be built.
    pub async fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database_url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        let provider =
            Arc::new(ShiplogicClient::new(settings.shiplogic).map_err(AppInitError::Shiplogic)?);

        let orders: Arc<dyn OrdersService> = Arc::new(PgOrdersService::new(
            Db::new(pool.clone()),
            settings.transition_policy,
        ));

        let outbox = Arc::new(OrderOutbox::new(settings.outbox_path));

        Ok(Self {
            checkout: Arc::new(OutboxCheckoutService::new(orders.clone(), outbox)),
            shipping: Arc::new(ProviderShippingService::new(
                provider.clone(),
                orders.clone(),
                Arc::new(settings.catalog),
            )),
            tracking: Arc::new(ProviderTrackingService::new(provider)),
            auth: Arc::new(PgAuthService::new(pool)),
            orders,
        })
    }
}
