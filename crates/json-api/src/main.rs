//! Taper JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use taper::catalog::Catalog;
use taper_app::context::{AppContext, AppSettings};

use crate::{config::ServerConfig, observability::request_logging, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod admin;
mod auth;
mod config;
mod customers;
mod extensions;
mod healthcheck;
mod observability;
mod orders;
mod reconciler;
mod router;
mod shipping;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod tracking;

/// Taper JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init_logging(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    let catalog = match Catalog::load(&config.storefront.catalog_path) {
        Ok(catalog) => catalog,
        Err(load_error) => {
            error!(
                path = %config.storefront.catalog_path.display(),
                "failed to load product catalog: {load_error}"
            );

            process::exit(1);
        }
    };

    info!(products = catalog.len(), "loaded product catalog");

    if config.shiplogic.shiplogic_api_key.is_none() {
        info!("no shipping provider API key configured, rates will use flat tiers");
    }

    let settings = AppSettings {
        database_url: config.database.database_url.clone(),
        shiplogic: config.shiplogic.client_config(),
        catalog,
        outbox_path: config.storefront.outbox_path.clone(),
        transition_policy: config.storefront.transition_policy(),
    };

    let app = match AppContext::from_settings(settings).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let background: Vec<_> = config
        .storefront
        .reconcile_interval()
        .map(|period| reconciler::spawn(app.checkout.clone(), period))
        .into_iter()
        .collect();

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(
            app,
            config.storefront.expose_error_details,
        )))
        .push(router::app_router());

    let doc = OpenApi::new("Taper API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, background, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;

    info!("server stopped");
}
