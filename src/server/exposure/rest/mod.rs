//! REST API exposure
//!
//! Consumes a `ServerHost` and produces an Axum `Router`. Invoice routes are
//! mounted under the configured listing path, so the path the actions
//! navigate to is also the path that serves the listing.

pub mod handlers;

use super::super::host::ServerHost;
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// The router carries:
    /// - Health check routes
    /// - Invoice routes under `host.config.listing_path`
    /// - Custom routes
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let invoice_routes = Self::invoice_routes(host);

        let mut app = Self::health_routes().merge(invoice_routes);

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
    }

    fn invoice_routes(host: Arc<ServerHost>) -> Router {
        let listing = host.listing_path().to_string();
        let item = format!("{}/{{id}}", listing);

        Router::new()
            .route(
                &listing,
                get(handlers::list_invoices).post(handlers::create_invoice),
            )
            .route(
                &item,
                get(handlers::get_invoice)
                    .put(handlers::update_invoice)
                    .post(handlers::update_invoice)
                    .delete(handlers::delete_invoice),
            )
            .with_state(host)
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "invoice-actions"
        }))
    }
}
