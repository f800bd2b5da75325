//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                     - Liveness check
//!
//! # Customers
//! GET    /customers                  - All customers
//! POST   /customers                  - Create a customer (201 + Location)
//! GET    /customers/count            - Number of customers
//! GET    /customers/search?searchTerm=...
//!                                    - Search name, email, city, state
//! GET    /customers/by-city/{city}   - Customers in a city
//! GET    /customers/{id}             - One customer
//! PUT    /customers/{id}             - Replace a customer's mutable fields
//! DELETE /customers/{id}             - Delete a customer (204)
//!
//! # RPC
//! POST   /rpc                        - Operation envelope, see `crate::rpc`
//! ```

pub mod customers;
pub mod rpc;

use axum::{
    Router,
    extract::Request,
    middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::index).post(customers::create))
        .route("/count", get(customers::count))
        .route("/search", get(customers::search))
        .route("/by-city/{city}", get(customers::by_city))
        .route(
            "/{id}",
            get(customers::show)
                .put(customers::update)
                .delete(customers::destroy),
        )
}

/// Build the full application router with tracing and request IDs.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/customers", customer_routes())
        .route("/rpc", post(rpc::call))
        .with_state(state)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
