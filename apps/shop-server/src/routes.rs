//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method  Path           Command                                         │
//! │  ──────  ────           ───────                                         │
//! │  GET     /health        (liveness)                                      │
//! │  GET     /products      list_products                                   │
//! │  GET     /cart          get_cart (new cart)                             │
//! │  GET     /cart/{id}     get_cart                                        │
//! │  POST    /cart/items    add_product                                     │
//! │  PUT     /cart          update_cart                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tracing::info;

use fakeshop_core::CatalogEntry;

use crate::commands::{self, AddProductRequest, CartView, UpdateCartRequest};
use crate::error::ApiError;
use crate::state::SharedState;

/// Builds the application router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/products", get(products_handler))
        .route("/cart", get(new_cart_handler).put(update_cart_handler))
        .route("/cart/items", post(add_product_handler))
        .route("/cart/{id}", get(cart_handler))
        .with_state(state)
}

/// Serves `state` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: SharedState, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Shop server listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Health check endpoint.
async fn health_handler() -> impl IntoResponse {
    "OK"
}

async fn products_handler(State(state): State<SharedState>) -> Json<Vec<CatalogEntry>> {
    Json(commands::list_products(&state))
}

async fn new_cart_handler(State(state): State<SharedState>) -> Result<Json<CartView>, ApiError> {
    commands::get_cart(&state, None).map(Json)
}

async fn cart_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CartView>, ApiError> {
    commands::get_cart(&state, Some(&id)).map(Json)
}

async fn add_product_handler(
    State(state): State<SharedState>,
    Json(request): Json<AddProductRequest>,
) -> Result<Json<CartView>, ApiError> {
    commands::add_product(&state, request).map(Json)
}

async fn update_cart_handler(
    State(state): State<SharedState>,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>, ApiError> {
    commands::update_cart(&state, request).map(Json)
}
