pub mod service;

pub use service::{Product, ProductService};

use crate::error::{AdmissionError, Result};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

/// Handler for `GET /products`: the full catalog.
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.products.get_products().to_vec())
}

/// Handler for `GET /products/:id`: one product, or 404 when the id is unknown.
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>> {
    debug!(product_id, "product lookup");

    state
        .products
        .get_product(&product_id)
        .cloned()
        .map(Json)
        .ok_or(AdmissionError::ProductNotFound(product_id))
}
