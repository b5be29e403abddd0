use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};
use product_core::{CrudApi, Product};
use tower_http::trace::TraceLayer;

use crate::controller::ResourceController;
use crate::error::GatewayError;

pub const PRODUCT_PATH: &str = "/api/product";

type Products = Arc<ResourceController<Product>>;

/// Build the `/api/product` router over the given downstream client.
///
/// `/api/product/` (trailing slash, no key) is routed explicitly so that
/// update and delete without a key answer 400 instead of 405.
pub fn router(client: Arc<dyn CrudApi<Product, str>>) -> Router {
    let controller: Products = Arc::new(ResourceController::new(client, PRODUCT_PATH));
    Router::new()
        .route("/api/product", get(list_products).post(create_product))
        .route(
            "/api/product/",
            get(list_products)
                .post(create_product)
                .put(update_without_key)
                .delete(delete_without_key),
        )
        .route(
            "/api/product/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(controller)
        .layer(TraceLayer::new_for_http())
}

async fn list_products(State(ctl): State<Products>) -> Result<Response, GatewayError> {
    ctl.list().await
}

async fn get_product(
    State(ctl): State<Products>,
    Path(id): Path<String>,
) -> Result<Response, GatewayError> {
    ctl.get_by_id(&id).await
}

async fn create_product(
    State(ctl): State<Products>,
    Json(payload): Json<Product>,
) -> Result<Response, GatewayError> {
    ctl.create(payload).await
}

async fn update_product(
    State(ctl): State<Products>,
    Path(id): Path<String>,
    Json(payload): Json<Product>,
) -> Result<Response, GatewayError> {
    ctl.update(&id, payload).await
}

/// Answers before the body is looked at, so a missing or non-JSON body
/// still gets 400.
async fn update_without_key() -> GatewayError {
    GatewayError::MissingKey
}

async fn delete_product(
    State(ctl): State<Products>,
    Path(id): Path<String>,
) -> Result<Response, GatewayError> {
    ctl.delete(&id).await
}

async fn delete_without_key(State(ctl): State<Products>) -> Result<Response, GatewayError> {
    ctl.delete("").await
}
