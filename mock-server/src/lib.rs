//! In-memory products REST service.
//!
//! Plays the downstream collaborator for the gateway: a plain collection at
//! `/products` with item routes at `/products/{id}`. Products are stored
//! whole, so fields the service does not know about survive a round-trip.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn named(id: &str, name: &str) -> Self {
        let mut extra = Map::new();
        extra.insert("name".to_string(), Value::String(name.to_string()));
        Self {
            id: id.to_string(),
            extra,
        }
    }
}

pub type Db = Arc<RwLock<HashMap<String, Product>>>;

pub fn app() -> Router {
    app_with(Db::default())
}

/// Build the router over an existing store, so tests can seed or inspect it.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(replace_product).delete(delete_product),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    let products = db.read().await;
    let mut all: Vec<Product> = products.values().cloned().collect();
    all.sort_by(|a, b| a.id.cmp(&b.id));
    Json(all)
}

/// Assigns a fresh id when the payload has none; a taken id is a conflict.
async fn create_product(
    State(db): State<Db>,
    Json(mut input): Json<Product>,
) -> Result<(StatusCode, Json<Product>), StatusCode> {
    if input.id.is_empty() {
        input.id = Uuid::new_v4().to_string();
    }
    let mut products = db.write().await;
    if products.contains_key(&input.id) {
        return Err(StatusCode::CONFLICT);
    }
    debug!(id = %input.id, "product created");
    products.insert(input.id.clone(), input.clone());
    Ok((StatusCode::CREATED, Json(input)))
}

async fn get_product(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Product>, StatusCode> {
    let products = db.read().await;
    products.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Full replacement; the path id always wins over the body id.
async fn replace_product(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(mut input): Json<Product>,
) -> Result<Json<Product>, StatusCode> {
    let mut products = db.write().await;
    let slot = products.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    input.id = id;
    *slot = input.clone();
    Ok(Json(input))
}

async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut products = db.write().await;
    products
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
