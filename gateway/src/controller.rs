//! Request-to-downstream mapping for one resource collection.
//!
//! Each operation makes at most one guard check and forwards to the injected
//! `CrudApi`, then turns the `ApiResponse` into a status:
//!
//! | Operation | Success | Failure |
//! |---|---|---|
//! | list | 200 + items, 204 when there are none | |
//! | get | 200 + item | 400 empty key, 404 |
//! | create | 201 + whatever came back | |
//! | update | 202 + item | 400 empty key, 404 |
//! | delete | 200 | 400 empty key, 404, 502 when the delete itself is refused |
//!
//! A downstream call that yields no response at all is a 502.

use std::sync::Arc;

use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use product_core::{CrudApi, Resource};
use tracing::{debug, warn};

use crate::error::GatewayError;

pub struct ResourceController<R: Resource> {
    client: Arc<dyn CrudApi<R, str>>,
    base_path: String,
}

impl<R: Resource> ResourceController<R> {
    /// `base_path` is the public collection path, used to build `Location`
    /// headers for created resources.
    pub fn new(client: Arc<dyn CrudApi<R, str>>, base_path: impl Into<String>) -> Self {
        Self {
            client,
            base_path: base_path.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn list(&self) -> Result<Response, GatewayError> {
        let listing = self.client.list_all().await?;
        let (ok, status) = (listing.is_success(), listing.status);
        match listing.content {
            Some(items) if !items.is_empty() => Ok((StatusCode::OK, Json(items)).into_response()),
            _ => {
                if !ok {
                    warn!(status, "downstream list failed, answering with no content");
                }
                Ok(StatusCode::NO_CONTENT.into_response())
            }
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Response, GatewayError> {
        require_key(id)?;
        let found = self.client.get_by_key(id).await?;
        debug!(id, status = found.status, "lookup");
        match (found.is_success(), found.content) {
            (true, Some(item)) => Ok((StatusCode::OK, Json(item)).into_response()),
            _ => Err(GatewayError::NotFound),
        }
    }

    pub async fn create(&self, payload: R) -> Result<Response, GatewayError> {
        let created = self.client.create(&payload).await?;
        if !created.is_success() {
            warn!(status = created.status, "downstream create failed");
        }
        let location = created
            .content
            .as_ref()
            .map(Resource::key)
            .filter(|key| !key.is_empty())
            .map(|key| self.location_of(key));

        let mut response = (StatusCode::CREATED, Json(created.content)).into_response();
        if let Some(Ok(location)) = location.map(|l| HeaderValue::from_str(&l)) {
            response.headers_mut().insert(LOCATION, location);
        }
        Ok(response)
    }

    /// Path of the item, with the key encoded as a single segment so it
    /// routes back to `get_by_id`.
    fn location_of(&self, key: &str) -> String {
        format!("{}/{}", self.base_path, urlencoding::encode(key))
    }

    pub async fn update(&self, id: &str, payload: R) -> Result<Response, GatewayError> {
        require_key(id)?;
        let updated = self.client.update(id, &payload).await?;
        debug!(id, status = updated.status, "update");
        match (updated.is_success(), updated.content) {
            (true, Some(item)) => Ok((StatusCode::ACCEPTED, Json(item)).into_response()),
            _ => Err(GatewayError::NotFound),
        }
    }

    /// Checks existence first, so a missing key is a 404 rather than
    /// whatever the downstream delete would say.
    pub async fn delete(&self, id: &str) -> Result<Response, GatewayError> {
        require_key(id)?;
        let existing = self.client.get_by_key(id).await?;
        if !existing.is_success() {
            return Err(GatewayError::NotFound);
        }
        let removed = self.client.delete(id).await?;
        if !removed.is_success() {
            return Err(GatewayError::Upstream {
                status: removed.status,
            });
        }
        debug!(id, "deleted");
        Ok(StatusCode::OK.into_response())
    }
}

fn require_key(id: &str) -> Result<(), GatewayError> {
    if id.is_empty() {
        return Err(GatewayError::MissingKey);
    }
    Ok(())
}
