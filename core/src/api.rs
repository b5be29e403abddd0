//! The resource client contract.

use async_trait::async_trait;

use crate::error::ClientError;
use crate::response::ApiResponse;

/// Remote CRUD operations over a resource type `R` addressed by key `K`.
///
/// A lookup for a missing key is reported through a non-success
/// `ApiResponse`, not an `Err`. Errors mean the call itself failed
/// (connection refused, timeout, undecodable body).
#[async_trait]
pub trait CrudApi<R, K: ?Sized + Sync>: Send + Sync
where
    R: Send + Sync + 'static,
{
    async fn list_all(&self) -> Result<ApiResponse<Vec<R>>, ClientError>;

    async fn get_by_key(&self, key: &K) -> Result<ApiResponse<R>, ClientError>;

    async fn create(&self, payload: &R) -> Result<ApiResponse<R>, ClientError>;

    async fn update(&self, key: &K, payload: &R) -> Result<ApiResponse<R>, ClientError>;

    async fn delete(&self, key: &K) -> Result<ApiResponse<()>, ClientError>;
}
