//! JSON-over-HTTP implementation of `CrudApi`.
//!
//! # Design
//! `RestClient` holds a normalized base URL and a shared `reqwest::Client`
//! and carries no other state between calls. Each CRUD operation is split
//! into a `build_*` method that produces an `HttpRequest` and a `parse_*`
//! method that consumes an `HttpResponse`; `execute` is the only step that
//! touches the network.
//!
//! Routes follow the usual collection layout: list and create hit the base
//! URL, keyed operations hit `{base}/{key}` with the key percent-encoded as
//! one path segment.

use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::CrudApi;
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::response::ApiResponse;

pub struct RestClient<R> {
    base_url: Url,
    http: reqwest::Client,
    _resource: PhantomData<fn() -> R>,
}

impl<R> fmt::Debug for RestClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl<R> RestClient<R> {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    /// Like `new`, but every request is aborted after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_http_client(base_url, http)
    }

    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            http,
            _resource: PhantomData,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.base_url.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get(&self, key: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.item_url(key),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_delete(&self, key: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(key),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_delete(&self, response: HttpResponse) -> ApiResponse<()> {
        ApiResponse::status_only(response.status)
    }

    /// Perform the round-trip for a built request.
    ///
    /// Any status the server returns, including 4xx and 5xx, comes back as
    /// `Ok`; only failures to obtain a response are errors.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(method = request.method.as_str(), url = %request.path, "sending downstream request");

        let method = to_reqwest_method(request.method);
        let mut builder = self.http.request(method, request.path.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, url = %request.path, "downstream responded");
        Ok(HttpResponse { status, body })
    }

    fn item_url(&self, key: &str) -> String {
        let mut url = self.base_url.clone();
        // Cannot fail: normalize_base_url rejects cannot-be-a-base URLs.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(key);
        }
        url.into()
    }
}

impl<R: Serialize> RestClient<R> {
    pub fn build_create(&self, payload: &R) -> Result<HttpRequest, ClientError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.base_url.to_string(),
            headers: json_headers(),
            body: Some(encode(payload)?),
        })
    }

    pub fn build_update(&self, key: &str, payload: &R) -> Result<HttpRequest, ClientError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_url(key),
            headers: json_headers(),
            body: Some(encode(payload)?),
        })
    }
}

impl<R: DeserializeOwned> RestClient<R> {
    pub fn parse_list(&self, response: HttpResponse) -> Result<ApiResponse<Vec<R>>, ClientError> {
        decode(response)
    }

    /// Shared by get, create and update, which all answer with one item.
    pub fn parse_item(&self, response: HttpResponse) -> Result<ApiResponse<R>, ClientError> {
        decode(response)
    }
}

#[async_trait]
impl<R, K> CrudApi<R, K> for RestClient<R>
where
    R: Serialize + DeserializeOwned + Send + Sync + 'static,
    K: Display + ?Sized + Sync,
{
    async fn list_all(&self) -> Result<ApiResponse<Vec<R>>, ClientError> {
        let response = self.execute(self.build_list()).await?;
        self.parse_list(response)
    }

    async fn get_by_key(&self, key: &K) -> Result<ApiResponse<R>, ClientError> {
        let request = self.build_get(&key.to_string());
        let response = self.execute(request).await?;
        self.parse_item(response)
    }

    async fn create(&self, payload: &R) -> Result<ApiResponse<R>, ClientError> {
        let request = self.build_create(payload)?;
        let response = self.execute(request).await?;
        self.parse_item(response)
    }

    async fn update(&self, key: &K, payload: &R) -> Result<ApiResponse<R>, ClientError> {
        let request = self.build_update(&key.to_string(), payload)?;
        let response = self.execute(request).await?;
        self.parse_item(response)
    }

    async fn delete(&self, key: &K) -> Result<ApiResponse<()>, ClientError> {
        let request = self.build_delete(&key.to_string());
        let response = self.execute(request).await?;
        Ok(self.parse_delete(response))
    }
}

fn normalize_base_url(raw: &str) -> Result<Url, ClientError> {
    let mut url =
        Url::parse(raw).map_err(|e| ClientError::InvalidBaseUrl(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ClientError::InvalidBaseUrl(format!(
            "{raw}: expected an http or https URL"
        )));
    }
    let path = url.path().trim_end_matches('/').to_string();
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode<T: Serialize>(payload: &T) -> Result<String, ClientError> {
    serde_json::to_string(payload).map_err(|e| ClientError::Serialization(e.to_string()))
}

/// Non-2xx and empty 2xx bodies yield no content; only a 2xx with a body is
/// decoded.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<ApiResponse<T>, ClientError> {
    if !(200..=299).contains(&response.status) || response.body.trim().is_empty() {
        return Ok(ApiResponse::status_only(response.status));
    }
    let content = serde_json::from_str(&response.body)
        .map_err(|e| ClientError::Deserialization(e.to_string()))?;
    Ok(ApiResponse::new(response.status, Some(content)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn client() -> RestClient<Product> {
        RestClient::new("http://localhost:3000/products").unwrap()
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_produces_correct_request() {
        let req = client().build_list();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/products");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_appends_key_segment() {
        let req = client().build_get("p1");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/products/p1");
        assert!(req.body.is_none());
    }

    #[test]
    fn keys_are_encoded_as_a_single_segment() {
        let req = client().build_get("a/b c");
        assert_eq!(req.path, "http://localhost:3000/products/a%2Fb%20c");
    }

    #[test]
    fn build_create_produces_correct_request() {
        let req = client().build_create(&Product::new("", "Widget")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/products");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Widget");
    }

    #[test]
    fn build_update_targets_the_item() {
        let req = client().build_update("p1", &Product::new("p1", "Gadget")).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/products/p1");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], "p1");
        assert_eq!(body["name"], "Gadget");
    }

    #[test]
    fn build_delete_produces_correct_request() {
        let req = client().build_delete("p1");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/products/p1");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = RestClient::<Product>::new("http://localhost:3000/products/").unwrap();
        assert_eq!(client.build_list().path, "http://localhost:3000/products");
        assert_eq!(client.build_get("x").path, "http://localhost:3000/products/x");
    }

    #[test]
    fn bare_host_base_url() {
        let client = RestClient::<Product>::new("http://localhost:3000").unwrap();
        assert_eq!(client.build_get("x").path, "http://localhost:3000/x");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = RestClient::<Product>::new("mailto:someone@example.com").unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
        let err = RestClient::<Product>::new("not a url").unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn parse_list_success() {
        let resp = client()
            .parse_list(response(200, r#"[{"id":"p1","name":"Widget"}]"#))
            .unwrap();
        assert!(resp.is_success());
        let items = resp.content.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0], Product::new("p1", "Widget"));
    }

    #[test]
    fn parse_list_no_content() {
        let resp = client().parse_list(response(204, "")).unwrap();
        assert!(resp.is_success());
        assert!(resp.content.is_none());
    }

    #[test]
    fn parse_item_not_found_is_not_an_error() {
        let resp = client().parse_item(response(404, "no such product")).unwrap();
        assert_eq!(resp.status, 404);
        assert!(!resp.is_success());
        assert!(resp.content.is_none());
    }

    #[test]
    fn parse_item_server_error_body_is_ignored() {
        let resp = client().parse_item(response(500, "<html>oops</html>")).unwrap();
        assert_eq!(resp.status, 500);
        assert!(resp.content.is_none());
    }

    #[test]
    fn parse_item_created() {
        let resp = client()
            .parse_item(response(201, r#"{"id":"p9","name":"New"}"#))
            .unwrap();
        assert_eq!(resp.status, 201);
        assert_eq!(resp.content.unwrap().id, "p9");
    }

    #[test]
    fn parse_item_bad_json() {
        let err = client().parse_item(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ClientError::Deserialization(_)));
    }

    #[test]
    fn parse_delete_reports_status() {
        assert!(client().parse_delete(response(204, "")).is_success());
        assert!(!client().parse_delete(response(404, "")).is_success());
    }
}
