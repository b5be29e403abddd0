//! Full CRUD lifecycle against the live mock server.
//!
//! Starts the mock server on a random port, then drives every `CrudApi`
//! operation of `RestClient` over real HTTP.

use product_core::{ClientError, CrudApi, Product, RestClient};

async fn start_mock_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}/products")
}

#[tokio::test]
async fn crud_lifecycle() {
    let client: RestClient<Product> = RestClient::new(&start_mock_server().await).unwrap();
    let api: &dyn CrudApi<Product, str> = &client;

    // list: empty collection is still a success
    let listing = api.list_all().await.unwrap();
    assert!(listing.is_success());
    assert_eq!(listing.content, Some(Vec::new()));

    // create with a caller-chosen key
    let mut widget = Product::new("p1", "Widget");
    widget.extra.insert("price".to_string(), serde_json::json!(9.99));
    let created = api.create(&widget).await.unwrap();
    assert_eq!(created.status, 201);
    assert_eq!(created.content.as_ref(), Some(&widget));

    // get
    let fetched = api.get_by_key("p1").await.unwrap();
    assert!(fetched.is_success());
    assert_eq!(fetched.content, Some(widget.clone()));

    // update
    let renamed = Product::new("p1", "Widget Pro");
    let updated = api.update("p1", &renamed).await.unwrap();
    assert!(updated.is_success());
    assert_eq!(updated.content.unwrap().name(), Some("Widget Pro"));

    // list: one item
    let listing = api.list_all().await.unwrap();
    assert_eq!(listing.content.unwrap().len(), 1);

    // delete
    let deleted = api.delete("p1").await.unwrap();
    assert_eq!(deleted.status, 204);
    assert!(deleted.is_success());

    // absence is a status, not an error
    let missing = api.get_by_key("p1").await.unwrap();
    assert_eq!(missing.status, 404);
    assert!(missing.content.is_none());

    let missing = api.update("p1", &renamed).await.unwrap();
    assert_eq!(missing.status, 404);

    let missing = api.delete("p1").await.unwrap();
    assert_eq!(missing.status, 404);
}

#[tokio::test]
async fn server_assigns_key_when_absent() {
    let client: RestClient<Product> = RestClient::new(&start_mock_server().await).unwrap();

    let created = CrudApi::<Product, str>::create(&client, &Product::new("", "Anonymous"))
        .await
        .unwrap();
    let product = created.content.unwrap();
    assert!(!product.id.is_empty());

    let fetched = CrudApi::<Product, str>::get_by_key(&client, product.id.as_str())
        .await
        .unwrap();
    assert_eq!(fetched.content, Some(product));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client: RestClient<Product> = RestClient::new(&format!("http://{addr}/products")).unwrap();
    let err = CrudApi::<Product, str>::list_all(&client).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
