//! Data source client integration tests for dashboard-data.

mod common;

use common::{customers_json, init_tracing, invoices_json, mount_collection, FETCH_TIMEOUT};
use dashboard_data::error::{DataError, ErrorKind};
use dashboard_data::models::{Invoice, InvoiceStatus, Revenue};
use dashboard_data::services::{FetchClient, Resource};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> FetchClient {
    init_tracing();
    FetchClient::new(&server.uri(), FETCH_TIMEOUT).expect("Failed to build client")
}

#[tokio::test]
async fn fetch_decodes_collection() {
    let server = MockServer::start().await;
    mount_collection(&server, "invoices", invoices_json()).await;

    let invoices: Vec<Invoice> = client_for(&server)
        .fetch(Resource::Invoices)
        .await
        .expect("Failed to fetch invoices");

    assert_eq!(invoices.len(), 7);
    assert_eq!(invoices[0].id, "i1");
    assert_eq!(invoices[0].amount, 15795);
    assert_eq!(invoices[2].status, InvoiceStatus::Paid);
}

#[tokio::test]
async fn fetch_requests_the_resource_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/revenue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "month": "Jan", "revenue": 2000 },
            { "month": "Feb", "revenue": 1800 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let revenue: Vec<Revenue> = client_for(&server)
        .fetch(Resource::Revenue)
        .await
        .expect("Failed to fetch revenue");

    assert_eq!(
        revenue,
        vec![
            Revenue { month: "Jan".to_string(), revenue: 2000 },
            Revenue { month: "Feb".to_string(), revenue: 1800 },
        ]
    );
}

#[tokio::test]
async fn non_success_status_is_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch::<serde_json::Value>(Resource::Customers)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FetchFailure);
    assert!(matches!(
        err,
        DataError::FetchFailure { resource: Resource::Customers, .. }
    ));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn malformed_body_is_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoices"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch::<Invoice>(Resource::Invoices)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FetchFailure);
}

#[tokio::test]
async fn wrong_shape_is_fetch_failure() {
    let server = MockServer::start().await;
    mount_collection(&server, "customers", customers_json()).await;

    // Customers do not decode as invoices.
    let err = client_for(&server)
        .fetch::<Invoice>(Resource::Customers)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FetchFailure);
}

#[tokio::test]
async fn slow_source_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/revenue"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(FETCH_TIMEOUT + Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch::<Revenue>(Resource::Revenue)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FetchFailure);
}

#[tokio::test]
async fn unreachable_source_is_fetch_failure() {
    init_tracing();
    let client =
        FetchClient::new("http://127.0.0.1:1", FETCH_TIMEOUT).expect("Failed to build client");

    let err = client.fetch::<Revenue>(Resource::Revenue).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FetchFailure);
}
