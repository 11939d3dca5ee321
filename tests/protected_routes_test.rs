mod common;

use actix_web::test;
use serde_json::json;
use serial_test::serial;

use common::TestApp;

#[actix_rt::test]
#[serial]
async fn test_session_requires_auth() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/auth/session").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_trips_require_auth() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let list_req = test::TestRequest::get().uri("/api/trips").to_request();
    let resp = test::call_service(&app, list_req).await;
    assert_eq!(resp.status(), 401);

    let create_req = test::TestRequest::post()
        .uri("/api/trips")
        .set_json(&json!({
            "origin": { "lat": 40.71, "lng": -74.00, "address": "A" },
            "destination": { "lat": 40.73, "lng": -73.99, "address": "B" },
            "distance_miles": 5,
            "duration_seconds": 600,
            "date": "2024-01-01"
        }))
        .to_request();
    let resp = test::call_service(&app, create_req).await;
    assert_eq!(resp.status(), 401);

    let get_req = test::TestRequest::get()
        .uri("/api/trips/65a000000000000000000000")
        .to_request();
    let resp = test::call_service(&app, get_req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_orders_require_auth() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let list_req = test::TestRequest::get().uri("/api/orders").to_request();
    let resp = test::call_service(&app, list_req).await;
    assert_eq!(resp.status(), 401);

    let create_req = test::TestRequest::post()
        .uri("/api/orders")
        .set_json(&json!({ "trip_ids": ["65a000000000000000000000"] }))
        .to_request();
    let resp = test::call_service(&app, create_req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_invoices_require_auth() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let list_req = test::TestRequest::get().uri("/api/invoices").to_request();
    let resp = test::call_service(&app, list_req).await;
    assert_eq!(resp.status(), 401);

    let create_req = test::TestRequest::post()
        .uri("/api/invoices/order/65a000000000000000000000")
        .to_request();
    let resp = test::call_service(&app, create_req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_dashboard_requires_auth() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/dashboard/stats?period=month")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}
