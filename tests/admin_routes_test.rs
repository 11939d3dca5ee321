mod common;

use actix_web::test;
use serde_json::json;
use serial_test::serial;

use common::TestApp;

#[actix_rt::test]
#[serial]
async fn test_admin_user_list_requires_auth() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/admin/users").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_admin_role_update_requires_auth() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::put()
        .uri("/api/admin/users/65a000000000000000000000/role")
        .set_json(&json!({ "role": "admin" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_rate_settings_update_requires_auth() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::put()
        .uri("/api/admin/rates")
        .set_json(&json!({
            "base_mile_rate": 2.5,
            "base_hour_rate": 0.5,
            "surcharge_factors": [],
            "discounts": []
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}
