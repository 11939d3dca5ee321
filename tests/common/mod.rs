use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, Responder};
use serde::Deserialize;

use fleetline_api::models::rate_settings::{AdjustmentKind, RateAdjustment, RateSettings};
use fleetline_api::services::fare_service::FareService;
use fleetline_api::services::validation_service;

pub struct TestApp;

impl TestApp {
    pub fn new() -> Self {
        TestApp
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .route("/", web::get().to(|| async { "FleetLine API is running" }))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api/auth")
                    .route("/signup", web::post().to(signup))
                    .route("/signin", web::post().to(signin))
                    .route("/session", web::get().to(unauthorized_handler)),
            )
            .service(
                web::scope("/api/admin")
                    .route("/users", web::get().to(unauthorized_handler))
                    .route("/users/{id}/role", web::put().to(unauthorized_handler))
                    .route("/rates", web::put().to(unauthorized_handler)),
            )
            .service(
                web::scope("/api")
                    .route("/rates", web::get().to(get_rates))
                    .route("/fares/quote", web::post().to(quote_fare))
                    .route("/routes/estimate", web::post().to(estimate_route))
                    .route("/trips", web::post().to(unauthorized_handler))
                    .route("/trips", web::get().to(unauthorized_handler))
                    .route("/trips/{id}", web::get().to(unauthorized_handler))
                    .route("/trips/{id}", web::delete().to(unauthorized_handler))
                    .route("/orders", web::post().to(unauthorized_handler))
                    .route("/orders", web::get().to(unauthorized_handler))
                    .route("/orders/{id}", web::get().to(unauthorized_handler))
                    .route("/invoices/order/{id}", web::post().to(unauthorized_handler))
                    .route("/invoices", web::get().to(unauthorized_handler))
                    .route("/invoices/{id}", web::get().to(unauthorized_handler))
                    .route("/dashboard/stats", web::get().to(unauthorized_handler)),
            )
    }
}

/// Rate tables used by the mock handlers; mirrors a typical production setup.
pub fn sample_settings() -> RateSettings {
    RateSettings {
        id: None,
        base_mile_rate: 2.5,
        base_hour_rate: 0.5,
        surcharge_factors: vec![RateAdjustment {
            id: "airport".to_string(),
            name: "Airport Fee".to_string(),
            rate: 15.0,
            kind: AdjustmentKind::Fixed,
        }],
        discounts: vec![RateAdjustment {
            id: "loyalty".to_string(),
            name: "Loyalty".to_string(),
            rate: 10.0,
            kind: AdjustmentKind::Percentage,
        }],
        created_at: None,
        updated_at: None,
    }
}

// Mock handler functions for testing. The fare quote runs the real calculator
// against sample_settings so pricing is exercised end to end over HTTP.
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

async fn get_rates() -> impl Responder {
    HttpResponse::Ok().json(sample_settings())
}

#[derive(Deserialize)]
struct QuoteInput {
    distance_miles: f64,
    duration_seconds: f64,
    surcharge_ids: Option<Vec<String>>,
    discount_ids: Option<Vec<String>>,
}

async fn quote_fare(input: web::Json<QuoteInput>) -> impl Responder {
    let input = input.into_inner();
    if !validation_service::is_non_negative(input.distance_miles)
        || !validation_service::is_non_negative(input.duration_seconds)
    {
        return HttpResponse::BadRequest().body("Distance and duration must be non-negative");
    }

    let breakdown = FareService::calculate_fare(
        input.distance_miles,
        input.duration_seconds,
        &sample_settings(),
        &input.surcharge_ids.unwrap_or_default(),
        &input.discount_ids.unwrap_or_default(),
    );
    HttpResponse::Ok().json(breakdown)
}

async fn estimate_route() -> impl Responder {
    HttpResponse::BadGateway().json(serde_json::json!({"error": "Failed to estimate route"}))
}

async fn signup(input: web::Json<serde_json::Value>) -> impl Responder {
    let email = input["email"].as_str().unwrap_or("");
    if !validation_service::is_valid_email(email) {
        return HttpResponse::BadRequest().json(serde_json::json!({"error": "Invalid email address"}));
    }
    HttpResponse::Ok().json(serde_json::json!({"auth_token": "test_token"}))
}

async fn signin() -> impl Responder {
    HttpResponse::Unauthorized().json(serde_json::json!({"error": "Invalid credentials"}))
}

async fn unauthorized_handler() -> impl Responder {
    HttpResponse::Unauthorized().json(serde_json::json!({"error": "Unauthorized"}))
}

pub fn get_test_email() -> String {
    "test@example.com".to_string()
}

pub fn get_test_password() -> String {
    "testpassword123".to_string()
}
