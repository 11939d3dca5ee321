use actix_web::{web, HttpResponse, Responder};
use mongodb::bson::{doc, DateTime};
use mongodb::Client;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::rate_settings::{
    RateAdjustment, RateAdjustmentInput, RateSettings, RateSettingsInput,
};
use crate::services::validation_service;

/// Current rate tables. Public read so the booking form can render the fare
/// options; there is a single settings document for the whole company.
pub async fn get_rate_settings(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<RateSettings> =
        client.database("Dispatch").collection("RateSettings");

    match collection.find_one(doc! {}).await {
        Ok(Some(settings)) => HttpResponse::Ok().json(settings),
        Ok(None) => {
            // Nothing configured yet; serve zeroed defaults so clients can render
            let defaults = RateSettings {
                id: None,
                base_mile_rate: 0.0,
                base_hour_rate: 0.0,
                surcharge_factors: vec![],
                discounts: vec![],
                created_at: None,
                updated_at: None,
            };
            HttpResponse::Ok().json(defaults)
        }
        Err(err) => {
            eprintln!("Failed to fetch rate settings: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch rate settings")
        }
    }
}

// Admin-only; replaces the single settings document
pub async fn update_rate_settings(
    data: web::Data<Arc<Client>>,
    input: web::Json<RateSettingsInput>,
) -> impl Responder {
    let input = input.into_inner();

    if !validation_service::is_valid_rate_settings(&input) {
        return HttpResponse::BadRequest().body("Invalid rate settings");
    }

    let client = data.into_inner();
    let collection: mongodb::Collection<RateSettings> =
        client.database("Dispatch").collection("RateSettings");

    // Rules added in the admin form arrive without ids; mint them here so the
    // calculator and stored trips can reference rules stably
    let mint = |rules: Vec<RateAdjustmentInput>| {
        rules
            .into_iter()
            .map(|rule| RateAdjustment {
                id: rule.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                name: rule.name,
                rate: rule.rate,
                kind: rule.kind,
            })
            .collect::<Vec<RateAdjustment>>()
    };

    let now = DateTime::now();
    let existing = match collection.find_one(doc! {}).await {
        Ok(existing) => existing,
        Err(err) => {
            eprintln!("Failed to fetch rate settings: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to update rate settings");
        }
    };

    let settings = RateSettings {
        id: existing.as_ref().and_then(|s| s.id),
        base_mile_rate: input.base_mile_rate,
        base_hour_rate: input.base_hour_rate,
        surcharge_factors: mint(input.surcharge_factors),
        discounts: mint(input.discounts),
        created_at: existing.as_ref().and_then(|s| s.created_at).or(Some(now)),
        updated_at: Some(now),
    };

    match collection
        .replace_one(doc! {}, &settings)
        .upsert(true)
        .await
    {
        Ok(_) => HttpResponse::Ok().json(settings),
        Err(err) => {
            eprintln!("Failed to update rate settings: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update rate settings")
        }
    }
}
