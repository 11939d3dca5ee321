use actix_web::{web, HttpResponse, Responder};
use mongodb::bson::doc;
use mongodb::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::rate_settings::RateSettings;
use crate::services::fare_service::FareService;
use crate::services::validation_service;

#[derive(Debug, Deserialize)]
pub struct FareQuoteInput {
    pub distance_miles: f64,
    pub duration_seconds: f64,
    pub surcharge_ids: Option<Vec<String>>,
    pub discount_ids: Option<Vec<String>>,
}

/// Itemized fare breakdown for a prospective trip, priced with the current
/// rate settings. Negative or non-finite measurements are rejected here; the
/// calculator itself accepts any non-negative input.
pub async fn quote_fare(
    data: web::Data<Arc<Client>>,
    input: web::Json<FareQuoteInput>,
) -> impl Responder {
    let input = input.into_inner();

    if !validation_service::is_non_negative(input.distance_miles)
        || !validation_service::is_non_negative(input.duration_seconds)
    {
        return HttpResponse::BadRequest().body("Distance and duration must be non-negative");
    }

    let client = data.into_inner();
    let collection: mongodb::Collection<RateSettings> =
        client.database("Dispatch").collection("RateSettings");

    match collection.find_one(doc! {}).await {
        Ok(Some(settings)) => {
            let breakdown = FareService::calculate_fare(
                input.distance_miles,
                input.duration_seconds,
                &settings,
                &input.surcharge_ids.unwrap_or_default(),
                &input.discount_ids.unwrap_or_default(),
            );
            HttpResponse::Ok().json(breakdown)
        }
        Ok(None) => HttpResponse::NotFound().body("Rate settings not configured"),
        Err(err) => {
            eprintln!("Failed to fetch rate settings: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to compute fare")
        }
    }
}
