use actix_web::{web, HttpResponse, Responder};
use mongodb::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::services::route_service::RouteService;
use crate::services::validation_service;

#[derive(Debug, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct RouteEstimateInput {
    pub origin: Coordinates,
    pub destination: Coordinates,
}

/// Driving distance and duration for an origin/destination pair, from the
/// Distance Matrix API (or its cache). The result feeds the fare quote form.
pub async fn estimate_route(
    data: web::Data<Arc<Client>>,
    input: web::Json<RouteEstimateInput>,
) -> impl Responder {
    let input = input.into_inner();

    if !validation_service::is_valid_coordinates(input.origin.lat, input.origin.lng)
        || !validation_service::is_valid_coordinates(input.destination.lat, input.destination.lng)
    {
        return HttpResponse::BadRequest().body("Invalid coordinates");
    }

    let service = match RouteService::new(data.get_ref().clone()) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Route service unavailable: {}", err);
            return HttpResponse::InternalServerError().body("Route service unavailable");
        }
    };

    match service
        .get_route(
            (input.origin.lat, input.origin.lng),
            (input.destination.lat, input.destination.lng),
        )
        .await
    {
        Ok(estimate) => HttpResponse::Ok().json(estimate),
        Err(err) => {
            eprintln!("Failed to estimate route: {}", err);
            HttpResponse::BadGateway().body("Failed to estimate route")
        }
    }
}
