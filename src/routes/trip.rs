use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::Client;
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::rate_settings::RateSettings;
use crate::models::trip::{Trip, TripInput};
use crate::services::fare_service::FareService;
use crate::services::validation_service;

fn parse_user_id(claims: &Claims) -> Result<ObjectId, HttpResponse> {
    ObjectId::parse_str(&claims.user_id)
        .map_err(|_| HttpResponse::BadRequest().body("Invalid user ID"))
}

fn date_to_bson(date: NaiveDate) -> DateTime {
    DateTime::from_millis(date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis())
}

/// Record a trip. Prices are always recomputed server-side from the current
/// rate settings; client-submitted prices are never trusted.
pub async fn create_trip(
    data: web::Data<Arc<Client>>,
    input: web::Json<TripInput>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let input = input.into_inner();

    if !validation_service::is_valid_trip_input(&input) {
        return HttpResponse::BadRequest().body("Invalid trip");
    }

    let user_id = match parse_user_id(&claims) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let settings_collection: mongodb::Collection<RateSettings> =
        client.database("Dispatch").collection("RateSettings");

    let settings = match settings_collection.find_one(doc! {}).await {
        Ok(Some(settings)) => settings,
        Ok(None) => return HttpResponse::NotFound().body("Rate settings not configured"),
        Err(err) => {
            eprintln!("Failed to fetch rate settings: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to record trip");
        }
    };

    let surcharge_ids = input.surcharge_ids.unwrap_or_default();
    let discount_ids = input.discount_ids.unwrap_or_default();
    let fare = FareService::calculate_fare(
        input.distance_miles,
        input.duration_seconds,
        &settings,
        &surcharge_ids,
        &discount_ids,
    );

    // Validated by is_valid_trip_input above
    let date = NaiveDate::parse_from_str(&input.date, "%Y-%m-%d").unwrap();

    let now = DateTime::now();
    let trip = Trip {
        id: None,
        user_id,
        origin: input.origin,
        destination: input.destination,
        distance_miles: input.distance_miles,
        duration_seconds: input.duration_seconds,
        date: date_to_bson(date),
        base_price: fare.base_price,
        final_price: fare.final_price,
        surcharge_ids,
        discount_ids,
        order_id: None,
        status: "recorded".to_string(),
        created_at: Some(now),
        updated_at: Some(now),
    };

    let collection: mongodb::Collection<Trip> = client.database("Dispatch").collection("Trips");

    match collection.insert_one(&trip).await {
        Ok(result) => {
            let mut stored = trip;
            stored.id = result.inserted_id.as_object_id();
            HttpResponse::Ok().json(stored)
        }
        Err(err) => {
            eprintln!("Failed to insert trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to record trip")
        }
    }
}

pub async fn get_trips(data: web::Data<Arc<Client>>, claims: Claims) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Trip> = client.database("Dispatch").collection("Trips");

    let user_id = match parse_user_id(&claims) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match collection.find(doc! { "user_id": user_id }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Trip>>().await {
            Ok(trips) => HttpResponse::Ok().json(trips),
            Err(err) => {
                eprintln!("Failed to collect trips: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to fetch trips")
            }
        },
        Err(err) => {
            eprintln!("Failed to find trips: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch trips")
        }
    }
}

pub async fn get_trip_by_id(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Trip> = client.database("Dispatch").collection("Trips");

    let user_id = match parse_user_id(&claims) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let trip_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid trip ID"),
    };

    match collection
        .find_one(doc! { "_id": trip_id, "user_id": user_id })
        .await
    {
        Ok(Some(trip)) => HttpResponse::Ok().json(trip),
        Ok(None) => HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to fetch trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch trip")
        }
    }
}

pub async fn delete_trip(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Trip> = client.database("Dispatch").collection("Trips");

    let user_id = match parse_user_id(&claims) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let trip_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid trip ID"),
    };

    // Trips already grouped into an order stay; the order owns them now
    match collection
        .find_one(doc! { "_id": trip_id, "user_id": user_id })
        .await
    {
        Ok(Some(trip)) => {
            if trip.order_id.is_some() {
                return HttpResponse::Conflict().body("Trip belongs to an order");
            }
        }
        Ok(None) => return HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to fetch trip: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to delete trip");
        }
    }

    match collection
        .delete_one(doc! { "_id": trip_id, "user_id": user_id })
        .await
    {
        Ok(_) => HttpResponse::Ok().body("Trip deleted"),
        Err(err) => {
            eprintln!("Failed to delete trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to delete trip")
        }
    }
}
