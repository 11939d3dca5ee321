use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDateTime;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::Client;
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::dashboard::DashboardStats;
use crate::models::trip::Trip;
use crate::services::period_service::{self, Period};
use crate::services::stats_service::StatsService;

#[derive(serde::Deserialize)]
pub struct StatsQuery {
    period: Option<String>,
}

fn naive_to_bson(value: NaiveDateTime) -> DateTime {
    DateTime::from_millis(value.and_utc().timestamp_millis())
}

/// Trip statistics for the calendar period containing today: count, revenue,
/// distance, duration, and average fare.
pub async fn get_stats(
    data: web::Data<Arc<Client>>,
    params: web::Query<StatsQuery>,
    claims: Claims,
) -> impl Responder {
    let period = match Period::parse(params.period.as_deref().unwrap_or("month")) {
        Some(period) => period,
        None => return HttpResponse::BadRequest().body("Unknown period"),
    };

    let user_id = match ObjectId::parse_str(&claims.user_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    let today = chrono::Local::now().date_naive();
    let start = period_service::start_of_period(period, today);
    let end = period_service::end_of_period(period, today);

    let client = data.into_inner();
    let collection: mongodb::Collection<Trip> = client.database("Dispatch").collection("Trips");

    let filter = doc! {
        "user_id": user_id,
        "date": {
            "$gte": naive_to_bson(start),
            "$lte": naive_to_bson(end)
        }
    };

    match collection.find(filter).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Trip>>().await {
            Ok(trips) => {
                let totals = StatsService::summarize_trips(&trips);
                HttpResponse::Ok().json(DashboardStats {
                    period: period.as_str().to_string(),
                    period_start: start.to_string(),
                    period_end: end.to_string(),
                    trip_count: totals.trip_count,
                    total_revenue: totals.total_revenue,
                    total_distance_miles: totals.total_distance_miles,
                    total_duration_seconds: totals.total_duration_seconds,
                    average_fare: totals.average_fare,
                })
            }
            Err(err) => {
                eprintln!("Failed to collect trips: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to compute statistics")
            }
        },
        Err(err) => {
            eprintln!("Failed to find trips: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to compute statistics")
        }
    }
}
