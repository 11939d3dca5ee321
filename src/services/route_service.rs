//! Driving-route estimates with Google Distance Matrix API integration.
//!
//! The company only dispatches ground vehicles, so every request uses driving
//! mode. Results are cached in MongoDB so repeat quotes for the same
//! origin/destination pair do not burn API quota.
//!
//! ## Setup
//! 1. Enable the Distance Matrix API in Google Cloud Console
//! 2. Set the environment variable: `GOOGLE_MAPS_API_KEY=your_api_key_here`

use mongodb::{bson::oid::ObjectId, Client, Collection};
use reqwest;
use serde::{Deserialize, Serialize};
use std::{env, sync::Arc, time::Duration};

// Cached pairs stay valid for 24 hours
const CACHE_DURATION_SECONDS: i64 = 86400;

const METERS_PER_MILE: f64 = 1609.344;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedRoute {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub destination_lat: f64,
    pub destination_lng: f64,
    pub distance_meters: u32,
    pub duration_seconds: u32,
    pub cached_at: mongodb::bson::DateTime,
    pub expires_at: mongodb::bson::DateTime,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    rows: Vec<DistanceMatrixRow>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixRow {
    elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixElement {
    status: String,
    distance: Option<DistanceMatrixDistance>,
    duration: Option<DistanceMatrixDuration>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixDistance {
    value: u32, // meters
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixDuration {
    value: u32, // seconds
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteEstimate {
    pub distance_miles: f64,
    pub duration_seconds: u32,
    pub from_cache: bool,
}

pub struct RouteService {
    client: Arc<Client>,
    http_client: reqwest::Client,
    api_key: String,
}

impl RouteService {
    pub fn new(client: Arc<Client>) -> Result<Self, Box<dyn std::error::Error>> {
        let api_key = env::var("GOOGLE_MAPS_API_KEY")
            .map_err(|_| "GOOGLE_MAPS_API_KEY environment variable not set")?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            http_client,
            api_key,
        })
    }

    /// Get the driving distance and duration between two coordinates, cache first.
    pub async fn get_route(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
    ) -> Result<RouteEstimate, Box<dyn std::error::Error>> {
        if let Ok(Some(cached)) = self.get_cached_route(origin, destination).await {
            println!(
                "Using cached route for ({:.4}, {:.4}) to ({:.4}, {:.4})",
                origin.0, origin.1, destination.0, destination.1
            );

            return Ok(RouteEstimate {
                distance_miles: cached.distance_meters as f64 / METERS_PER_MILE,
                duration_seconds: cached.duration_seconds,
                from_cache: true,
            });
        }

        println!(
            "Fetching route from Distance Matrix API for ({:.4}, {:.4}) to ({:.4}, {:.4})",
            origin.0, origin.1, destination.0, destination.1
        );

        let (distance_meters, duration_seconds) =
            self.fetch_from_distance_matrix(origin, destination).await?;

        if let Err(e) = self
            .cache_route(origin, destination, distance_meters, duration_seconds)
            .await
        {
            eprintln!("Failed to cache route result: {}", e);
        }

        Ok(RouteEstimate {
            distance_miles: distance_meters as f64 / METERS_PER_MILE,
            duration_seconds,
            from_cache: false,
        })
    }

    async fn get_cached_route(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
    ) -> mongodb::error::Result<Option<CachedRoute>> {
        let collection: Collection<CachedRoute> =
            self.client.database("Dispatch").collection("RouteCache");

        // Coordinate tolerance of about 10 meters counts as the same pair
        let coord_tolerance = 0.0001;

        let filter = mongodb::bson::doc! {
            "origin_lat": {
                "$gte": origin.0 - coord_tolerance,
                "$lte": origin.0 + coord_tolerance
            },
            "origin_lng": {
                "$gte": origin.1 - coord_tolerance,
                "$lte": origin.1 + coord_tolerance
            },
            "destination_lat": {
                "$gte": destination.0 - coord_tolerance,
                "$lte": destination.0 + coord_tolerance
            },
            "destination_lng": {
                "$gte": destination.1 - coord_tolerance,
                "$lte": destination.1 + coord_tolerance
            },
            "expires_at": { "$gt": mongodb::bson::DateTime::now() }
        };

        collection.find_one(filter).await
    }

    async fn cache_route(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
        distance_meters: u32,
        duration_seconds: u32,
    ) -> mongodb::error::Result<()> {
        let collection: Collection<CachedRoute> =
            self.client.database("Dispatch").collection("RouteCache");

        let now = mongodb::bson::DateTime::now();
        let expires_at = mongodb::bson::DateTime::from_millis(
            now.timestamp_millis() + CACHE_DURATION_SECONDS * 1000,
        );

        let cached_route = CachedRoute {
            id: None,
            origin_lat: origin.0,
            origin_lng: origin.1,
            destination_lat: destination.0,
            destination_lng: destination.1,
            distance_meters,
            duration_seconds,
            cached_at: now,
            expires_at,
        };

        collection.insert_one(cached_route).await?;
        Ok(())
    }

    async fn fetch_from_distance_matrix(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
    ) -> Result<(u32, u32), Box<dyn std::error::Error>> {
        let url = format!(
            "https://maps.googleapis.com/maps/api/distancematrix/json?origins={},{}&destinations={},{}&mode=driving&key={}",
            origin.0, origin.1, destination.0, destination.1, self.api_key
        );

        let response = self.http_client.get(&url).send().await?;
        let response_text = response.text().await?;

        let matrix_response: DistanceMatrixResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                format!(
                    "Failed to parse Distance Matrix response: {}. Response: {}",
                    e, response_text
                )
            })?;

        if matrix_response.status != "OK" {
            return Err(format!("Distance Matrix API error: {}", matrix_response.status).into());
        }

        if matrix_response.rows.is_empty() || matrix_response.rows[0].elements.is_empty() {
            return Err("No route data returned from Distance Matrix API".into());
        }

        let element = &matrix_response.rows[0].elements[0];

        if element.status != "OK" {
            return Err(format!("Distance Matrix element error: {}", element.status).into());
        }

        let distance = element.distance.as_ref().ok_or("Distance not available")?;
        let duration = element.duration.as_ref().ok_or("Duration not available")?;

        Ok((distance.value, duration.value))
    }

    /// Clean up expired cache entries
    pub async fn cleanup_expired_cache(&self) -> mongodb::error::Result<u64> {
        let collection: Collection<CachedRoute> =
            self.client.database("Dispatch").collection("RouteCache");

        let filter = mongodb::bson::doc! {
            "expires_at": { "$lt": mongodb::bson::DateTime::now() }
        };

        let result = collection.delete_many(filter).await?;
        println!(
            "Cleaned up {} expired route cache entries",
            result.deleted_count
        );

        Ok(result.deleted_count)
    }
}
