use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

/// A recorded journey with measured distance/duration and server-computed prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub distance_miles: f64,
    pub duration_seconds: f64,
    pub date: DateTime,
    pub base_price: f64,
    pub final_price: f64,
    pub surcharge_ids: Vec<String>,
    pub discount_ids: Vec<String>,
    pub order_id: Option<ObjectId>,
    pub status: String,
    pub created_at: Option<DateTime>,
    pub updated_at: Option<DateTime>,
}

/// Client-submitted trip. `date` arrives as a `YYYY-MM-DD` string; prices are
/// recomputed server-side from the current rate settings before insert.
#[derive(Debug, Deserialize, Serialize)]
pub struct TripInput {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub distance_miles: f64,
    pub duration_seconds: f64,
    pub date: String,
    pub surcharge_ids: Option<Vec<String>>,
    pub discount_ids: Option<Vec<String>>,
}
