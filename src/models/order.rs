use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// A billing group of trips. `total` is the sum of the member trips' final prices
/// at the time the order was assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub trip_ids: Vec<ObjectId>,
    pub status: String,
    pub total: f64,
    pub created_at: Option<DateTime>,
    pub updated_at: Option<DateTime>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OrderInput {
    pub trip_ids: Vec<String>,
}
