use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentKind {
    #[serde(rename = "percentage")]
    Percentage,
    #[serde(rename = "fixed")]
    Fixed,
}

/// A single named fare adjustment rule. `rate` is a percentage of the running
/// subtotal for `percentage` rules and an absolute dollar amount for `fixed` ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateAdjustment {
    pub id: String,
    pub name: String,
    pub rate: f64,
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
}

/// Administrator-configured rate tables. A single document holds the current
/// configuration; list order of the adjustment rules is the application order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSettings {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub base_mile_rate: f64,
    pub base_hour_rate: f64,
    pub surcharge_factors: Vec<RateAdjustment>,
    pub discounts: Vec<RateAdjustment>,
    pub created_at: Option<DateTime>,
    pub updated_at: Option<DateTime>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateAdjustmentInput {
    // Absent on newly added rules; the server mints an id on save
    pub id: Option<String>,
    pub name: String,
    pub rate: f64,
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateSettingsInput {
    pub base_mile_rate: f64,
    pub base_hour_rate: f64,
    pub surcharge_factors: Vec<RateAdjustmentInput>,
    pub discounts: Vec<RateAdjustmentInput>,
}
