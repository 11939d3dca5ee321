use serde::{Deserialize, Serialize};

/// Aggregated trip statistics for one calendar period, as served to the dashboard.
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardStats {
    pub period: String,
    pub period_start: String,
    pub period_end: String,
    pub trip_count: u64,
    pub total_revenue: f64,
    pub total_distance_miles: f64,
    pub total_duration_seconds: f64,
    pub average_fare: f64,
}
