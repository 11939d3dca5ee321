use crate::models::trip::Trip;

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTotals {
    pub trip_count: u64,
    pub total_revenue: f64,
    pub total_distance_miles: f64,
    pub total_duration_seconds: f64,
    pub average_fare: f64,
}

pub struct StatsService;

impl StatsService {
    /// Roll a set of trips up into dashboard totals. Average fare is 0 when the
    /// set is empty.
    pub fn summarize_trips(trips: &[Trip]) -> PeriodTotals {
        let trip_count = trips.len() as u64;
        let total_revenue: f64 = trips.iter().map(|trip| trip.final_price).sum();
        let total_distance_miles: f64 = trips.iter().map(|trip| trip.distance_miles).sum();
        let total_duration_seconds: f64 = trips.iter().map(|trip| trip.duration_seconds).sum();
        let average_fare = if trip_count > 0 {
            total_revenue / trip_count as f64
        } else {
            0.0
        };

        PeriodTotals {
            trip_count,
            total_revenue,
            total_distance_miles,
            total_duration_seconds,
            average_fare,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trip::GeoPoint;
    use mongodb::bson::{oid::ObjectId, DateTime};

    fn trip(distance_miles: f64, duration_seconds: f64, final_price: f64) -> Trip {
        Trip {
            id: Some(ObjectId::new()),
            user_id: ObjectId::new(),
            origin: GeoPoint {
                lat: 39.74,
                lng: -104.99,
                address: "Union Station".to_string(),
            },
            destination: GeoPoint {
                lat: 39.86,
                lng: -104.67,
                address: "DEN Airport".to_string(),
            },
            distance_miles,
            duration_seconds,
            date: DateTime::now(),
            base_price: final_price,
            final_price,
            surcharge_ids: vec![],
            discount_ids: vec![],
            order_id: None,
            status: "recorded".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_summarize_empty() {
        let totals = StatsService::summarize_trips(&[]);
        assert_eq!(totals.trip_count, 0);
        assert_eq!(totals.total_revenue, 0.0);
        assert_eq!(totals.average_fare, 0.0);
    }

    #[test]
    fn test_summarize_trips() {
        let trips = vec![trip(10.0, 1800.0, 36.0), trip(5.0, 600.0, 14.0)];
        let totals = StatsService::summarize_trips(&trips);

        assert_eq!(totals.trip_count, 2);
        assert_eq!(totals.total_revenue, 50.0);
        assert_eq!(totals.total_distance_miles, 15.0);
        assert_eq!(totals.total_duration_seconds, 2400.0);
        assert_eq!(totals.average_fare, 25.0);
    }
}
