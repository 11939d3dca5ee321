//! Request-gating predicates.
//!
//! Every function here is a pure boolean check with no side effects. Handlers
//! call these before touching the database or the fare calculator, so the
//! calculator itself never has to reject input.

use serde_json::Value;

use crate::models::rate_settings::{AdjustmentKind, RateSettingsInput};
use crate::models::trip::{GeoPoint, TripInput};

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Finite number check; NaN and infinities fail.
pub fn is_numeric(value: f64) -> bool {
    value.is_finite()
}

pub fn is_positive(value: f64) -> bool {
    is_numeric(value) && value > 0.0
}

pub fn is_non_negative(value: f64) -> bool {
    is_numeric(value) && value >= 0.0
}

pub fn is_valid_percentage(value: f64) -> bool {
    is_numeric(value) && (0.0..=100.0).contains(&value)
}

// Not RFC-exhaustive; mirrors the signup form check
pub fn is_valid_email(email: &str) -> bool {
    let re = regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    );
    re.unwrap().is_match(email)
}

pub fn is_valid_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

pub fn is_valid_date(value: &str) -> bool {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

pub fn is_valid_coordinates(lat: f64, lng: f64) -> bool {
    is_numeric(lat) && is_numeric(lng) && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}

pub fn is_valid_geo_point(point: &GeoPoint) -> bool {
    is_valid_coordinates(point.lat, point.lng) && !is_blank(&point.address)
}

/// True when every named field exists on the JSON object and is non-empty:
/// not null, not a blank string, not an empty array or object.
pub fn has_required_fields(value: &Value, fields: &[&str]) -> bool {
    let object = match value.as_object() {
        Some(object) => object,
        None => return false,
    };

    fields.iter().all(|field| match object.get(*field) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !is_blank(s),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(_) => true,
    })
}

/// Structural check over a raw trip payload: all required fields present and
/// each satisfying its per-field predicate.
pub fn is_valid_trip(trip: &Value) -> bool {
    if !has_required_fields(
        trip,
        &[
            "origin",
            "destination",
            "distance_miles",
            "duration_seconds",
            "date",
            "base_price",
            "final_price",
        ],
    ) {
        return false;
    }

    let endpoint_ok = |value: &Value| {
        let lat = value["lat"].as_f64();
        let lng = value["lng"].as_f64();
        let address = value["address"].as_str();
        match (lat, lng, address) {
            (Some(lat), Some(lng), Some(address)) => {
                is_valid_coordinates(lat, lng) && !is_blank(address)
            }
            _ => false,
        }
    };

    let number_ok = |value: &Value| value.as_f64().map(is_positive).unwrap_or(false);

    endpoint_ok(&trip["origin"])
        && endpoint_ok(&trip["destination"])
        && number_ok(&trip["distance_miles"])
        && number_ok(&trip["duration_seconds"])
        && trip["date"].as_str().map(is_valid_date).unwrap_or(false)
        && number_ok(&trip["base_price"])
        && number_ok(&trip["final_price"])
}

/// Typed gate for trip submissions; prices are computed after this passes.
pub fn is_valid_trip_input(input: &TripInput) -> bool {
    is_valid_geo_point(&input.origin)
        && is_valid_geo_point(&input.destination)
        && is_positive(input.distance_miles)
        && is_positive(input.duration_seconds)
        && is_valid_date(&input.date)
}

pub fn is_valid_rate_settings(input: &RateSettingsInput) -> bool {
    if !is_non_negative(input.base_mile_rate) || !is_non_negative(input.base_hour_rate) {
        return false;
    }

    input
        .surcharge_factors
        .iter()
        .chain(input.discounts.iter())
        .all(|rule| {
            if is_blank(&rule.name) || !is_numeric(rule.rate) {
                return false;
            }
            match rule.kind {
                AdjustmentKind::Percentage => is_valid_percentage(rule.rate),
                AdjustmentKind::Fixed => is_non_negative(rule.rate),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rate_settings::RateAdjustmentInput;
    use serde_json::json;

    fn sample_trip() -> Value {
        json!({
            "origin": { "lat": 40.71, "lng": -74.00, "address": "A" },
            "destination": { "lat": 40.73, "lng": -73.99, "address": "B" },
            "distance_miles": 5,
            "duration_seconds": 600,
            "date": "2024-01-01",
            "base_price": 12.5,
            "final_price": 12.5
        })
    }

    #[test]
    fn test_blank_and_numeric_checks() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank("Denver"));

        assert!(is_numeric(0.0));
        assert!(!is_numeric(f64::NAN));
        assert!(!is_numeric(f64::INFINITY));

        assert!(is_positive(0.1));
        assert!(!is_positive(0.0));
        assert!(is_non_negative(0.0));
        assert!(!is_non_negative(-0.1));
    }

    #[test]
    fn test_percentage_range() {
        assert!(is_valid_percentage(0.0));
        assert!(is_valid_percentage(100.0));
        assert!(!is_valid_percentage(100.1));
        assert!(!is_valid_percentage(-5.0));
    }

    #[test]
    fn test_email_check() {
        assert!(is_valid_email("driver@fleetline.com"));
        assert!(is_valid_email("a.b+tag@example.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@domain@twice.com"));
    }

    #[test]
    fn test_url_check() {
        assert!(is_valid_url("https://maps.googleapis.com/maps/api"));
        assert!(!is_valid_url("not a url"));
    }

    #[test]
    fn test_date_check() {
        assert!(is_valid_date("2024-01-01"));
        assert!(!is_valid_date("2024-13-01"));
        assert!(!is_valid_date("01/01/2024"));
    }

    #[test]
    fn test_coordinate_ranges() {
        assert!(is_valid_coordinates(40.71, -74.0));
        assert!(!is_valid_coordinates(91.0, 0.0));
        assert!(!is_valid_coordinates(0.0, -181.0));
    }

    #[test]
    fn test_has_required_fields() {
        let value = json!({ "name": "Airport Fee", "rate": 15, "tags": [] });
        assert!(has_required_fields(&value, &["name", "rate"]));
        assert!(!has_required_fields(&value, &["name", "tags"]));
        assert!(!has_required_fields(&value, &["name", "missing"]));
        assert!(!has_required_fields(&json!("string"), &["name"]));
    }

    #[test]
    fn test_valid_trip_accepts_reference_payload() {
        assert!(is_valid_trip(&sample_trip()));
    }

    #[test]
    fn test_valid_trip_rejects_missing_or_bad_fields() {
        for field in [
            "origin",
            "destination",
            "distance_miles",
            "duration_seconds",
            "date",
            "base_price",
            "final_price",
        ] {
            let mut trip = sample_trip();
            trip.as_object_mut().unwrap().remove(field);
            assert!(!is_valid_trip(&trip), "should reject missing {}", field);
        }

        let mut trip = sample_trip();
        trip["distance_miles"] = json!(-5);
        assert!(!is_valid_trip(&trip));

        let mut trip = sample_trip();
        trip["origin"]["address"] = json!("   ");
        assert!(!is_valid_trip(&trip));

        let mut trip = sample_trip();
        trip["date"] = json!("tomorrow");
        assert!(!is_valid_trip(&trip));
    }

    #[test]
    fn test_valid_rate_settings() {
        let good = RateSettingsInput {
            base_mile_rate: 2.5,
            base_hour_rate: 0.5,
            surcharge_factors: vec![RateAdjustmentInput {
                id: None,
                name: "Airport Fee".to_string(),
                rate: 15.0,
                kind: AdjustmentKind::Fixed,
            }],
            discounts: vec![RateAdjustmentInput {
                id: None,
                name: "Loyalty".to_string(),
                rate: 10.0,
                kind: AdjustmentKind::Percentage,
            }],
        };
        assert!(is_valid_rate_settings(&good));

        let mut negative_base = good.clone();
        negative_base.base_mile_rate = -1.0;
        assert!(!is_valid_rate_settings(&negative_base));

        let mut out_of_range = good.clone();
        out_of_range.discounts[0].rate = 150.0;
        assert!(!is_valid_rate_settings(&out_of_range));

        let mut blank_name = good.clone();
        blank_name.surcharge_factors[0].name = " ".to_string();
        assert!(!is_valid_rate_settings(&blank_name));
    }
}
