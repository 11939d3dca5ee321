use mongodb::bson::DateTime;
use rand::{distributions::Alphanumeric, Rng};

use crate::models::invoice::{Invoice, InvoiceLineItem};
use crate::models::order::Order;
use crate::models::trip::Trip;
use crate::services::format_service;

pub struct InvoiceService;

impl InvoiceService {
    /// Invoice numbers are "INV-" plus 8 random alphanumeric characters,
    /// uppercased for readability on printed invoices.
    pub fn generate_invoice_number() -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();
        format!("INV-{}", suffix.to_uppercase())
    }

    /// Assemble an invoice for an order: one line item per trip, subtotal and
    /// total as the sum of trip final prices.
    pub fn build_invoice(order: &Order, trips: &[Trip]) -> Invoice {
        let line_items: Vec<InvoiceLineItem> = trips
            .iter()
            .map(|trip| InvoiceLineItem {
                description: format!(
                    "{} to {} ({}, {})",
                    trip.origin.address,
                    trip.destination.address,
                    format_service::format_distance(trip.distance_miles),
                    format_service::format_duration(trip.duration_seconds)
                ),
                amount: trip.final_price,
            })
            .collect();

        let subtotal: f64 = line_items.iter().map(|item| item.amount).sum();
        let now = DateTime::now();

        Invoice {
            id: None,
            invoice_number: Self::generate_invoice_number(),
            order_id: order.id.unwrap_or_default(),
            user_id: order.user_id,
            line_items,
            subtotal,
            total: subtotal,
            status: "issued".to_string(),
            issued_at: now,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trip::GeoPoint;
    use mongodb::bson::oid::ObjectId;

    fn trip(origin: &str, destination: &str, final_price: f64) -> Trip {
        Trip {
            id: Some(ObjectId::new()),
            user_id: ObjectId::new(),
            origin: GeoPoint {
                lat: 39.74,
                lng: -104.99,
                address: origin.to_string(),
            },
            destination: GeoPoint {
                lat: 39.86,
                lng: -104.67,
                address: destination.to_string(),
            },
            distance_miles: 24.5,
            duration_seconds: 2100.0,
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
    fn test_invoice_number_shape() {
        let number = InvoiceService::generate_invoice_number();
        assert!(number.starts_with("INV-"));
        assert_eq!(number.len(), 12);
        assert!(number[4..].chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(number, number.to_uppercase());
    }

    #[test]
    fn test_build_invoice_totals_and_lines() {
        let trips = vec![
            trip("Union Station", "DEN Airport", 36.23),
            trip("DEN Airport", "Boulder", 58.5),
        ];
        let order = Order {
            id: Some(ObjectId::new()),
            user_id: trips[0].user_id,
            trip_ids: trips.iter().filter_map(|t| t.id).collect(),
            status: "open".to_string(),
            total: 94.73,
            created_at: None,
            updated_at: None,
        };

        let invoice = InvoiceService::build_invoice(&order, &trips);

        assert_eq!(invoice.line_items.len(), 2);
        assert_eq!(
            invoice.line_items[0].description,
            "Union Station to DEN Airport (24.5 mi, 35m)"
        );
        assert!((invoice.subtotal - 94.73).abs() < 1e-9);
        assert_eq!(invoice.subtotal, invoice.total);
        assert_eq!(invoice.status, "issued");
        assert_eq!(invoice.order_id, order.id.unwrap());
    }
}
