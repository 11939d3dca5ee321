use serde::{Deserialize, Serialize};

use crate::models::rate_settings::{AdjustmentKind, RateSettings};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareLineItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    pub applied_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareBreakdown {
    pub base_price: f64,
    pub subtotal: f64,
    pub final_price: f64,
    pub line_items: Vec<FareLineItem>,
}

pub struct FareService;

impl FareService {
    /// Base price from measured distance and duration:
    /// miles * mile rate + hours * hour rate.
    pub fn calculate_base_price(
        distance_miles: f64,
        duration_seconds: f64,
        settings: &RateSettings,
    ) -> f64 {
        distance_miles * settings.base_mile_rate
            + (duration_seconds / 3600.0) * settings.base_hour_rate
    }

    /// Full itemized fare: base price, then selected surcharges in configuration
    /// list order, then selected discounts in configuration list order.
    ///
    /// Percentage rules are applied against the running subtotal, so two selected
    /// percentage surcharges compound rather than both reading the original base.
    /// Fixed rules add (or subtract) their dollar amount directly. The final price
    /// is clamped at zero; discounts can never drive it negative.
    pub fn calculate_fare(
        distance_miles: f64,
        duration_seconds: f64,
        settings: &RateSettings,
        surcharge_ids: &[String],
        discount_ids: &[String],
    ) -> FareBreakdown {
        let base_price = Self::calculate_base_price(distance_miles, duration_seconds, settings);

        let mut subtotal = base_price;
        let mut line_items = Vec::new();

        for rule in &settings.surcharge_factors {
            if !surcharge_ids.contains(&rule.id) {
                continue;
            }
            let applied = match rule.kind {
                AdjustmentKind::Percentage => subtotal * rule.rate / 100.0,
                AdjustmentKind::Fixed => rule.rate,
            };
            subtotal += applied;
            line_items.push(FareLineItem {
                name: rule.name.clone(),
                kind: rule.kind,
                applied_amount: applied,
            });
        }

        let subtotal_after_surcharges = subtotal;

        for rule in &settings.discounts {
            if !discount_ids.contains(&rule.id) {
                continue;
            }
            let applied = match rule.kind {
                AdjustmentKind::Percentage => subtotal * rule.rate / 100.0,
                AdjustmentKind::Fixed => rule.rate,
            };
            subtotal -= applied;
            line_items.push(FareLineItem {
                name: rule.name.clone(),
                kind: rule.kind,
                applied_amount: applied,
            });
        }

        FareBreakdown {
            base_price,
            subtotal: subtotal_after_surcharges,
            final_price: subtotal.max(0.0),
            line_items,
        }
    }
}
