mod hours;
pub mod money;
mod price;

pub use hours::{estimate_hours, square_footage_blocks};
pub use money::round_half_up;
pub use price::{
    add_on_cost, calculate_price, hourly_rate, price_breakdown, HourlyRate, PriceBreakdown,
};

use serde::{Deserialize, Serialize};

use super::addons::AddOn;
use super::domain::{CleanlinessLevel, Frequency, PropertyAttributes, QuoteResult, ServiceType};
use super::settings::PricingConfiguration;

/// Everything the engine needs to price one job, already validated and resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteInput<'a> {
    pub service_type: &'a ServiceType,
    pub frequency: Frequency,
    pub cleanliness: CleanlinessLevel,
    pub attributes: &'a PropertyAttributes,
    pub within_radius: bool,
    pub add_ons: &'a [AddOn],
}

/// Engine output with the itemized price kept for audits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub result: QuoteResult,
    pub breakdown: PriceBreakdown,
}

/// Stateless estimator bound to one configuration snapshot.
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    config: PricingConfiguration,
}

impl QuoteEngine {
    pub fn new(config: PricingConfiguration) -> Self {
        Self { config }
    }

    pub fn configuration(&self) -> &PricingConfiguration {
        &self.config
    }

    pub fn quote(&self, input: &QuoteInput<'_>) -> Quote {
        let computed_hours = estimate_hours(
            input.attributes,
            input.service_type,
            input.cleanliness,
            &self.config,
        );

        let breakdown = price_breakdown(
            input.service_type,
            input.frequency,
            computed_hours,
            input.add_ons,
            input.within_radius,
            &self.config,
        );

        Quote {
            result: QuoteResult {
                computed_hours,
                quoted_price: breakdown.total,
            },
            breakdown,
        }
    }
}
