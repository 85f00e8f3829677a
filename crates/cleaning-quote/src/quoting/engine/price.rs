use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::super::addons::AddOn;
use super::super::domain::{Frequency, ServiceType};
use super::super::settings::PricingConfiguration;
use super::money::round_half_up;

/// Hourly labor rate selected for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRate {
    pub rate: Decimal,
    pub discount_pct: Decimal,
    /// True when the discounted residential rate fell below the recurring floor.
    pub floor_applied: bool,
}

impl HourlyRate {
    fn flat(rate: Decimal) -> Self {
        Self {
            rate,
            discount_pct: Decimal::ZERO,
            floor_applied: false,
        }
    }
}

/// Itemized price. Only `total` is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub hourly_rate: HourlyRate,
    pub labor: Decimal,
    pub add_ons: Decimal,
    pub radius_surcharge: Decimal,
    pub total: Decimal,
}

fn recurring_discount_pct(frequency: Frequency, config: &PricingConfiguration) -> Decimal {
    match frequency {
        Frequency::Weekly => config.weekly_discount_pct,
        Frequency::Biweekly => config.biweekly_discount_pct,
        Frequency::Monthly => config.monthly_discount_pct,
        Frequency::OneTime => Decimal::ZERO,
    }
}

/// Select the hourly rate for a service type and frequency.
///
/// Residential recurring work starts from the recurring rate, takes the frequency discount,
/// then is clamped back up to the recurring rate. Every other service type bills the
/// commercial rate whatever the frequency.
pub fn hourly_rate(
    service_type: &ServiceType,
    frequency: Frequency,
    config: &PricingConfiguration,
) -> HourlyRate {
    if !service_type.is_residential() {
        return HourlyRate::flat(config.commercial_rate);
    }

    if !frequency.is_recurring() {
        return HourlyRate::flat(config.residential_one_time_rate);
    }

    let floor = config.residential_recurring_rate;
    let discount_pct = recurring_discount_pct(frequency, config);
    let discounted = floor * (Decimal::ONE - discount_pct / Decimal::ONE_HUNDRED);

    if discounted < floor {
        HourlyRate {
            rate: floor,
            discount_pct,
            floor_applied: true,
        }
    } else {
        HourlyRate {
            rate: discounted,
            discount_pct,
            floor_applied: false,
        }
    }
}

pub fn add_on_cost(add_ons: &[AddOn], hours: Decimal) -> Decimal {
    add_ons.iter().map(|add_on| add_on.cost_for(hours)).sum()
}

pub fn price_breakdown(
    service_type: &ServiceType,
    frequency: Frequency,
    hours: Decimal,
    add_ons: &[AddOn],
    within_radius: bool,
    config: &PricingConfiguration,
) -> PriceBreakdown {
    let hourly_rate = hourly_rate(service_type, frequency, config);
    let labor = hourly_rate.rate * hours;
    let add_ons = add_on_cost(add_ons, hours);
    let radius_surcharge = if within_radius {
        Decimal::ZERO
    } else {
        config.outside_radius_fee()
    };

    PriceBreakdown {
        hourly_rate,
        labor,
        add_ons,
        radius_surcharge,
        total: round_half_up(labor + add_ons + radius_surcharge),
    }
}

/// Quoted price for a job, rounded to cents.
pub fn calculate_price(
    service_type: &ServiceType,
    frequency: Frequency,
    hours: Decimal,
    add_ons: &[AddOn],
    within_radius: bool,
    config: &PricingConfiguration,
) -> Decimal {
    price_breakdown(service_type, frequency, hours, add_ons, within_radius, config).total
}
