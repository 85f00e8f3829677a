use rust_decimal::Decimal;

use super::super::domain::{CleanlinessLevel, PropertyAttributes, ServiceType};
use super::super::settings::PricingConfiguration;
use super::money::round_half_up;

const SQ_FT_PER_BLOCK: u32 = 500;

/// Number of 500 sq ft blocks, counting any partial block as a whole one.
pub fn square_footage_blocks(approx_sq_ft: u32) -> u32 {
    approx_sq_ft.div_ceil(SQ_FT_PER_BLOCK)
}

/// Billable labor hours for a job, rounded to two decimal places.
pub fn estimate_hours(
    attributes: &PropertyAttributes,
    service_type: &ServiceType,
    cleanliness: CleanlinessLevel,
    config: &PricingConfiguration,
) -> Decimal {
    let mut hours = config.base_hours
        + config.hours_per_bedroom * Decimal::from(attributes.bedrooms)
        + config.hours_per_bathroom * Decimal::from(attributes.bathrooms);

    hours += config.hours_per_500_sq_ft
        * Decimal::from(square_footage_blocks(attributes.approx_sq_ft));
    hours += config.hours_per_level * Decimal::from(attributes.levels);

    if attributes.pets {
        hours += config.pets_extra_hours;
    }
    if attributes.furnished {
        hours += config.furnished_extra_hours;
    }

    hours *= match cleanliness {
        CleanlinessLevel::Deep => config.cleanliness_multiplier_deep,
        CleanlinessLevel::Basic => config.cleanliness_multiplier_basic,
    };
    hours *= config.property_multipliers.for_service(service_type).value();

    round_half_up(hours)
}
