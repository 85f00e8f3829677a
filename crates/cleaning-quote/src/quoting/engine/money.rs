use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for currency and hours at every boundary.
pub const SCALE: u32 = 2;

/// Round to cents, halves away from zero, always carrying two decimal places.
///
/// Quantities handled here are non-negative, where this matches half-up rounding.
pub fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(SCALE);
    rounded
}
