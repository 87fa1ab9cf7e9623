//! Rendering of accumulated decimal hours.
//!
//! Both renderings round half-up. Callers pass non-negative values only.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Hours with exactly two decimal places, e.g. `7.50`.
pub fn format_decimal(hours: Decimal) -> String {
    let rounded = hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Hours as an `HH:MM` clock string.
///
/// The fractional hour is converted to minutes and rounded to the nearest
/// whole minute; 60 rounded minutes carry into the hour.
pub fn format_clock(hours: Decimal) -> String {
    let mut whole_hours = hours.trunc();
    let minutes = ((hours - whole_hours) * Decimal::from(60))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let mut minutes = minutes.to_u32().unwrap_or_default();
    if minutes >= 60 {
        whole_hours += Decimal::ONE;
        minutes = 0;
    }

    format!("{:0>2}:{:02}", whole_hours.normalize().to_string(), minutes)
}
