use std::io::Read;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::ServiceType;
use super::intake::is_valid_zip;

/// Administrator-tunable rates, discounts, and hour-estimation knobs.
///
/// [`Default`] is the zero configuration substituted when no configuration has been stored:
/// every rate and hour knob is zero and every multiplier is one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfiguration {
    pub residential_recurring_rate: Decimal,
    pub residential_one_time_rate: Decimal,
    pub commercial_rate: Decimal,

    pub weekly_discount_pct: Decimal,
    pub biweekly_discount_pct: Decimal,
    pub monthly_discount_pct: Decimal,

    pub base_hours: Decimal,
    pub hours_per_bedroom: Decimal,
    pub hours_per_bathroom: Decimal,
    pub hours_per_500_sq_ft: Decimal,
    pub hours_per_level: Decimal,
    pub pets_extra_hours: Decimal,
    pub furnished_extra_hours: Decimal,
    pub cleanliness_multiplier_basic: Decimal,
    pub cleanliness_multiplier_deep: Decimal,
    pub property_multipliers: PropertyMultipliers,

    pub service_radius_miles: u32,
    pub base_zip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outside_radius_fee: Option<Decimal>,
}

impl Default for PricingConfiguration {
    fn default() -> Self {
        Self {
            residential_recurring_rate: Decimal::ZERO,
            residential_one_time_rate: Decimal::ZERO,
            commercial_rate: Decimal::ZERO,
            weekly_discount_pct: Decimal::ZERO,
            biweekly_discount_pct: Decimal::ZERO,
            monthly_discount_pct: Decimal::ZERO,
            base_hours: Decimal::ZERO,
            hours_per_bedroom: Decimal::ZERO,
            hours_per_bathroom: Decimal::ZERO,
            hours_per_500_sq_ft: Decimal::ZERO,
            hours_per_level: Decimal::ZERO,
            pets_extra_hours: Decimal::ZERO,
            furnished_extra_hours: Decimal::ZERO,
            cleanliness_multiplier_basic: Decimal::ONE,
            cleanliness_multiplier_deep: Decimal::ONE,
            property_multipliers: PropertyMultipliers::default(),
            service_radius_miles: 0,
            base_zip: String::new(),
            outside_radius_fee: None,
        }
    }
}

/// One hours multiplier per offered service type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyMultipliers {
    pub residential: Decimal,
    pub commercial: Decimal,
    pub construction: Decimal,
    #[serde(rename = "move")]
    pub move_in_out: Decimal,
    pub church: Decimal,
}

impl Default for PropertyMultipliers {
    fn default() -> Self {
        Self {
            residential: Decimal::ONE,
            commercial: Decimal::ONE,
            construction: Decimal::ONE,
            move_in_out: Decimal::ONE,
            church: Decimal::ONE,
        }
    }
}

/// Multiplier chosen for a service type, tagged with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyMultiplier {
    Configured(Decimal),
    /// Service type outside the offered set; hours are left unscaled.
    Fallback,
}

impl PropertyMultiplier {
    pub fn value(self) -> Decimal {
        match self {
            Self::Configured(value) => value,
            Self::Fallback => Decimal::ONE,
        }
    }
}

impl PropertyMultipliers {
    pub fn for_service(&self, service_type: &ServiceType) -> PropertyMultiplier {
        match service_type {
            ServiceType::Residential => PropertyMultiplier::Configured(self.residential),
            ServiceType::Commercial => PropertyMultiplier::Configured(self.commercial),
            ServiceType::Construction => PropertyMultiplier::Configured(self.construction),
            ServiceType::Move => PropertyMultiplier::Configured(self.move_in_out),
            ServiceType::Church => PropertyMultiplier::Configured(self.church),
            ServiceType::Unrecognized(_) => PropertyMultiplier::Fallback,
        }
    }

    fn entries(&self) -> [(&'static str, Decimal); 5] {
        [
            ("property_multipliers.residential", self.residential),
            ("property_multipliers.commercial", self.commercial),
            ("property_multipliers.construction", self.construction),
            ("property_multipliers.move", self.move_in_out),
            ("property_multipliers.church", self.church),
        ]
    }
}

/// Data-model violations reported to administrators editing a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationViolation {
    #[error("{field} must not be negative (found {value})")]
    Negative { field: &'static str, value: Decimal },
    #[error("{field} must be between 0 and 100 (found {value})")]
    DiscountOutOfRange { field: &'static str, value: Decimal },
    #[error("base_zip '{0}' is not a 5 or 9 digit ZIP code")]
    InvalidBaseZip(String),
}

impl PricingConfiguration {
    /// Check the data-model invariants, reporting every violation found.
    ///
    /// The engine never calls this; it prices with whatever snapshot it is handed.
    pub fn validate(&self) -> Result<(), Vec<ConfigurationViolation>> {
        let mut violations = Vec::new();

        let mut non_negative = vec![
            ("residential_recurring_rate", self.residential_recurring_rate),
            ("residential_one_time_rate", self.residential_one_time_rate),
            ("commercial_rate", self.commercial_rate),
            ("base_hours", self.base_hours),
            ("hours_per_bedroom", self.hours_per_bedroom),
            ("hours_per_bathroom", self.hours_per_bathroom),
            ("hours_per_500_sq_ft", self.hours_per_500_sq_ft),
            ("hours_per_level", self.hours_per_level),
            ("pets_extra_hours", self.pets_extra_hours),
            ("furnished_extra_hours", self.furnished_extra_hours),
            ("cleanliness_multiplier_basic", self.cleanliness_multiplier_basic),
            ("cleanliness_multiplier_deep", self.cleanliness_multiplier_deep),
        ];
        non_negative.extend(self.property_multipliers.entries());
        if let Some(fee) = self.outside_radius_fee {
            non_negative.push(("outside_radius_fee", fee));
        }

        for (field, value) in non_negative {
            if value < Decimal::ZERO {
                violations.push(ConfigurationViolation::Negative { field, value });
            }
        }

        for (field, value) in [
            ("weekly_discount_pct", self.weekly_discount_pct),
            ("biweekly_discount_pct", self.biweekly_discount_pct),
            ("monthly_discount_pct", self.monthly_discount_pct),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
                violations.push(ConfigurationViolation::DiscountOutOfRange { field, value });
            }
        }

        if !self.base_zip.is_empty() && !is_valid_zip(&self.base_zip) {
            violations.push(ConfigurationViolation::InvalidBaseZip(
                self.base_zip.clone(),
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Surcharge applied to jobs outside the service radius.
    pub fn outside_radius_fee(&self) -> Decimal {
        self.outside_radius_fee.unwrap_or(Decimal::ZERO)
    }
}

/// A stored configuration row. The newest row is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRecord {
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub configuration: PricingConfiguration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigurationSource {
    Stored { created_at: DateTime<Utc> },
    Fallback,
}

/// Active configuration plus the row it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfiguration {
    pub source: ConfigurationSource,
    pub configuration: PricingConfiguration,
}

impl ResolvedConfiguration {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ConfigurationSource::Fallback)
    }
}

/// Pick the most recently created row, or the zero configuration when the history is empty.
///
/// Rows sharing the newest timestamp resolve to the one listed last.
pub fn resolve(history: &[ConfigurationRecord]) -> ResolvedConfiguration {
    match history.iter().max_by_key(|record| record.created_at) {
        Some(record) => ResolvedConfiguration {
            source: ConfigurationSource::Stored {
                created_at: record.created_at,
            },
            configuration: record.configuration.clone(),
        },
        None => ResolvedConfiguration {
            source: ConfigurationSource::Fallback,
            configuration: PricingConfiguration::default(),
        },
    }
}

pub fn resolve_active_configuration(history: &[ConfigurationRecord]) -> PricingConfiguration {
    resolve(history).configuration
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HistoryDocument {
    Many(Vec<ConfigurationRecord>),
    One(ConfigurationRecord),
}

/// Read a configuration history export: a single record or an array of records.
pub fn history_from_json_reader<R: Read>(
    reader: R,
) -> Result<Vec<ConfigurationRecord>, serde_json::Error> {
    let document: HistoryDocument = serde_json::from_reader(reader)?;
    Ok(match document {
        HistoryDocument::Many(records) => records,
        HistoryDocument::One(record) => vec![record],
    })
}
