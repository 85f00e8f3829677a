use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::addons::AddOnId;

/// Identifier wrapper for persisted estimates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EstimateId(pub String);

impl fmt::Display for EstimateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of job being quoted.
///
/// Raw values outside the offered services are kept as [`ServiceType::Unrecognized`] so the
/// intake guard can reject them and the engine can apply its explicit fallback branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceType {
    Residential,
    Commercial,
    Construction,
    Move,
    Church,
    Unrecognized(String),
}

impl ServiceType {
    pub const fn offered() -> [Self; 5] {
        [
            Self::Residential,
            Self::Commercial,
            Self::Construction,
            Self::Move,
            Self::Church,
        ]
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "residential" => Self::Residential,
            "commercial" => Self::Commercial,
            "construction" => Self::Construction,
            "move" | "move_in_out" => Self::Move,
            "church" => Self::Church,
            _ => Self::Unrecognized(raw.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::Construction => "construction",
            Self::Move => "move",
            Self::Church => "church",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Residential => "Residential",
            Self::Commercial => "Commercial",
            Self::Construction => "Construction cleanup",
            Self::Move => "Move in / Move out",
            Self::Church => "Church",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_residential(&self) -> bool {
        matches!(self, Self::Residential)
    }
}

impl From<String> for ServiceType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ServiceType> for String {
    fn from(value: ServiceType) -> Self {
        value.code().to_string()
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    OneTime,
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OneTime => "One-time",
            Self::Weekly => "Weekly",
            Self::Biweekly => "Every 2 weeks",
            Self::Monthly => "Monthly",
        }
    }

    pub const fn is_recurring(self) -> bool {
        !matches!(self, Self::OneTime)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanlinessLevel {
    #[default]
    Basic,
    Deep,
}

impl CleanlinessLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic (bathrooms, light dust, floors, wipe surfaces)",
            Self::Deep => "Deep (floor to ceiling; add-ons separate)",
        }
    }
}

/// Customer-described property characteristics driving the hour estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAttributes {
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub approx_sq_ft: u32,
    pub levels: u32,
    pub furnished: bool,
    pub pets: bool,
}

/// Contact and location fields. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address: String,
    pub zip_code: String,
}

/// Raw quote request as collected from the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateSubmission {
    pub customer: CustomerDetails,
    pub service_type: ServiceType,
    pub frequency: Frequency,
    #[serde(default)]
    pub cleanliness_level: CleanlinessLevel,
    pub property: PropertyAttributes,
    #[serde(default = "default_within_radius")]
    pub within_service_radius: bool,
    #[serde(default)]
    pub add_on_ids: Vec<AddOnId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

fn default_within_radius() -> bool {
    true
}

/// Quoting lifecycle tracked on each persisted estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    New,
    Quoted,
    Scheduled,
    Completed,
    Canceled,
}

impl EstimateStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Quoted => "Quoted",
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
            Self::Canceled => "Canceled",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::New, Self::Quoted)
            | (Self::Quoted, Self::Scheduled)
            | (Self::Scheduled, Self::Completed) => true,
            (current, Self::Canceled) => !current.is_terminal(),
            _ => false,
        }
    }
}

/// Engine output stored alongside the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub computed_hours: Decimal,
    pub quoted_price: Decimal,
}

/// Timestamp source so services can be exercised with fixed clocks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_type_round_trips_wire_codes() {
        for service in ServiceType::offered() {
            assert_eq!(ServiceType::parse(service.code()), service);
        }
        assert_eq!(ServiceType::parse(" Move_In_Out "), ServiceType::Move);
    }

    #[test]
    fn unknown_service_type_is_preserved() {
        let parsed: ServiceType = serde_json::from_str("\"carpet\"").expect("deserializes");
        assert_eq!(parsed, ServiceType::Unrecognized("carpet".to_string()));
        assert_eq!(serde_json::to_string(&parsed).expect("serializes"), "\"carpet\"");
    }

    #[test]
    fn status_lifecycle_allows_forward_moves_and_cancellation() {
        assert!(EstimateStatus::New.can_transition_to(EstimateStatus::Quoted));
        assert!(EstimateStatus::Quoted.can_transition_to(EstimateStatus::Scheduled));
        assert!(EstimateStatus::Scheduled.can_transition_to(EstimateStatus::Completed));
        assert!(EstimateStatus::Quoted.can_transition_to(EstimateStatus::Canceled));
        assert!(!EstimateStatus::Completed.can_transition_to(EstimateStatus::Canceled));
        assert!(!EstimateStatus::Canceled.can_transition_to(EstimateStatus::Quoted));
        assert!(!EstimateStatus::New.can_transition_to(EstimateStatus::Completed));
    }

    #[test]
    fn submission_defaults_optional_fields() {
        let payload = serde_json::json!({
            "customer": {
                "name": "Dana",
                "email": "dana@example.com",
                "address": "12 Oak St",
                "zip_code": "35055"
            },
            "service_type": "residential",
            "frequency": "biweekly",
            "property": {
                "bedrooms": 3,
                "bathrooms": 2,
                "approx_sq_ft": 1800,
                "levels": 2,
                "furnished": true,
                "pets": false
            }
        });

        let submission: EstimateSubmission =
            serde_json::from_value(payload).expect("submission deserializes");
        assert_eq!(submission.cleanliness_level, CleanlinessLevel::Basic);
        assert!(submission.within_service_radius);
        assert!(submission.add_on_ids.is_empty());
        assert!(submission.customer.phone.is_none());
    }
}
