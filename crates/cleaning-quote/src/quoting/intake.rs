use std::sync::OnceLock;

use regex::Regex;

use super::domain::{EstimateSubmission, ServiceType};

/// Rejections raised before a submission reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidEstimateInput {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("'{0}' is not a valid ZIP code")]
    InvalidZipCode(String),
    #[error("unknown service type '{0}'")]
    UnknownServiceType(String),
}

pub const OUTSIDE_SERVICE_AREA_NOTICE: &str =
    "You appear to be outside our service area. Our office will contact you.";

fn zip_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("ZIP pattern compiles"))
}

pub(crate) fn is_valid_zip(raw: &str) -> bool {
    zip_pattern().is_match(raw.trim())
}

fn is_plausible_email(raw: &str) -> bool {
    match raw.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split('.')
                    .filter(|label| !label.is_empty())
                    .count()
                    >= 2
        }
        None => false,
    }
}

/// Boundary checks applied to customer submissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn check(&self, submission: &EstimateSubmission) -> Result<(), InvalidEstimateInput> {
        let customer = &submission.customer;

        for (field, value) in [
            ("name", customer.name.as_str()),
            ("email", customer.email.as_str()),
            ("address", customer.address.as_str()),
            ("zip_code", customer.zip_code.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(InvalidEstimateInput::MissingField(field));
            }
        }

        if !is_plausible_email(&customer.email) {
            return Err(InvalidEstimateInput::InvalidEmail(customer.email.clone()));
        }

        if !is_valid_zip(&customer.zip_code) {
            return Err(InvalidEstimateInput::InvalidZipCode(
                customer.zip_code.clone(),
            ));
        }

        if let ServiceType::Unrecognized(raw) = &submission.service_type {
            return Err(InvalidEstimateInput::UnknownServiceType(raw.clone()));
        }

        Ok(())
    }

    /// Customer-facing notice for jobs outside the service radius.
    pub fn service_area_notice(&self, submission: &EstimateSubmission) -> Option<&'static str> {
        if submission.within_service_radius {
            None
        } else {
            Some(OUTSIDE_SERVICE_AREA_NOTICE)
        }
    }
}
