use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::addons::{AddOn, AddOnCatalog};
use super::domain::{EstimateId, EstimateStatus, EstimateSubmission, QuoteResult};
use super::engine::PriceBreakdown;
use super::settings::ConfigurationRecord;

/// Persisted estimate: the original request plus the engine output at quote time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateRecord {
    pub id: EstimateId,
    pub created_at: DateTime<Utc>,
    pub submission: EstimateSubmission,
    pub status: EstimateStatus,
    pub quote: Option<QuoteResult>,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<PriceBreakdown>,
}

impl EstimateRecord {
    pub fn status_view(&self) -> EstimateStatusView {
        EstimateStatusView {
            estimate_id: self.id.clone(),
            customer: self.submission.customer.name.clone(),
            service_type: self.submission.service_type.label().to_string(),
            frequency: self.submission.frequency.label(),
            status: self.status.label(),
            computed_hours: self.quote.map(|quote| quote.computed_hours),
            quoted_price: self.quote.map(|quote| quote.quoted_price),
            add_ons: self.add_ons.iter().map(|add_on| add_on.name.clone()).collect(),
        }
    }
}

/// Presentation-ready summary of a stored estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimateStatusView {
    pub estimate_id: EstimateId,
    pub customer: String,
    pub service_type: String,
    pub frequency: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_hours: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_price: Option<Decimal>,
    pub add_ons: Vec<String>,
}

/// Storage for estimate history.
pub trait EstimateRepository: Send + Sync {
    fn insert(&self, record: EstimateRecord) -> Result<EstimateRecord, RepositoryError>;
    fn update(&self, record: EstimateRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EstimateId) -> Result<Option<EstimateRecord>, RepositoryError>;
    /// Newest first.
    fn recent(&self, limit: usize) -> Result<Vec<EstimateRecord>, RepositoryError>;
}

/// Source of the administrator-maintained pricing tables.
pub trait PricingStore: Send + Sync {
    fn configuration_history(&self) -> Result<Vec<ConfigurationRecord>, RepositoryError>;
    fn add_on_catalog(&self) -> Result<AddOnCatalog, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
