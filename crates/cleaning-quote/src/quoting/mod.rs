//! Quote calculation for cleaning jobs.
//!
//! The [`engine`] is a set of pure functions over a [`PricingConfiguration`] snapshot. The
//! surrounding modules are the seams a caller needs around it: typed submissions, add-on
//! catalogs, configuration resolution, intake checks, and a persistence facade.

pub mod addons;
pub mod domain;
pub mod engine;
pub mod intake;
pub mod repository;
pub mod service;
pub mod settings;

#[cfg(test)]
mod tests;

pub use addons::{AddOn, AddOnCatalog, AddOnId, CatalogError, PriceMode};
pub use domain::{
    CleanlinessLevel, Clock, CustomerDetails, EstimateId, EstimateStatus, EstimateSubmission,
    Frequency, PropertyAttributes, QuoteResult, ServiceType, SystemClock,
};
pub use engine::{
    calculate_price, estimate_hours, HourlyRate, PriceBreakdown, Quote, QuoteEngine, QuoteInput,
};
pub use intake::{IntakeGuard, InvalidEstimateInput, OUTSIDE_SERVICE_AREA_NOTICE};
pub use repository::{
    EstimateRecord, EstimateRepository, EstimateStatusView, PricingStore, RepositoryError,
};
pub use service::{PreparedQuote, QuoteService, QuoteServiceError, SubmittedEstimate};
pub use settings::{
    resolve_active_configuration, ConfigurationRecord, ConfigurationSource,
    ConfigurationViolation, PricingConfiguration, PropertyMultipliers, ResolvedConfiguration,
};
