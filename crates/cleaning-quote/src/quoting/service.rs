use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::addons::AddOn;
use super::domain::{Clock, EstimateId, EstimateStatus, EstimateSubmission, SystemClock};
use super::engine::{Quote, QuoteEngine, QuoteInput};
use super::intake::{IntakeGuard, InvalidEstimateInput};
use super::repository::{EstimateRecord, EstimateRepository, PricingStore, RepositoryError};
use super::settings::{resolve, ConfigurationSource};

/// A priced submission that has not been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuote {
    pub quote: Quote,
    pub add_ons: Vec<AddOn>,
    pub configuration_source: ConfigurationSource,
    pub notice: Option<&'static str>,
}

/// A stored estimate plus the notice to show the customer, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedEstimate {
    pub record: EstimateRecord,
    pub notice: Option<&'static str>,
}

/// Caller-side facade: validates, resolves pricing tables, runs the engine, and records history.
pub struct QuoteService<R, P> {
    guard: IntakeGuard,
    estimates: Arc<R>,
    pricing: Arc<P>,
    clock: Arc<dyn Clock>,
    sequence: AtomicU64,
}

impl<R, P> QuoteService<R, P>
where
    R: EstimateRepository + 'static,
    P: PricingStore + 'static,
{
    pub fn new(estimates: Arc<R>, pricing: Arc<P>) -> Self {
        Self::with_clock(estimates, pricing, Arc::new(SystemClock))
    }

    pub fn with_clock(estimates: Arc<R>, pricing: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            guard: IntakeGuard,
            estimates,
            pricing,
            clock,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_estimate_id(&self) -> EstimateId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        EstimateId(format!("est-{id:06}"))
    }

    /// Price a submission against the current pricing tables without storing it.
    pub fn preview(
        &self,
        submission: &EstimateSubmission,
    ) -> Result<PreparedQuote, QuoteServiceError> {
        self.guard.check(submission)?;

        let resolved = resolve(&self.pricing.configuration_history()?);
        if resolved.is_fallback() {
            warn!("no pricing configuration stored; quoting with the zero configuration");
        }

        let add_ons = self
            .pricing
            .add_on_catalog()?
            .select(&submission.add_on_ids);

        let engine = QuoteEngine::new(resolved.configuration);
        let quote = engine.quote(&QuoteInput {
            service_type: &submission.service_type,
            frequency: submission.frequency,
            cleanliness: submission.cleanliness_level,
            attributes: &submission.property,
            within_radius: submission.within_service_radius,
            add_ons: &add_ons,
        });

        Ok(PreparedQuote {
            quote,
            add_ons,
            configuration_source: resolved.source,
            notice: self.guard.service_area_notice(submission),
        })
    }

    /// Price a submission and store it as a quoted estimate.
    pub fn submit(
        &self,
        submission: EstimateSubmission,
    ) -> Result<SubmittedEstimate, QuoteServiceError> {
        let prepared = self.preview(&submission)?;

        let record = EstimateRecord {
            id: self.next_estimate_id(),
            created_at: self.clock.now(),
            submission,
            status: EstimateStatus::Quoted,
            quote: Some(prepared.quote.result),
            add_ons: prepared.add_ons,
            breakdown: Some(prepared.quote.breakdown),
        };

        let stored = self.estimates.insert(record)?;
        info!(
            estimate = %stored.id,
            service_type = %stored.submission.service_type,
            hours = %prepared.quote.result.computed_hours,
            price = %prepared.quote.result.quoted_price,
            "quote issued"
        );

        Ok(SubmittedEstimate {
            record: stored,
            notice: prepared.notice,
        })
    }

    pub fn get(&self, id: &EstimateId) -> Result<EstimateRecord, QuoteServiceError> {
        let record = self.estimates.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<EstimateRecord>, QuoteServiceError> {
        Ok(self.estimates.recent(limit)?)
    }

    /// Move an estimate along its lifecycle. Quote values are never touched.
    pub fn transition(
        &self,
        id: &EstimateId,
        next: EstimateStatus,
    ) -> Result<EstimateRecord, QuoteServiceError> {
        let mut record = self.get(id)?;

        if !record.status.can_transition_to(next) {
            return Err(QuoteServiceError::InvalidTransition {
                from: record.status,
                to: next,
            });
        }

        record.status = next;
        self.estimates.update(record.clone())?;
        info!(estimate = %record.id, status = next.label(), "estimate status changed");

        Ok(record)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuoteServiceError {
    #[error(transparent)]
    Invalid(#[from] InvalidEstimateInput),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("cannot move estimate from {} to {}", .from.label(), .to.label())]
    InvalidTransition {
        from: EstimateStatus,
        to: EstimateStatus,
    },
}
