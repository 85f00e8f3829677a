use super::common::*;
use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::quoting::addons::AddOnId;
use crate::quoting::domain::{EstimateId, EstimateStatus, ServiceType};
use crate::quoting::intake::{InvalidEstimateInput, OUTSIDE_SERVICE_AREA_NOTICE};
use crate::quoting::repository::RepositoryError;
use crate::quoting::service::{QuoteService, QuoteServiceError};
use crate::quoting::settings::{ConfigurationRecord, ConfigurationSource};

#[test]
fn submit_prices_and_stores_a_quoted_estimate() {
    let (service, estimates) = build_service(StaticPricing::standard());

    let submitted = service.submit(submission()).expect("submission succeeds");

    let record = submitted.record;
    assert_eq!(record.id, EstimateId("est-000001".to_string()));
    assert_eq!(record.status, EstimateStatus::Quoted);
    assert_eq!(record.created_at, timestamp(6, 2));
    let quote = record.quote.expect("quote stored");
    assert_eq!(quote.computed_hours, dec!(5.25));
    assert_eq!(quote.quoted_price, dec!(656.25));
    assert!(submitted.notice.is_none());
    assert_eq!(estimates.len(), 1);
}

#[test]
fn submit_resolves_add_ons_and_drops_unknown_ids() {
    let (service, _) = build_service(StaticPricing::standard());
    let mut submission = submission();
    submission.add_on_ids = vec![
        AddOnId("windows".to_string()),
        AddOnId("garage".to_string()),
        AddOnId("windows".to_string()),
    ];

    let record = service.submit(submission).expect("submission succeeds").record;

    assert_eq!(record.add_ons.len(), 1);
    assert_eq!(record.add_ons[0].name, "Interior windows");
    let quote = record.quote.expect("quote stored");
    assert_eq!(quote.quoted_price, dec!(708.75));
    assert_eq!(
        record.status_view().add_ons,
        vec!["Interior windows".to_string()]
    );
}

#[test]
fn outside_radius_submission_returns_notice_and_surcharge() {
    let (service, _) = build_service(StaticPricing::standard());
    let mut submission = submission();
    submission.within_service_radius = false;

    let submitted = service.submit(submission).expect("submission succeeds");

    assert_eq!(submitted.notice, Some(OUTSIDE_SERVICE_AREA_NOTICE));
    let quote = submitted.record.quote.expect("quote stored");
    assert_eq!(quote.quoted_price, dec!(681.25));
}

#[test]
fn newest_configuration_row_prices_the_quote() {
    let mut pricing = StaticPricing::standard();
    let mut newer = pricing_configuration();
    newer.residential_recurring_rate = dec!(130.00);
    pricing.history.push(ConfigurationRecord {
        created_at: timestamp(5, 1),
        configuration: newer,
    });
    let (service, _) = build_service(pricing);

    let prepared = service.preview(&submission()).expect("preview succeeds");

    assert_eq!(
        prepared.configuration_source,
        ConfigurationSource::Stored {
            created_at: timestamp(5, 1)
        }
    );
    assert_eq!(prepared.quote.result.quoted_price, dec!(682.50));
}

#[test]
fn empty_pricing_store_quotes_with_zero_configuration() {
    let (service, _) = build_service(StaticPricing::empty());

    let prepared = service.preview(&submission()).expect("preview succeeds");

    assert_eq!(prepared.configuration_source, ConfigurationSource::Fallback);
    assert_eq!(prepared.quote.result.computed_hours, Decimal::ZERO);
    assert_eq!(prepared.quote.result.quoted_price, Decimal::ZERO);
}

#[test]
fn preview_does_not_persist() {
    let (service, estimates) = build_service(StaticPricing::standard());

    service.preview(&submission()).expect("preview succeeds");

    assert_eq!(estimates.len(), 0);
}

#[test]
fn submit_rejects_unknown_service_types() {
    let (service, estimates) = build_service(StaticPricing::standard());
    let mut submission = submission();
    submission.service_type = ServiceType::Unrecognized("carpet".to_string());

    let err = service.submit(submission).expect_err("unknown service rejected");

    match err {
        QuoteServiceError::Invalid(InvalidEstimateInput::UnknownServiceType(raw)) => {
            assert_eq!(raw, "carpet");
        }
        other => panic!("expected unknown service type, got {other:?}"),
    }
    assert_eq!(estimates.len(), 0);
}

#[test]
fn submit_rejects_malformed_contact_details() {
    let (service, _) = build_service(StaticPricing::standard());

    let mut bad_zip = submission();
    bad_zip.customer.zip_code = "3505".to_string();
    assert!(matches!(
        service.submit(bad_zip),
        Err(QuoteServiceError::Invalid(InvalidEstimateInput::InvalidZipCode(_)))
    ));

    let mut missing_name = submission();
    missing_name.customer.name = "  ".to_string();
    assert!(matches!(
        service.submit(missing_name),
        Err(QuoteServiceError::Invalid(InvalidEstimateInput::MissingField("name")))
    ));

    let mut bad_email = submission();
    bad_email.customer.email = "dana.example.com".to_string();
    assert!(matches!(
        service.submit(bad_email),
        Err(QuoteServiceError::Invalid(InvalidEstimateInput::InvalidEmail(_)))
    ));
}

#[test]
fn unavailable_pricing_store_surfaces_repository_error() {
    let service = QuoteService::new(
        Arc::new(MemoryEstimates::default()),
        Arc::new(UnavailablePricing),
    );

    let err = service.preview(&submission()).expect_err("store offline");

    assert!(matches!(
        err,
        QuoteServiceError::Repository(RepositoryError::Unavailable(_))
    ));
}

#[test]
fn lifecycle_transitions_keep_the_quote() {
    let (service, _) = build_service(StaticPricing::standard());
    let record = service.submit(submission()).expect("submission succeeds").record;

    let scheduled = service
        .transition(&record.id, EstimateStatus::Scheduled)
        .expect("quoted estimate can be scheduled");
    let completed = service
        .transition(&record.id, EstimateStatus::Completed)
        .expect("scheduled estimate can be completed");

    assert_eq!(scheduled.status, EstimateStatus::Scheduled);
    assert_eq!(completed.quote, record.quote);
    assert_eq!(
        service.get(&record.id).expect("record exists").status,
        EstimateStatus::Completed
    );

    let err = service
        .transition(&record.id, EstimateStatus::Canceled)
        .expect_err("completed estimates are final");
    assert!(matches!(
        err,
        QuoteServiceError::InvalidTransition {
            from: EstimateStatus::Completed,
            to: EstimateStatus::Canceled
        }
    ));
}

#[test]
fn get_reports_missing_estimates() {
    let (service, _) = build_service(StaticPricing::standard());

    let err = service
        .get(&EstimateId("est-999999".to_string()))
        .expect_err("nothing stored");

    assert!(matches!(
        err,
        QuoteServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn recent_lists_newest_first() {
    let (service, _) = build_service(StaticPricing::standard());
    let first = service.submit(submission()).expect("first").record;
    let second = service.submit(submission()).expect("second").record;

    let recent = service.recent(10).expect("recent loads");

    let ids: Vec<_> = recent.iter().map(|record| record.id.clone()).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}
