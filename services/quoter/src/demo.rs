use crate::infra::{FilePricingStore, InMemoryEstimateRepository};
use crate::quote::{render_quote, PricingSourceArgs};
use clap::Args;
use cleaning_quote::config::AppConfig;
use cleaning_quote::error::AppError;
use cleaning_quote::quoting::{
    AddOnId, CleanlinessLevel, CustomerDetails, EstimateStatus, EstimateSubmission, Frequency,
    PropertyAttributes, QuoteService, ServiceType,
};
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of stored estimates to list at the end of the run.
    #[arg(long, default_value_t = 10)]
    pub(crate) recent: usize,
    /// Leave every estimate in the Quoted state.
    #[arg(long)]
    pub(crate) skip_scheduling: bool,
    /// Print the stored estimate summaries as JSON.
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) sources: PricingSourceArgs,
}

pub(crate) fn run_demo(config: &AppConfig, args: DemoArgs) -> Result<(), AppError> {
    let mut store = FilePricingStore::load(&args.sources.merge(config))?;
    if store.is_empty() {
        info!("no pricing exports configured; using bundled sample tables");
        store = FilePricingStore::sample();
    }

    let service = QuoteService::new(
        Arc::new(InMemoryEstimateRepository::default()),
        Arc::new(store),
    );

    let mut issued = Vec::new();
    for submission in demo_submissions() {
        let preview = service.preview(&submission)?;
        let submitted = service.submit(submission)?;
        let record = &submitted.record;

        if !args.json {
            println!("== {} for {}", record.id, record.submission.customer.name);
            render_quote(
                &record.submission.service_type,
                record.submission.frequency,
                &preview.quote,
                &preview.configuration_source,
            );
            for add_on in &record.add_ons {
                println!("  + {}", add_on.display_name());
            }
            if let Some(notice) = submitted.notice {
                println!("  Note: {notice}");
            }
            println!();
        }

        issued.push(submitted.record.id);
    }

    if !args.skip_scheduling {
        if let Some(first) = issued.first() {
            service.transition(first, EstimateStatus::Scheduled)?;
            service.transition(first, EstimateStatus::Completed)?;
        }
        if let Some(last) = issued.last() {
            service.transition(last, EstimateStatus::Canceled)?;
        }
    }

    let views: Vec<_> = service
        .recent(args.recent)?
        .iter()
        .map(|record| record.status_view())
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        println!("Recent estimates");
        for view in &views {
            let price = view
                .quoted_price
                .map(|price| format!("${price}"))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {} | {} | {} / {} | {} | {}",
                view.estimate_id, view.customer, view.service_type, view.frequency, price, view.status
            );
        }
    }

    Ok(())
}

pub(crate) fn demo_submissions() -> Vec<EstimateSubmission> {
    vec![
        EstimateSubmission {
            customer: CustomerDetails {
                name: "Avery Collins".to_string(),
                email: "avery.collins@example.com".to_string(),
                phone: Some("205-555-0142".to_string()),
                address: "412 Birch Hollow Rd".to_string(),
                zip_code: "35055".to_string(),
            },
            service_type: ServiceType::Residential,
            frequency: Frequency::Weekly,
            cleanliness_level: CleanlinessLevel::Basic,
            property: PropertyAttributes {
                bedrooms: 2,
                bathrooms: 2,
                approx_sq_ft: 1500,
                levels: 1,
                furnished: true,
                pets: false,
            },
            within_service_radius: true,
            add_on_ids: vec![AddOnId("fridge".to_string())],
            notes: "Side door is unlocked on cleaning days".to_string(),
        },
        EstimateSubmission {
            customer: CustomerDetails {
                name: "Grace Fellowship".to_string(),
                email: "office@gracefellowship.example.org".to_string(),
                phone: None,
                address: "9 Church St".to_string(),
                zip_code: "35077-1203".to_string(),
            },
            service_type: ServiceType::Church,
            frequency: Frequency::Biweekly,
            cleanliness_level: CleanlinessLevel::Basic,
            property: PropertyAttributes {
                bedrooms: 0,
                bathrooms: 4,
                approx_sq_ft: 6200,
                levels: 2,
                furnished: true,
                pets: false,
            },
            within_service_radius: false,
            add_on_ids: vec![AddOnId("windows".to_string())],
            notes: String::new(),
        },
        EstimateSubmission {
            customer: CustomerDetails {
                name: "Jordan Pike".to_string(),
                email: "jpike@example.net".to_string(),
                phone: None,
                address: "1810 3rd Ave SW, Unit 4".to_string(),
                zip_code: "35055".to_string(),
            },
            service_type: ServiceType::Move,
            frequency: Frequency::OneTime,
            cleanliness_level: CleanlinessLevel::Deep,
            property: PropertyAttributes {
                bedrooms: 3,
                bathrooms: 2,
                approx_sq_ft: 1800,
                levels: 2,
                furnished: false,
                pets: true,
            },
            within_service_radius: true,
            add_on_ids: vec![AddOnId("oven".to_string()), AddOnId("fridge".to_string())],
            notes: "Keys in lockbox".to_string(),
        },
    ]
}
