use crate::infra::{parse_cleanliness, parse_frequency, parse_service_type, FilePricingStore};
use clap::Args;
use cleaning_quote::config::{AppConfig, PricingSourceConfig};
use cleaning_quote::error::AppError;
use cleaning_quote::quoting::settings::resolve;
use cleaning_quote::quoting::{
    AddOnId, CleanlinessLevel, ConfigurationSource, Frequency, PropertyAttributes, Quote,
    QuoteEngine, QuoteInput, ServiceType,
};
use serde_json::json;
use std::path::PathBuf;
use tracing::warn;

/// Overrides for the pricing export locations configured in the environment.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct PricingSourceArgs {
    /// Pricing configuration history (JSON object or array)
    #[arg(long)]
    pub(crate) pricing: Option<PathBuf>,
    /// Add-on catalog export (CSV)
    #[arg(long)]
    pub(crate) add_ons_csv: Option<PathBuf>,
}

impl PricingSourceArgs {
    pub(crate) fn merge(&self, config: &AppConfig) -> PricingSourceConfig {
        PricingSourceConfig {
            configuration_path: self
                .pricing
                .clone()
                .or_else(|| config.pricing.configuration_path.clone()),
            add_ons_path: self
                .add_ons_csv
                .clone()
                .or_else(|| config.pricing.add_ons_path.clone()),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// residential, commercial, construction, move, or church
    #[arg(long, value_parser = parse_service_type)]
    service_type: ServiceType,
    /// one_time, weekly, biweekly, or monthly
    #[arg(long, value_parser = parse_frequency, default_value = "one_time")]
    frequency: Frequency,
    /// basic or deep
    #[arg(long, value_parser = parse_cleanliness, default_value = "basic")]
    cleanliness: CleanlinessLevel,
    #[arg(long, default_value_t = 0)]
    bedrooms: u32,
    #[arg(long, default_value_t = 0)]
    bathrooms: u32,
    /// Approximate square footage
    #[arg(long, default_value_t = 0)]
    sq_ft: u32,
    #[arg(long, default_value_t = 1)]
    levels: u32,
    #[arg(long)]
    furnished: bool,
    #[arg(long)]
    pets: bool,
    /// The job lies outside the service radius
    #[arg(long)]
    outside_radius: bool,
    /// Add-on identifier from the catalog (repeatable)
    #[arg(long = "add-on")]
    add_ons: Vec<String>,
    /// Print the itemized quote as JSON
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    sources: PricingSourceArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ConfigArgs {
    #[command(flatten)]
    sources: PricingSourceArgs,
}

pub(crate) fn run_quote(config: &AppConfig, args: QuoteArgs) -> Result<(), AppError> {
    let store = FilePricingStore::load(&args.sources.merge(config))?;
    let resolved = resolve(store.history());
    if resolved.is_fallback() {
        warn!("no pricing configuration found; every knob is zero");
    }

    let requested: Vec<AddOnId> = args.add_ons.iter().cloned().map(AddOnId).collect();
    let add_ons = store.catalog().select(&requested);
    let attributes = PropertyAttributes {
        bedrooms: args.bedrooms,
        bathrooms: args.bathrooms,
        approx_sq_ft: args.sq_ft,
        levels: args.levels,
        furnished: args.furnished,
        pets: args.pets,
    };

    let engine = QuoteEngine::new(resolved.configuration);
    let quote = engine.quote(&QuoteInput {
        service_type: &args.service_type,
        frequency: args.frequency,
        cleanliness: args.cleanliness,
        attributes: &attributes,
        within_radius: !args.outside_radius,
        add_ons: &add_ons,
    });

    if args.json {
        let payload = json!({
            "service_type": args.service_type,
            "frequency": args.frequency,
            "cleanliness_level": args.cleanliness,
            "configuration": resolved.source,
            "add_ons": add_ons,
            "quote": quote,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        render_quote(&args.service_type, args.frequency, &quote, &resolved.source);
        for add_on in &add_ons {
            println!("  + {}", add_on.display_name());
        }
    }

    Ok(())
}

pub(crate) fn render_quote(
    service_type: &ServiceType,
    frequency: Frequency,
    quote: &Quote,
    source: &ConfigurationSource,
) {
    let rate = &quote.breakdown.hourly_rate;
    println!("{} / {}", service_type.label(), frequency.label());
    match source {
        ConfigurationSource::Stored { created_at } => {
            println!("  Pricing configuration from {}", created_at.format("%Y-%m-%d %H:%M UTC"))
        }
        ConfigurationSource::Fallback => println!("  Pricing configuration: none stored (zero)"),
    }
    println!("  Estimated hours: {}", quote.result.computed_hours);
    if rate.floor_applied {
        println!(
            "  Hourly rate: ${} ({}% discount held at the recurring floor)",
            rate.rate.round_dp(2),
            rate.discount_pct
        );
    } else {
        println!("  Hourly rate: ${}", rate.rate.round_dp(2));
    }
    println!("  Labor: ${}", quote.breakdown.labor.round_dp(2));
    println!("  Add-ons: ${}", quote.breakdown.add_ons.round_dp(2));
    if !quote.breakdown.radius_surcharge.is_zero() {
        println!("  Outside radius fee: ${}", quote.breakdown.radius_surcharge);
    }
    println!("  Quoted price: ${}", quote.result.quoted_price);
}

pub(crate) fn run_show_config(config: &AppConfig, args: ConfigArgs) -> Result<(), AppError> {
    let store = FilePricingStore::load(&args.sources.merge(config))?;
    let resolved = resolve(store.history());

    let payload = json!({
        "source": resolved.source,
        "configuration": resolved.configuration,
        "add_ons": store.catalog().iter().collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

pub(crate) fn run_check_config(config: &AppConfig, args: ConfigArgs) -> Result<(), AppError> {
    let store = FilePricingStore::load(&args.sources.merge(config))?;

    let mut violations = Vec::new();
    for record in store.history() {
        if let Err(found) = record.configuration.validate() {
            warn!(created_at = %record.created_at, count = found.len(), "invalid configuration row");
            violations.extend(found);
        }
    }

    if violations.is_empty() {
        println!(
            "{} configuration row(s) and {} add-on(s) passed validation",
            store.history().len(),
            store.catalog().len()
        );
        Ok(())
    } else {
        Err(AppError::InvalidConfiguration(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleaning_quote::config::{AppEnvironment, TelemetryConfig};

    fn app_config() -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            pricing: PricingSourceConfig {
                configuration_path: Some(PathBuf::from("/srv/pricing/history.json")),
                add_ons_path: None,
            },
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
        }
    }

    #[test]
    fn command_line_paths_override_environment() {
        let args = PricingSourceArgs {
            pricing: None,
            add_ons_csv: Some(PathBuf::from("add_ons.csv")),
        };

        let merged = args.merge(&app_config());

        assert_eq!(
            merged.configuration_path,
            Some(PathBuf::from("/srv/pricing/history.json"))
        );
        assert_eq!(merged.add_ons_path, Some(PathBuf::from("add_ons.csv")));
    }
}
