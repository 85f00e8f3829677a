use chrono::{TimeZone, Utc};
use cleaning_quote::config::PricingSourceConfig;
use cleaning_quote::error::AppError;
use cleaning_quote::quoting::settings::history_from_json_reader;
use cleaning_quote::quoting::{
    AddOn, AddOnCatalog, CleanlinessLevel, ConfigurationRecord, EstimateId, EstimateRecord,
    EstimateRepository, Frequency, PricingConfiguration, PricingStore, PropertyMultipliers,
    RepositoryError, ServiceType,
};
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Default, Clone)]
pub(crate) struct InMemoryEstimateRepository {
    records: Arc<Mutex<HashMap<EstimateId, EstimateRecord>>>,
}

impl EstimateRepository for InMemoryEstimateRepository {
    fn insert(&self, record: EstimateRecord) -> Result<EstimateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: EstimateRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &EstimateId) -> Result<Option<EstimateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<EstimateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        records.truncate(limit);
        Ok(records)
    }
}

/// Pricing tables read once from the administrator exports.
#[derive(Debug, Clone, Default)]
pub(crate) struct FilePricingStore {
    history: Vec<ConfigurationRecord>,
    catalog: AddOnCatalog,
}

impl FilePricingStore {
    pub(crate) fn load(sources: &PricingSourceConfig) -> Result<Self, AppError> {
        let history = match &sources.configuration_path {
            Some(path) => load_history(path)?,
            None => Vec::new(),
        };
        let catalog = match &sources.add_ons_path {
            Some(path) => load_catalog(path)?,
            None => AddOnCatalog::default(),
        };

        info!(
            configurations = history.len(),
            add_ons = catalog.len(),
            "pricing tables loaded"
        );

        Ok(Self { history, catalog })
    }

    /// Bundled tables used by the demo when no exports are configured.
    pub(crate) fn sample() -> Self {
        Self {
            history: vec![ConfigurationRecord {
                created_at: Utc
                    .with_ymd_and_hms(2025, 1, 6, 8, 0, 0)
                    .single()
                    .unwrap_or_else(Utc::now),
                configuration: sample_pricing_configuration(),
            }],
            catalog: sample_catalog(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.history.is_empty() && self.catalog.is_empty()
    }

    pub(crate) fn history(&self) -> &[ConfigurationRecord] {
        &self.history
    }

    pub(crate) fn catalog(&self) -> &AddOnCatalog {
        &self.catalog
    }
}

impl PricingStore for FilePricingStore {
    fn configuration_history(&self) -> Result<Vec<ConfigurationRecord>, RepositoryError> {
        Ok(self.history.clone())
    }

    fn add_on_catalog(&self) -> Result<AddOnCatalog, RepositoryError> {
        Ok(self.catalog.clone())
    }
}

fn load_history(path: &Path) -> Result<Vec<ConfigurationRecord>, AppError> {
    let file = File::open(path)?;
    Ok(history_from_json_reader(BufReader::new(file))?)
}

fn load_catalog(path: &Path) -> Result<AddOnCatalog, AppError> {
    let file = File::open(path)?;
    Ok(AddOnCatalog::from_csv_reader(BufReader::new(file))?)
}

pub(crate) fn sample_pricing_configuration() -> PricingConfiguration {
    PricingConfiguration {
        residential_recurring_rate: dec!(125.00),
        residential_one_time_rate: dec!(150.00),
        commercial_rate: dec!(95.00),
        weekly_discount_pct: dec!(15),
        biweekly_discount_pct: dec!(10),
        monthly_discount_pct: dec!(5),
        base_hours: dec!(2.00),
        hours_per_bedroom: dec!(0.50),
        hours_per_bathroom: dec!(0.50),
        hours_per_500_sq_ft: dec!(0.25),
        hours_per_level: dec!(0.25),
        pets_extra_hours: dec!(0.25),
        furnished_extra_hours: dec!(0.25),
        cleanliness_multiplier_basic: dec!(1.00),
        cleanliness_multiplier_deep: dec!(1.50),
        property_multipliers: PropertyMultipliers {
            residential: dec!(1.00),
            commercial: dec!(1.20),
            construction: dec!(1.60),
            move_in_out: dec!(1.40),
            church: dec!(1.30),
        },
        service_radius_miles: 30,
        base_zip: "35055".to_string(),
        outside_radius_fee: Some(dec!(25.00)),
    }
}

pub(crate) fn sample_catalog() -> AddOnCatalog {
    let add_ons = [
        AddOn::flat("fridge", "Inside fridge", dec!(30.00)),
        AddOn::flat("oven", "Inside oven", dec!(35.00)),
        AddOn::hourly("windows", "Interior windows", dec!(10.00)),
        AddOn::flat("laundry", "Laundry (one load)", dec!(20.00)),
    ];
    AddOnCatalog::new(add_ons).unwrap_or_default()
}

pub(crate) fn parse_service_type(raw: &str) -> Result<ServiceType, String> {
    match ServiceType::parse(raw) {
        ServiceType::Unrecognized(value) => Err(format!(
            "unknown service type '{value}' (expected residential, commercial, construction, move, or church)"
        )),
        service => Ok(service),
    }
}

pub(crate) fn parse_frequency(raw: &str) -> Result<Frequency, String> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "one_time" | "once" => Ok(Frequency::OneTime),
        "weekly" => Ok(Frequency::Weekly),
        "biweekly" => Ok(Frequency::Biweekly),
        "monthly" => Ok(Frequency::Monthly),
        other => Err(format!(
            "unknown frequency '{other}' (expected one_time, weekly, biweekly, or monthly)"
        )),
    }
}

pub(crate) fn parse_cleanliness(raw: &str) -> Result<CleanlinessLevel, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "basic" => Ok(CleanlinessLevel::Basic),
        "deep" => Ok(CleanlinessLevel::Deep),
        other => Err(format!("unknown cleanliness level '{other}' (expected basic or deep)")),
    }
}
