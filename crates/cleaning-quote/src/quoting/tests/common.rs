use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;

use crate::quoting::addons::{AddOn, AddOnCatalog};
use crate::quoting::domain::{
    CleanlinessLevel, Clock, CustomerDetails, EstimateId, EstimateSubmission, Frequency,
    PropertyAttributes, ServiceType,
};
use crate::quoting::repository::{
    EstimateRecord, EstimateRepository, PricingStore, RepositoryError,
};
use crate::quoting::service::QuoteService;
use crate::quoting::settings::{ConfigurationRecord, PricingConfiguration, PropertyMultipliers};

pub(super) fn timestamp(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Knobs from the worked weekly residential example.
pub(super) fn pricing_configuration() -> PricingConfiguration {
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

pub(super) fn attributes() -> PropertyAttributes {
    PropertyAttributes {
        bedrooms: 2,
        bathrooms: 2,
        approx_sq_ft: 1500,
        levels: 1,
        furnished: true,
        pets: false,
    }
}

pub(super) fn submission() -> EstimateSubmission {
    EstimateSubmission {
        customer: CustomerDetails {
            name: "Dana Whitfield".to_string(),
            email: "dana@example.com".to_string(),
            phone: Some("256-555-0142".to_string()),
            address: "412 Cedar Ridge Rd, Cullman, AL".to_string(),
            zip_code: "35055".to_string(),
        },
        service_type: ServiceType::Residential,
        frequency: Frequency::Weekly,
        cleanliness_level: CleanlinessLevel::Basic,
        property: attributes(),
        within_service_radius: true,
        add_on_ids: Vec::new(),
        notes: String::new(),
    }
}

pub(super) fn catalog() -> AddOnCatalog {
    AddOnCatalog::new([
        AddOn::flat("fridge", "Inside fridge", dec!(30.00)),
        AddOn::hourly("windows", "Interior windows", dec!(10.00)),
    ])
    .expect("catalog builds")
}

#[derive(Default)]
pub(super) struct MemoryEstimates {
    records: Mutex<BTreeMap<EstimateId, EstimateRecord>>,
}

impl MemoryEstimates {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("estimate mutex poisoned").len()
    }
}

impl EstimateRepository for MemoryEstimates {
    fn insert(&self, record: EstimateRecord) -> Result<EstimateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("estimate mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: EstimateRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("estimate mutex poisoned");
        match guard.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &EstimateId) -> Result<Option<EstimateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("estimate mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<EstimateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("estimate mutex poisoned");
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        records.truncate(limit);
        Ok(records)
    }
}

pub(super) struct StaticPricing {
    pub(super) history: Vec<ConfigurationRecord>,
    pub(super) catalog: AddOnCatalog,
}

impl StaticPricing {
    pub(super) fn standard() -> Self {
        Self {
            history: vec![ConfigurationRecord {
                created_at: timestamp(3, 1),
                configuration: pricing_configuration(),
            }],
            catalog: catalog(),
        }
    }

    pub(super) fn empty() -> Self {
        Self {
            history: Vec::new(),
            catalog: AddOnCatalog::default(),
        }
    }
}

impl PricingStore for StaticPricing {
    fn configuration_history(&self) -> Result<Vec<ConfigurationRecord>, RepositoryError> {
        Ok(self.history.clone())
    }

    fn add_on_catalog(&self) -> Result<AddOnCatalog, RepositoryError> {
        Ok(self.catalog.clone())
    }
}

pub(super) struct UnavailablePricing;

impl PricingStore for UnavailablePricing {
    fn configuration_history(&self) -> Result<Vec<ConfigurationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("pricing tables offline".to_string()))
    }

    fn add_on_catalog(&self) -> Result<AddOnCatalog, RepositoryError> {
        Err(RepositoryError::Unavailable("pricing tables offline".to_string()))
    }
}

pub(super) struct FixedClock(pub(super) DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(super) fn build_service(
    pricing: StaticPricing,
) -> (
    QuoteService<MemoryEstimates, StaticPricing>,
    Arc<MemoryEstimates>,
) {
    let estimates = Arc::new(MemoryEstimates::default());
    let service = QuoteService::with_clock(
        estimates.clone(),
        Arc::new(pricing),
        Arc::new(FixedClock(timestamp(6, 2))),
    );
    (service, estimates)
}
