use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::Read;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identifier wrapper for catalog add-ons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AddOnId(pub String);

impl fmt::Display for AddOnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceMode {
    /// Fixed amount regardless of job length.
    Flat,
    /// Amount multiplied by billable hours.
    Hourly,
}

/// Optional service line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOn {
    pub id: AddOnId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_mode: PriceMode,
    pub amount: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl AddOn {
    pub fn flat(id: &str, name: &str, amount: Decimal) -> Self {
        Self::new(id, name, PriceMode::Flat, amount)
    }

    pub fn hourly(id: &str, name: &str, amount: Decimal) -> Self {
        Self::new(id, name, PriceMode::Hourly, amount)
    }

    fn new(id: &str, name: &str, price_mode: PriceMode, amount: Decimal) -> Self {
        Self {
            id: AddOnId(id.to_string()),
            name: name.to_string(),
            description: String::new(),
            price_mode,
            amount,
            active: true,
        }
    }

    /// Cost of this add-on for a job of `hours` billable hours.
    pub fn cost_for(&self, hours: Decimal) -> Decimal {
        match self.price_mode {
            PriceMode::Flat => self.amount,
            PriceMode::Hourly => self.amount * hours,
        }
    }

    pub fn display_name(&self) -> String {
        let unit = match self.price_mode {
            PriceMode::Hourly => "/hr",
            PriceMode::Flat => "",
        };
        format!("{} (${}{unit})", self.name, self.amount)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read add-on catalog: {0}")]
    Csv(#[from] csv::Error),
    #[error("add-on '{id}' has a negative amount ({amount})")]
    NegativeAmount { id: AddOnId, amount: Decimal },
    #[error("add-on '{0}' is listed more than once")]
    DuplicateId(AddOnId),
}

/// Immutable lookup table of the add-ons customers may select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOnCatalog {
    entries: BTreeMap<AddOnId, AddOn>,
}

impl AddOnCatalog {
    pub fn new(add_ons: impl IntoIterator<Item = AddOn>) -> Result<Self, CatalogError> {
        let mut entries = BTreeMap::new();
        for add_on in add_ons {
            if add_on.amount < Decimal::ZERO {
                return Err(CatalogError::NegativeAmount {
                    id: add_on.id,
                    amount: add_on.amount,
                });
            }
            if entries.contains_key(&add_on.id) {
                return Err(CatalogError::DuplicateId(add_on.id));
            }
            entries.insert(add_on.id.clone(), add_on);
        }
        Ok(Self { entries })
    }

    /// Load a catalog export with the header `id,name,description,price_mode,amount,active`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut add_ons = Vec::new();
        for row in csv_reader.deserialize::<AddOn>() {
            add_ons.push(row?);
        }

        Self::new(add_ons)
    }

    pub fn get(&self, id: &AddOnId) -> Option<&AddOn> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AddOn> {
        self.entries.values()
    }

    /// Resolve requested identifiers into add-ons, in request order.
    ///
    /// Identifiers that miss the catalog or name an inactive add-on are dropped, and repeated
    /// identifiers are only counted once.
    pub fn select(&self, ids: &[AddOnId]) -> Vec<AddOn> {
        let mut seen = BTreeSet::new();
        let mut selected = Vec::with_capacity(ids.len());

        for id in ids {
            if !seen.insert(id) {
                continue;
            }
            match self.entries.get(id) {
                Some(add_on) if add_on.active => selected.push(add_on.clone()),
                Some(_) => debug!(add_on = %id, "dropping inactive add-on"),
                None => debug!(add_on = %id, "dropping unknown add-on"),
            }
        }

        selected
    }
}
