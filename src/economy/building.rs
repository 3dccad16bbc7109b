use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{BuildingKind, HOURS_PER_DAY};
use crate::errors::{EconomyError, Result};

/// One owned building. Its economics are locked to the growth multiplier that
/// was current when it was acquired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BuildingRecord")]
pub struct Building {
    #[serde(rename = "type")]
    pub kind: BuildingKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    pub acquisition_day: NaiveDate,
    pub growth_multiplier: f64,
}

/// Unchecked on-disk form; sizes are validated on the way in.
#[derive(Deserialize)]
struct BuildingRecord {
    #[serde(rename = "type")]
    kind: BuildingKind,
    #[serde(default)]
    size: Option<u32>,
    acquisition_day: NaiveDate,
    growth_multiplier: f64,
}

impl TryFrom<BuildingRecord> for Building {
    type Error = EconomyError;

    fn try_from(record: BuildingRecord) -> Result<Self> {
        Building::new(
            record.kind,
            record.size,
            record.acquisition_day,
            record.growth_multiplier,
        )
    }
}

impl Building {
    /// Builds a validated instance; `size` must be present exactly when the
    /// kind is sizeable and must satisfy the kind's sizing rule.
    pub fn new(
        kind: BuildingKind,
        size: Option<u32>,
        acquisition_day: NaiveDate,
        growth_multiplier: f64,
    ) -> Result<Self> {
        kind.validate_size(size)?;
        Ok(Self {
            kind,
            size,
            acquisition_day,
            growth_multiplier,
        })
    }

    fn units(&self) -> f64 {
        f64::from(self.size.unwrap_or(1))
    }

    /// Purchase (and resale) price, from the acquisition multiplier.
    pub fn cost(&self) -> f64 {
        self.cost_at(self.growth_multiplier)
    }

    /// Price of an equivalent building under another multiplier, used for quotes.
    pub fn cost_at(&self, multiplier: f64) -> f64 {
        self.kind.info().base_cost * self.units() * multiplier
    }

    /// Income paid per simulated day.
    pub fn income(&self) -> f64 {
        let info = self.kind.info();
        info.wage * self.employees() * HOURS_PER_DAY * self.growth_multiplier
    }

    pub fn employees(&self) -> f64 {
        self.kind.info().employees_per_unit * self.units()
    }

    pub fn population(&self) -> u64 {
        self.kind.residents_per_unit() * u64::from(self.size.unwrap_or(1))
    }

    /// Same kind and size, regardless of acquisition day or multiplier.
    pub fn is_equivalent_to(&self, other: &Building) -> bool {
        self.kind == other.kind && self.size == other.size
    }

    /// Display name, with the size for sized kinds.
    pub fn name(&self) -> String {
        match self.size {
            Some(size) => format!("{} ({})", self.kind.name(), size),
            None => self.kind.name().to_string(),
        }
    }
}
