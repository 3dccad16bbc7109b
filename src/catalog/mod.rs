//! Static reference data for every building type the economy knows about.
//!
//! The catalog is a closed set: adding a kind means adding a variant to
//! [`BuildingKind`], and the exhaustive matches below refuse to compile until
//! its parameters, sizing rule and category are filled in.

use std::{fmt, str::FromStr};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strsim::levenshtein;

use crate::errors::{EconomyError, Result};

/// Working hours paid per simulated day.
pub const HOURS_PER_DAY: f64 = 8.0;

/// Sizes a house may be built with, in residents.
pub const HOUSE_SIZES: [u32; 4] = [1, 2, 4, 6];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    RailwayStation,
    MarketStall,
    PoliceStation,
    PostOffice,
    SmallStore,
    Hospital,
    FireStation,
    SuperStore,
    Pier,
    Dock,
    Quarry,
    SmallFactory,
    LargeFactory,
    Farming,
    NavalDockyard,
    Mills,
    Airbase,
    SupplyHub,
    Reactor,
    ElectricalGeneration,
    Airport,
    House,
}

/// Economic parameters of one catalog entry. For sized kinds every value is
/// per size unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingInfo {
    pub wage: f64,
    pub employees_per_unit: f64,
    pub base_cost: f64,
    pub name: &'static str,
    pub sizeable: bool,
}

/// Grouping used for the per-industry income breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuildingCategory {
    Transport,
    Retail,
    PublicService,
    Industry,
    Agriculture,
    Energy,
    Housing,
}

impl BuildingCategory {
    pub fn label(self) -> &'static str {
        match self {
            BuildingCategory::Transport => "Transport",
            BuildingCategory::Retail => "Retail",
            BuildingCategory::PublicService => "Public service",
            BuildingCategory::Industry => "Industry",
            BuildingCategory::Agriculture => "Agriculture",
            BuildingCategory::Energy => "Energy",
            BuildingCategory::Housing => "Housing",
        }
    }
}

impl fmt::Display for BuildingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const fn entry(wage: f64, employees_per_unit: f64, base_cost: f64, name: &'static str) -> BuildingInfo {
    BuildingInfo {
        wage,
        employees_per_unit,
        base_cost,
        name,
        sizeable: false,
    }
}

const fn sized(wage: f64, employees_per_unit: f64, base_cost: f64, name: &'static str) -> BuildingInfo {
    BuildingInfo {
        wage,
        employees_per_unit,
        base_cost,
        name,
        sizeable: true,
    }
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 22] = [
        BuildingKind::RailwayStation,
        BuildingKind::MarketStall,
        BuildingKind::PoliceStation,
        BuildingKind::PostOffice,
        BuildingKind::SmallStore,
        BuildingKind::Hospital,
        BuildingKind::FireStation,
        BuildingKind::SuperStore,
        BuildingKind::Pier,
        BuildingKind::Dock,
        BuildingKind::Quarry,
        BuildingKind::SmallFactory,
        BuildingKind::LargeFactory,
        BuildingKind::Farming,
        BuildingKind::NavalDockyard,
        BuildingKind::Mills,
        BuildingKind::Airbase,
        BuildingKind::SupplyHub,
        BuildingKind::Reactor,
        BuildingKind::ElectricalGeneration,
        BuildingKind::Airport,
        BuildingKind::House,
    ];

    pub fn info(self) -> BuildingInfo {
        match self {
            BuildingKind::RailwayStation => entry(13.5, 2.0, 4968.00, "Railway Station"),
            BuildingKind::MarketStall => entry(11.0, 1.0, 2024.00, "Market Stall"),
            BuildingKind::PoliceStation => entry(19.6, 3.0, 10819.20, "Police Station"),
            BuildingKind::PostOffice => entry(12.5, 2.0, 4600.00, "Post Office"),
            BuildingKind::SmallStore => entry(11.5, 2.0, 4232.00, "Small Store/Fuel Station"),
            BuildingKind::Hospital => entry(26.0, 3.0, 14352.00, "Hospital"),
            BuildingKind::FireStation => entry(19.0, 2.0, 6992.00, "Fire Station"),
            BuildingKind::SuperStore => entry(12.2, 4.0, 8979.20, "Super Store"),
            BuildingKind::Pier => entry(14.0, 1.0, 2576.00, "Pier"),
            BuildingKind::Dock => entry(15.8, 2.0, 5814.40, "Dock per 10 blocks"),
            BuildingKind::Quarry => entry(11.2, 2.0, 4121.60, "Quarry per chunk"),
            BuildingKind::SmallFactory => entry(14.5, 6.0, 16008.00, "Small Factory"),
            BuildingKind::LargeFactory => entry(15.5, 12.0, 34224.00, "Large Factory"),
            BuildingKind::Farming => entry(18.5, 1.0 / 162.0, 21.01, "Farming per block"),
            BuildingKind::NavalDockyard => entry(15.5, 1.0, 2852.00, "Naval Dockyard per 7 blocks"),
            BuildingKind::Mills => entry(12.0, 0.0, 36500.00, "Mills"),
            BuildingKind::Airbase => entry(17.5, 4.0, 12880.00, "Airbase"),
            BuildingKind::SupplyHub => entry(10.5, 1.0, 1932.00, "Supply Hub"),
            BuildingKind::Reactor => entry(20.5, 3.0, 11316.00, "Nuclear/Biogas Reactor"),
            BuildingKind::ElectricalGeneration => {
                entry(12.5, 2.0, 4600.00, "Electrical Generation/Storage")
            }
            BuildingKind::Airport => sized(18.0, 1.0 / 48.0, 69.00, "Airport"),
            BuildingKind::House => sized(0.0, 0.0, 1150.00, "House"),
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn is_sizeable(self) -> bool {
        self.info().sizeable
    }

    pub fn category(self) -> BuildingCategory {
        match self {
            BuildingKind::RailwayStation
            | BuildingKind::Pier
            | BuildingKind::Dock
            | BuildingKind::NavalDockyard
            | BuildingKind::Airbase
            | BuildingKind::SupplyHub
            | BuildingKind::Airport => BuildingCategory::Transport,
            BuildingKind::MarketStall | BuildingKind::SmallStore | BuildingKind::SuperStore => {
                BuildingCategory::Retail
            }
            BuildingKind::PoliceStation
            | BuildingKind::PostOffice
            | BuildingKind::Hospital
            | BuildingKind::FireStation => BuildingCategory::PublicService,
            BuildingKind::Quarry
            | BuildingKind::SmallFactory
            | BuildingKind::LargeFactory
            | BuildingKind::Mills => BuildingCategory::Industry,
            BuildingKind::Farming => BuildingCategory::Agriculture,
            BuildingKind::Reactor | BuildingKind::ElectricalGeneration => BuildingCategory::Energy,
            BuildingKind::House => BuildingCategory::Housing,
        }
    }

    /// Residents housed per size unit.
    pub fn residents_per_unit(self) -> u64 {
        match self {
            BuildingKind::House => 1,
            _ => 0,
        }
    }

    /// Checks `size` against the kind's sizing rule and returns the multiplier
    /// applied to per-unit values.
    pub fn validate_size(self, size: Option<u32>) -> Result<u32> {
        let valid = match (self, size) {
            (BuildingKind::House, Some(value)) => HOUSE_SIZES.contains(&value),
            (BuildingKind::Airport, Some(value)) => value >= 1,
            (kind, None) => !kind.is_sizeable(),
            (_, Some(_)) => false,
        };
        if !valid {
            return Err(EconomyError::InvalidSize { kind: self, size });
        }
        Ok(size.unwrap_or(1))
    }

    /// Stable identifier accepted by [`FromStr`] and shown by the CLI.
    pub fn slug(self) -> String {
        let mut slug = String::new();
        for (idx, ch) in format!("{self:?}").chars().enumerate() {
            if ch.is_ascii_uppercase() && idx > 0 {
                slug.push('_');
            }
            slug.push(ch.to_ascii_lowercase());
        }
        slug
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuildingKind {
    type Err = EconomyError;

    fn from_str(input: &str) -> Result<Self> {
        let needle = input.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        if let Some(kind) = BuildingKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.slug() == needle)
        {
            return Ok(kind);
        }
        let suggestion = BuildingKind::ALL
            .iter()
            .map(|kind| kind.slug())
            .map(|slug| (levenshtein(&slug, &needle), slug))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, slug)| slug);
        Err(EconomyError::UnknownBuildingKind {
            input: input.to_string(),
            suggestion,
        })
    }
}

/// Catalog lookup by kind.
pub fn info(kind: BuildingKind) -> BuildingInfo {
    kind.info()
}

static BY_NAME: Lazy<Vec<BuildingKind>> = Lazy::new(|| {
    let mut kinds = BuildingKind::ALL.to_vec();
    kinds.sort_by_key(|kind| kind.name());
    kinds
});

/// Every catalog entry ordered by display name.
pub fn sorted_by_name() -> &'static [BuildingKind] {
    &BY_NAME
}
