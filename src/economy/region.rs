use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::BuildingKind;
use crate::errors::{EconomyError, Result};

use super::building::Building;

/// Name of the virtual region that aggregates every real one.
pub const TOTAL_REGION: &str = "Total";

/// Named collections of owned buildings, persisted as `region -> [building]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionStore {
    regions: BTreeMap<String, Vec<Building>>,
}

/// Equivalent buildings of one region, folded for display.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingGroup {
    pub kind: BuildingKind,
    pub size: Option<u32>,
    pub name: String,
    pub count: usize,
    pub cost: f64,
    pub income: f64,
    pub employees: f64,
}

/// Which part of the store a query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionScope<'a> {
    Total,
    Region(&'a str),
}

impl<'a> RegionScope<'a> {
    /// Maps the virtual "Total" name onto [`RegionScope::Total`].
    pub fn from_name(name: &'a str) -> Self {
        let name = name.trim();
        if name == TOTAL_REGION {
            RegionScope::Total
        } else {
            RegionScope::Region(name)
        }
    }
}

impl RegionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.regions.contains_key(name.trim())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Building])> {
        self.regions
            .iter()
            .map(|(name, buildings)| (name.as_str(), buildings.as_slice()))
    }

    /// Stores the trimmed name; every lookup trims the same way.
    pub fn add_region(&mut self, name: &str) -> Result<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed == TOTAL_REGION {
            return Err(EconomyError::InvalidRegionName(name.to_string()));
        }
        if self.regions.contains_key(trimmed) {
            return Err(EconomyError::DuplicateRegionName(trimmed.to_string()));
        }
        self.regions.insert(trimmed.to_string(), Vec::new());
        Ok(())
    }

    /// Drops the region together with its buildings.
    pub fn remove_region(&mut self, name: &str) -> Result<Vec<Building>> {
        self.regions
            .remove(name.trim())
            .ok_or_else(|| EconomyError::UnknownRegion(name.to_string()))
    }

    pub fn buildings(&self, name: &str) -> Result<&[Building]> {
        self.regions
            .get(name.trim())
            .map(Vec::as_slice)
            .ok_or_else(|| EconomyError::UnknownRegion(name.to_string()))
    }

    pub fn buildings_mut(&mut self, name: &str) -> Result<&mut Vec<Building>> {
        self.regions
            .get_mut(name.trim())
            .ok_or_else(|| EconomyError::UnknownRegion(name.to_string()))
    }

    /// Every building in scope; `Total` walks all regions in name order.
    pub fn scoped(&self, scope: RegionScope<'_>) -> Result<Vec<&Building>> {
        match scope {
            RegionScope::Total => Ok(self.all().collect()),
            RegionScope::Region(name) => Ok(self.buildings(name)?.iter().collect()),
        }
    }

    pub fn all(&self) -> impl Iterator<Item = &Building> {
        self.regions.values().flatten()
    }

    /// Groups the buildings in scope by equivalence, keeping first-seen order.
    pub fn groups(&self, scope: RegionScope<'_>) -> Result<Vec<BuildingGroup>> {
        let mut groups: Vec<BuildingGroup> = Vec::new();
        for building in self.scoped(scope)? {
            let position = groups
                .iter()
                .position(|group| group.kind == building.kind && group.size == building.size);
            let idx = match position {
                Some(idx) => idx,
                None => {
                    groups.push(BuildingGroup {
                        kind: building.kind,
                        size: building.size,
                        name: building.name(),
                        count: 0,
                        cost: 0.0,
                        income: 0.0,
                        employees: 0.0,
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[idx];
            group.count += 1;
            group.cost += building.cost();
            group.income += building.income();
            group.employees += building.employees();
        }
        Ok(groups)
    }

    /// Removes `count` buildings of the given kind and size from `region`,
    /// highest acquisition multiplier first.
    pub fn take_equivalent(
        &mut self,
        region: &str,
        kind: BuildingKind,
        size: Option<u32>,
        count: u32,
    ) -> Result<Vec<Building>> {
        let buildings = self.buildings_mut(region)?;
        let mut matching: Vec<usize> = buildings
            .iter()
            .enumerate()
            .filter(|(_, building)| building.kind == kind && building.size == size)
            .map(|(idx, _)| idx)
            .collect();
        let available = matching.len() as u32;
        if count > available {
            return Err(EconomyError::InsufficientBuildings {
                requested: count,
                available,
            });
        }
        matching.sort_by(|a, b| {
            buildings[*b]
                .growth_multiplier
                .total_cmp(&buildings[*a].growth_multiplier)
        });
        let mut chosen: Vec<usize> = matching.into_iter().take(count as usize).collect();
        chosen.sort_unstable_by(|a, b| b.cmp(a));
        let mut taken: Vec<Building> = chosen
            .into_iter()
            .map(|idx| buildings.remove(idx))
            .collect();
        taken.sort_by(|a, b| b.growth_multiplier.total_cmp(&a.growth_multiplier));
        Ok(taken)
    }
}
