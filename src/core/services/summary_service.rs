use std::collections::BTreeMap;

use crate::catalog::BuildingCategory;
use crate::economy::{Building, RegionStore};

/// A statistic computed over every region plus its per-region breakdown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionalStat<T> {
    pub total: T,
    pub by_region: BTreeMap<String, T>,
}

impl<T: Clone + Default> RegionalStat<T> {
    /// Value for one region, or the global value for the virtual "Total".
    pub fn get(&self, region: &str) -> Option<T> {
        if region == crate::economy::TOTAL_REGION {
            return Some(self.total.clone());
        }
        self.by_region.get(region).cloned()
    }
}

pub type IndustryIncome = BTreeMap<BuildingCategory, f64>;

/// Aggregate queries over the owned buildings. Everything is recomputed from
/// the current buildings on each call.
pub struct SummaryService;

impl SummaryService {
    pub fn income(regions: &RegionStore) -> RegionalStat<f64> {
        Self::fold(regions, |buildings| buildings.iter().map(|b| b.income()).sum())
    }

    pub fn jobs(regions: &RegionStore) -> RegionalStat<f64> {
        Self::fold(regions, |buildings| {
            buildings.iter().map(|b| b.employees()).sum()
        })
    }

    pub fn population(regions: &RegionStore) -> RegionalStat<u64> {
        Self::fold(regions, |buildings| {
            buildings.iter().map(|b| b.population()).sum()
        })
    }

    /// Jobs per resident, `0.0` where nobody lives.
    pub fn employment(regions: &RegionStore) -> RegionalStat<f64> {
        let jobs = Self::jobs(regions);
        let population = Self::population(regions);
        let ratio = |jobs: f64, population: u64| {
            if population == 0 {
                0.0
            } else {
                jobs / population as f64
            }
        };
        RegionalStat {
            total: ratio(jobs.total, population.total),
            by_region: jobs
                .by_region
                .iter()
                .map(|(name, region_jobs)| {
                    let residents = population.by_region.get(name).copied().unwrap_or(0);
                    (name.clone(), ratio(*region_jobs, residents))
                })
                .collect(),
        }
    }

    /// Income split by building category.
    pub fn industry_income(regions: &RegionStore) -> RegionalStat<IndustryIncome> {
        Self::fold(regions, |buildings| {
            let mut split = IndustryIncome::new();
            for building in buildings {
                *split.entry(building.kind.category()).or_insert(0.0) += building.income();
            }
            split
        })
    }

    fn fold<T, F>(regions: &RegionStore, compute: F) -> RegionalStat<T>
    where
        F: Fn(&[&Building]) -> T,
    {
        let by_region: BTreeMap<String, T> = regions
            .iter()
            .map(|(name, buildings)| {
                let refs: Vec<&Building> = buildings.iter().collect();
                (name.to_string(), compute(&refs))
            })
            .collect();
        let everything: Vec<&Building> = regions.all().collect();
        RegionalStat {
            total: compute(&everything),
            by_region,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BuildingKind;
    use chrono::NaiveDate;

    fn regions() -> RegionStore {
        let day = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        let mut store = RegionStore::new();
        store.add_region("Docks").unwrap();
        store.add_region("Suburbs").unwrap();
        store.add_region("Empty").unwrap();
        let docks = store.buildings_mut("Docks").unwrap();
        docks.push(Building::new(BuildingKind::Pier, None, day, 1.0).unwrap());
        docks.push(Building::new(BuildingKind::MarketStall, None, day, 1.0).unwrap());
        let suburbs = store.buildings_mut("Suburbs").unwrap();
        suburbs.push(Building::new(BuildingKind::House, Some(4), day, 1.0).unwrap());
        suburbs.push(Building::new(BuildingKind::PostOffice, None, day, 1.0).unwrap());
        store
    }

    #[test]
    fn income_sums_each_region_and_total() {
        let stat = SummaryService::income(&regions());
        assert_eq!(stat.by_region["Docks"], 112.0 + 88.0);
        assert_eq!(stat.by_region["Suburbs"], 200.0);
        assert_eq!(stat.by_region["Empty"], 0.0);
        assert_eq!(stat.total, 400.0);
        assert_eq!(stat.get("Total"), Some(400.0));
    }

    #[test]
    fn employment_is_jobs_over_population() {
        let store = regions();
        let employment = SummaryService::employment(&store);
        assert_eq!(employment.by_region["Suburbs"], 0.5);
        assert_eq!(employment.by_region["Docks"], 0.0);
        assert_eq!(employment.total, 4.0 / 4.0);
        assert_eq!(SummaryService::population(&store).total, 4);
        assert_eq!(SummaryService::jobs(&store).total, 4.0);
    }

    #[test]
    fn industry_income_groups_by_category() {
        let split = SummaryService::industry_income(&regions());
        assert_eq!(split.total[&BuildingCategory::Transport], 112.0);
        assert_eq!(split.total[&BuildingCategory::Retail], 88.0);
        assert_eq!(split.total[&BuildingCategory::PublicService], 200.0);
        assert_eq!(split.total[&BuildingCategory::Housing], 0.0);
        assert!(split.by_region["Empty"].is_empty());
    }
}
