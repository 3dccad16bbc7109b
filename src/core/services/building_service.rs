//! Buying, selling and pricing buildings inside regions.

use crate::catalog::BuildingKind;
use crate::economy::{Building, EconomyData, RegionScope};
use crate::errors::{EconomyError, Result};
use crate::ledger::Transaction;

use super::summary_service::SummaryService;

/// Largest number of buildings a single buy, sell or quote may handle.
pub const MAX_PURCHASE_COUNT: u32 = 10_000;

/// What a purchase would cost and yield, plus its effect on a real region.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchasePreview {
    pub cost: f64,
    pub income: f64,
    pub employees: f64,
    pub projection: Option<Projection>,
}

/// Economy-wide figures as they would be right after the purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub balance: f64,
    pub income: f64,
    pub employment: f64,
}

pub struct BuildingService;

impl BuildingService {
    /// Adds `count` new buildings to `region` at `multiplier` and posts the
    /// matching Buy transaction.
    pub fn buy(
        data: &mut EconomyData,
        region: &str,
        kind: BuildingKind,
        size: Option<u32>,
        count: u32,
        multiplier: f64,
    ) -> Result<Transaction> {
        ensure_count(count)?;
        let building = Building::new(kind, size, data.current_day, multiplier)?;
        let purchased = vec![building; count as usize];
        data.regions
            .buildings_mut(region)?
            .extend(purchased.iter().cloned());
        let txn = Transaction::buy(data.current_day, purchased);
        data.transactions.append(txn.clone());
        Ok(txn)
    }

    /// Removes `count` equivalent buildings, highest multiplier first, and
    /// posts the Sell transaction priced from their own cost basis.
    pub fn sell(
        data: &mut EconomyData,
        region: &str,
        kind: BuildingKind,
        size: Option<u32>,
        count: u32,
    ) -> Result<Transaction> {
        ensure_count(count)?;
        kind.validate_size(size)?;
        let sold = data.regions.take_equivalent(region, kind, size, count)?;
        let txn = Transaction::sell(data.current_day, sold);
        data.transactions.append(txn.clone());
        Ok(txn)
    }

    /// Prices a purchase without touching `data`. A projection is included
    /// only when `scope` names a real region.
    pub fn preview(
        data: &EconomyData,
        scope: RegionScope<'_>,
        kind: BuildingKind,
        size: Option<u32>,
        count: u32,
        multiplier: f64,
    ) -> Result<PurchasePreview> {
        ensure_count(count)?;
        let building = Building::new(kind, size, data.current_day, multiplier)?;
        let units = f64::from(count);
        let cost = building.cost() * units;
        let income = building.income() * units;
        let employees = building.employees() * units;

        let projection = match scope {
            RegionScope::Total => None,
            RegionScope::Region(name) => {
                let mut regions = data.regions.clone();
                regions
                    .buildings_mut(name)?
                    .extend(std::iter::repeat(building).take(count as usize));
                Some(Projection {
                    balance: data.total_balance() - cost,
                    income: SummaryService::income(&regions).total,
                    employment: SummaryService::employment(&regions).total,
                })
            }
        };

        Ok(PurchasePreview {
            cost,
            income,
            employees,
            projection,
        })
    }
}

fn ensure_count(count: u32) -> Result<()> {
    if count == 0 {
        return Err(EconomyError::InvalidInput(
            "building count must be at least 1".into(),
        ));
    }
    if count > MAX_PURCHASE_COUNT {
        return Err(EconomyError::InvalidInput(format!(
            "building count must be at most {MAX_PURCHASE_COUNT} (got {count})"
        )));
    }
    Ok(())
}
