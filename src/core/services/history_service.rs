//! Time series rebuilt from the dated backups plus the live document.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::warn;

use crate::economy::EconomyData;
use crate::errors::{EconomyError, Result};
use crate::storage::StorageBackend;

use super::summary_service::SummaryService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Balance,
    Income,
    /// Money spent on the snapshot day, as a positive number.
    Expenditure,
    /// Jobs per resident, in percent.
    Employment,
    Population,
    Jobs,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Balance,
        Metric::Income,
        Metric::Expenditure,
        Metric::Employment,
        Metric::Population,
        Metric::Jobs,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Balance => "Balance",
            Metric::Income => "Income",
            Metric::Expenditure => "Expenditure",
            Metric::Employment => "Employment",
            Metric::Population => "Population",
            Metric::Jobs => "Jobs",
        }
    }

    /// Whether values of this metric are amounts of money.
    pub fn is_monetary(self) -> bool {
        matches!(self, Metric::Balance | Metric::Income | Metric::Expenditure)
    }

    pub fn measure(self, data: &EconomyData) -> f64 {
        match self {
            Metric::Balance => data.total_balance(),
            Metric::Income => SummaryService::income(&data.regions).total,
            Metric::Expenditure => data.transactions.expenditure_on(data.current_day),
            Metric::Employment => SummaryService::employment(&data.regions).total * 100.0,
            Metric::Population => SummaryService::population(&data.regions).total as f64,
            Metric::Jobs => SummaryService::jobs(&data.regions).total,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = EconomyError;

    fn from_str(input: &str) -> Result<Self> {
        let wanted = input.trim();
        Metric::ALL
            .into_iter()
            .find(|metric| metric.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = Metric::ALL.iter().map(|m| m.label()).collect();
                EconomyError::InvalidInput(format!(
                    "unknown metric `{wanted}` (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

pub type SeriesPoint = (NaiveDate, f64);

pub struct HistoryService;

impl HistoryService {
    /// One point per distinct day, oldest first. Backups that fail to load are
    /// skipped; the live document replaces a backup of the same day.
    pub fn series(
        storage: &dyn StorageBackend,
        current: &EconomyData,
        metric: Metric,
    ) -> Result<Vec<SeriesPoint>> {
        let mut points = BTreeMap::new();
        for info in storage.list_backups()? {
            match storage.load_backup(&info) {
                Ok(snapshot) => {
                    points.insert(info.day, metric.measure(&snapshot));
                }
                Err(err) => {
                    warn!(path = %info.path.display(), error = %err, "skipping unreadable backup");
                }
            }
        }
        points.insert(current.current_day, metric.measure(current));
        Ok(points.into_iter().collect())
    }
}
