use std::path::PathBuf;

use chrono::{Days, NaiveDate};
use tracing::{debug, error, info, warn};

use crate::catalog::BuildingKind;
use crate::config::{ConfigManager, EconomyConfig};
use crate::currency::MoneyFormat;
use crate::economy::{BuildingGroup, EconomyData, GrowthModel, RegionScope};
use crate::errors::{EconomyError, Result};
use crate::ledger::{LoanBook, LoanId, PaymentOutcome, Transaction, UN_LENDER};
use crate::storage::{JsonStorage, StorageBackend};

use super::clock::Clock;
use super::services::{
    BuildingService, HistoryService, IndustryIncome, LoanService, Metric, PurchasePreview,
    RegionalStat, SeriesPoint, SummaryService, TransactionRow, TransactionService,
};
use super::utils::PathResolver;

pub use crate::ledger::OVERDRAFT_COMMENT;

/// Summary of one completed day advance.
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub income: f64,
    /// Interest charged because the balance ended the day negative.
    pub overdraft_interest: Option<f64>,
    pub balance: f64,
    pub backup: PathBuf,
}

/// Facade over the economy document, its storage and the growth multiplier.
///
/// Every mutation runs against a staged copy of the document which only
/// replaces the live one after it has been saved.
pub struct EconomyState {
    data: EconomyData,
    config: EconomyConfig,
    growth: GrowthModel,
    multiplier: f64,
    storage: Box<dyn StorageBackend>,
    clock: Box<dyn Clock>,
}

impl EconomyState {
    /// Loads the saved economy, or seeds and saves a fresh one.
    pub fn open(
        storage: Box<dyn StorageBackend>,
        clock: Box<dyn Clock>,
        config: EconomyConfig,
    ) -> Result<Self> {
        config.validate()?;
        let data = match storage.load()? {
            Some(data) => {
                info!(day = %data.current_day, "economy loaded");
                data
            }
            None => {
                let start = config.start_date.unwrap_or_else(|| clock.today());
                let data = EconomyData::seeded(start, config.initial_balance);
                storage.save(&data)?;
                info!(day = %start, balance = config.initial_balance, "new economy created");
                data
            }
        };
        let growth = GrowthModel::new(config.growth);
        let mut state = Self {
            data,
            config,
            growth,
            multiplier: 1.0,
            storage,
            clock,
        };
        state.refresh_growth();
        Ok(state)
    }

    /// Opens the JSON store and `config.json` under `base`, or under the
    /// resolved application directory.
    pub fn open_in(base: Option<PathBuf>, clock: Box<dyn Clock>) -> Result<Self> {
        let base = PathResolver::resolve_base(base);
        let config = ConfigManager::with_base_dir(base.clone())?.load()?;
        let storage = JsonStorage::new(Some(base))?;
        Self::open(Box::new(storage), clock, config)
    }

    pub fn snapshot(&self) -> &EconomyData {
        &self.data
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    pub fn money(&self) -> &MoneyFormat {
        &self.config.money
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn current_day(&self) -> NaiveDate {
        self.data.current_day
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn total_balance(&self) -> f64 {
        self.data.total_balance()
    }

    pub fn loans(&self) -> &LoanBook {
        &self.data.loans
    }

    pub fn region_names(&self) -> Vec<String> {
        self.data.regions.names().map(str::to_string).collect()
    }

    /// Multiplier applied to buildings bought right now.
    pub fn growth_multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn refresh_growth(&mut self) -> f64 {
        let income = SummaryService::income(&self.data.regions).total;
        self.multiplier = self.growth.multiplier(income);
        debug!(income, multiplier = self.multiplier, "growth multiplier refreshed");
        self.multiplier
    }

    pub fn calc_income(&self) -> RegionalStat<f64> {
        SummaryService::income(&self.data.regions)
    }

    pub fn calc_jobs(&self) -> RegionalStat<f64> {
        SummaryService::jobs(&self.data.regions)
    }

    pub fn calc_population(&self) -> RegionalStat<u64> {
        SummaryService::population(&self.data.regions)
    }

    pub fn calc_employment(&self) -> RegionalStat<f64> {
        SummaryService::employment(&self.data.regions)
    }

    pub fn calc_industry_income(&self) -> RegionalStat<IndustryIncome> {
        SummaryService::industry_income(&self.data.regions)
    }

    /// Buildings grouped by kind and size, for one region or for "Total".
    pub fn groups(&self, region: &str) -> Result<Vec<BuildingGroup>> {
        self.data.regions.groups(RegionScope::from_name(region))
    }

    pub fn transaction_rows(&self) -> Vec<TransactionRow> {
        TransactionService::rows(&self.data, &self.config.money)
    }

    pub fn preview_purchase(
        &self,
        region: &str,
        kind: BuildingKind,
        size: Option<u32>,
        count: u32,
    ) -> Result<PurchasePreview> {
        BuildingService::preview(
            &self.data,
            RegionScope::from_name(region),
            kind,
            size,
            count,
            self.multiplier,
        )
    }

    pub fn load_historical_series(&self, metric: Metric) -> Result<Vec<SeriesPoint>> {
        HistoryService::series(self.storage.as_ref(), &self.data, metric)
    }

    pub fn create_region(&mut self, name: &str) -> Result<()> {
        self.commit(|data| data.regions.add_region(name))?;
        info!(region = name.trim(), "region created");
        Ok(())
    }

    /// Drops the region together with its buildings. Returns how many
    /// buildings were lost.
    pub fn delete_region(&mut self, name: &str) -> Result<usize> {
        let removed = self.commit(|data| data.regions.remove_region(name))?;
        info!(region = name, buildings = removed.len(), "region deleted");
        self.refresh_growth();
        Ok(removed.len())
    }

    pub fn buy(
        &mut self,
        region: &str,
        kind: BuildingKind,
        size: Option<u32>,
        count: u32,
    ) -> Result<Transaction> {
        let multiplier = self.multiplier;
        let txn = self.commit(|data| {
            BuildingService::buy(data, region, kind, size, count, multiplier)
        })?;
        info!(region, kind = %kind, count, cost = -txn.amount(), "buildings bought");
        self.refresh_growth();
        Ok(txn)
    }

    pub fn sell(
        &mut self,
        region: &str,
        kind: BuildingKind,
        size: Option<u32>,
        count: u32,
    ) -> Result<Transaction> {
        let txn = self.commit(|data| BuildingService::sell(data, region, kind, size, count))?;
        info!(region, kind = %kind, count, refund = txn.amount(), "buildings sold");
        self.refresh_growth();
        Ok(txn)
    }

    pub fn add_manual(&mut self, amount: f64, comment: &str) -> Result<usize> {
        let index = self.commit(|data| TransactionService::add_manual(data, amount, comment))?;
        info!(index, amount, "manual transaction recorded");
        Ok(index)
    }

    pub fn remove_transaction(&mut self, index: usize) -> Result<Transaction> {
        let removed = self.commit(|data| TransactionService::remove(data, index))?;
        info!(index, "transaction removed");
        Ok(removed)
    }

    pub fn take_loan(&mut self, principal: f64, rate_percent: f64, lender: &str) -> Result<LoanId> {
        let id = self.commit(|data| LoanService::take(data, principal, rate_percent, lender))?;
        info!(loan = %id, principal, rate_percent, lender, "loan taken");
        Ok(id)
    }

    /// Borrows from the UN at the configured rate.
    pub fn take_un_loan(&mut self, principal: f64) -> Result<LoanId> {
        let rate = self.config.un_loan_rate_percent;
        self.take_loan(principal, rate, UN_LENDER)
    }

    pub fn give_loan(&mut self, amount: f64, borrower: &str) -> Result<usize> {
        let index = self.commit(|data| LoanService::give(data, amount, borrower))?;
        info!(amount, borrower, "loan given");
        Ok(index)
    }

    pub fn pay_loan(&mut self, id: LoanId, amount: f64) -> Result<PaymentOutcome> {
        let outcome = self
            .commit(|data| LoanService::pay(data, id, amount))
            .map_err(|err| {
                if err.is_fatal() {
                    error!(loan = %id, error = %err, "loan payment failed");
                }
                err
            })?;
        info!(
            loan = %id,
            paid = outcome.paid,
            remaining = outcome.remaining,
            settled = outcome.settled,
            "loan payment"
        );
        Ok(outcome)
    }

    /// Moves the simulated day forward by `delta` days, or to today when no
    /// delta is given, and pays the day's income.
    ///
    /// The current document is saved and backed up under its own day before
    /// anything changes. Rejected advances touch neither memory nor disk.
    pub fn advance_day(&mut self, delta: Option<i64>) -> Result<DayReport> {
        let from = self.data.current_day;
        let to = self.target_day(delta)?;
        if self.data.transactions.has_income_on(to) {
            return Err(EconomyError::AlreadyPaid(to));
        }

        self.storage.save(&self.data)?;
        let backup = self.storage.backup(&self.data)?;

        let mut staged = self.data.clone();
        staged.current_day = to;
        let income = SummaryService::income(&staged.regions).total;
        staged.transactions.append(Transaction::income(to, income));

        let balance = staged.total_balance();
        let overdraft_interest = if balance < 0.0 {
            let interest = balance * self.config.overdraft_rate;
            staged
                .transactions
                .append(Transaction::overdraft(to, interest));
            warn!(day = %to, balance, interest, "balance overdrawn");
            Some(interest)
        } else {
            None
        };

        staged.loans.accrue_daily_interest();
        self.storage.save(&staged)?;
        self.data = staged;
        self.refresh_growth();

        let report = DayReport {
            from,
            to,
            income,
            overdraft_interest,
            balance: self.data.total_balance(),
            backup,
        };
        info!(from = %report.from, to = %report.to, income, balance = report.balance, "day advanced");
        Ok(report)
    }

    fn target_day(&self, delta: Option<i64>) -> Result<NaiveDate> {
        let today = self.clock.today();
        let current = self.data.current_day;
        let target = match delta {
            Some(days) if days < 0 => return Err(EconomyError::InvalidDelta(days)),
            Some(days) => {
                let days = u64::try_from(days).map_err(|_| EconomyError::InvalidDelta(days))?;
                let target = current
                    .checked_add_days(Days::new(days))
                    .ok_or_else(|| EconomyError::InvalidInput(format!("{days} days is out of range")))?;
                if target > today {
                    return Err(EconomyError::FutureDate { target, today });
                }
                target
            }
            None => today,
        };
        if target < current {
            return Err(EconomyError::FutureDate {
                target: current,
                today,
            });
        }
        Ok(target)
    }

    fn commit<T, F>(&mut self, change: F) -> Result<T>
    where
        F: FnOnce(&mut EconomyData) -> Result<T>,
    {
        let mut staged = self.data.clone();
        let value = change(&mut staged)?;
        self.storage.save(&staged)?;
        self.data = staged;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::economy::GrowthCurve;
    use crate::storage::BackupInfo;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 10, d).unwrap()
    }

    fn config() -> EconomyConfig {
        EconomyConfig {
            start_date: Some(day(10)),
            growth: GrowthCurve::Flat,
            ..EconomyConfig::default()
        }
    }

    fn state(today: NaiveDate) -> (EconomyState, TempDir) {
        let temp = TempDir::new().unwrap();
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        let state =
            EconomyState::open(Box::new(storage), Box::new(FixedClock(today)), config()).unwrap();
        (state, temp)
    }

    #[test]
    fn fresh_state_is_seeded_and_saved() {
        let (state, temp) = state(day(20));
        assert_eq!(state.current_day(), day(10));
        assert_eq!(state.total_balance(), 40000.0);
        assert!(temp.path().join("economy.json").exists());
    }

    #[test]
    fn advance_pays_income_once_per_day() {
        let (mut state, _temp) = state(day(20));
        state.create_region("Harbour").unwrap();
        state.buy("Harbour", BuildingKind::MarketStall, None, 1).unwrap();
        let report = state.advance_day(Some(1)).unwrap();
        assert_eq!(report.from, day(10));
        assert_eq!(report.to, day(11));
        assert_eq!(report.income, 88.0);
        assert!(report.backup.ends_with("2022-10-10.json"));

        let err = state.advance_day(Some(0)).unwrap_err();
        assert_eq!(err, EconomyError::AlreadyPaid(day(11)));
        let incomes = state
            .snapshot()
            .transactions
            .iter()
            .filter(|txn| txn.is_income())
            .count();
        assert_eq!(incomes, 1);
    }

    #[test]
    fn advance_rejects_future_and_negative_deltas() {
        let (mut state, temp) = state(day(12));
        assert_eq!(
            state.advance_day(Some(5)).unwrap_err(),
            EconomyError::FutureDate {
                target: day(15),
                today: day(12)
            }
        );
        assert_eq!(state.advance_day(Some(-1)).unwrap_err(), EconomyError::InvalidDelta(-1));
        assert!(!temp.path().join("backups").exists());

        let report = state.advance_day(None).unwrap();
        assert_eq!(report.to, day(12));
    }

    #[test]
    fn overdraft_and_loan_interest_are_applied() {
        let (mut state, _temp) = state(day(20));
        state.add_manual(-41000.0, "Spree").unwrap();
        let id = state.take_loan(1000.0, 5.0, "Bank").unwrap();
        state.add_manual(-1000.0, "Spent the loan").unwrap();
        let report = state.advance_day(Some(1)).unwrap();
        assert_eq!(report.overdraft_interest, Some(-1000.0 * 0.05));
        assert_eq!(state.total_balance(), -1050.0);
        let loan = state.loans().get(id).unwrap();
        assert!((loan.principal - 1050.0).abs() < 1e-9);
        assert_eq!(loan.paid_so_far, 0.0);
    }

    #[test]
    fn un_loans_use_the_configured_rate() {
        let (mut state, _temp) = state(day(20));
        let id = state.take_un_loan(500.0).unwrap();
        let loan = state.loans().get(id).unwrap();
        assert_eq!(loan.lender, UN_LENDER);
        assert_eq!(loan.rate_percent, 2.5);
        let outcome = state.pay_loan(id, 500.0).unwrap();
        assert!(outcome.settled);
        assert!(outcome.notice.is_none());
    }

    #[test]
    fn reopening_restores_the_saved_document() {
        let temp = TempDir::new().unwrap();
        {
            let mut state = EconomyState::open_in(
                Some(temp.path().to_path_buf()),
                Box::new(FixedClock(day(20))),
            )
            .unwrap();
            state.create_region("Harbour").unwrap();
            state.add_manual(12.5, "Found").unwrap();
        }
        let state =
            EconomyState::open_in(Some(temp.path().to_path_buf()), Box::new(FixedClock(day(20))))
                .unwrap();
        assert_eq!(state.region_names(), vec!["Harbour".to_string()]);
        assert_eq!(state.total_balance(), 40012.5);
    }

    struct FlakyStorage {
        inner: JsonStorage,
        fail: Arc<AtomicBool>,
    }

    impl StorageBackend for FlakyStorage {
        fn load(&self) -> Result<Option<EconomyData>> {
            self.inner.load()
        }

        fn save(&self, data: &EconomyData) -> Result<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(EconomyError::Storage("disk full".into()));
            }
            self.inner.save(data)
        }

        fn backup(&self, data: &EconomyData) -> Result<PathBuf> {
            self.inner.backup(data)
        }

        fn list_backups(&self) -> Result<Vec<BackupInfo>> {
            self.inner.list_backups()
        }

        fn load_backup(&self, info: &BackupInfo) -> Result<EconomyData> {
            self.inner.load_backup(info)
        }
    }

    #[test]
    fn failed_save_keeps_memory_on_last_good_state() {
        let temp = TempDir::new().unwrap();
        let fail = Arc::new(AtomicBool::new(false));
        let storage = FlakyStorage {
            inner: JsonStorage::new(Some(temp.path().to_path_buf())).unwrap(),
            fail: Arc::clone(&fail),
        };
        let mut state =
            EconomyState::open(Box::new(storage), Box::new(FixedClock(day(20))), config())
                .unwrap();
        fail.store(true, Ordering::SeqCst);
        assert!(state.add_manual(100.0, "lost").unwrap_err().is_fatal());
        assert!(state.create_region("Harbour").is_err());
        assert_eq!(state.total_balance(), 40000.0);
        assert!(state.region_names().is_empty());
    }
}
