pub mod building_service;
pub mod history_service;
pub mod loan_service;
pub mod summary_service;
pub mod transaction_service;

pub use building_service::{BuildingService, Projection, PurchasePreview, MAX_PURCHASE_COUNT};
pub use history_service::{HistoryService, Metric, SeriesPoint};
pub use loan_service::LoanService;
pub use summary_service::{IndustryIncome, RegionalStat, SummaryService};
pub use transaction_service::{TransactionRow, TransactionService};
