//! spending-domain
//!
//! Pure domain models for the spending tracker (transactions, categories,
//! budgets, persisted snapshots). No I/O, no storage, no presentation.

pub mod amount;
pub mod budget;
pub mod category;
pub mod month;
pub mod snapshot;
pub mod transaction;

pub use amount::{within_limits, MAX_AMOUNT, MAX_SCALE};
pub use budget::BudgetConfig;
pub use category::{icon_for, CategoryParseError, ExpenseCategory, IncomeCategory, DEFAULT_ICON};
pub use month::{MonthParseError, YearMonth, MAX_TRAILING_MONTHS};
pub use snapshot::Snapshot;
pub use transaction::{Transaction, TransactionDraft, TransactionKind};
