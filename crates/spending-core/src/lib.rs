//! spending-core
//!
//! Ledger and budget aggregation engine for the spending tracker.
//! Depends on spending-domain. No terminal I/O; durable storage and the
//! remote mirror are reached only through the [`SnapshotSlot`] and
//! [`RemoteStore`] traits.

pub mod aggregation;
pub mod budget_store;
pub mod error;
pub mod format;
pub mod persistence;
pub mod remote;
pub mod search;
pub mod storage;
pub mod time;
pub mod tracker;
pub mod transaction_store;

pub use aggregation::{
    Aggregator, BudgetHealth, BudgetStatus, CategorySpend, Dashboard, MonthlyPoint, Totals,
};
pub use budget_store::BudgetStore;
pub use error::CoreError;
pub use format::{format_amount, format_money, format_percent};
pub use persistence::PersistenceGateway;
pub use remote::{MemoryRemote, RemoteOp, RemoteStore, SyncReport};
pub use search::{search, SearchQuery};
pub use storage::{MemorySlot, SnapshotSlot};
pub use time::{Clock, FixedClock, SystemClock};
pub use tracker::{Change, ChangeListener, Tracker};
pub use transaction_store::TransactionStore;

#[cfg(test)]
mod tests;
