//! Facade that owns the stores and routes every mutation through one commit path.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spending_domain::{ExpenseCategory, Snapshot, Transaction, TransactionDraft};
use tracing::{debug, error};

use crate::{
    aggregation::{Aggregator, Dashboard},
    budget_store::BudgetStore,
    format::format_money,
    persistence::PersistenceGateway,
    remote::SyncReport,
    search::{search, SearchQuery},
    time::Clock,
    transaction_store::TransactionStore,
    CoreError,
};

const DEFAULT_CURRENCY: &str = "₹";

/// What changed in the latest commit.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Loaded,
    Added(Transaction),
    Removed(i64),
    Cleared,
    BudgetChanged,
    Pulled(usize),
    CurrencyChanged(String),
}

/// Receives a fresh [`Dashboard`] after every committed change.
pub trait ChangeListener: Send {
    fn on_change(&mut self, change: &Change, dashboard: &Dashboard);
}

impl<F> ChangeListener for F
where
    F: FnMut(&Change, &Dashboard) + Send,
{
    fn on_change(&mut self, change: &Change, dashboard: &Dashboard) {
        self(change, dashboard)
    }
}

/// Owns the transaction and budget stores.
///
/// Each mutation applies in memory, writes the snapshot, mirrors the matching
/// remote op, then notifies listeners, all before returning. Only validation
/// failures reach the caller; storage and remote failures are logged.
/// Clearing all data removes the persisted snapshot instead of rewriting it.
pub struct Tracker {
    transactions: TransactionStore,
    budget: BudgetStore,
    gateway: PersistenceGateway,
    clock: Box<dyn Clock>,
    currency: String,
    listeners: Vec<Box<dyn ChangeListener>>,
}

impl Tracker {
    /// Builds a tracker and loads whatever the gateway's slot holds.
    pub fn open(gateway: PersistenceGateway, clock: Box<dyn Clock>) -> Self {
        let mut tracker = Self {
            transactions: TransactionStore::new(),
            budget: BudgetStore::new(),
            gateway,
            clock,
            currency: DEFAULT_CURRENCY.to_string(),
            listeners: Vec::new(),
        };
        tracker.reload();
        tracker
    }

    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency = symbol.into();
        self
    }

    pub fn subscribe(&mut self, listener: impl ChangeListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Replaces in-memory state with the persisted snapshot.
    pub fn reload(&mut self) {
        let snapshot = self.gateway.load();
        let budget = snapshot.budget();
        self.transactions.replace_all(snapshot.transactions);
        self.budget.replace(budget);
        debug!(
            transactions = self.transactions.len(),
            monthly_budget = %self.budget.monthly_budget(),
            "snapshot loaded"
        );
        self.notify(&Change::Loaded);
    }

    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<Transaction, CoreError> {
        let now = self.clock.now();
        let transaction = self.transactions.add(draft, now)?;
        self.commit(Change::Added(transaction.clone()));
        Ok(transaction)
    }

    /// Returns `false` (and changes nothing) when `id` is unknown.
    pub fn remove_transaction(&mut self, id: i64) -> bool {
        if !self.transactions.remove(id) {
            return false;
        }
        self.commit(Change::Removed(id));
        true
    }

    /// Drops every transaction and zeroes every budget.
    pub fn clear_all(&mut self) {
        self.transactions.clear();
        self.budget.reset_all();
        self.commit(Change::Cleared);
    }

    pub fn set_monthly_budget(&mut self, amount: Decimal) -> Result<(), CoreError> {
        self.budget.set_monthly_budget(amount)?;
        self.commit(Change::BudgetChanged);
        Ok(())
    }

    pub fn set_category_budget(
        &mut self,
        category: ExpenseCategory,
        amount: Decimal,
    ) -> Result<(), CoreError> {
        self.budget.set_category_budget(category, amount)?;
        self.commit(Change::BudgetChanged);
        Ok(())
    }

    pub fn reset_budgets(&mut self) {
        self.budget.reset_all();
        self.commit(Change::BudgetChanged);
    }

    /// Updates the display currency. Returns `false` and stays silent when
    /// the symbol is unchanged, so repeated pushes are harmless.
    pub fn set_currency_symbol(&mut self, symbol: &str) -> bool {
        if self.currency == symbol {
            return false;
        }
        self.currency = symbol.to_string();
        self.notify(&Change::CurrencyChanged(self.currency.clone()));
        true
    }

    pub fn set_remote_enabled(&mut self, enabled: bool) {
        self.gateway.set_remote_enabled(enabled);
    }

    /// Sends any mirror writes still queued. Commits already flush, so this
    /// only matters after the host re-enables the remote.
    pub fn flush_remote(&mut self) -> SyncReport {
        self.gateway.flush_remote()
    }

    /// Mirrors every local transaction. Returns how many were sent.
    pub fn push_all(&mut self) -> usize {
        if !self.gateway.remote_active() {
            return 0;
        }
        for txn in self.transactions.all() {
            self.gateway.sync_remote(txn);
        }
        self.gateway.flush_remote().pushed
    }

    /// Replaces local transactions with the remote list when the remote has
    /// data. Budgets stay local. Returns whether a replacement happened.
    pub fn pull_remote(&mut self) -> bool {
        let Some(remote) = self.gateway.pull_remote() else {
            return false;
        };
        let count = remote.len();
        self.transactions.replace_all(remote);
        self.commit(Change::Pulled(count));
        true
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.transactions.all()
    }

    pub fn transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    pub fn budget(&self) -> &BudgetStore {
        &self.budget
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency
    }

    pub fn pending_remote(&self) -> usize {
        self.gateway.pending()
    }

    pub fn aggregator(&self) -> Aggregator<'_> {
        Aggregator::new(
            self.transactions.all(),
            self.budget.config(),
            self.clock.today(),
        )
        .with_currency(&self.currency)
    }

    pub fn dashboard(&self) -> Dashboard {
        self.aggregator().dashboard()
    }

    pub fn search(&self, query: &SearchQuery) -> Vec<&Transaction> {
        search(self.transactions.all(), query)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.transactions.all().to_vec(), self.budget.config().clone())
    }

    pub fn format_money(&self, amount: Decimal) -> String {
        format_money(amount, &self.currency)
    }

    /// Single post-mutation entry point: persist, mirror, notify.
    fn commit(&mut self, change: Change) {
        let persisted = match change {
            Change::Cleared => self.gateway.clear_local(),
            _ => self.gateway.save(&self.snapshot()),
        };
        if let Err(err) = persisted {
            error!(error = %err, "failed to persist snapshot, keeping in-memory state");
        }
        match &change {
            Change::Added(txn) => self.gateway.sync_remote(txn),
            Change::Removed(id) => self.gateway.delete_remote(*id),
            Change::Cleared => self.gateway.clear_remote(),
            _ => {}
        }
        if self.gateway.pending() > 0 {
            let report = self.gateway.flush_remote();
            debug!(pushed = report.pushed, failed = report.failed, "remote mirror flushed");
        }
        debug!(?change, "change committed");
        self.notify(&change);
    }

    fn notify(&mut self, change: &Change) {
        if self.listeners.is_empty() {
            return;
        }
        let dashboard = self.dashboard();
        for listener in &mut self.listeners {
            listener.on_change(change, &dashboard);
        }
    }
}
