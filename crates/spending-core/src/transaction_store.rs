//! Ordered, append-only collection of transactions.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use spending_domain::{within_limits, Transaction, TransactionDraft, MAX_AMOUNT};

use crate::CoreError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Holds transactions in entry order, independent of their `date` field.
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    last_issued: i64,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `draft` and appends the resulting transaction.
    ///
    /// Ids derive from `now` in milliseconds and are bumped past every id
    /// issued or loaded so far, so they stay unique and increasing.
    pub fn add(
        &mut self,
        draft: TransactionDraft,
        now: DateTime<Utc>,
    ) -> Result<Transaction, CoreError> {
        let amount = validate_amount(draft.amount)?;
        let category = draft.category.trim();
        if category.is_empty() {
            return Err(CoreError::validation("category is required"));
        }
        if !draft.kind.accepts(category) {
            return Err(CoreError::validation(format!(
                "`{}` is not a valid {} category",
                category, draft.kind
            )));
        }
        let date = parse_date(&draft.date)?;

        let id = now.timestamp_millis().max(self.last_issued + 1);
        self.last_issued = id;
        let transaction = Transaction {
            id,
            kind: draft.kind,
            amount,
            category: category.to_ascii_lowercase(),
            date,
            description: draft.description.trim().to_string(),
            timestamp: now,
        };
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Removes the transaction with `id`. Unknown ids are a no-op.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id != id);
        self.transactions.len() != before
    }

    /// Swaps in a trusted list wholesale (initial load, remote pull).
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) {
        let highest = transactions.iter().map(|txn| txn.id).max().unwrap_or(0);
        self.last_issued = self.last_issued.max(highest);
        self.transactions = transactions;
    }

    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

fn validate_amount(amount: Option<Decimal>) -> Result<Decimal, CoreError> {
    match amount {
        Some(value) if value <= Decimal::ZERO => {
            Err(CoreError::validation("amount must be greater than zero"))
        }
        Some(value) if !within_limits(value) => Err(CoreError::validation(format!(
            "amount must be at most {} with no more than two decimal places",
            MAX_AMOUNT
        ))),
        Some(value) => Ok(value),
        None => Err(CoreError::validation("amount is required")),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::validation("date is required"));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| CoreError::validation(format!("invalid date `{}`, expected YYYY-MM-DD", raw)))
}
