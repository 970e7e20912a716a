//! History filtering: free-text query plus month selector.

use std::cmp::Reverse;

use spending_domain::{Transaction, TransactionKind, YearMonth};

use crate::format::format_amount;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Case-insensitive needle; blank matches everything.
    pub text: String,
    pub month: Option<YearMonth>,
    pub kind: Option<TransactionKind>,
}

impl SearchQuery {
    pub fn month(month: YearMonth) -> Self {
        Self {
            month: Some(month),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_month(mut self, month: Option<YearMonth>) -> Self {
        self.month = month;
        self
    }

    pub fn with_kind(mut self, kind: Option<TransactionKind>) -> Self {
        self.kind = kind;
        self
    }

    fn matches(&self, txn: &Transaction, needle: &str) -> bool {
        if let Some(month) = self.month {
            if !month.contains(txn.date) {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }
        if needle.is_empty() {
            return true;
        }
        txn.category.to_lowercase().contains(needle)
            || txn.description.to_lowercase().contains(needle)
            || txn.kind.as_str().contains(needle)
            || format_amount(txn.amount).contains(needle)
    }
}

/// Matching transactions, latest `date` first; same-day entries newest entered first.
pub fn search<'a>(transactions: &'a [Transaction], query: &SearchQuery) -> Vec<&'a Transaction> {
    let needle = query.text.trim().to_lowercase();
    let mut hits: Vec<&Transaction> = transactions
        .iter()
        .rev()
        .filter(|txn| query.matches(txn, &needle))
        .collect();
    hits.sort_by_key(|txn| Reverse(txn.date));
    hits
}
