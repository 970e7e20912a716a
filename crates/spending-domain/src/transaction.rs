//! Income and expense records.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::{icon_for, CategoryParseError, ExpenseCategory, IncomeCategory};

/// Direction of a transaction. The stored amount is always a magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Returns `true` when `category` belongs to this kind's vocabulary.
    pub fn accepts(self, category: &str) -> bool {
        match self {
            TransactionKind::Income => category.parse::<IncomeCategory>().is_ok(),
            TransactionKind::Expense => category.parse::<ExpenseCategory>().is_ok(),
        }
    }

    /// Category names offered for this kind, in enumeration order.
    pub fn categories(self) -> Vec<&'static str> {
        match self {
            TransactionKind::Income => IncomeCategory::ALL.iter().map(|c| c.as_str()).collect(),
            TransactionKind::Expense => ExpenseCategory::ALL.iter().map(|c| c.as_str()).collect(),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(CategoryParseError(value.to_string())),
        }
    }
}

/// A recorded transaction. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the sign implied by the kind: income positive, expense negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Parsed expense category, if this is an expense with a known category.
    pub fn expense_category(&self) -> Option<ExpenseCategory> {
        if !self.is_expense() {
            return None;
        }
        self.category.parse().ok()
    }

    pub fn icon(&self) -> &'static str {
        icon_for(&self.category)
    }
}

/// Unvalidated user input for a new transaction.
///
/// `date` holds the raw form value (`YYYY-MM-DD`); validation happens in the
/// transaction store so a rejected draft never produces a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: Option<Decimal>,
    pub category: String,
    pub date: String,
    pub description: String,
}

impl TransactionDraft {
    pub fn expense(amount: Decimal, category: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            kind: TransactionKind::Expense,
            amount: Some(amount),
            category: category.into(),
            date: date.into(),
            description: String::new(),
        }
    }

    pub fn income(amount: Decimal, category: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            kind: TransactionKind::Income,
            ..Self::expense(amount, category, date)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample(kind: TransactionKind) -> Transaction {
        Transaction {
            id: 1_718_000_000_000,
            kind,
            amount: dec!(12.50),
            category: "food".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            description: "Lunch".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn signed_amount_follows_kind() {
        assert_eq!(sample(TransactionKind::Expense).signed_amount(), dec!(-12.50));
        assert_eq!(sample(TransactionKind::Income).signed_amount(), dec!(12.50));
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let json = serde_json::to_value(sample(TransactionKind::Expense)).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2024-06-15");
        assert_eq!(json["amount"].to_string(), "12.50");
    }

    #[test]
    fn description_defaults_when_missing() {
        let raw = r#"{"id":7,"type":"income","amount":2500,"category":"salary",
            "date":"2024-06-01","timestamp":"2024-06-01T08:00:00Z"}"#;
        let txn: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(txn.description, "");
        assert_eq!(txn.amount, dec!(2500));
        assert!(txn.is_income());
    }

    #[test]
    fn kind_accepts_only_its_vocabulary() {
        assert!(TransactionKind::Expense.accepts("food"));
        assert!(!TransactionKind::Expense.accepts("salary"));
        assert!(TransactionKind::Income.accepts("other-income"));
        assert!(!TransactionKind::Income.accepts(""));
    }
}
