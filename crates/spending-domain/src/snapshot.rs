//! The full persisted state: transactions plus budget configuration.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{amount, budget::BudgetConfig, category::ExpenseCategory, transaction::Transaction};

/// Serializable state written to the durable slot. Every key is optional on
/// read and falls back to the empty list, zero, or the zeroed category map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub monthly_budget: Decimal,
    #[serde(
        default = "amount::zeroed_category_budgets",
        with = "amount::category_budgets"
    )]
    pub category_budgets: BTreeMap<ExpenseCategory, Decimal>,
}

impl Snapshot {
    pub fn new(transactions: Vec<Transaction>, budget: BudgetConfig) -> Self {
        Self {
            transactions,
            monthly_budget: budget.monthly_budget,
            category_budgets: budget.category_budgets,
        }
    }

    pub fn budget(&self) -> BudgetConfig {
        BudgetConfig {
            monthly_budget: self.monthly_budget,
            category_budgets: self.category_budgets.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
            && self.monthly_budget.is_zero()
            && self.category_budgets.values().all(|amount| amount.is_zero())
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(Vec::new(), BudgetConfig::default())
    }
}
