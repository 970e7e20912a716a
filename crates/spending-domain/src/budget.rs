use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{amount, category::ExpenseCategory};

/// Overall monthly ceiling plus per-category ceilings for the current month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetConfig {
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub monthly_budget: Decimal,
    #[serde(
        default = "amount::zeroed_category_budgets",
        with = "amount::category_budgets"
    )]
    pub category_budgets: BTreeMap<ExpenseCategory, Decimal>,
}

impl BudgetConfig {
    /// Sum of every category ceiling, saturating at `Decimal::MAX`.
    pub fn category_total(&self) -> Decimal {
        self.category_budgets
            .values()
            .fold(Decimal::ZERO, |total, amount| total.saturating_add(*amount))
    }

    /// Budget ceiling for `category`, zero when unset.
    pub fn category_budget(&self, category: ExpenseCategory) -> Decimal {
        self.category_budgets
            .get(&category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// `true` when any category carries a non-zero allocation.
    pub fn is_category_driven(&self) -> bool {
        self.category_budgets.values().any(|amount| !amount.is_zero())
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            monthly_budget: Decimal::ZERO,
            category_budgets: amount::zeroed_category_budgets(),
        }
    }
}
