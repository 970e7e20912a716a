//! Overall and per-category monthly budget ceilings.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use spending_domain::{within_limits, BudgetConfig, ExpenseCategory, MAX_AMOUNT};

use crate::CoreError;

/// Owns the [`BudgetConfig`].
///
/// Precedence between the two sources of the monthly figure:
/// - a category edit recomputes `monthly_budget` as the sum of all categories;
/// - a direct overall edit wins and zeroes every category allocation.
///
/// So whenever any category allocation is non-zero the overall figure equals
/// the category sum.
#[derive(Debug, Clone, Default)]
pub struct BudgetStore {
    config: BudgetConfig,
}

impl BudgetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: BudgetConfig) -> Self {
        let mut store = Self::default();
        store.replace(config);
        store
    }

    /// Sets the overall ceiling directly. Rejects zero or negative amounts
    /// and amounts past the money limits.
    pub fn set_monthly_budget(&mut self, amount: Decimal) -> Result<(), CoreError> {
        if amount <= Decimal::ZERO {
            return Err(CoreError::validation(
                "monthly budget must be greater than zero",
            ));
        }
        check_limits(amount)?;
        for value in self.config.category_budgets.values_mut() {
            *value = Decimal::ZERO;
        }
        self.config.monthly_budget = amount;
        Ok(())
    }

    /// Sets one category ceiling (negative input clamps to zero) and
    /// recomputes the overall figure from the categories.
    pub fn set_category_budget(
        &mut self,
        category: ExpenseCategory,
        amount: Decimal,
    ) -> Result<(), CoreError> {
        check_limits(amount)?;
        self.config
            .category_budgets
            .insert(category, amount.max(Decimal::ZERO));
        self.config.monthly_budget = self.config.category_total();
        Ok(())
    }

    pub fn reset_all(&mut self) {
        self.config = BudgetConfig::default();
    }

    /// Loads a trusted configuration. If it carries category allocations the
    /// overall figure is re-derived from them.
    pub fn replace(&mut self, mut config: BudgetConfig) {
        for category in ExpenseCategory::ALL {
            config.category_budgets.entry(category).or_insert(Decimal::ZERO);
        }
        if config.is_category_driven() {
            config.monthly_budget = config.category_total();
        }
        self.config = config;
    }

    pub fn monthly_budget(&self) -> Decimal {
        self.config.monthly_budget
    }

    pub fn category_budget(&self, category: ExpenseCategory) -> Decimal {
        self.config.category_budget(category)
    }

    pub fn category_budgets(&self) -> &BTreeMap<ExpenseCategory, Decimal> {
        &self.config.category_budgets
    }

    pub fn is_category_driven(&self) -> bool {
        self.config.is_category_driven()
    }

    pub fn config(&self) -> &BudgetConfig {
        &self.config
    }
}

fn check_limits(amount: Decimal) -> Result<(), CoreError> {
    if within_limits(amount) {
        Ok(())
    } else {
        Err(CoreError::validation(format!(
            "budget must be at most {} with no more than two decimal places",
            MAX_AMOUNT
        )))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn category_edits_recompute_total() {
        let mut store = BudgetStore::new();
        store.set_category_budget(ExpenseCategory::Food, dec!(300)).unwrap();
        store.set_category_budget(ExpenseCategory::Transport, dec!(200)).unwrap();
        assert_eq!(store.monthly_budget(), dec!(500));
        store.set_category_budget(ExpenseCategory::Food, dec!(100.10)).unwrap();
        assert_eq!(store.monthly_budget(), dec!(300.10));
    }

    #[test]
    fn negative_category_amount_clamps_to_zero() {
        let mut store = BudgetStore::new();
        store.set_category_budget(ExpenseCategory::Health, dec!(-40)).unwrap();
        assert_eq!(store.category_budget(ExpenseCategory::Health), Decimal::ZERO);
        assert_eq!(store.monthly_budget(), Decimal::ZERO);
    }

    #[test]
    fn direct_set_zeroes_category_allocations() {
        let mut store = BudgetStore::new();
        store.set_category_budget(ExpenseCategory::Food, dec!(300)).unwrap();
        store.set_monthly_budget(dec!(1000)).unwrap();
        assert_eq!(store.monthly_budget(), dec!(1000));
        assert!(!store.is_category_driven());
        assert_eq!(store.category_budget(ExpenseCategory::Food), Decimal::ZERO);
    }

    #[test]
    fn direct_set_rejects_non_positive_amounts() {
        let mut store = BudgetStore::new();
        store.set_monthly_budget(dec!(800)).unwrap();
        assert!(store.set_monthly_budget(dec!(0)).unwrap_err().is_validation());
        assert!(store.set_monthly_budget(dec!(-1)).is_err());
        assert_eq!(store.monthly_budget(), dec!(800));
    }

    #[test]
    fn budgets_past_money_limits_are_rejected() {
        let mut store = BudgetStore::new();
        store.set_category_budget(ExpenseCategory::Food, dec!(300)).unwrap();
        let tiny = dec!(0.0000000000000000000000000001);
        assert!(store.set_monthly_budget(tiny).unwrap_err().is_validation());
        assert!(store.set_monthly_budget(Decimal::MAX).is_err());
        assert!(store
            .set_category_budget(ExpenseCategory::Health, dec!(10.001))
            .unwrap_err()
            .is_validation());
        assert!(store
            .set_category_budget(ExpenseCategory::Health, Decimal::MAX)
            .is_err());
        assert_eq!(store.monthly_budget(), dec!(300));
        assert_eq!(store.category_budget(ExpenseCategory::Health), Decimal::ZERO);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut store = BudgetStore::new();
        store.set_category_budget(ExpenseCategory::Food, dec!(300)).unwrap();
        store.reset_all();
        assert_eq!(store.monthly_budget(), Decimal::ZERO);
        assert!(store.category_budgets().values().all(|v| v.is_zero()));
        assert_eq!(store.category_budgets().len(), ExpenseCategory::ALL.len());
    }

    #[test]
    fn replace_rederives_total_for_category_driven_config() {
        let mut config = BudgetConfig::default();
        config.category_budgets.insert(ExpenseCategory::Food, dec!(250));
        config.monthly_budget = dec!(999);
        let store = BudgetStore::from_config(config);
        assert_eq!(store.monthly_budget(), dec!(250));
    }
}
