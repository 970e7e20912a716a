//! Derived views over the transaction and budget stores.
//!
//! Everything here is a pure query: the [`Aggregator`] borrows the current
//! state plus a reference date and recomputes from scratch on every call, so
//! running it twice over unchanged inputs yields identical output.
//!
//! Arithmetic saturates at the `Decimal` range so a hand-edited snapshot with
//! extreme values degrades to capped figures instead of panicking.

use std::{cmp::Reverse, collections::BTreeMap};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use spending_domain::{BudgetConfig, ExpenseCategory, Transaction, YearMonth};

use crate::format::{format_money, format_percent};

const CAREFUL_THRESHOLD: Decimal = Decimal::from_parts(70, 0, 0, false, 0);
const WARNING_THRESHOLD: Decimal = Decimal::from_parts(90, 0, 0, false, 0);
const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Lifetime totals across every transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    /// `income - expenses`; negative when spending exceeds income.
    pub balance: Decimal,
}

/// Qualitative budget utilisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BudgetHealth {
    /// No monthly budget configured.
    Unset,
    /// Under 70% spent.
    Good,
    /// 70% up to (not including) 90%.
    Careful,
    /// 90% through 100%.
    Warning,
    /// Above 100%.
    Overbudget,
}

impl BudgetHealth {
    pub fn from_percent(percent: Decimal) -> Self {
        if percent > HUNDRED {
            BudgetHealth::Overbudget
        } else if percent >= WARNING_THRESHOLD {
            BudgetHealth::Warning
        } else if percent >= CAREFUL_THRESHOLD {
            BudgetHealth::Careful
        } else {
            BudgetHealth::Good
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BudgetHealth::Unset => "No budget",
            BudgetHealth::Good => "Good",
            BudgetHealth::Careful => "Careful",
            BudgetHealth::Warning => "Warning",
            BudgetHealth::Overbudget => "Overbudget",
        }
    }
}

/// Current-month budget utilisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetStatus {
    pub budget: Decimal,
    pub spent: Decimal,
    /// Zero when no budget is configured.
    pub percent_spent: Decimal,
    /// `max(0, budget - spent)`.
    pub amount_left: Decimal,
    /// `budget - spent`, negative when over budget.
    pub remaining: Decimal,
    pub health: BudgetHealth,
    pub message: String,
}

impl BudgetStatus {
    pub fn label(&self) -> &'static str {
        self.health.label()
    }

    /// Percent clamped to 100 for progress bars.
    pub fn percent_capped(&self) -> Decimal {
        self.percent_spent.min(HUNDRED)
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining < Decimal::ZERO
    }
}

/// Current-month spend for a category with a configured ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpend {
    pub category: ExpenseCategory,
    pub budget: Decimal,
    pub spent: Decimal,
    pub percent_spent: Decimal,
    pub remaining: Decimal,
}

/// Expense total for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyPoint {
    pub month: YearMonth,
    pub total: Decimal,
}

/// Headline figures the dashboard collaborator renders after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub month: YearMonth,
    pub totals: Totals,
    pub month_expense: Decimal,
    pub budget_left: Decimal,
    pub status: BudgetStatus,
}

/// Read-only query surface over a transaction slice and budget configuration.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    transactions: &'a [Transaction],
    budget: &'a BudgetConfig,
    today: NaiveDate,
    currency: &'a str,
}

impl<'a> Aggregator<'a> {
    pub fn new(transactions: &'a [Transaction], budget: &'a BudgetConfig, today: NaiveDate) -> Self {
        Self {
            transactions,
            budget,
            today,
            currency: "",
        }
    }

    /// Symbol used when composing advisory messages.
    pub fn with_currency(mut self, symbol: &'a str) -> Self {
        self.currency = symbol;
        self
    }

    pub fn current_month(&self) -> YearMonth {
        YearMonth::from_date(self.today)
    }

    pub fn totals(&self) -> Totals {
        let (income, expenses) = self.transactions.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expenses), txn| {
                if txn.is_income() {
                    (income.saturating_add(txn.amount), expenses)
                } else {
                    (income, expenses.saturating_add(txn.amount))
                }
            },
        );
        Totals {
            income,
            expenses,
            balance: income.saturating_sub(expenses),
        }
    }

    fn expenses_in(&self, month: YearMonth) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions
            .iter()
            .filter(move |txn| txn.is_expense() && month.contains(txn.date))
    }

    pub fn month_expense(&self, month: YearMonth) -> Decimal {
        sum_amounts(self.expenses_in(month))
    }

    pub fn current_month_expense(&self) -> Decimal {
        self.month_expense(self.current_month())
    }

    pub fn category_monthly_spend(&self, category: ExpenseCategory) -> Decimal {
        sum_amounts(
            self.expenses_in(self.current_month())
                .filter(|txn| txn.expense_category() == Some(category)),
        )
    }

    /// Categories with a ceiling above zero, largest ceiling first; equal
    /// ceilings keep enumeration order.
    pub fn category_breakdown(&self) -> Vec<CategorySpend> {
        let mut rows: Vec<CategorySpend> = ExpenseCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let budget = self.budget.category_budget(category);
                if budget <= Decimal::ZERO {
                    return None;
                }
                let spent = self.category_monthly_spend(category);
                Some(CategorySpend {
                    category,
                    budget,
                    spent,
                    percent_spent: percent_of(spent, budget),
                    remaining: budget.saturating_sub(spent),
                })
            })
            .collect();
        rows.sort_by_key(|row| Reverse(row.budget));
        rows
    }

    /// Current-month spend per stored category name, largest first. Names
    /// outside the vocabulary are kept as-is.
    pub fn spending_by_category(&self) -> Vec<(String, Decimal)> {
        let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
        for txn in self.expenses_in(self.current_month()) {
            let total = totals.entry(txn.category.as_str()).or_default();
            *total = total.saturating_add(txn.amount);
        }
        let mut rows: Vec<(String, Decimal)> = totals
            .into_iter()
            .map(|(name, amount)| (name.to_string(), amount))
            .collect();
        rows.sort_by_key(|(_, amount)| Reverse(*amount));
        rows
    }

    pub fn budget_status(&self) -> BudgetStatus {
        let budget = self.budget.monthly_budget;
        let spent = self.current_month_expense();
        let remaining = budget.saturating_sub(spent);
        let amount_left = remaining.max(Decimal::ZERO);
        let (percent_spent, health) = if budget > Decimal::ZERO {
            let percent = percent_of(spent, budget);
            (percent, BudgetHealth::from_percent(percent))
        } else {
            (Decimal::ZERO, BudgetHealth::Unset)
        };
        let message = self.advisory(health, budget, percent_spent, amount_left, remaining);
        BudgetStatus {
            budget,
            spent,
            percent_spent,
            amount_left,
            remaining,
            health,
            message,
        }
    }

    fn advisory(
        &self,
        health: BudgetHealth,
        budget: Decimal,
        percent: Decimal,
        left: Decimal,
        remaining: Decimal,
    ) -> String {
        let money = |amount: Decimal| format_money(amount, self.currency);
        match health {
            BudgetHealth::Unset => {
                "No budget set. Set a monthly budget to track your spending.".to_string()
            }
            BudgetHealth::Good => format!("On track: {} left this month.", money(left)),
            BudgetHealth::Careful => format!(
                "Careful: {} of your budget is spent, {} left.",
                format_percent(percent),
                money(left)
            ),
            BudgetHealth::Warning => format!(
                "Warning: only {} left of your {} budget.",
                money(left),
                money(budget)
            ),
            BudgetHealth::Overbudget => {
                format!("Over budget by {} this month.", money(-remaining))
            }
        }
    }

    /// Per-day expense totals for `month`, only for days with at least one
    /// expense. Lazily evaluated; call again for a fresh pass.
    pub fn daily_series(&self, month: YearMonth) -> impl Iterator<Item = (u32, Decimal)> + 'a {
        let transactions = self.transactions;
        (1..=month.days_in_month()).filter_map(move |day| {
            let mut matched = false;
            let mut total = Decimal::ZERO;
            for txn in transactions {
                if txn.is_expense() && month.contains(txn.date) && txn.date.day() == day {
                    matched = true;
                    total = total.saturating_add(txn.amount);
                }
            }
            matched.then_some((day, total))
        })
    }

    /// Expense totals for the last `window` months ending with the current
    /// month, oldest first, zero-filled. Optionally limited to one category.
    pub fn monthly_series(
        &self,
        window: usize,
        category: Option<ExpenseCategory>,
    ) -> Vec<MonthlyPoint> {
        self.current_month()
            .trailing(window)
            .into_iter()
            .map(|month| {
                let total = sum_amounts(
                    self.expenses_in(month)
                        .filter(|txn| category.is_none() || txn.expense_category() == category),
                );
                MonthlyPoint { month, total }
            })
            .collect()
    }

    /// Most recently entered transactions, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&'a Transaction> {
        self.transactions.iter().rev().take(limit).collect()
    }

    pub fn dashboard(&self) -> Dashboard {
        let status = self.budget_status();
        Dashboard {
            month: self.current_month(),
            totals: self.totals(),
            month_expense: status.spent,
            budget_left: status.amount_left,
            status,
        }
    }
}

fn sum_amounts<'t>(transactions: impl Iterator<Item = &'t Transaction>) -> Decimal {
    transactions.fold(Decimal::ZERO, |total, txn| total.saturating_add(txn.amount))
}

/// `part / whole * 100`, saturating when the quotient leaves the range.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or(Decimal::MAX)
}
