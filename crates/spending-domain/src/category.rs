//! Fixed category vocabularies, one per transaction kind.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Icon shown for names outside both vocabularies.
pub const DEFAULT_ICON: &str = "📌";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category `{0}`")]
pub struct CategoryParseError(pub String);

/// Categories available to expense transactions and category budgets.
///
/// Declaration order is the enumeration order used for tie-breaking in
/// ranked views, so `Ord` is derived rather than implemented by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Shopping,
    Utilities,
    Health,
    Entertainment,
    Education,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Shopping,
        ExpenseCategory::Utilities,
        ExpenseCategory::Health,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Education,
        ExpenseCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Shopping => "shopping",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Health => "health",
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Education => "education",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ExpenseCategory::Food => "🍕",
            ExpenseCategory::Transport => "🚗",
            ExpenseCategory::Shopping => "🛍️",
            ExpenseCategory::Utilities => "💡",
            ExpenseCategory::Health => "🏥",
            ExpenseCategory::Entertainment => "🎬",
            ExpenseCategory::Education => "📚",
            ExpenseCategory::Other => DEFAULT_ICON,
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CategoryParseError(value.to_string()))
    }
}

/// Categories available to income transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncomeCategory {
    Salary,
    Freelance,
    Investment,
    Bonus,
    OtherIncome,
}

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 5] = [
        IncomeCategory::Salary,
        IncomeCategory::Freelance,
        IncomeCategory::Investment,
        IncomeCategory::Bonus,
        IncomeCategory::OtherIncome,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IncomeCategory::Salary => "salary",
            IncomeCategory::Freelance => "freelance",
            IncomeCategory::Investment => "investment",
            IncomeCategory::Bonus => "bonus",
            IncomeCategory::OtherIncome => "other-income",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            IncomeCategory::Salary => "💼",
            IncomeCategory::Freelance => "💻",
            IncomeCategory::Investment => "📈",
            IncomeCategory::Bonus => "🎁",
            IncomeCategory::OtherIncome => "➕",
        }
    }
}

impl fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncomeCategory {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CategoryParseError(value.to_string()))
    }
}

/// Resolves the display icon for any stored category name.
pub fn icon_for(name: &str) -> &'static str {
    if let Ok(category) = name.parse::<ExpenseCategory>() {
        return category.icon();
    }
    if let Ok(category) = name.parse::<IncomeCategory>() {
        return category.icon();
    }
    DEFAULT_ICON
}
