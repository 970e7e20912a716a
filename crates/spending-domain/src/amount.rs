//! Money limits plus serde helpers that keep monetary values as exact JSON
//! numbers.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};

use crate::category::ExpenseCategory;

/// Largest amount accepted from input: 999,999,999,999.99.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Most fractional digits accepted from input.
pub const MAX_SCALE: u32 = 2;

/// `true` when `amount` fits the magnitude cap and has at most two
/// significant fractional digits (`12.50` passes, `12.505` does not).
pub fn within_limits(amount: Decimal) -> bool {
    amount.abs() <= MAX_AMOUNT && amount.normalize().scale() <= MAX_SCALE
}

struct ExactRef<'a>(&'a Decimal);

impl Serialize for ExactRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::arbitrary_precision::serialize(self.0, serializer)
    }
}

#[derive(Deserialize)]
struct ExactAmount(#[serde(with = "rust_decimal::serde::arbitrary_precision")] Decimal);

/// Every expense category with a zero allocation.
pub fn zeroed_category_budgets() -> BTreeMap<ExpenseCategory, Decimal> {
    ExpenseCategory::ALL
        .into_iter()
        .map(|category| (category, Decimal::ZERO))
        .collect()
}

/// `categoryBudgets` map: category name to JSON number.
///
/// Deserialisation starts from the zeroed map so categories missing from the
/// payload stay present, and drops names outside the expense vocabulary.
pub mod category_budgets {
    use super::*;

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<ExpenseCategory, Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(map.len()))?;
        for (category, amount) in map {
            out.serialize_entry(category.as_str(), &ExactRef(amount))?;
        }
        out.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<ExpenseCategory, Decimal>, D::Error> {
        let raw = BTreeMap::<String, ExactAmount>::deserialize(deserializer)?;
        let mut map = zeroed_category_budgets();
        for (name, ExactAmount(amount)) in raw {
            if let Ok(category) = name.parse::<ExpenseCategory>() {
                map.insert(category, amount.max(Decimal::ZERO));
            }
        }
        Ok(map)
    }
}
