use std::fmt::Write;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use spending_core::Totals;
use spending_domain::Transaction;

const BANNER: &str = "SPENDING TRACKER REPORT";
const RULE_WIDTH: usize = 50;

/// Plain-text report: summary figures followed by every transaction,
/// newest entered first. Amounts always carry two decimals.
pub fn text_report(
    transactions: &[Transaction],
    totals: &Totals,
    monthly_budget: Decimal,
    symbol: &str,
    generated: NaiveDate,
) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{BANNER}");
    let _ = writeln!(out, "{heavy}\n");
    let _ = writeln!(out, "Generated: {}\n", generated.format("%d/%m/%Y"));

    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "{light}");
    let _ = writeln!(out, "Total Income: {}", fixed(totals.income, symbol));
    let _ = writeln!(out, "Total Expenses: {}", fixed(totals.expenses, symbol));
    let _ = writeln!(out, "Balance: {}", fixed(totals.balance, symbol));
    let _ = writeln!(out, "Monthly Budget: {}\n", fixed(monthly_budget, symbol));

    let _ = writeln!(out, "ALL TRANSACTIONS");
    let _ = writeln!(out, "{light}");
    for txn in transactions.iter().rev() {
        let _ = writeln!(
            out,
            "{} | {} | {} | {}",
            txn.date.format("%d/%m/%Y"),
            txn.category,
            txn.description,
            signed_fixed(txn, symbol)
        );
    }
    out
}

fn fixed(amount: Decimal, symbol: &str) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{sign}{symbol}{rounded:.2}")
}

fn signed_fixed(txn: &Transaction, symbol: &str) -> String {
    let sign = if txn.is_income() { '+' } else { '-' };
    format!("{sign}{}", fixed(txn.amount, symbol))
}
