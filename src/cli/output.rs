use std::fmt;

use colored::Colorize;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use spending_core::{format_money, BudgetHealth};
use spending_domain::Transaction;

const BAR_WIDTH: usize = 20;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

/// Turns ANSI styling off for the rest of the process.
pub fn disable_color() {
    colored::control::set_override(false);
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Success => format!("[✓] {text}").bright_green().to_string(),
        MessageKind::Warning => format!("[!] {text}").bright_yellow().to_string(),
        MessageKind::Error => format!("[x] {text}").bright_red().to_string(),
        MessageKind::Info => text,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        MessageKind::Error => eprintln!("{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Income green, expenses red.
pub fn money(amount: Decimal, symbol: &str, income: bool) -> String {
    let text = format_money(amount, symbol);
    if income {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}

pub fn health_label(health: BudgetHealth) -> String {
    let label = health.label();
    match health {
        BudgetHealth::Unset => label.dimmed().to_string(),
        BudgetHealth::Good => label.green().to_string(),
        BudgetHealth::Careful => label.yellow().to_string(),
        BudgetHealth::Warning => label.bright_yellow().bold().to_string(),
        BudgetHealth::Overbudget => label.bright_red().bold().to_string(),
    }
}

/// Fixed-width progress bar; `percent` is clamped to 0..=100.
pub fn bar(percent: Decimal) -> String {
    let clamped = percent.max(Decimal::ZERO).min(Decimal::ONE_HUNDRED);
    let filled = (clamped * Decimal::from(BAR_WIDTH) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// `#id  date  icon category  description  ±amount`.
pub fn transaction_line(txn: &Transaction, symbol: &str) -> String {
    let description = if txn.description.is_empty() {
        String::new()
    } else {
        format!("  {}", txn.description)
    };
    format!(
        "#{}  {}  {} {}{}  {}",
        txn.id,
        txn.date.format("%d/%m/%Y"),
        txn.icon(),
        txn.category,
        description,
        money(txn.signed_amount(), symbol, txn.is_income())
    )
}
