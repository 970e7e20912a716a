//! Command-line front end over a [`Tracker`] persisted in the data directory.

pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use spending_config::{Config, ConfigManager};
use spending_core::{
    format_money, format_percent, Clock, PersistenceGateway, SearchQuery, SystemClock, Tracker,
};
use spending_domain::{ExpenseCategory, TransactionDraft, TransactionKind, YearMonth};
use spending_storage_json::{write_atomic, JsonFileSlot, DEFAULT_KEY};
use tracing::{debug, warn};

use crate::{
    errors::AppError,
    export::{self, ExportFormat},
};

const DEFAULT_TREND_MONTHS: usize = 6;
const MAX_TREND_MONTHS: u64 = 120;
const DEFAULT_LIST_LIMIT: usize = 20;

/// Track income and expenses against a monthly budget.
#[derive(Parser, Debug)]
#[command(name = "spending_tracker_cli", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding config.json. Defaults to $SPENDING_TRACKER_HOME or the platform config dir.
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record an expense or income.
    Add(AddArgs),
    /// Delete a transaction by id.
    Delete { id: i64 },
    /// List transactions, newest first.
    List {
        /// Restrict to a month (YYYY-MM).
        #[arg(long)]
        month: Option<YearMonth>,
        /// Case-insensitive text to match.
        #[arg(long, short)]
        query: Option<String>,
        #[arg(long)]
        kind: Option<TransactionKind>,
        /// Show every match instead of the latest few.
        #[arg(long)]
        all: bool,
    },
    /// Totals and current-month budget status.
    Summary,
    /// Configure the monthly budget.
    #[command(subcommand)]
    Budget(BudgetCommand),
    /// Current-month spend per budgeted category.
    Breakdown,
    /// Monthly expense totals, oldest first.
    Trend {
        /// Months to show, 1 to 120.
        #[arg(
            long,
            default_value_t = DEFAULT_TREND_MONTHS,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=MAX_TREND_MONTHS)
        )]
        months: usize,
        #[arg(long)]
        category: Option<ExpenseCategory>,
    },
    /// Per-day expense totals for a month.
    Daily {
        #[arg(long)]
        month: Option<YearMonth>,
    },
    /// Export data to a file.
    Export {
        /// csv, report, or json.
        format: ExportFormat,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Set the display currency symbol.
    Currency { symbol: String },
    /// Delete every transaction and budget.
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// expense or income.
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    /// YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long, short, default_value = "")]
    pub description: String,
}

#[derive(Subcommand, Debug)]
pub enum BudgetCommand {
    /// Set the monthly total directly. Clears category allocations.
    Set { amount: Decimal },
    /// Allocate a category; the monthly total becomes the sum of allocations.
    Category {
        category: ExpenseCategory,
        amount: Decimal,
    },
    /// Zero every budget.
    Reset,
}

/// Loaded configuration plus the tracker it drives.
pub struct Session {
    pub config: Config,
    pub config_manager: ConfigManager,
    pub tracker: Tracker,
    pub data_dir: PathBuf,
}

impl Session {
    pub fn open(home: Option<PathBuf>) -> Result<Self, AppError> {
        let base = home.unwrap_or_else(ConfigManager::default_base_dir);
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;
        let data_dir = config.resolve_data_dir();
        let slot = JsonFileSlot::in_dir(&data_dir, DEFAULT_KEY)?;
        debug!(path = %slot.path().display(), "opening snapshot");

        let clock: Box<dyn Clock> = Box::new(SystemClock);
        let mut tracker = Tracker::open(PersistenceGateway::new(Box::new(slot)), clock)
            .with_currency(config.currency_symbol.clone());
        if config.remote_enabled {
            warn!("remote mirror enabled in config but this build has no remote store; changes stay local");
        }
        tracker.set_remote_enabled(config.remote_enabled);

        Ok(Self {
            config,
            config_manager,
            tracker,
            data_dir,
        })
    }
}

pub fn run(cli: Cli) -> Result<(), AppError> {
    let mut session = Session::open(cli.home)?;
    if cli.no_color || !session.config.color_enabled {
        output::disable_color();
    }
    execute(&mut session, cli.command)
}

fn execute(session: &mut Session, command: Command) -> Result<(), AppError> {
    match command {
        Command::Add(args) => add(session, args),
        Command::Delete { id } => {
            if session.tracker.remove_transaction(id) {
                output::success(format!("Deleted transaction #{id}"));
            } else {
                output::info(format!("No transaction with id {id}; nothing deleted."));
            }
            Ok(())
        }
        Command::List {
            month,
            query,
            kind,
            all,
        } => {
            list(session, month, query.unwrap_or_default(), kind, all);
            Ok(())
        }
        Command::Summary => {
            summary(session);
            Ok(())
        }
        Command::Budget(budget) => budget_command(session, budget),
        Command::Breakdown => {
            breakdown(session);
            Ok(())
        }
        Command::Trend { months, category } => {
            trend(session, months, category);
            Ok(())
        }
        Command::Daily { month } => {
            daily(session, month);
            Ok(())
        }
        Command::Export { format, output } => export_command(session, format, output),
        Command::Currency { symbol } => currency(session, symbol),
        Command::Clear { yes } => {
            if !yes {
                return Err(AppError::input("refusing to clear data without --yes"));
            }
            session.tracker.clear_all();
            output::success("All data cleared");
            Ok(())
        }
    }
}

fn add(session: &mut Session, args: AddArgs) -> Result<(), AppError> {
    let date = args
        .date
        .unwrap_or_else(|| session.tracker.today().format("%Y-%m-%d").to_string());
    let draft = TransactionDraft {
        kind: args.kind,
        amount: Some(args.amount),
        category: args.category,
        date,
        description: args.description,
    };
    let txn = session.tracker.add_transaction(draft)?;
    let label = if txn.is_income() { "Income" } else { "Expense" };
    output::success(format!(
        "{label} added: #{} {} {}",
        txn.id,
        txn.category,
        session.tracker.format_money(txn.amount)
    ));
    Ok(())
}

fn list(
    session: &Session,
    month: Option<YearMonth>,
    text: String,
    kind: Option<TransactionKind>,
    all: bool,
) {
    let query = SearchQuery::text(text).with_month(month).with_kind(kind);
    let hits = session.tracker.search(&query);
    if hits.is_empty() {
        output::info("No transactions found.");
        return;
    }
    let limit = if all { hits.len() } else { DEFAULT_LIST_LIMIT };
    let symbol = session.tracker.currency_symbol();
    for txn in hits.iter().take(limit) {
        output::info(output::transaction_line(txn, symbol));
    }
    if hits.len() > limit {
        output::info(format!("... {} more (use --all)", hits.len() - limit));
    }
}

fn summary(session: &Session) {
    let aggregator = session.tracker.aggregator();
    let dashboard = aggregator.dashboard();
    let symbol = session.tracker.currency_symbol();
    let status = &dashboard.status;

    output::section(format!("Summary for {}", dashboard.month));
    output::info(format!(
        "Total income:    {}",
        output::money(dashboard.totals.income, symbol, true)
    ));
    output::info(format!(
        "Total expenses:  {}",
        output::money(dashboard.totals.expenses, symbol, false)
    ));
    output::info(format!(
        "Balance:         {}",
        format_money(dashboard.totals.balance, symbol)
    ));
    output::info(format!(
        "This month:      {}",
        format_money(dashboard.month_expense, symbol)
    ));

    output::section("Budget");
    output::info(format!(
        "Monthly budget:  {}",
        format_money(status.budget, symbol)
    ));
    output::info(format!(
        "Spent:           {} {}",
        output::bar(status.percent_capped()),
        format_percent(status.percent_spent)
    ));
    output::info(format!(
        "Left:            {}",
        format_money(status.amount_left, symbol)
    ));
    output::info(format!("Status:          {}", output::health_label(status.health)));
    output::info(&status.message);

    let recent = aggregator.recent(5);
    if !recent.is_empty() {
        output::section("Recent");
        for txn in recent {
            output::info(output::transaction_line(txn, symbol));
        }
    }
}

fn budget_command(session: &mut Session, command: BudgetCommand) -> Result<(), AppError> {
    match command {
        BudgetCommand::Set { amount } => {
            session.tracker.set_monthly_budget(amount)?;
            output::success(format!(
                "Monthly budget set to {}",
                session.tracker.format_money(amount)
            ));
        }
        BudgetCommand::Category { category, amount } => {
            if amount.is_sign_negative() {
                return Err(AppError::input("category budget cannot be negative"));
            }
            session.tracker.set_category_budget(category, amount)?;
            output::success(format!(
                "{} {} budget set to {}; monthly total {}",
                category.icon(),
                category,
                session.tracker.format_money(amount),
                session
                    .tracker
                    .format_money(session.tracker.budget().monthly_budget())
            ));
        }
        BudgetCommand::Reset => {
            session.tracker.reset_budgets();
            output::success("All budgets reset");
        }
    }
    Ok(())
}

fn breakdown(session: &Session) {
    let aggregator = session.tracker.aggregator();
    let symbol = session.tracker.currency_symbol();

    output::section(format!("Category budgets for {}", aggregator.current_month()));
    let rows = aggregator.category_breakdown();
    if rows.is_empty() {
        output::info("No category budgets set.");
    }
    for row in rows {
        let line = format!(
            "{} {:<14} {} {:>7}  {} of {}",
            row.category.icon(),
            row.category.as_str(),
            output::bar(row.percent_spent),
            format_percent(row.percent_spent),
            format_money(row.spent, symbol),
            format_money(row.budget, symbol)
        );
        if row.remaining.is_sign_negative() && !row.remaining.is_zero() {
            output::warning(line);
        } else {
            output::info(line);
        }
    }

    let spending = aggregator.spending_by_category();
    if !spending.is_empty() {
        output::section("Spending by category");
        for (category, amount) in spending {
            output::info(format!(
                "{} {:<14} {}",
                spending_domain::icon_for(&category),
                category,
                format_money(amount, symbol)
            ));
        }
    }
}

fn trend(session: &Session, months: usize, category: Option<ExpenseCategory>) {
    let aggregator = session.tracker.aggregator();
    let symbol = session.tracker.currency_symbol();
    let series = aggregator.monthly_series(months, category);
    let peak = series
        .iter()
        .map(|point| point.total)
        .max()
        .unwrap_or(Decimal::ZERO);

    let title = match category {
        Some(category) => format!("Monthly {} spending", category),
        None => "Monthly spending".to_string(),
    };
    output::section(title);
    for point in series {
        let percent = if peak.is_zero() {
            Decimal::ZERO
        } else {
            point.total / peak * Decimal::ONE_HUNDRED
        };
        output::info(format!(
            "{}  {}  {}",
            point.month,
            output::bar(percent),
            format_money(point.total, symbol)
        ));
    }
}

fn daily(session: &Session, month: Option<YearMonth>) {
    let aggregator = session.tracker.aggregator();
    let month = month.unwrap_or_else(|| aggregator.current_month());
    let symbol = session.tracker.currency_symbol();

    output::section(format!("Daily spending for {month}"));
    let mut any = false;
    for (day, total) in aggregator.daily_series(month) {
        any = true;
        output::info(format!("{day:>2}  {}", format_money(total, symbol)));
    }
    if !any {
        output::info("No expenses recorded.");
    }
}

fn export_command(
    session: &Session,
    format: ExportFormat,
    output_path: Option<PathBuf>,
) -> Result<(), AppError> {
    let tracker = &session.tracker;
    let today = tracker.today();
    let path = output_path.unwrap_or_else(|| {
        session
            .data_dir
            .join(export::default_file_name(format.extension(), today))
    });

    match format {
        ExportFormat::Csv => {
            let mut buffer = Vec::new();
            export::write_csv(tracker.transactions(), &mut buffer)?;
            let text = String::from_utf8(buffer).map_err(|err| AppError::Export(err.to_string()))?;
            write_atomic(&path, &text)?;
        }
        ExportFormat::Report => {
            let report = export::text_report(
                tracker.transactions(),
                &tracker.aggregator().totals(),
                tracker.budget().monthly_budget(),
                tracker.currency_symbol(),
                today,
            );
            write_atomic(&path, &report)?;
        }
        ExportFormat::Json => {
            write_atomic(&path, &export::json_backup(&tracker.snapshot())?)?;
        }
    }
    output::success(format!("Exported {} to {}", format, path.display()));
    Ok(())
}

fn currency(session: &mut Session, symbol: String) -> Result<(), AppError> {
    let symbol = symbol.trim().to_string();
    if symbol.is_empty() {
        return Err(AppError::input("currency symbol cannot be empty"));
    }
    if !session.tracker.set_currency_symbol(&symbol) {
        output::info(format!("Currency already set to {symbol}"));
        return Ok(());
    }
    session.config.currency_symbol = symbol.clone();
    session.config_manager.save(&session.config)?;
    output::success(format!("Currency set to {symbol}"));
    Ok(())
}
