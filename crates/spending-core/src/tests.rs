use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use spending_domain::{ExpenseCategory, TransactionDraft, YearMonth};

use crate::{
    BudgetHealth, Change, Dashboard, FixedClock, MemoryRemote, MemorySlot, PersistenceGateway,
    SearchQuery, SnapshotSlot, Tracker,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tracker_on(date: NaiveDate, slot: Arc<MemorySlot>) -> Tracker {
    let gateway = PersistenceGateway::new(Box::new(slot));
    Tracker::open(gateway, Box::new(FixedClock::on(date)))
}

fn fresh() -> Tracker {
    tracker_on(day(2024, 6, 15), Arc::new(MemorySlot::new()))
}

fn food(amount: Decimal, date: &str) -> TransactionDraft {
    TransactionDraft::expense(amount, "food", date)
}

#[test]
fn expense_on_empty_store_drives_balance_negative() {
    let mut tracker = fresh();
    tracker.add_transaction(food(dec!(500), "2024-06-15")).unwrap();

    let totals = tracker.aggregator().totals();
    assert_eq!(totals.expenses, dec!(500));
    assert_eq!(totals.income, Decimal::ZERO);
    assert_eq!(totals.balance, dec!(-500));
}

#[test]
fn half_spent_budget_reports_good() {
    let mut tracker = fresh();
    tracker.set_monthly_budget(dec!(1000)).unwrap();
    tracker.add_transaction(food(dec!(500), "2024-06-15")).unwrap();

    let status = tracker.aggregator().budget_status();
    assert_eq!(status.percent_spent, dec!(50));
    assert_eq!(status.label(), "Good");
    assert_eq!(status.amount_left, dec!(500));
}

#[test]
fn category_budgets_sum_into_monthly_total() {
    let mut tracker = fresh();
    tracker.set_category_budget(ExpenseCategory::Food, dec!(300)).unwrap();
    tracker.set_category_budget(ExpenseCategory::Transport, dec!(200)).unwrap();

    assert_eq!(tracker.budget().monthly_budget(), dec!(500));
    assert!(tracker.budget().is_category_driven());
}

#[test]
fn month_boundary_keeps_series_points_apart() {
    let mut tracker = tracker_on(day(2024, 7, 10), Arc::new(MemorySlot::new()));
    tracker.add_transaction(food(dec!(100), "2024-06-01")).unwrap();
    tracker.add_transaction(food(dec!(100), "2024-07-01")).unwrap();

    let series = tracker.aggregator().monthly_series(2, None);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].month, YearMonth::new(2024, 6).unwrap());
    assert_eq!(series[0].total, dec!(100));
    assert_eq!(series[1].month, YearMonth::new(2024, 7).unwrap());
    assert_eq!(series[1].total, dec!(100));
}

#[test]
fn removing_unknown_id_changes_nothing() {
    let slot = Arc::new(MemorySlot::new());
    let mut tracker = tracker_on(day(2024, 6, 15), slot.clone());
    tracker.add_transaction(food(dec!(20), "2024-06-15")).unwrap();
    let before = slot.contents();

    assert!(!tracker.remove_transaction(-1));
    assert_eq!(tracker.transactions().len(), 1);
    assert_eq!(slot.contents(), before);
}

#[test]
fn corrupted_slot_opens_empty() {
    let slot = Arc::new(MemorySlot::with_payload("{\"transactions\": [{\"id\": oops"));
    let tracker = tracker_on(day(2024, 6, 15), slot);

    assert!(tracker.transactions().is_empty());
    assert_eq!(tracker.budget().monthly_budget(), Decimal::ZERO);
    assert!(tracker
        .budget()
        .category_budgets()
        .values()
        .all(|amount| amount.is_zero()));
    assert_eq!(tracker.aggregator().budget_status().health, BudgetHealth::Unset);
}

#[test]
fn invalid_drafts_leave_state_untouched() {
    let slot = Arc::new(MemorySlot::new());
    let mut tracker = tracker_on(day(2024, 6, 15), slot.clone());

    let drafts = [
        food(dec!(0), "2024-06-15"),
        food(dec!(-5), "2024-06-15"),
        TransactionDraft::expense(dec!(10), "salary", "2024-06-15"),
        TransactionDraft::expense(dec!(10), "", "2024-06-15"),
        food(dec!(10), "15/06/2024"),
        TransactionDraft::default(),
    ];
    for draft in drafts {
        let err = tracker.add_transaction(draft).unwrap_err();
        assert!(err.is_validation(), "{err}");
    }
    assert!(tracker.transactions().is_empty());
    assert!(slot.contents().is_none());
}

#[test]
fn balance_matches_income_minus_expenses() {
    let mut tracker = fresh();
    tracker
        .add_transaction(TransactionDraft::income(dec!(1200.50), "salary", "2024-06-01"))
        .unwrap();
    tracker.add_transaction(food(dec!(99.99), "2024-06-02")).unwrap();
    tracker
        .add_transaction(TransactionDraft::expense(dec!(45), "transport", "2024-05-20"))
        .unwrap();

    let totals = tracker.aggregator().totals();
    assert_eq!(totals.balance, totals.income - totals.expenses);
    assert_eq!(totals.balance, dec!(1055.51));
}

#[test]
fn ids_stay_unique_within_one_instant() {
    let mut tracker = fresh();
    let ids: Vec<i64> = (0..5)
        .map(|_| tracker.add_transaction(food(dec!(1), "2024-06-15")).unwrap().id)
        .collect();

    let mut deduped = ids.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
}

#[test]
fn direct_total_overrides_category_allocations() {
    let mut tracker = fresh();
    tracker.set_category_budget(ExpenseCategory::Food, dec!(300)).unwrap();
    tracker.set_monthly_budget(dec!(900)).unwrap();

    assert_eq!(tracker.budget().monthly_budget(), dec!(900));
    assert!(!tracker.budget().is_category_driven());
    assert!(tracker.set_monthly_budget(Decimal::ZERO).is_err());
    assert_eq!(tracker.budget().monthly_budget(), dec!(900));
}

#[test]
fn state_survives_reopen() {
    let slot = Arc::new(MemorySlot::new());
    let mut tracker = tracker_on(day(2024, 6, 15), slot.clone());
    tracker.set_category_budget(ExpenseCategory::Health, dec!(250)).unwrap();
    let added = tracker
        .add_transaction(food(dec!(12.5), "2024-06-14").with_description("Lunch"))
        .unwrap();
    let before = tracker.snapshot();

    let reopened = tracker_on(day(2024, 6, 15), slot);
    assert_eq!(reopened.snapshot(), before);
    assert_eq!(reopened.transaction(added.id).unwrap().description, "Lunch");
    assert_eq!(reopened.budget().monthly_budget(), dec!(250));
}

#[test]
fn budget_status_is_stable_between_mutations() {
    let mut tracker = fresh();
    tracker.set_monthly_budget(dec!(400)).unwrap();
    tracker.add_transaction(food(dec!(300), "2024-06-03")).unwrap();

    let aggregator = tracker.aggregator();
    let first = aggregator.budget_status();
    assert_eq!(first, aggregator.budget_status());
    assert_eq!(first.health, BudgetHealth::Careful);
}

#[test]
fn listeners_see_every_commit() {
    let seen: Arc<Mutex<Vec<(Change, Decimal)>>> = Arc::default();
    let sink = seen.clone();
    let mut tracker = fresh();
    tracker.subscribe(move |change: &Change, dashboard: &Dashboard| {
        sink.lock()
            .unwrap()
            .push((change.clone(), dashboard.month_expense));
    });

    let txn = tracker.add_transaction(food(dec!(70), "2024-06-10")).unwrap();
    tracker.set_monthly_budget(dec!(100)).unwrap();
    tracker.remove_transaction(txn.id);
    assert!(tracker.set_currency_symbol("$"));
    assert!(!tracker.set_currency_symbol("$"));

    let seen = seen.lock().unwrap();
    let changes: Vec<&Change> = seen.iter().map(|(change, _)| change).collect();
    assert_eq!(
        changes,
        vec![
            &Change::Added(txn.clone()),
            &Change::BudgetChanged,
            &Change::Removed(txn.id),
            &Change::CurrencyChanged("$".into()),
        ]
    );
    assert_eq!(seen[0].1, dec!(70));
    assert_eq!(seen[2].1, Decimal::ZERO);
}

#[test]
fn currency_flows_into_status_messages() {
    let mut tracker = fresh();
    tracker.set_monthly_budget(dec!(1000)).unwrap();
    tracker.set_currency_symbol("$");

    assert_eq!(tracker.format_money(dec!(-12.5)), "-$ 12.50");
    assert!(tracker.aggregator().budget_status().message.contains("$ 1000"));
}

#[test]
fn clear_all_wipes_transactions_and_budgets() {
    let slot = Arc::new(MemorySlot::new());
    let mut tracker = tracker_on(day(2024, 6, 15), slot.clone());
    tracker.set_category_budget(ExpenseCategory::Food, dec!(300)).unwrap();
    tracker.add_transaction(food(dec!(5), "2024-06-15")).unwrap();

    tracker.clear_all();
    assert!(tracker.transactions().is_empty());
    assert_eq!(tracker.budget().monthly_budget(), Decimal::ZERO);
    assert!(slot.contents().is_none());

    let reopened = tracker_on(day(2024, 6, 15), slot);
    assert!(reopened.snapshot().is_empty());
}

#[test]
fn search_goes_through_the_facade() {
    let mut tracker = fresh();
    tracker
        .add_transaction(food(dec!(8), "2024-06-02").with_description("Coffee beans"))
        .unwrap();
    tracker.add_transaction(food(dec!(9), "2024-05-30")).unwrap();

    let june = YearMonth::new(2024, 6).unwrap();
    let hits = tracker.search(&SearchQuery::text("coffee").with_month(Some(june)));
    assert_eq!(hits.len(), 1);
    assert!(tracker.search(&SearchQuery::text("tea")).is_empty());
}

#[test]
fn remote_failure_never_touches_local_state() {
    let slot = Arc::new(MemorySlot::new());
    let remote = MemoryRemote::new();
    remote.set_offline(true);
    let gateway = PersistenceGateway::new(Box::new(slot.clone())).with_remote(Box::new(remote.clone()));
    let mut tracker = Tracker::open(gateway, Box::new(FixedClock::on(day(2024, 6, 15))));

    let txn = tracker.add_transaction(food(dec!(40), "2024-06-15")).unwrap();
    assert_eq!(tracker.pending_remote(), 0);
    assert!(remote.ids().is_empty());
    assert_eq!(tracker.transactions(), &[txn]);
    assert!(slot.read().unwrap().is_some());
    assert!(!tracker.pull_remote());
    assert_eq!(tracker.transactions().len(), 1);
}

#[test]
fn remote_mirror_follows_mutations_and_pull_replaces_list() {
    let remote = MemoryRemote::new();
    let gateway = PersistenceGateway::new(Box::new(MemorySlot::new()))
        .with_remote(Box::new(remote.clone()));
    let mut tracker = Tracker::open(gateway, Box::new(FixedClock::on(day(2024, 6, 15))));

    let kept = tracker.add_transaction(food(dec!(10), "2024-06-15")).unwrap();
    let dropped = tracker.add_transaction(food(dec!(20), "2024-06-15")).unwrap();
    assert_eq!(remote.ids(), vec![kept.id, dropped.id]);
    tracker.remove_transaction(dropped.id);
    assert_eq!(tracker.pending_remote(), 0);
    assert_eq!(remote.ids(), vec![kept.id]);

    tracker.set_monthly_budget(dec!(700)).unwrap();
    let mut elsewhere = kept.clone();
    elsewhere.id = kept.id + 1_000;
    elsewhere.amount = dec!(55);
    remote.seed(vec![elsewhere]);

    assert!(tracker.pull_remote());
    assert_eq!(tracker.transactions().len(), 2);
    assert_eq!(tracker.budget().monthly_budget(), dec!(700));

    tracker.set_remote_enabled(false);
    tracker.add_transaction(food(dec!(1), "2024-06-15")).unwrap();
    assert_eq!(tracker.pending_remote(), 0);
    assert_eq!(tracker.push_all(), 0);
}

#[test]
fn push_all_mirrors_every_local_transaction() {
    let slot = Arc::new(MemorySlot::new());
    let mut local = tracker_on(day(2024, 6, 15), slot.clone());
    let a = local.add_transaction(food(dec!(3), "2024-06-01")).unwrap();
    let b = local.add_transaction(food(dec!(4), "2024-06-02")).unwrap();

    let remote = MemoryRemote::new();
    let gateway = PersistenceGateway::new(Box::new(slot)).with_remote(Box::new(remote.clone()));
    let mut tracker = Tracker::open(gateway, Box::new(FixedClock::on(day(2024, 6, 15))));
    assert_eq!(tracker.push_all(), 2);
    assert_eq!(remote.ids(), vec![a.id, b.id]);

    tracker.clear_all();
    assert!(remote.ids().is_empty());
}

#[test]
fn amounts_past_money_limits_are_rejected() {
    let slot = Arc::new(MemorySlot::new());
    let mut tracker = tracker_on(day(2024, 6, 15), slot.clone());
    for amount in [dec!(1234567890123.456789), Decimal::MAX, dec!(0.001)] {
        assert!(tracker.add_transaction(food(amount, "2024-06-15")).unwrap_err().is_validation());
    }
    assert!(tracker
        .set_monthly_budget(dec!(0.0000000000000000000000000001))
        .is_err());
    assert!(tracker.set_category_budget(ExpenseCategory::Food, Decimal::MAX).is_err());
    assert!(tracker.transactions().is_empty());
    assert!(slot.contents().is_none());
}

#[test]
fn precise_amounts_survive_reopen_exactly() {
    let slot = Arc::new(MemorySlot::new());
    let mut tracker = tracker_on(day(2024, 6, 15), slot.clone());
    tracker.add_transaction(food(dec!(999999999999.99), "2024-06-15")).unwrap();
    tracker.add_transaction(food(dec!(0.01), "2024-06-15")).unwrap();
    tracker.set_monthly_budget(dec!(123456789.12)).unwrap();
    let before = tracker.snapshot();

    let reopened = tracker_on(day(2024, 6, 15), slot);
    assert_eq!(reopened.snapshot(), before);
    assert_eq!(reopened.aggregator().totals().expenses, dec!(1000000000000.00));
}

#[test]
fn extreme_persisted_values_never_panic_queries() {
    let payload = format!(
        r#"{{"transactions":[
            {{"id":1,"type":"expense","amount":{max},"category":"food","date":"2024-06-03","timestamp":"2024-06-03T08:00:00Z"}},
            {{"id":2,"type":"expense","amount":{max},"category":"food","date":"2024-06-03","timestamp":"2024-06-03T09:00:00Z"}},
            {{"id":3,"type":"income","amount":{max},"category":"salary","date":"2024-06-04","timestamp":"2024-06-04T09:00:00Z"}}
        ],"monthlyBudget":0.0000000000000000000000000001,
        "categoryBudgets":{{"food":0.0000000000000000000000000001}}}}"#,
        max = Decimal::MAX
    );
    let slot = Arc::new(MemorySlot::with_payload(payload));
    let tracker = tracker_on(day(2024, 6, 15), slot);
    assert_eq!(tracker.transactions().len(), 3);

    let aggregator = tracker.aggregator();
    let totals = aggregator.totals();
    assert_eq!(totals.expenses, Decimal::MAX);
    assert_eq!(totals.balance, Decimal::ZERO);

    let status = aggregator.budget_status();
    assert_eq!(status.health, BudgetHealth::Overbudget);
    assert_eq!(status.percent_spent, Decimal::MAX);
    assert_eq!(aggregator.category_breakdown()[0].percent_spent, Decimal::MAX);
    let june = YearMonth::new(2024, 6).unwrap();
    assert_eq!(aggregator.daily_series(june).collect::<Vec<_>>(), vec![(3, Decimal::MAX)]);
    assert_eq!(aggregator.monthly_series(1, None)[0].total, Decimal::MAX);
    assert_eq!(tracker.dashboard().month_expense, Decimal::MAX);
}
