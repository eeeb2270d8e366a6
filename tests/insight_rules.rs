use chrono::Utc;
use expense_core::analysis::{category_totals, total_spent, trend_series, InsightKind};
use expense_core::domain::BudgetConfig;
use expense_core::storage::JsonStorage;
use expense_core::tracker::Tracker;
use tempfile::tempdir;

fn tracker() -> (tempfile::TempDir, Tracker) {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    let tracker = Tracker::load(storage).unwrap();
    (temp, tracker)
}

fn monthly(amount: f64) -> BudgetConfig {
    BudgetConfig {
        monthly: amount,
        ..Default::default()
    }
}

#[test]
fn over_budget_flow_end_to_end() {
    let (_temp, mut tracker) = tracker();
    tracker.set_budget(monthly(100.0)).unwrap();
    tracker.add_manual("45.67", "food", "Dinner").unwrap();
    tracker.add_manual("89.45", "shopping", "Groceries").unwrap();

    let insights = tracker.insights(Utc::now());
    assert_eq!(insights[0].kind, InsightKind::Warning);
    assert!(insights[0].message.contains("135.1%"));
    assert!(insights[0].message.contains("Consider reducing"));

    let stats = tracker.stats(Utc::now());
    assert!((stats.total_spent - 135.12).abs() < 1e-9);
    assert!((stats.budget_used_pct - 135.12).abs() < 1e-9);
    assert_eq!(stats.insight_count, insights.len());
}

#[test]
fn totals_sum_matches_total_spent_after_mixed_entries() {
    let (_temp, mut tracker) = tracker();
    tracker.add_manual("12.50", "food", "Lunch").unwrap();
    tracker.add_manual("30.00", "transport", "Fuel").unwrap();
    tracker.add_manual("7.25", "food", "Snack").unwrap();

    let expenses = tracker.expenses().all();
    let totals = category_totals(expenses);
    assert!((totals.total() - total_spent(expenses)).abs() < 1e-9);
}

#[test]
fn trend_series_covers_seeded_data() {
    let (_temp, mut tracker) = tracker();
    tracker.seed_sample_data().unwrap();

    let reference = Utc::now().date_naive();
    let series = trend_series(tracker.expenses().all(), 7, reference);
    assert_eq!(series.len(), 7);
    let window_total: f64 = series.iter().map(|point| point.total).sum();
    // All three samples fall within the trailing week.
    assert!((window_total - total_spent(tracker.expenses().all())).abs() < 1e-9);
}

#[test]
fn seeded_data_reports_scanned_receipt_accuracy() {
    let (_temp, mut tracker) = tracker();
    tracker.seed_sample_data().unwrap();

    let insights = tracker.insights(Utc::now());
    assert!(insights
        .iter()
        .any(|i| i.message.contains("1 receipts") && i.message.contains("97.0% accuracy")));
}

#[test]
fn empty_tracker_has_no_insights_but_zeroed_stats() {
    let (_temp, mut tracker) = tracker();
    tracker.set_budget(monthly(500.0)).unwrap();

    assert!(tracker.insights(Utc::now()).is_empty());
    let stats = tracker.stats(Utc::now());
    assert_eq!(stats.total_spent, 0.0);
    assert_eq!(stats.budget_used_pct, 0.0);
    assert_eq!(stats.insight_count, 0);
}

#[test]
fn projection_warning_appears_with_steady_spending() {
    let (_temp, mut tracker) = tracker();
    tracker.set_budget(monthly(500.0)).unwrap();
    // Five expenses today: 100 total in one active day projects to 3000.
    for _ in 0..5 {
        tracker.add_manual("20.00", "food", "Takeout").unwrap();
    }

    let insights = tracker.insights(Utc::now());
    assert!(insights
        .iter()
        .any(|i| i.message.contains("exceed your budget by $2500.00")));
}
