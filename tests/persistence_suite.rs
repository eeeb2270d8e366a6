use std::fs;
use std::path::{Path, PathBuf};

use expense_core::domain::{BudgetConfig, Category, Expense, ExpenseStore};
use expense_core::storage::JsonStorage;
use expense_core::tracker::Tracker;
use tempfile::tempdir;

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn missing_files_load_as_defaults() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();

    let store = storage.load_expenses().expect("load expenses");
    assert!(store.is_empty());

    let budget = storage.load_budget().expect("load budget");
    assert_eq!(budget, BudgetConfig::default());
}

#[test]
fn expenses_round_trip_in_order() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();

    let mut store = ExpenseStore::new();
    store.add(Expense::manual(10.0, Category::Food, "first"));
    store.add(Expense::manual(20.0, Category::Shopping, "second"));
    storage.save_expenses(&store).expect("save");

    let loaded = storage.load_expenses().expect("reload");
    let amounts: Vec<f64> = loaded.all().iter().map(|e| e.amount).collect();
    assert_eq!(amounts, vec![20.0, 10.0]);
}

#[test]
fn budget_round_trips_with_category_limits() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();

    let mut budget = BudgetConfig {
        monthly: 800.0,
        ..Default::default()
    };
    budget.set_limit(Category::Food, 200.0);
    storage.save_budget(&budget).expect("save");

    let loaded = storage.load_budget().expect("reload");
    assert_eq!(loaded, budget);
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();

    let mut store = ExpenseStore::new();
    store.add(Expense::manual(42.0, Category::Food, "original"));
    storage.save_expenses(&store).expect("initial save");
    let original = fs::read_to_string(storage.expenses_path()).expect("read original");

    // Create a directory that collides with the temp file name to force the
    // staged write to fail.
    let tmp_path = tmp_path_for(&storage.expenses_path());
    fs::create_dir_all(&tmp_path).unwrap();

    store.add(Expense::manual(99.0, Category::Food, "new"));
    let result = storage.save_expenses(&store);
    assert!(result.is_err(), "expected save to fail");

    let current = fs::read_to_string(storage.expenses_path()).expect("read after failure");
    assert_eq!(original, current);
}

#[test]
fn in_memory_state_stays_authoritative_when_save_fails() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    let mut tracker = Tracker::load(storage.clone()).unwrap();

    let tmp_path = tmp_path_for(&storage.expenses_path());
    fs::create_dir_all(&tmp_path).unwrap();

    let result = tracker.add_manual("15.00", "transport", "Bus ticket");
    assert!(result.is_err(), "save should surface the failure");
    assert_eq!(tracker.expenses().len(), 1, "mutation applied in memory");
}
