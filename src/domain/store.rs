use serde::{Deserialize, Serialize};

use super::category::Category;
use super::expense::Expense;

/// Ordered in-memory collection of expense records, newest first.
///
/// The store performs no validation and no persistence; the orchestrating
/// layer saves state and re-derives aggregates after each mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record at the front, preserving the newest-first ordering.
    pub fn add(&mut self, expense: Expense) {
        self.expenses.insert(0, expense);
    }

    /// Full ordered sequence, newest first.
    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    /// Lazy filtered view over one category; does not mutate the store.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Expense> {
        self.expenses
            .iter()
            .filter(move |expense| expense.category == category)
    }

    /// Replaces the whole sequence, used for bulk seed/import.
    pub fn replace_all(&mut self, expenses: Vec<Expense>) {
        self.expenses = expenses;
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(amount: f64, category: Category) -> Expense {
        Expense::manual(amount, category, "test")
    }

    #[test]
    fn add_keeps_newest_first() {
        let mut store = ExpenseStore::new();
        store.add(expense(1.0, Category::Food));
        store.add(expense(2.0, Category::Transport));
        let amounts: Vec<f64> = store.all().iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![2.0, 1.0]);
    }

    #[test]
    fn by_category_filters_without_mutating() {
        let mut store = ExpenseStore::new();
        store.add(expense(1.0, Category::Food));
        store.add(expense(2.0, Category::Shopping));
        store.add(expense(3.0, Category::Food));

        let food: Vec<f64> = store.by_category(Category::Food).map(|e| e.amount).collect();
        assert_eq!(food, vec![3.0, 1.0]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn replace_all_overwrites_contents() {
        let mut store = ExpenseStore::new();
        store.add(expense(1.0, Category::Food));
        store.replace_all(vec![expense(9.0, Category::Other)]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].amount, 9.0);
    }

    #[test]
    fn store_serializes_as_a_bare_list() {
        let mut store = ExpenseStore::new();
        store.add(expense(4.2, Category::Utilities));
        let json = serde_json::to_string(&store).unwrap();
        assert!(json.starts_with('['), "expected a JSON array: {json}");
        let back: ExpenseStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
    }
}
