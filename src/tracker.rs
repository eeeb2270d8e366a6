//! Application state and orchestration. The tracker owns the expense store
//! and budget configuration, persists them after every mutation, and hands
//! out derived views for the presentation layer to render.

use chrono::{DateTime, Utc};

use crate::analysis::{generate_insights, total_spent, Insight};
use crate::domain::{BudgetConfig, Category, Expense, ExpenseStore};
use crate::errors::ExpenseError;
use crate::ingest::ReceiptScanner;
use crate::storage::JsonStorage;

/// Headline figures for the stat tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_spent: f64,
    pub budget_used_pct: f64,
    pub insight_count: usize,
}

pub struct Tracker {
    store: ExpenseStore,
    budget: BudgetConfig,
    storage: JsonStorage,
}

impl Tracker {
    /// Loads persisted state from storage; missing files yield defaults.
    pub fn load(storage: JsonStorage) -> Result<Self, ExpenseError> {
        let store = storage.load_expenses()?;
        let budget = storage.load_budget()?;
        tracing::info!(expenses = store.len(), "tracker state loaded");
        Ok(Self {
            store,
            budget,
            storage,
        })
    }

    pub fn expenses(&self) -> &ExpenseStore {
        &self.store
    }

    pub fn budget(&self) -> &BudgetConfig {
        &self.budget
    }

    /// Validates raw form input and appends a manual expense.
    ///
    /// The amount must parse to a finite positive number; anything else is
    /// rejected before it can reach the store or disk.
    pub fn add_manual(
        &mut self,
        amount_text: &str,
        category_text: &str,
        description: &str,
    ) -> Result<&Expense, ExpenseError> {
        let amount = parse_amount(amount_text)?;
        let category = Category::parse(category_text)?;
        let expense = Expense::manual(amount, category, description);
        tracing::info!(amount, category = category.key(), "expense added");
        self.store.add(expense);
        self.storage.save_expenses(&self.store)?;
        Ok(&self.store.all()[0])
    }

    /// Runs the scanner and appends the extracted record on success.
    ///
    /// A failed scan leaves the store untouched; the error surfaces to the
    /// caller as a user-visible ingestion failure.
    pub fn ingest_receipt(
        &mut self,
        scanner: &dyn ReceiptScanner,
        filename: &str,
    ) -> Result<&Expense, ExpenseError> {
        let expense = scanner.scan(filename)?;
        tracing::info!(
            filename,
            amount = expense.amount,
            category = expense.category.key(),
            "receipt ingested"
        );
        self.store.add(expense);
        self.storage.save_expenses(&self.store)?;
        Ok(&self.store.all()[0])
    }

    /// Replaces the budget configuration wholesale.
    pub fn set_budget(&mut self, budget: BudgetConfig) -> Result<(), ExpenseError> {
        if !budget.monthly.is_finite() || budget.monthly < 0.0 {
            return Err(ExpenseError::InvalidAmount(budget.monthly.to_string()));
        }
        self.budget = budget;
        self.storage.save_budget(&self.budget)
    }

    /// Replaces the expense list wholesale, used for bulk import.
    pub fn replace_expenses(&mut self, expenses: Vec<Expense>) -> Result<(), ExpenseError> {
        self.store.replace_all(expenses);
        self.storage.save_expenses(&self.store)
    }

    /// Seeds the starter records when the store is empty; a no-op otherwise.
    pub fn seed_sample_data(&mut self) -> Result<bool, ExpenseError> {
        if !self.store.is_empty() {
            return Ok(false);
        }
        self.store.replace_all(sample_expenses());
        self.storage.save_expenses(&self.store)?;
        tracing::info!("sample expenses seeded");
        Ok(true)
    }

    /// Advisory messages for the current state, anchored at `now`.
    pub fn insights(&self, now: DateTime<Utc>) -> Vec<Insight> {
        generate_insights(self.store.all(), &self.budget, now)
    }

    pub fn stats(&self, now: DateTime<Utc>) -> Stats {
        let spent = total_spent(self.store.all());
        let budget_used_pct = if self.budget.has_monthly() {
            spent / self.budget.monthly * 100.0
        } else {
            0.0
        };
        Stats {
            total_spent: spent,
            budget_used_pct,
            insight_count: self.insights(now).len(),
        }
    }
}

fn parse_amount(text: &str) -> Result<f64, ExpenseError> {
    let amount: f64 = text
        .trim()
        .parse()
        .map_err(|_| ExpenseError::InvalidAmount(text.to_string()))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ExpenseError::InvalidAmount(text.to_string()));
    }
    Ok(amount)
}

/// The three starter records shown on a fresh install.
fn sample_expenses() -> Vec<Expense> {
    let now = Utc::now();
    vec![
        Expense::manual(45.67, Category::Food, "Lunch at downtown cafe")
            .with_date(now - chrono::Duration::days(1)),
        Expense::scanned(
            89.99,
            Category::Shopping,
            "Weekly groceries",
            "Whole Foods",
            0.97,
        )
        .with_date(now - chrono::Duration::days(2)),
        Expense::manual(25.00, Category::Transport, "Gas station fill-up")
            .with_date(now - chrono::Duration::days(3)),
    ]
}
