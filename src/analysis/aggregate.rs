use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::domain::{Category, Expense};

/// Per-category totals in first-appearance order.
///
/// Order follows the expense sequence handed in (newest first when coming
/// from the store). That order is what makes the top-category tie-break
/// deterministic: on equal totals the earlier entry wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<(Category, f64)>,
}

impl CategoryTotals {
    /// Total for a category; absent categories yield `None`, never `0`.
    pub fn get(&self, category: Category) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum across all categories.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, total)| total).sum()
    }

    /// Category with the largest total, or `None` when no expenses exist.
    /// Strict comparison keeps the first-appearing category on ties.
    pub fn top(&self) -> Option<(Category, f64)> {
        let mut best: Option<(Category, f64)> = None;
        for &(category, total) in &self.entries {
            match best {
                Some((_, best_total)) if total > best_total => best = Some((category, total)),
                None => best = Some((category, total)),
                _ => {}
            }
        }
        best
    }
}

/// Sums amounts per category; categories with no expenses are absent.
pub fn category_totals(expenses: &[Expense]) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for expense in expenses {
        match totals
            .entries
            .iter_mut()
            .find(|(category, _)| *category == expense.category)
        {
            Some((_, total)) => *total += expense.amount,
            None => totals.entries.push((expense.category, expense.amount)),
        }
    }
    totals
}

/// Sum of all expense amounts.
pub fn total_spent(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// One point in a daily spending series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub label: String,
    pub total: f64,
}

/// Daily totals for the `days` calendar days ending at `reference` inclusive.
///
/// Bucketing is by calendar date of the stored UTC timestamp, not by
/// 24-hour windows or the machine's local zone: two timestamps a couple of
/// hours apart across UTC midnight land in different buckets. The result
/// lists days in chronological order, zero-total days included; days that
/// fall outside chrono's representable date range are omitted, so any
/// practical window yields exactly `days` entries.
pub fn trend_series(expenses: &[Expense], days: u32, reference: NaiveDate) -> Vec<TrendPoint> {
    let mut series = Vec::new();
    for offset in (0..days as i64).rev() {
        let Some(day) = reference.checked_sub_signed(Duration::days(offset)) else {
            continue;
        };
        let total = expenses
            .iter()
            .filter(|expense| expense.calendar_date() == day)
            .map(|expense| expense.amount)
            .sum();
        series.push(TrendPoint {
            date: day,
            label: day.format("%b %-d").to_string(),
            total,
        });
    }
    series
}

/// Count of distinct calendar dates across all expenses, not just a window.
pub fn days_with_expenses(expenses: &[Expense]) -> usize {
    let dates: HashSet<NaiveDate> = expenses
        .iter()
        .map(|expense| expense.calendar_date())
        .collect();
    dates.len()
}
