use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{BudgetConfig, Expense};

use super::aggregate::{category_totals, days_with_expenses, total_spent};

const BUDGET_CRITICAL_PCT: f64 = 90.0;
const BUDGET_WATCH_PCT: f64 = 75.0;
const FREQUENCY_WINDOW_DAYS: i64 = 7;
const FREQUENCY_THRESHOLD: usize = 10;
const PROJECTION_MIN_EXPENSES: usize = 5;
const PROJECTION_DAYS: f64 = 30.0;

/// Severity of an advisory message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Success,
    Info,
}

/// A derived advisory message. Ephemeral: recomputed on every call, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

impl Insight {
    fn warning(message: String) -> Self {
        Self {
            kind: InsightKind::Warning,
            message,
        }
    }

    fn success(message: String) -> Self {
        Self {
            kind: InsightKind::Success,
            message,
        }
    }

    fn info(message: String) -> Self {
        Self {
            kind: InsightKind::Info,
            message,
        }
    }
}

/// Evaluates the fixed advisory rules over the expense list.
///
/// Pure and stateless; `now` anchors the trailing seven-day frequency
/// window so callers and tests control the clock. Rules append
/// independently, in a fixed order, and an empty expense list short-circuits
/// to no insights regardless of budget configuration.
pub fn generate_insights(
    expenses: &[Expense],
    budget: &BudgetConfig,
    now: DateTime<Utc>,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if expenses.is_empty() {
        return insights;
    }

    let totals = category_totals(expenses);
    let spent = total_spent(expenses);

    // Budget usage. Thresholds are strict: exactly 90% stays in the watch
    // branch and exactly 75% counts as on track.
    if budget.has_monthly() {
        let used_pct = spent / budget.monthly * 100.0;
        if used_pct > BUDGET_CRITICAL_PCT {
            insights.push(Insight::warning(format!(
                "You've used {used_pct:.1}% of your monthly budget. Consider reducing spending."
            )));
        } else if used_pct > BUDGET_WATCH_PCT {
            insights.push(Insight::warning(format!(
                "You're at {used_pct:.1}% of your monthly budget. Monitor your spending closely."
            )));
        } else {
            insights.push(Insight::success(format!(
                "Great job! You're at {used_pct:.1}% of your monthly budget."
            )));
        }
    }

    // Top category share. Guarded by the non-empty check above, so the
    // division is always defined.
    if let Some((top, top_total)) = totals.top() {
        let share_pct = top_total / spent * 100.0;
        insights.push(Insight::info(format!(
            "{} accounts for {share_pct:.1}% of your spending.",
            top.display_name()
        )));
    }

    // Spending frequency over the trailing week, inclusive instant boundary.
    let week_ago = now - Duration::days(FREQUENCY_WINDOW_DAYS);
    let recent = expenses
        .iter()
        .filter(|expense| expense.date >= week_ago)
        .count();
    if recent > FREQUENCY_THRESHOLD {
        insights.push(Insight::warning(format!(
            "You've made {recent} transactions this week. Consider consolidating purchases."
        )));
    }

    // Scanned-receipt accuracy. Missing confidence counts as zero.
    let ocr: Vec<&Expense> = expenses.iter().filter(|e| e.is_ocr()).collect();
    if !ocr.is_empty() {
        let mean_confidence = ocr
            .iter()
            .map(|expense| expense.confidence.unwrap_or(0.0))
            .sum::<f64>()
            / ocr.len() as f64;
        insights.push(Insight::info(format!(
            "Processed {} receipts with {:.1}% accuracy.",
            ocr.len(),
            mean_confidence * 100.0
        )));
    }

    // Month-end projection from the daily average.
    if expenses.len() >= PROJECTION_MIN_EXPENSES {
        let active_days = days_with_expenses(expenses).max(1);
        let projected = spent / active_days as f64 * PROJECTION_DAYS;
        if budget.has_monthly() && projected > budget.monthly {
            let overage = projected - budget.monthly;
            insights.push(Insight::warning(format!(
                "Based on current spending, you may exceed your budget by ${overage:.2} this month."
            )));
        }
    }

    insights
}
