//! Pure derived views over the expense store: aggregate statistics and
//! rule-based insights. Nothing here owns state across calls.

pub mod aggregate;
pub mod insight;

pub use aggregate::{
    category_totals, days_with_expenses, total_spent, trend_series, CategoryTotals, TrendPoint,
};
pub use insight::{generate_insights, Insight, InsightKind};
