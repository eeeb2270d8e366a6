use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;

/// How an expense record entered the system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseSource {
    Manual,
    Ocr,
}

/// A single dated, categorized monetary outflow.
///
/// Records are immutable after creation; the store orders them newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    pub category: Category,
    pub description: String,
    pub date: DateTime<Utc>,
    pub source: ExpenseSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    /// Extraction confidence in `[0, 1]`, present only for OCR records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Expense {
    /// Creates a manually entered expense dated now.
    pub fn manual(amount: f64, category: Category, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category,
            description: description.into(),
            date: Utc::now(),
            source: ExpenseSource::Manual,
            merchant: None,
            confidence: None,
        }
    }

    /// Creates an OCR-extracted expense dated now.
    pub fn scanned(
        amount: f64,
        category: Category,
        description: impl Into<String>,
        merchant: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category,
            description: description.into(),
            date: Utc::now(),
            source: ExpenseSource::Ocr,
            merchant: Some(merchant.into()),
            confidence: Some(confidence),
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Calendar date the expense falls on, used for day bucketing.
    ///
    /// Taken from the UTC timestamp, so bucket boundaries are UTC midnights
    /// rather than the machine's local wall clock.
    pub fn calendar_date(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn is_ocr(&self) -> bool {
        self.source == ExpenseSource::Ocr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_expense_carries_no_confidence() {
        let expense = Expense::manual(12.5, Category::Food, "Lunch");
        assert_eq!(expense.source, ExpenseSource::Manual);
        assert!(expense.confidence.is_none());
        assert!(expense.merchant.is_none());
    }

    #[test]
    fn scanned_expense_records_merchant_and_confidence() {
        let expense = Expense::scanned(89.99, Category::Shopping, "Groceries", "Whole Foods", 0.97);
        assert!(expense.is_ocr());
        assert_eq!(expense.merchant.as_deref(), Some("Whole Foods"));
        assert_eq!(expense.confidence, Some(0.97));
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let expense = Expense::manual(5.0, Category::Other, "Misc");
        let json = serde_json::to_string(&expense).unwrap();
        assert!(!json.contains("merchant"));
        assert!(!json.contains("confidence"));
        assert!(json.contains("\"source\":\"manual\""));
    }
}
