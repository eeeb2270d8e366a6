//! Receipt ingestion. The scanner trait is the seam a real extraction
//! pipeline would plug into; the bundled implementation fabricates records.

use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::domain::{Category, Expense};
use crate::errors::ExpenseError;

/// Converts an uploaded receipt into a well-formed expense, or fails without
/// side effects. Implementations either fully succeed with one record or
/// produce nothing.
pub trait ReceiptScanner {
    fn scan(&self, filename: &str) -> Result<Expense, ExpenseError>;
}

struct CatalogEntry {
    amount: f64,
    category: Category,
    description: &'static str,
    merchant: &'static str,
}

const CATALOG: [CatalogEntry; 7] = [
    CatalogEntry {
        amount: 45.67,
        category: Category::Food,
        description: "Restaurant dinner",
        merchant: "Olive Garden",
    },
    CatalogEntry {
        amount: 12.99,
        category: Category::Food,
        description: "Coffee and pastry",
        merchant: "Starbucks",
    },
    CatalogEntry {
        amount: 89.45,
        category: Category::Shopping,
        description: "Grocery shopping",
        merchant: "Whole Foods",
    },
    CatalogEntry {
        amount: 25.00,
        category: Category::Transport,
        description: "Gas station",
        merchant: "Shell",
    },
    CatalogEntry {
        amount: 15.50,
        category: Category::Entertainment,
        description: "Movie tickets",
        merchant: "AMC Theaters",
    },
    CatalogEntry {
        amount: 67.89,
        category: Category::Utilities,
        description: "Electric bill",
        merchant: "ConEd",
    },
    CatalogEntry {
        amount: 120.00,
        category: Category::Healthcare,
        description: "Pharmacy",
        merchant: "CVS",
    },
];

const MIN_DELAY_MS: u64 = 2000;
const MAX_DELAY_MS: u64 = 4000;
const MIN_CONFIDENCE: f64 = 0.95;

/// Stand-in for a real OCR pipeline. Picks a random catalog entry, stamps
/// an OCR source and a high confidence value, and sleeps for a couple of
/// seconds to mimic processing latency. The filename is accepted but never
/// parsed.
pub struct MockScanner {
    simulate_delay: bool,
}

impl MockScanner {
    pub fn new() -> Self {
        Self {
            simulate_delay: true,
        }
    }

    /// Scanner without the artificial latency, for tests and scripted runs.
    pub fn instant() -> Self {
        Self {
            simulate_delay: false,
        }
    }
}

impl Default for MockScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptScanner for MockScanner {
    fn scan(&self, filename: &str) -> Result<Expense, ExpenseError> {
        if filename.trim().is_empty() {
            return Err(ExpenseError::Ingest("unreadable upload: empty file name".into()));
        }

        let mut rng = rand::thread_rng();
        if self.simulate_delay {
            let delay = rng.gen_range(MIN_DELAY_MS..=MAX_DELAY_MS);
            tracing::debug!(filename, delay_ms = delay, "simulating receipt processing");
            thread::sleep(Duration::from_millis(delay));
        }

        let entry = &CATALOG[rng.gen_range(0..CATALOG.len())];
        let confidence = rng.gen_range(MIN_CONFIDENCE..=1.0);
        Ok(Expense::scanned(
            entry.amount,
            entry.category,
            entry.description,
            entry.merchant,
            confidence,
        ))
    }
}
