#![doc(test(attr(deny(warnings))))]

//! Expense Core offers the expense store, aggregation, budget, and insight
//! primitives that power a personal expense-tracking shell.

pub mod analysis;
pub mod cli;
pub mod domain;
pub mod errors;
pub mod ingest;
pub mod storage;
pub mod tracker;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}
