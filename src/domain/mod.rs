//! Expense domain models and the in-memory store.

pub mod budget;
pub mod category;
pub mod expense;
pub mod store;

pub use budget::BudgetConfig;
pub use category::Category;
pub use expense::{Expense, ExpenseSource};
pub use store::ExpenseStore;
