use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ExpenseError;

/// Closed set of spending categories.
///
/// The wire form is the lowercase variant name, matching the persisted
/// expense records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Utilities,
    Entertainment,
    Healthcare,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Utilities,
        Category::Entertainment,
        Category::Healthcare,
        Category::Shopping,
        Category::Other,
    ];

    /// Human-facing display name used in insight messages and listings.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Food => "Food & Dining",
            Category::Transport => "Transportation",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }

    /// Lowercase identifier, stable across serialization and user input.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Utilities => "utilities",
            Category::Entertainment => "entertainment",
            Category::Healthcare => "healthcare",
            Category::Shopping => "shopping",
            Category::Other => "other",
        }
    }

    /// Parses user-supplied text into a category, case-insensitively.
    pub fn parse(input: &str) -> Result<Self, ExpenseError> {
        let needle = input.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.key() == needle)
            .ok_or_else(|| ExpenseError::UnknownCategory(input.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_any_case() {
        assert_eq!(Category::parse("food").unwrap(), Category::Food);
        assert_eq!(Category::parse("  Shopping ").unwrap(), Category::Shopping);
    }

    #[test]
    fn parse_rejects_unknown_category() {
        let err = Category::parse("groceries").unwrap_err();
        assert!(format!("{err}").contains("groceries"));
    }

    #[test]
    fn wire_form_is_lowercase() {
        let json = serde_json::to_string(&Category::Healthcare).unwrap();
        assert_eq!(json, "\"healthcare\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::Healthcare);
    }
}
