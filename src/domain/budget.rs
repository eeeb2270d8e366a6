use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Monthly spending ceiling plus optional per-category ceilings.
///
/// Replaced wholesale on save; a zero monthly value means no budget is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetConfig {
    #[serde(default)]
    pub monthly: f64,
    #[serde(default)]
    pub categories: BTreeMap<Category, f64>,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            monthly: 0.0,
            categories: BTreeMap::new(),
        }
    }
}

impl BudgetConfig {
    /// True when a monthly ceiling has been configured.
    pub fn has_monthly(&self) -> bool {
        self.monthly > 0.0
    }

    /// Configured ceiling for a category, if any.
    pub fn limit_for(&self, category: Category) -> Option<f64> {
        self.categories.get(&category).copied()
    }

    pub fn set_limit(&mut self, category: Category, limit: f64) {
        self.categories.insert(category, limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_is_unset() {
        let budget = BudgetConfig::default();
        assert!(!budget.has_monthly());
        assert!(budget.categories.is_empty());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let budget: BudgetConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(budget, BudgetConfig::default());
    }

    #[test]
    fn category_limits_round_trip() {
        let mut budget = BudgetConfig {
            monthly: 500.0,
            ..Default::default()
        };
        budget.set_limit(Category::Food, 150.0);
        let json = serde_json::to_string(&budget).unwrap();
        let back: BudgetConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.limit_for(Category::Food), Some(150.0));
        assert_eq!(back.limit_for(Category::Transport), None);
    }
}
