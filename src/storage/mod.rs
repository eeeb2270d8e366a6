//! JSON persistence for the two state blobs: the expense list and the
//! budget configuration. Each blob is overwritten wholesale on save and
//! defaults when its file is absent.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::{BudgetConfig, ExpenseStore};
use crate::errors::ExpenseError;
use crate::utils::app_data_dir;

pub type Result<T> = std::result::Result<T, ExpenseError>;

const EXPENSES_FILE: &str = "expenses.json";
const BUDGET_FILE: &str = "budget.json";
const TMP_SUFFIX: &str = "tmp";

/// File-backed storage rooted at the app data directory (or an explicit
/// override, used by tests).
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn expenses_path(&self) -> PathBuf {
        self.root.join(EXPENSES_FILE)
    }

    pub fn budget_path(&self) -> PathBuf {
        self.root.join(BUDGET_FILE)
    }

    /// Loads the expense list, defaulting to empty when no file exists.
    pub fn load_expenses(&self) -> Result<ExpenseStore> {
        let path = self.expenses_path();
        if !path.exists() {
            return Ok(ExpenseStore::new());
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Loads the budget configuration, defaulting when no file exists.
    pub fn load_budget(&self) -> Result<BudgetConfig> {
        let path = self.budget_path();
        if !path.exists() {
            return Ok(BudgetConfig::default());
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save_expenses(&self, store: &ExpenseStore) -> Result<()> {
        let json = serde_json::to_string_pretty(store)?;
        write_atomic(&self.expenses_path(), &json)?;
        tracing::debug!(count = store.len(), "saved expense list");
        Ok(())
    }

    pub fn save_budget(&self, budget: &BudgetConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(budget)?;
        write_atomic(&self.budget_path(), &json)?;
        tracing::debug!(monthly = budget.monthly, "saved budget configuration");
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes by staging to a temporary file and renaming, so a failed write
/// never clobbers the previous snapshot.
fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
