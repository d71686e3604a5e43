use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::criteria::{CriteriaDraft, CriteriaModel, FilterConfigDraft};
use crate::error::{FilterError, Result};
use crate::store::PersistenceStore;
use crate::validation::{Validator, validate_filter_config};

/// Store key holding the saved filter list
pub const SAVED_FILTERS_KEY: &str = "savedFilters";

/// A named filter persisted for later reuse
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedFilter {
    pub name: String,
    pub criteria: CriteriaDraft,
    pub timestamp: DateTime<Utc>,
}

impl SavedFilter {
    pub fn new(name: impl Into<String>, criteria: &CriteriaModel) -> Self {
        Self {
            name: name.into(),
            criteria: CriteriaDraft::from(criteria),
            timestamp: Utc::now(),
        }
    }

    /// Re-validate the stored criteria
    pub fn criteria(&self) -> Result<CriteriaModel> {
        CriteriaModel::try_from(&self.criteria)
    }
}

/// Saved filters on top of a persistence store.
///
/// Storage failures are logged and swallowed: a failed save reports `false`,
/// a failed load yields no filters.
pub struct FilterLibrary {
    store: Box<dyn PersistenceStore>,
    validator: Validator,
}

impl FilterLibrary {
    pub fn new(store: Box<dyn PersistenceStore>) -> Self {
        Self {
            store,
            validator: Validator::filter_form(),
        }
    }

    /// Save `criteria` under `name`, replacing a filter with the same name.
    ///
    /// Returns `Ok(false)` when the store rejected the write.
    pub fn save_filter(&mut self, name: &str, criteria: &CriteriaModel) -> Result<bool> {
        let name = name.trim();
        let config = FilterConfigDraft {
            name: Some(name.to_string()),
            filter_type: Some(criteria.filter_type().as_str().to_string()),
            criteria: Some(CriteriaDraft::from(criteria)),
        };

        let mut report = validate_filter_config(&config);
        if !self.validator.validate_field("filterName", Some(name)) {
            let field_errors = self.validator.errors()["filterName"].clone();
            for e in field_errors {
                if !report.errors.contains(&e) {
                    report.push(e);
                }
            }
        }
        if !report.is_valid {
            return Err(FilterError::Validation(report.errors));
        }

        // Entries this build cannot read are carried over untouched
        let Some(mut entries) = self.stored_entries() else {
            return Ok(false);
        };
        let entry = match serde_json::to_value(SavedFilter::new(name, criteria)) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize saved filter");
                return Ok(false);
            }
        };
        entries.retain(|e| entry_name(e) != Some(name));
        entries.push(entry);

        if self.write(entries) {
            tracing::info!(name, "Filter saved");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// All saved filters, oldest first
    pub fn load_filters(&self) -> Vec<SavedFilter> {
        let filters: Vec<SavedFilter> = self
            .stored_entries()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(filter) => Some(filter),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable saved filter");
                    None
                }
            })
            .collect();

        tracing::debug!(count = filters.len(), "Loaded saved filters");
        filters
    }

    /// Delete the filter named `name`; returns whether anything was removed
    pub fn remove_filter(&self, name: &str) -> bool {
        let Some(mut entries) = self.stored_entries() else {
            return false;
        };
        let before = entries.len();
        entries.retain(|e| entry_name(e) != Some(name));
        if entries.len() == before {
            return false;
        }
        self.write(entries)
    }

    /// Raw stored entries, or `None` when the stored value cannot be rewritten safely
    fn stored_entries(&self) -> Option<Vec<Value>> {
        match self.store.load(SAVED_FILTERS_KEY) {
            Ok(Some(Value::Array(entries))) => Some(entries),
            Ok(Some(_)) => {
                tracing::warn!("Saved filters are not a list, leaving them alone");
                None
            }
            Ok(None) => Some(Vec::new()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load saved filters");
                None
            }
        }
    }

    fn write(&self, entries: Vec<Value>) -> bool {
        match self.store.save(SAVED_FILTERS_KEY, &Value::Array(entries)) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to persist saved filters");
                false
            }
        }
    }
}

fn entry_name(entry: &Value) -> Option<&str> {
    entry.get("name").and_then(Value::as_str)
}
