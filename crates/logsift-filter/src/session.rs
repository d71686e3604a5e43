use std::sync::Arc;

use logsift_types::{FilterAction, FilterType, Item, LogSummary, Matching};

use crate::criteria::{CriteriaDraft, CriteriaModel};
use crate::engine::FilterEngine;
use crate::error::{FilterError, Result};
use crate::history::HistoryStack;
use crate::library::SavedFilter;
use crate::selection::SelectionSet;
use crate::validation::validate_criteria;

/// Whether any criteria is in effect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing applied since start or the last clear-all
    Empty,
    /// At least one criteria applied
    Filtered,
}

/// State of one filtering session.
///
/// Owns the source items, the user's selection, the applied-criteria history
/// and the resulting view. Failed operations leave everything unchanged.
#[derive(Debug)]
pub struct FilterSession {
    log_name: String,

    /// Items as loaded; criteria are always evaluated against these
    source: Arc<[Item]>,

    selection: SelectionSet,

    history: HistoryStack,

    /// Items currently shown
    view: Vec<Item>,

    /// Action picked in the UI for the next apply
    pub action: FilterAction,

    /// Matching mode picked in the UI for the next apply
    pub matching: Matching,

    pub filter_type: FilterType,
}

impl FilterSession {
    pub fn new(log_name: impl Into<String>, items: Vec<Item>) -> Self {
        let log_name = log_name.into();
        tracing::info!(log = %log_name, items = items.len(), "Filter session started");

        Self {
            log_name,
            view: items.clone(),
            source: items.into(),
            selection: SelectionSet::new(),
            history: HistoryStack::new(),
            action: FilterAction::default(),
            matching: Matching::default(),
            filter_type: FilterType::default(),
        }
    }

    pub fn from_summary(summary: LogSummary) -> Self {
        Self::new(summary.log_name, summary.activities)
    }

    pub fn log_name(&self) -> &str {
        &self.log_name
    }

    pub fn source(&self) -> &[Item] {
        &self.source
    }

    /// Shared handle on the source items for background applies
    pub fn source_handle(&self) -> Arc<[Item]> {
        Arc::clone(&self.source)
    }

    pub fn view(&self) -> &[Item] {
        &self.view
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        if self.history.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Filtered
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn toggle(&mut self, name: &str) {
        self.selection.toggle(name);
        tracing::debug!(name, selected = self.selection.size(), "Selection toggled");
    }

    /// Select every source item
    pub fn select_all(&mut self) {
        self.selection
            .select_all(self.source.iter().map(|i| i.name.clone()));
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    pub fn set_action(&mut self, action: FilterAction) {
        self.action = action;
    }

    pub fn set_matching(&mut self, matching: Matching) {
        self.matching = matching;
    }

    pub fn cycle_action(&mut self) {
        self.action = self.action.next();
    }

    pub fn cycle_matching(&mut self) {
        self.matching = self.matching.next();
    }

    /// Selection summary, e.g. `2 of 5 activities selected`
    pub fn preview(&self) -> String {
        format!(
            "{} of {} activities selected",
            self.selection.size(),
            self.source.len()
        )
    }

    // ------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------

    /// Build and validate criteria for the current selection without
    /// changing any state
    pub fn prepare_apply(&self) -> Result<CriteriaModel> {
        let criteria =
            CriteriaModel::build(&self.selection, self.action, self.matching, self.filter_type)?;

        let report = validate_criteria(&CriteriaDraft::from(&criteria));
        if !report.is_valid {
            return Err(FilterError::Validation(report.errors));
        }
        Ok(criteria)
    }

    /// Record applied criteria and show its result
    pub fn commit(&mut self, criteria: CriteriaModel) -> Result<&[Item]> {
        self.view = FilterEngine::apply_and_record(&self.source, criteria, &mut self.history)?;
        Ok(&self.view)
    }

    /// Record criteria whose result was computed elsewhere
    pub fn commit_result(&mut self, criteria: CriteriaModel, items: Vec<Item>) -> &[Item] {
        tracing::info!(criteria = %criteria.summary(), kept = items.len(), "Filter applied");
        self.history.push(criteria);
        self.view = items;
        &self.view
    }

    /// Apply the current selection immediately
    pub fn apply(&mut self) -> Result<&[Item]> {
        let criteria = self.prepare_apply().inspect_err(|e| {
            tracing::warn!(error = %e, "Filter rejected");
        })?;
        self.commit(criteria)
    }

    /// Return to the previous criteria
    pub fn undo(&mut self) -> Result<&[Item]> {
        self.view = FilterEngine::undo_to(&self.source, &mut self.history)?;
        tracing::debug!(position = self.history.position(), "Undo");
        Ok(&self.view)
    }

    /// Re-apply the next criteria
    pub fn redo(&mut self) -> Result<&[Item]> {
        self.view = FilterEngine::redo_to(&self.source, &mut self.history)?;
        tracing::debug!(position = self.history.position(), "Redo");
        Ok(&self.view)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Drop the selection and every applied filter
    pub fn clear_all(&mut self) {
        self.selection.clear();
        self.history.clear();
        self.view = self.source.to_vec();
        tracing::info!("All filters cleared");
    }

    /// Adopt a saved filter's values and options for the next apply
    pub fn load_saved(&mut self, saved: &SavedFilter) -> Result<()> {
        let criteria = saved.criteria()?;
        self.selection.select_all(criteria.values().iter().cloned());
        self.action = criteria.action();
        self.matching = criteria.matching();
        self.filter_type = criteria.filter_type();
        tracing::info!(name = %saved.name, "Saved filter loaded");
        Ok(())
    }

    /// Criteria for the current selection, for saving
    pub fn current_criteria(&self) -> Result<CriteriaModel> {
        self.prepare_apply()
    }
}
