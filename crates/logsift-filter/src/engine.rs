use logsift_types::{FilterAction, Item};

use crate::criteria::CriteriaModel;
use crate::error::{FilterError, Result};
use crate::history::HistoryStack;

/// Applies criteria to item lists.
///
/// Criteria are always evaluated against the full source list, never against a
/// previously filtered view, so history steps are independent of each other.
pub struct FilterEngine;

impl FilterEngine {
    /// Filter `items` by `criteria`, returning a new list
    pub fn apply(items: &[Item], criteria: &CriteriaModel) -> Result<Vec<Item>> {
        if criteria.values().is_empty() {
            return Err(FilterError::InvalidCriteria);
        }

        // Activity names are single-valued: any/all select the same items
        let keep_matches = criteria.action() == FilterAction::Retain;
        Ok(items
            .iter()
            .filter(|item| Self::matches(item, criteria) == keep_matches)
            .cloned()
            .collect())
    }

    /// Check whether an item is named by the criteria
    pub fn matches(item: &Item, criteria: &CriteriaModel) -> bool {
        criteria.values().iter().any(|v| v == &item.name)
    }

    /// Apply and record the criteria in history
    pub fn apply_and_record(
        items: &[Item],
        criteria: CriteriaModel,
        history: &mut HistoryStack,
    ) -> Result<Vec<Item>> {
        let filtered = Self::apply(items, &criteria)?;
        tracing::info!(
            criteria = %criteria.summary(),
            kept = filtered.len(),
            total = items.len(),
            "Filter applied"
        );
        history.push(criteria);
        Ok(filtered)
    }

    /// Step history back and re-apply the criteria now current
    pub fn undo_to(original: &[Item], history: &mut HistoryStack) -> Result<Vec<Item>> {
        let criteria = history.undo()?;
        Self::apply(original, criteria)
    }

    /// Step history forward and re-apply the criteria now current
    pub fn redo_to(original: &[Item], history: &mut HistoryStack) -> Result<Vec<Item>> {
        let criteria = history.redo()?;
        Self::apply(original, criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionSet;
    use logsift_types::Matching;

    fn items() -> Vec<Item> {
        vec![
            Item::new("Review", 10, 50.0),
            Item::new("Approve", 10, 50.0),
            Item::new("Archive", 4, 20.0),
        ]
    }

    fn criteria(action: FilterAction, names: &[&str]) -> CriteriaModel {
        let mut sel = SelectionSet::new();
        sel.select_all(names.iter().copied());
        CriteriaModel::build_activity(&sel, action, Matching::Any).unwrap()
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_retain_example() {
        let two = vec![Item::new("Review", 10, 50.0), Item::new("Approve", 10, 50.0)];
        let c = criteria(FilterAction::Retain, &["Review"]);
        let result = FilterEngine::apply(&two, &c).unwrap();
        assert_eq!(result, vec![Item::new("Review", 10, 50.0)]);
    }

    #[test]
    fn test_retain_only_named() {
        let c = criteria(FilterAction::Retain, &["Archive", "Review", "Missing"]);
        let result = FilterEngine::apply(&items(), &c).unwrap();
        assert!(result.iter().all(|i| c.values().contains(&i.name)));
        // Source order is kept
        assert_eq!(names(&result), ["Review", "Archive"]);
    }

    #[test]
    fn test_remove_is_complement() {
        let source = items();
        let c = criteria(FilterAction::Remove, &["Approve"]);
        let result = FilterEngine::apply(&source, &c).unwrap();
        let matched = source.iter().filter(|i| FilterEngine::matches(i, &c)).count();
        assert_eq!(result.len() + matched, source.len());
        assert_eq!(names(&result), ["Review", "Archive"]);
    }

    #[test]
    fn test_retain_idempotent() {
        let c = criteria(FilterAction::Retain, &["Review", "Archive"]);
        let once = FilterEngine::apply(&items(), &c).unwrap();
        let twice = FilterEngine::apply(&once, &c).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_matching_mode_is_inert() {
        let mut sel = SelectionSet::new();
        sel.toggle("Review");
        let any = CriteriaModel::build_activity(&sel, FilterAction::Retain, Matching::Any).unwrap();
        let all = CriteriaModel::build_activity(&sel, FilterAction::Retain, Matching::All).unwrap();
        assert_eq!(
            FilterEngine::apply(&items(), &any).unwrap(),
            FilterEngine::apply(&items(), &all).unwrap()
        );
    }

    #[test]
    fn test_input_not_mutated() {
        let source = items();
        let before = source.clone();
        FilterEngine::apply(&source, &criteria(FilterAction::Remove, &["Review"])).unwrap();
        assert_eq!(source, before);
    }

    #[test]
    fn test_apply_and_record_pushes() {
        let mut history = HistoryStack::new();
        let c = criteria(FilterAction::Retain, &["Review"]);
        let result = FilterEngine::apply_and_record(&items(), c.clone(), &mut history).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(history.current(), Some(&c));
    }

    #[test]
    fn test_undo_redo_reapply_against_source() {
        let source = items();
        let mut history = HistoryStack::new();
        FilterEngine::apply_and_record(&source, criteria(FilterAction::Retain, &["Review"]), &mut history)
            .unwrap();
        FilterEngine::apply_and_record(&source, criteria(FilterAction::Remove, &["Review"]), &mut history)
            .unwrap();

        let undone = FilterEngine::undo_to(&source, &mut history).unwrap();
        assert_eq!(names(&undone), ["Review"]);
        assert!(matches!(
            FilterEngine::undo_to(&source, &mut history),
            Err(FilterError::NoOp(_))
        ));

        let redone = FilterEngine::redo_to(&source, &mut history).unwrap();
        assert_eq!(names(&redone), ["Approve", "Archive"]);
    }
}
