use crate::criteria::CriteriaModel;
use crate::error::{FilterError, HistoryDirection, Result};

/// Linear undo/redo log of applied criteria
#[derive(Clone, Debug, Default)]
pub struct HistoryStack {
    /// Applied criteria, oldest first
    entries: Vec<CriteriaModel>,

    /// Index of the current entry (None = nothing applied)
    position: Option<usize>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record newly applied criteria, discarding any redo branch
    pub fn push(&mut self, criteria: CriteriaModel) {
        let keep = self.position.map_or(0, |p| p + 1);
        if keep < self.entries.len() {
            tracing::debug!(
                discarded = self.entries.len() - keep,
                "Truncating redo branch"
            );
            self.entries.truncate(keep);
        }
        self.entries.push(criteria);
        self.position = Some(self.entries.len() - 1);
    }

    /// Step back to the previous criteria
    pub fn undo(&mut self) -> Result<&CriteriaModel> {
        match self.position {
            Some(p) if p > 0 => {
                self.position = Some(p - 1);
                Ok(&self.entries[p - 1])
            }
            _ => Err(FilterError::NoOp(HistoryDirection::Undo)),
        }
    }

    /// Step forward to the next criteria
    pub fn redo(&mut self) -> Result<&CriteriaModel> {
        let next = self.position.map_or(0, |p| p + 1);
        if self.position.is_none() || next >= self.entries.len() {
            return Err(FilterError::NoOp(HistoryDirection::Redo));
        }
        self.position = Some(next);
        Ok(&self.entries[next])
    }

    pub fn can_undo(&self) -> bool {
        self.position.is_some_and(|p| p > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.position
            .is_some_and(|p| p + 1 < self.entries.len())
    }

    /// Drop every entry and return to the empty state
    pub fn clear(&mut self) {
        self.entries.clear();
        self.position = None;
    }

    /// Criteria at the current position
    pub fn current(&self) -> Option<&CriteriaModel> {
        self.position.map(|p| &self.entries[p])
    }

    /// Current position, -1 when empty
    pub fn position(&self) -> isize {
        self.position.map_or(-1, |p| p as isize)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CriteriaModel] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionSet;
    use logsift_types::{FilterAction, Matching};

    fn criteria(name: &str) -> CriteriaModel {
        let mut sel = SelectionSet::new();
        sel.toggle(name);
        CriteriaModel::build_activity(&sel, FilterAction::Retain, Matching::Any).unwrap()
    }

    #[test]
    fn test_empty_history() {
        let mut h = HistoryStack::new();
        assert_eq!(h.position(), -1);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert!(matches!(
            h.undo(),
            Err(FilterError::NoOp(HistoryDirection::Undo))
        ));
        assert!(matches!(
            h.redo(),
            Err(FilterError::NoOp(HistoryDirection::Redo))
        ));
        assert!(h.current().is_none());
    }

    #[test]
    fn test_undo_redo_sequence() {
        let (a, b, c) = (criteria("a"), criteria("b"), criteria("c"));
        let mut h = HistoryStack::new();
        h.push(a.clone());
        h.push(b.clone());
        h.push(c.clone());
        assert_eq!(h.position(), 2);

        assert_eq!(h.undo().unwrap(), &b);
        assert_eq!(h.undo().unwrap(), &a);
        assert_eq!(h.position(), 0);
        assert!(h.undo().is_err());
        assert_eq!(h.position(), 0);

        assert_eq!(h.redo().unwrap(), &b);
        assert_eq!(h.redo().unwrap(), &c);
        assert!(h.redo().is_err());
        assert_eq!(h.position(), 2);
    }

    #[test]
    fn test_push_truncates_redo_branch() {
        let (a, b, d) = (criteria("a"), criteria("b"), criteria("d"));
        let mut h = HistoryStack::new();
        h.push(a.clone());
        h.push(b);
        h.undo().unwrap();
        h.push(d.clone());

        assert_eq!(h.entries(), [a, d]);
        assert_eq!(h.position(), 1);
        assert!(!h.can_redo());
    }

    #[test]
    fn test_can_undo_can_redo() {
        let mut h = HistoryStack::new();
        h.push(criteria("a"));
        assert!(!h.can_undo());
        h.push(criteria("b"));
        assert!(h.can_undo());
        assert!(!h.can_redo());
        h.undo().unwrap();
        assert!(h.can_redo());
    }

    #[test]
    fn test_clear() {
        let mut h = HistoryStack::new();
        h.push(criteria("a"));
        h.push(criteria("b"));
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.position(), -1);
    }
}
