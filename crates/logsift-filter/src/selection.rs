use std::collections::HashSet;

/// Item names currently chosen by the user.
///
/// Set semantics, but names are reported in the order they were picked so that
/// criteria built from the selection are stable.
#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    /// Pick order
    order: Vec<String>,

    /// Membership index over `order`
    members: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` if absent, remove it if present
    pub fn toggle(&mut self, name: &str) {
        if self.members.remove(name) {
            self.order.retain(|n| n != name);
        } else {
            self.members.insert(name.to_string());
            self.order.push(name.to_string());
        }
    }

    /// Replace the contents with every name in `all_names`
    pub fn select_all<I, S>(&mut self, all_names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clear();
        for name in all_names {
            let name = name.into();
            if self.members.insert(name.clone()) {
                self.order.push(name);
            }
        }
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    pub fn size(&self) -> usize {
        self.order.len()
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    /// Selected names in pick order
    pub fn values(&self) -> &[String] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut sel = SelectionSet::new();
        sel.toggle("Review");
        sel.toggle("Approve");
        assert_eq!(sel.size(), 2);
        assert!(sel.contains("Review"));

        sel.toggle("Review");
        assert!(!sel.contains("Review"));
        assert_eq!(sel.values(), ["Approve"]);
    }

    #[test]
    fn test_select_all_replaces_and_dedups() {
        let mut sel = SelectionSet::new();
        sel.toggle("Stale");
        sel.select_all(["A", "B", "A"]);
        assert_eq!(sel.values(), ["A", "B"]);
        assert!(!sel.contains("Stale"));
    }

    #[test]
    fn test_clear() {
        let mut sel = SelectionSet::new();
        sel.select_all(["A", "B"]);
        sel.clear();
        assert!(sel.is_empty());
        assert_eq!(sel.size(), 0);
    }

    #[test]
    fn test_pick_order_kept() {
        let mut sel = SelectionSet::new();
        sel.toggle("C");
        sel.toggle("A");
        sel.toggle("B");
        assert_eq!(sel.values(), ["C", "A", "B"]);
    }
}
