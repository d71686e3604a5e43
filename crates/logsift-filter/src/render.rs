use logsift_types::Item;

use crate::selection::SelectionSet;

/// Surface that shows items with selection checkboxes
pub trait Renderer {
    /// Replace the shown items, checking those in `selection`
    fn show_items(&mut self, items: &[Item], selection: &SelectionSet);

    /// Names whose checkboxes are currently checked
    fn checked(&self) -> Vec<String>;

    /// Toggle the loading indicator
    fn set_loading(&mut self, loading: bool);
}
