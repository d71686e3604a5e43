mod activity_table;
mod criteria_panel;
mod help_overlay;
mod name_prompt;
mod saved_filters;
mod status_bar;

pub use activity_table::{ActivityTable, ActivityTableState};
pub use criteria_panel::CriteriaPanel;
pub use help_overlay::HelpOverlay;
pub use name_prompt::NamePrompt;
pub use saved_filters::SavedFiltersOverlay;
pub use status_bar::{StatusBar, filter_hints};
