use ratatui::widgets::ListState;

use logsift_filter::{CriteriaModel, FilterError, FilterSession, Item, Renderer, SavedFilter};

use crate::config::KeyContext;
use crate::ui::components::ActivityTableState;

/// Severity of a status-line message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Info,
    Warning,
    Error,
}

/// A one-line message shown under the table until dismissed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// UI-specific transient state
#[derive(Default)]
pub struct UiState {
    /// Is help overlay visible?
    pub help_visible: bool,

    /// Message to display (if any)
    pub message: Option<Message>,

    /// Is the save-name prompt open?
    pub prompt_active: bool,

    /// Current prompt input text
    pub name_input: String,

    /// Validation error for the prompt input
    pub prompt_error: Option<String>,

    /// Is the saved filters overlay open?
    pub saved_visible: bool,

    /// List state for the saved filters overlay
    pub saved_list_state: ListState,
}

/// Global application state
pub struct AppState {
    /// Selection, options, history and current view
    pub session: FilterSession,

    /// Rows drawn by the activity table
    pub table: ActivityTableState,

    /// UI state
    pub ui_state: UiState,

    /// Filters read from the library, most recent last
    pub saved_filters: Vec<SavedFilter>,

    /// Whether app should quit
    pub should_quit: bool,

    /// Rows moved by page up / page down
    pub page_size: usize,
}

impl AppState {
    pub fn new(session: FilterSession) -> Self {
        let mut state = Self {
            session,
            table: ActivityTableState::new(),
            ui_state: UiState::default(),
            saved_filters: Vec::new(),
            should_quit: false,
            page_size: 10,
        };
        state.refresh_table();
        state
    }

    /// Which keybinding table is active
    pub fn key_context(&self) -> KeyContext {
        if self.ui_state.prompt_active {
            KeyContext::NamePrompt
        } else if self.ui_state.saved_visible {
            KeyContext::SavedFilters
        } else {
            KeyContext::FilterTable
        }
    }

    /// Redraw the table from the session's current view
    pub fn refresh_table(&mut self) {
        self.table
            .show_items(self.session.view(), self.session.selection());
    }

    /// Checked rows currently visible in the table
    pub fn visible_checked(&self) -> usize {
        self.table.checked().len()
    }

    // Messages

    pub fn show_message(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.ui_state.message = Some(Message {
            kind,
            text: text.into(),
        });
    }

    /// Report a failed filter operation
    pub fn show_error(&mut self, err: &FilterError) {
        let kind = match err {
            FilterError::Validation(_) => MessageKind::Warning,
            FilterError::NoOp(_) => MessageKind::Info,
            FilterError::InvalidCriteria => MessageKind::Error,
        };
        self.show_message(kind, err.messages().join("; "));
    }

    pub fn dismiss_message(&mut self) {
        self.ui_state.message = None;
    }

    // Selection

    /// Toggle the activity under the cursor
    pub fn toggle_current(&mut self) {
        if let Some(name) = self.table.cursor_name().map(str::to_string) {
            self.session.toggle(&name);
            self.refresh_table();
        }
    }

    pub fn select_all(&mut self) {
        self.session.select_all();
        self.refresh_table();
    }

    pub fn deselect_all(&mut self) {
        self.session.deselect_all();
        self.refresh_table();
    }

    pub fn page_down(&mut self) {
        self.table.move_cursor(self.page_size as isize);
    }

    pub fn page_up(&mut self) {
        self.table.move_cursor(-(self.page_size as isize));
    }

    // Filtering

    /// Validate the current selection and enter the loading state.
    /// Returns the criteria to schedule, or `None` after reporting why not.
    pub fn begin_apply(&mut self) -> Option<CriteriaModel> {
        match self.session.prepare_apply() {
            Ok(criteria) => {
                self.table.set_loading(true);
                self.dismiss_message();
                Some(criteria)
            }
            Err(e) => {
                self.show_error(&e);
                None
            }
        }
    }

    /// Show the result of a completed apply
    pub fn finish_apply(&mut self, criteria: CriteriaModel, items: Vec<Item>) {
        let kept = self.session.commit_result(criteria, items).len();
        self.table.set_loading(false);
        self.refresh_table();
        self.show_message(
            MessageKind::Success,
            format!("Filter applied: {} of {} activities shown", kept, self.session.source().len()),
        );
    }

    /// Report a failed apply
    pub fn fail_apply(&mut self, err: &FilterError) {
        self.table.set_loading(false);
        self.show_error(err);
    }

    /// Step history; returns whether the view changed
    pub fn undo(&mut self) -> bool {
        match self.session.undo() {
            Ok(_) => {
                self.table.set_loading(false);
                self.refresh_table();
                self.dismiss_message();
                true
            }
            Err(e) => {
                self.show_error(&e);
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.session.redo() {
            Ok(_) => {
                self.table.set_loading(false);
                self.refresh_table();
                self.dismiss_message();
                true
            }
            Err(e) => {
                self.show_error(&e);
                false
            }
        }
    }

    pub fn clear_all(&mut self) {
        self.table.set_loading(false);
        self.session.clear_all();
        self.refresh_table();
        self.show_message(MessageKind::Info, "All filters cleared");
    }

    // Save prompt

    pub fn open_prompt(&mut self) {
        self.ui_state.prompt_active = true;
        self.ui_state.name_input.clear();
        self.ui_state.prompt_error = None;
    }

    pub fn close_prompt(&mut self) {
        self.ui_state.prompt_active = false;
        self.ui_state.name_input.clear();
        self.ui_state.prompt_error = None;
    }

    pub fn prompt_input(&mut self, c: char) {
        self.ui_state.name_input.push(c);
        self.ui_state.prompt_error = None;
    }

    pub fn prompt_backspace(&mut self) {
        self.ui_state.name_input.pop();
    }

    /// Name and criteria to save, or `None` with the reason shown in the prompt
    pub fn prompt_submission(&mut self) -> Option<(String, CriteriaModel)> {
        let name = self.ui_state.name_input.trim().to_string();
        match self.session.current_criteria() {
            Ok(criteria) => Some((name, criteria)),
            Err(e) => {
                self.ui_state.prompt_error = Some(e.messages().join("; "));
                None
            }
        }
    }

    // Saved filters

    pub fn set_saved_filters(&mut self, filters: Vec<SavedFilter>) {
        self.saved_filters = filters;
        let selected = match self.ui_state.saved_list_state.selected() {
            _ if self.saved_filters.is_empty() => None,
            Some(i) => Some(i.min(self.saved_filters.len() - 1)),
            None => Some(0),
        };
        self.ui_state.saved_list_state.select(selected);
    }

    pub fn toggle_saved(&mut self) {
        self.ui_state.saved_visible = !self.ui_state.saved_visible;
    }

    pub fn saved_up(&mut self) {
        let len = self.saved_filters.len();
        if len == 0 {
            return;
        }
        let i = match self.ui_state.saved_list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.ui_state.saved_list_state.select(Some(i));
    }

    pub fn saved_down(&mut self) {
        let len = self.saved_filters.len();
        if len == 0 {
            return;
        }
        let i = match self.ui_state.saved_list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.ui_state.saved_list_state.select(Some(i));
    }

    pub fn selected_saved(&self) -> Option<&SavedFilter> {
        self.ui_state
            .saved_list_state
            .selected()
            .and_then(|i| self.saved_filters.get(i))
    }

    /// Adopt the highlighted saved filter's selection and options
    pub fn load_selected_saved(&mut self) {
        let Some(saved) = self.selected_saved().cloned() else {
            return;
        };
        match self.session.load_saved(&saved) {
            Ok(()) => {
                self.ui_state.saved_visible = false;
                self.refresh_table();
                self.show_message(
                    MessageKind::Info,
                    format!("Loaded '{}'; press Enter to apply", saved.name),
                );
            }
            Err(e) => self.show_error(&e),
        }
    }
}
