/// All possible actions in the application (command pattern)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,

    // UI toggles
    ToggleHelp,
    DismissMessage,

    // Table navigation
    CursorUp,
    CursorDown,
    CursorTop,
    CursorBottom,
    PageUp,
    PageDown,

    // Selection
    ToggleItem,
    SelectAll,
    DeselectAll,

    // Criteria options
    CycleAction,
    CycleMatching,

    // Filtering
    ApplyFilter,
    Undo,
    Redo,
    ClearAll,

    // Save prompt
    OpenSavePrompt,
    PromptInput(char),
    PromptBackspace,
    PromptConfirm,
    PromptCancel,

    // Saved filters overlay
    ToggleSavedFilters,
    SavedUp,
    SavedDown,
    LoadSavedFilter,
    DeleteSavedFilter,

    // Tick (for periodic updates)
    Tick,

    // Render request
    Render,
}
