use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::app::Action;

/// A key combination
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Context for keybindings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Global,
    FilterTable,
    NamePrompt,
    SavedFilters,
}

/// Keybinding configuration
pub struct KeyBindings {
    bindings: HashMap<KeyContext, HashMap<KeyBinding, Action>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        // Global bindings
        let mut global = HashMap::new();
        global.insert(KeyBinding::new(KeyCode::Char('?')), Action::ToggleHelp);
        global.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        global.insert(KeyBinding::new(KeyCode::Char('q')), Action::Quit);
        global.insert(KeyBinding::new(KeyCode::Esc), Action::DismissMessage);
        bindings.insert(KeyContext::Global, global);

        // Activity table
        let mut table = HashMap::new();
        table.insert(KeyBinding::new(KeyCode::Char('j')), Action::CursorDown);
        table.insert(KeyBinding::new(KeyCode::Down), Action::CursorDown);
        table.insert(KeyBinding::new(KeyCode::Char('k')), Action::CursorUp);
        table.insert(KeyBinding::new(KeyCode::Up), Action::CursorUp);
        table.insert(KeyBinding::new(KeyCode::Char('g')), Action::CursorTop);
        table.insert(KeyBinding::new(KeyCode::Home), Action::CursorTop);
        table.insert(KeyBinding::shift(KeyCode::Char('G')), Action::CursorBottom);
        table.insert(KeyBinding::new(KeyCode::End), Action::CursorBottom);
        table.insert(KeyBinding::new(KeyCode::PageDown), Action::PageDown);
        table.insert(KeyBinding::ctrl(KeyCode::Char('d')), Action::PageDown);
        table.insert(KeyBinding::new(KeyCode::PageUp), Action::PageUp);
        table.insert(KeyBinding::ctrl(KeyCode::Char('u')), Action::PageUp);
        table.insert(KeyBinding::new(KeyCode::Char(' ')), Action::ToggleItem);
        table.insert(KeyBinding::new(KeyCode::Char('a')), Action::SelectAll);
        table.insert(KeyBinding::new(KeyCode::Char('d')), Action::DeselectAll);
        table.insert(KeyBinding::new(KeyCode::Char('r')), Action::CycleAction);
        table.insert(KeyBinding::new(KeyCode::Char('m')), Action::CycleMatching);
        table.insert(KeyBinding::new(KeyCode::Enter), Action::ApplyFilter);
        table.insert(KeyBinding::new(KeyCode::Char('u')), Action::Undo);
        table.insert(KeyBinding::ctrl(KeyCode::Char('r')), Action::Redo);
        table.insert(KeyBinding::new(KeyCode::Char('x')), Action::ClearAll);
        table.insert(KeyBinding::new(KeyCode::Char('s')), Action::OpenSavePrompt);
        table.insert(KeyBinding::new(KeyCode::Char('l')), Action::ToggleSavedFilters);
        bindings.insert(KeyContext::FilterTable, table);

        // Filter name prompt
        let mut prompt = HashMap::new();
        prompt.insert(KeyBinding::new(KeyCode::Enter), Action::PromptConfirm);
        prompt.insert(KeyBinding::new(KeyCode::Esc), Action::PromptCancel);
        prompt.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::PromptCancel);
        prompt.insert(KeyBinding::new(KeyCode::Backspace), Action::PromptBackspace);
        bindings.insert(KeyContext::NamePrompt, prompt);

        // Saved filters overlay
        let mut saved = HashMap::new();
        saved.insert(KeyBinding::new(KeyCode::Up), Action::SavedUp);
        saved.insert(KeyBinding::new(KeyCode::Char('k')), Action::SavedUp);
        saved.insert(KeyBinding::new(KeyCode::Down), Action::SavedDown);
        saved.insert(KeyBinding::new(KeyCode::Char('j')), Action::SavedDown);
        saved.insert(KeyBinding::new(KeyCode::Enter), Action::LoadSavedFilter);
        saved.insert(KeyBinding::new(KeyCode::Delete), Action::DeleteSavedFilter);
        saved.insert(KeyBinding::new(KeyCode::Char('D')), Action::DeleteSavedFilter);
        saved.insert(KeyBinding::shift(KeyCode::Char('D')), Action::DeleteSavedFilter);
        saved.insert(KeyBinding::new(KeyCode::Esc), Action::ToggleSavedFilters);
        saved.insert(KeyBinding::new(KeyCode::Char('l')), Action::ToggleSavedFilters);
        bindings.insert(KeyContext::SavedFilters, saved);

        Self { bindings }
    }

    /// Look up action for key event in given context
    pub fn get_action(&self, context: KeyContext, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);

        if let Some(action) = self
            .bindings
            .get(&context)
            .and_then(|context_bindings| context_bindings.get(&binding))
        {
            return Some(action.clone());
        }

        // Fall back to global bindings
        self.bindings
            .get(&KeyContext::Global)?
            .get(&binding)
            .cloned()
    }

    /// Handle key event while the name prompt is open.
    /// Returns Some(Action) for special keys and typed characters.
    pub fn get_prompt_action(&self, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);

        if let Some(action) = self
            .bindings
            .get(&KeyContext::NamePrompt)
            .and_then(|prompt| prompt.get(&binding))
        {
            return Some(action.clone());
        }

        // Regular characters go into the prompt, globals are not consulted
        if let KeyCode::Char(c) = key.code {
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                return Some(Action::PromptInput(c));
            }
        }

        None
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_table_bindings() {
        let kb = KeyBindings::new();
        let ctx = KeyContext::FilterTable;
        assert_eq!(
            kb.get_action(ctx, &key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Action::ToggleItem)
        );
        assert_eq!(
            kb.get_action(ctx, &key(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(Action::Redo)
        );
        assert_eq!(
            kb.get_action(ctx, &key(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Action::CycleAction)
        );
    }

    #[test]
    fn test_global_fallback() {
        let kb = KeyBindings::new();
        assert_eq!(
            kb.get_action(
                KeyContext::SavedFilters,
                &key(KeyCode::Char('q'), KeyModifiers::NONE)
            ),
            Some(Action::Quit)
        );
        assert_eq!(
            kb.get_action(
                KeyContext::FilterTable,
                &key(KeyCode::Char('z'), KeyModifiers::NONE)
            ),
            None
        );
    }

    #[test]
    fn test_prompt_captures_characters() {
        let kb = KeyBindings::new();
        assert_eq!(
            kb.get_prompt_action(&key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::PromptInput('q'))
        );
        assert_eq!(
            kb.get_prompt_action(&key(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Some(Action::PromptInput('Q'))
        );
        assert_eq!(
            kb.get_prompt_action(&key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::PromptConfirm)
        );
        assert_eq!(
            kb.get_prompt_action(&key(KeyCode::Char('x'), KeyModifiers::ALT)),
            None
        );
    }
}
