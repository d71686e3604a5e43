use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;

use logsift_filter::{
    ApplyScheduler, FilterLibrary, FilterSession, JsonFileStore, LogSummary, MemoryStore,
    PersistenceStore, validation::validate_items,
};
use logsift_tui::{
    Action, AppState, Event, EventHandler, FilterScreen, HelpOverlay, KeyBindings, KeyContext,
    MessageKind, NamePrompt, SavedFiltersOverlay, Tui,
};

mod config;

use config::Config;

/// Logsift - filter the activities of a process-mining event log
#[derive(Parser, Debug)]
#[command(name = "logsift")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log summary JSON file (`logName` plus an `activities` list)
    #[arg(value_name = "LOG_FILE")]
    log_file: PathBuf,

    /// Config file (defaults to the platform config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Saved filters file (overrides the config file)
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Simulated apply latency in milliseconds (overrides the config file)
    #[arg(long, value_name = "N")]
    delay_ms: Option<u64>,

    /// Write diagnostics to this file instead of stderr
    #[arg(long = "log-file", value_name = "PATH")]
    trace_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing; stderr is hidden behind the alternate screen
    let env_filter = || {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };
    match &args.trace_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .init();
        }
    }

    // Run the application
    let result = run_app(args).await;

    // Handle any errors
    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

/// Read and check the log summary
fn load_summary(path: &Path) -> Result<LogSummary> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut summary = LogSummary::from_json(&content)
        .with_context(|| format!("Invalid log summary {}", path.display()))?;

    let report = validate_items(&summary.activities);
    if !report.is_valid {
        anyhow::bail!("Invalid activities:\n  {}", report.errors.join("\n  "));
    }

    if summary.log_name.is_empty() {
        summary.log_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    Ok(summary)
}

/// Store for saved filters: CLI path, config path, then the platform data dir
fn open_store(args: &Args, config: &Config) -> Box<dyn PersistenceStore> {
    if let Some(path) = args.store.clone().or_else(|| config.store.path.clone()) {
        return Box::new(JsonFileStore::with_path(path));
    }
    match JsonFileStore::new() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "Saved filters will not outlive this session");
            Box::new(MemoryStore::new())
        }
    }
}

async fn run_app(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let summary = load_summary(&args.log_file)?;

    let delay = args
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.apply_delay());

    // Create action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Initialize state
    let mut session = FilterSession::from_summary(summary);
    session.set_action(config.filter.action);
    session.set_matching(config.filter.matching);
    tracing::info!(
        log = session.log_name(),
        activities = session.source().len(),
        "Log loaded"
    );

    let mut state = AppState::new(session);
    let mut library = FilterLibrary::new(open_store(&args, &config));
    state.set_saved_filters(library.load_filters());

    let (mut scheduler, mut outcome_rx) = ApplyScheduler::new(delay);

    // Initialize TUI
    let mut tui = Tui::new()?;

    // Initialize event handler
    let mut events = EventHandler::new(config.tick_rate());

    // Initialize keybindings
    let keybindings = KeyBindings::new();

    // Initial render
    render(&mut tui, &mut state)?;

    // Main event loop
    loop {
        tokio::select! {
            // Handle terminal events
            Some(event) = events.next() => {
                match event {
                    Event::Key(key) => {
                        let action = match state.key_context() {
                            KeyContext::NamePrompt => keybindings.get_prompt_action(&key),
                            context => keybindings.get_action(context, &key),
                        };
                        if let Some(action) = action {
                            let _ = action_tx.send(action);
                        }
                    }
                    Event::Tick => {
                        let _ = action_tx.send(Action::Tick);
                    }
                    Event::Resize(_, _) => {
                        let _ = action_tx.send(Action::Render);
                    }
                    Event::Error(e) => {
                        state.show_message(MessageKind::Error, e);
                    }
                }
            }

            // Handle user actions
            Some(action) = action_rx.recv() => {
                handle_action(&mut state, &mut scheduler, &mut library, action);
            }

            // Handle finished applies
            Some(outcome) = outcome_rx.recv() => {
                if scheduler.is_current(outcome.generation) {
                    scheduler.finish(outcome.generation);
                    match outcome.result {
                        Ok(items) => state.finish_apply(outcome.criteria, items),
                        Err(e) => state.fail_apply(&e),
                    }
                } else {
                    tracing::debug!(generation = outcome.generation, "Dropping superseded apply");
                }
            }
        }

        if state.should_quit {
            break;
        }

        render(&mut tui, &mut state)?;
    }

    // Cleanup
    scheduler.cancel();
    events.shutdown();
    tui.restore()?;

    Ok(())
}

fn handle_action(
    state: &mut AppState,
    scheduler: &mut ApplyScheduler,
    library: &mut FilterLibrary,
    action: Action,
) {
    match action {
        Action::Quit => {
            scheduler.cancel();
            state.should_quit = true;
        }
        Action::ToggleHelp => {
            state.ui_state.help_visible = !state.ui_state.help_visible;
        }
        Action::DismissMessage => {
            if state.ui_state.help_visible {
                state.ui_state.help_visible = false;
            } else {
                state.dismiss_message();
            }
        }

        // Table navigation
        Action::CursorUp => state.table.move_cursor(-1),
        Action::CursorDown => state.table.move_cursor(1),
        Action::CursorTop => state.table.cursor_top(),
        Action::CursorBottom => state.table.cursor_bottom(),
        Action::PageUp => state.page_up(),
        Action::PageDown => state.page_down(),

        // Selection
        Action::ToggleItem => state.toggle_current(),
        Action::SelectAll => state.select_all(),
        Action::DeselectAll => state.deselect_all(),
        Action::CycleAction => state.session.cycle_action(),
        Action::CycleMatching => state.session.cycle_matching(),

        // Filtering
        Action::ApplyFilter => {
            if let Some(criteria) = state.begin_apply() {
                let generation = scheduler.schedule(criteria, state.session.source_handle());
                tracing::debug!(generation, "Apply scheduled");
            }
        }
        // A step at a history boundary leaves a pending apply running
        Action::Undo => {
            if state.undo() {
                scheduler.cancel();
            }
        }
        Action::Redo => {
            if state.redo() {
                scheduler.cancel();
            }
        }
        Action::ClearAll => {
            scheduler.cancel();
            state.clear_all();
        }

        // Save prompt
        Action::OpenSavePrompt => state.open_prompt(),
        Action::PromptInput(c) => state.prompt_input(c),
        Action::PromptBackspace => state.prompt_backspace(),
        Action::PromptCancel => state.close_prompt(),
        Action::PromptConfirm => {
            let Some((name, criteria)) = state.prompt_submission() else {
                return;
            };
            match library.save_filter(&name, &criteria) {
                Ok(true) => {
                    state.close_prompt();
                    state.set_saved_filters(library.load_filters());
                    state.show_message(MessageKind::Success, format!("Filter '{}' saved", name));
                }
                Ok(false) => {
                    state.close_prompt();
                    state.show_message(MessageKind::Error, "Failed to save filter");
                }
                Err(e) => {
                    state.ui_state.prompt_error = Some(e.messages().join("; "));
                }
            }
        }

        // Saved filters overlay
        Action::ToggleSavedFilters => {
            if !state.ui_state.saved_visible {
                state.set_saved_filters(library.load_filters());
            }
            state.toggle_saved();
        }
        Action::SavedUp => state.saved_up(),
        Action::SavedDown => state.saved_down(),
        Action::LoadSavedFilter => state.load_selected_saved(),
        Action::DeleteSavedFilter => {
            let Some(name) = state.selected_saved().map(|f| f.name.clone()) else {
                return;
            };
            if library.remove_filter(&name) {
                state.set_saved_filters(library.load_filters());
                state.show_message(MessageKind::Info, format!("Filter '{}' deleted", name));
            } else {
                state.show_message(MessageKind::Error, format!("Failed to delete '{}'", name));
            }
        }

        Action::Tick => state.table.tick(),
        Action::Render => {}
    }
}

fn render(tui: &mut Tui, state: &mut AppState) -> Result<()> {
    tui.terminal().draw(|frame| {
        FilterScreen::render(frame, state);

        if state.ui_state.saved_visible {
            SavedFiltersOverlay::render(frame, state);
        }

        if state.ui_state.prompt_active {
            NamePrompt::render(frame, state);
        }

        // Render help overlay if visible
        if state.ui_state.help_visible {
            HelpOverlay::render(frame);
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logsift_filter::Item;

    fn setup() -> (
        AppState,
        ApplyScheduler,
        mpsc::UnboundedReceiver<logsift_filter::ApplyOutcome>,
        FilterLibrary,
    ) {
        let state = AppState::new(FilterSession::new(
            "orders.xes",
            vec![
                Item::new("Create order", 120, 60.0),
                Item::new("Ship order", 80, 40.0),
            ],
        ));
        let (scheduler, outcome_rx) = ApplyScheduler::new(Duration::from_millis(10));
        let library = FilterLibrary::new(Box::new(MemoryStore::new()));
        (state, scheduler, outcome_rx, library)
    }

    #[tokio::test]
    async fn test_noop_undo_keeps_pending_apply() {
        let (mut state, mut scheduler, mut outcome_rx, mut library) = setup();

        handle_action(&mut state, &mut scheduler, &mut library, Action::ToggleItem);
        handle_action(&mut state, &mut scheduler, &mut library, Action::ApplyFilter);
        assert!(scheduler.is_pending());

        handle_action(&mut state, &mut scheduler, &mut library, Action::Undo);
        handle_action(&mut state, &mut scheduler, &mut library, Action::Redo);
        assert!(scheduler.is_pending());
        assert_eq!(state.session.history().len(), 0);

        let outcome = outcome_rx.recv().await.unwrap();
        assert!(scheduler.is_current(outcome.generation));
    }

    #[tokio::test]
    async fn test_undo_cancels_pending_apply() {
        let (mut state, mut scheduler, _outcome_rx, mut library) = setup();

        handle_action(&mut state, &mut scheduler, &mut library, Action::ToggleItem);
        state.session.apply().unwrap();
        state.session.apply().unwrap();
        handle_action(&mut state, &mut scheduler, &mut library, Action::ApplyFilter);
        assert!(scheduler.is_pending());

        handle_action(&mut state, &mut scheduler, &mut library, Action::Undo);
        assert!(!scheduler.is_pending());
        assert!(!state.table.is_loading());
        assert_eq!(state.session.history().position(), 0);
    }
}
