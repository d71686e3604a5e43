//! Filter sessions for logsift
//!
//! This crate provides activity selection, filter criteria, undo/redo history,
//! validation, saved-filter persistence and delayed apply scheduling.

mod criteria;
mod engine;
mod error;
mod history;
mod library;
mod render;
mod scheduler;
mod selection;
mod session;
mod store;
pub mod validation;

pub use criteria::{CriteriaDraft, CriteriaModel, FilterConfigDraft};
pub use engine::FilterEngine;
pub use error::{FilterError, HistoryDirection, Result, StoreError};
pub use history::HistoryStack;
pub use library::{FilterLibrary, SAVED_FILTERS_KEY, SavedFilter};
pub use render::Renderer;
pub use scheduler::{ApplyOutcome, ApplyScheduler, DEFAULT_APPLY_DELAY};
pub use selection::SelectionSet;
pub use session::{FilterSession, SessionState};
pub use store::{JsonFileStore, MemoryStore, PersistenceStore};
pub use validation::{ValidationReport, Validator};

// Re-export types used in our public API
pub use logsift_types::{FilterAction, FilterType, Item, LogSummary, Matching};
