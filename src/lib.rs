// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference
    clippy::module_name_repetitions
)]

//! # Fieldsync
//!
//! Keep inline `field:: value` annotations in sync with the YAML
//! frontmatter block of a markdown note.
//!
//! Typing inside an inline field schedules a deferred evaluation; when it
//! runs, the field name gains a disambiguation prefix and its normalized
//! value is merged into the frontmatter, creating the block when the
//! document has none.
//!
//! ## Architecture
//!
//! Fieldsync uses The Elm Architecture (TEA) pattern for its interactive
//! host:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`sync`]: Sync engine and deferred evaluation queue
//! - [`frontmatter`]: Block location, merging, value normalization
//! - [`editor`]: Line buffer and the host collaborator trait
//! - [`config`]: Persisted settings
//! - [`app`]: Interactive host loop and state
//! - [`ui`]: Terminal UI
//! - [`watcher`]: File watching for the sync daemon

pub mod app;
pub mod config;
pub mod editor;
pub mod frontmatter;
pub mod sync;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::config::SyncSettings;
    pub use crate::editor::{EditorBuffer, LineBuffer};
    pub use crate::sync::{EvalQueue, SyncEngine, SyncOutcome, sync_all};
}
