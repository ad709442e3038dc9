//! Keystroke-driven sync of inline fields into frontmatter.
//!
//! The engine is a small state machine over keystroke events. A keystroke
//! that passes the admission guard schedules a deferred evaluation through
//! [`EvalQueue`]; when it comes due, [`SyncEngine::evaluate`] re-reads the
//! active line, detects an inline `field:: value` declaration at or before
//! the cursor, rewrites the inline name with the configured prefix, and
//! merges the normalized value into the frontmatter block. Every failure
//! mode is a silent no-op reported only as a [`SkipReason`].

mod queue;

pub use queue::EvalQueue;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::SyncSettings;
use crate::editor::{EditorBuffer, LineBuffer};
use crate::frontmatter::{self, HeaderEnd, INLINE_MARKER, value};

/// Why an evaluation left the document untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The host editor does not have focus.
    NoFocus,
    /// The cursor is not past the frontmatter block.
    InHeader,
    /// The active line has no inline marker.
    NoMarker,
    /// The cursor sits before the marker.
    CursorBeforeMarker,
    /// The field name contains a space.
    InvalidName,
}

/// Result of one deferred evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The value was merged into the frontmatter under `key`.
    Synced { key: String, value: String },
    /// Nothing was written.
    Skipped(SkipReason),
}

/// The sync engine. Settings are threaded in at construction; there is no
/// ambient configuration state.
#[derive(Debug, Default)]
pub struct SyncEngine {
    settings: SyncSettings,
}

impl SyncEngine {
    pub const fn new(settings: SyncSettings) -> Self {
        Self { settings }
    }

    pub const fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Keystroke admission guard.
    ///
    /// Bare modifier presses never schedule an evaluation, and neither
    /// does ctrl plus the configured undo key: undoing a sync-induced edit
    /// must not retrigger the sync that caused it.
    pub fn should_schedule(&self, key: &KeyEvent) -> bool {
        if matches!(key.code, KeyCode::Modifier(_)) {
            return false;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && key.code == KeyCode::Char(self.settings.undo_key)
        {
            return false;
        }
        true
    }

    /// Run one deferred evaluation against the current buffer state.
    ///
    /// At most two line rewrites happen: the active line gains the
    /// configured prefix (skipped when already present, which is what
    /// makes repeated evaluations idempotent), and one frontmatter line is
    /// rewritten by the merge.
    pub fn evaluate(&self, buffer: &mut impl LineBuffer) -> SyncOutcome {
        if !buffer.has_focus() {
            return SyncOutcome::Skipped(SkipReason::NoFocus);
        }

        let cursor = buffer.cursor();
        let guard_line = match frontmatter::locate_header_end(buffer) {
            HeaderEnd::Absent => 0,
            HeaderEnd::EndsAt(idx) => idx,
        };
        if cursor.line <= guard_line {
            return SyncOutcome::Skipped(SkipReason::InHeader);
        }

        let Some(line) = buffer.line(cursor.line) else {
            return SyncOutcome::Skipped(SkipReason::NoMarker);
        };
        let Some(marker_idx) = line.find(INLINE_MARKER) else {
            return SyncOutcome::Skipped(SkipReason::NoMarker);
        };
        if cursor.col < marker_idx {
            return SyncOutcome::Skipped(SkipReason::CursorBeforeMarker);
        }

        let (name, rest) = line.split_at(marker_idx);
        let raw_value = &rest[INLINE_MARKER.len()..];
        if !frontmatter::is_valid_field_name(name) {
            tracing::trace!(line = cursor.line, "inline field name invalid, skipping");
            return SyncOutcome::Skipped(SkipReason::InvalidName);
        }

        let prefix = self.settings.synced_inline_prefix.as_str();
        if !name.starts_with(prefix) {
            buffer.set_line(
                cursor.line,
                &format!("{prefix}{name}{INLINE_MARKER}{raw_value}"),
            );
        }

        let key = name.strip_prefix(prefix).unwrap_or(name).to_string();
        let value = value::normalize(raw_value.trim());
        frontmatter::merge_value(buffer, &key, &value);
        tracing::debug!(%key, %value, "synced inline field into frontmatter");
        SyncOutcome::Synced { key, value }
    }
}

/// Sync every inline field declaration in the buffer in one pass.
///
/// Walks the body top to bottom, placing a synthesized cursor at the end
/// of each line that carries the marker and running a normal evaluation
/// there. Lines the frontmatter merge inserts all land above the scan
/// position, so the walk advances past them and terminates. Returns the
/// number of fields synced.
pub fn sync_all(engine: &SyncEngine, buffer: &mut EditorBuffer) -> usize {
    buffer.set_focus(true);
    let mut synced = 0;
    let mut idx = match frontmatter::locate_header_end(buffer) {
        HeaderEnd::Absent => 1,
        HeaderEnd::EndsAt(end) => end + 1,
    };
    while idx <= buffer.last_line_index() {
        let lines_before = buffer.line_count();
        let has_marker = buffer
            .line_at(idx)
            .is_some_and(|line| line.contains(INLINE_MARKER));
        if has_marker {
            buffer.move_to(idx, buffer.line_len(idx));
            if let SyncOutcome::Synced { .. } = engine.evaluate(buffer) {
                synced += 1;
            }
        }
        // Skip over any lines the merge inserted above the current one.
        idx += 1 + buffer.line_count().saturating_sub(lines_before);
    }
    synced
}
