use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::editor::{EditorBuffer, LineBuffer};
use crate::sync::SyncEngine;

/// Severity of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// How long a toast stays on the status line.
const TOAST_DURATION: Duration = Duration::from_millis(2500);

/// The complete application state.
pub struct Model {
    /// The document being edited.
    pub buffer: EditorBuffer,
    /// Path to the source file.
    pub file_path: PathBuf,
    /// The sync engine, configured at startup.
    pub engine: SyncEngine,
    /// First buffer line shown in the content area.
    pub scroll_offset: usize,
    /// Terminal size (width, height).
    pub view_size: (u16, u16),
    /// Last `key: value` written to the frontmatter, shown in the status
    /// line.
    pub last_synced: Option<String>,
    /// Whether the application should exit.
    pub should_quit: bool,
    toast: Option<Toast>,
}

impl Model {
    pub fn new(
        file_path: PathBuf,
        buffer: EditorBuffer,
        engine: SyncEngine,
        view_size: (u16, u16),
    ) -> Self {
        Self {
            buffer,
            file_path,
            engine,
            scroll_offset: 0,
            view_size,
            last_synced: None,
            should_quit: false,
            toast: None,
        }
    }

    /// Write the buffer back to its file and mark it clean.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&mut self) -> Result<()> {
        std::fs::write(&self.file_path, self.buffer.text())
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        self.buffer.mark_clean();
        Ok(())
    }

    /// Show a transient message on the status line.
    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    /// Drop an expired toast. Returns true if one was removed.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self.toast.as_ref().is_some_and(|t| t.expires_at <= now) {
            self.toast = None;
            return true;
        }
        false
    }

    /// The active toast, if any.
    pub fn toast(&self) -> Option<(ToastLevel, &str)> {
        self.toast.as_ref().map(|t| (t.level, t.message.as_str()))
    }

    /// Lines available for document content (view minus the status line).
    pub fn content_height(&self) -> usize {
        usize::from(self.view_size.1.saturating_sub(1))
    }

    /// Scroll so the cursor line is within the content area.
    pub fn ensure_cursor_visible(&mut self) {
        let height = self.content_height().max(1);
        let cursor_line = self.buffer.cursor().line;
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + height {
            self.scroll_offset = cursor_line + 1 - height;
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(
            PathBuf::new(),
            EditorBuffer::empty(),
            SyncEngine::default(),
            (80, 24),
        )
    }
}
