use crate::app::Model;
use crate::app::model::ToastLevel;
use crate::editor::Direction;
use crate::sync::SyncOutcome;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Delete character before cursor (Backspace)
    DeleteBack,
    /// Delete character at cursor (Delete)
    DeleteForward,
    /// Split line at cursor (Enter)
    SplitLine,

    // Cursor movement
    /// Move cursor in a direction
    MoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    MoveHome,
    /// Move cursor to end of line (End)
    MoveEnd,
    /// Move cursor to start of buffer (Ctrl+Home)
    MoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    MoveToEnd,

    // Sync
    /// A deferred sync evaluation came due
    SyncEvaluate,

    // Application
    /// Save the buffer to its file
    Save,
    /// Terminal resized
    Resize(u16, u16),
    /// Quit the application
    Quit,
}

/// Update the model based on a message.
///
/// This is the core of TEA. The only side effects are the buffer
/// rewrites issued by the sync engine and the file write behind
/// [`Message::Save`].
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Editing
        Message::InsertChar(c) => model.buffer.insert_char(c),
        Message::DeleteBack => {
            model.buffer.delete_back();
        }
        Message::DeleteForward => {
            model.buffer.delete_forward();
        }
        Message::SplitLine => model.buffer.split_line(),

        // Cursor movement
        Message::MoveCursor(direction) => model.buffer.move_cursor(direction),
        Message::MoveHome => model.buffer.move_home(),
        Message::MoveEnd => model.buffer.move_end(),
        Message::MoveToStart => model.buffer.move_to_start(),
        Message::MoveToEnd => model.buffer.move_to_end(),

        // Sync
        Message::SyncEvaluate => match model.engine.evaluate(&mut model.buffer) {
            SyncOutcome::Synced { key, value } => {
                model.last_synced = Some(format!("{key}: {value}"));
            }
            SyncOutcome::Skipped(reason) => {
                tracing::trace!(?reason, "sync evaluation skipped");
            }
        },

        // Application
        Message::Save => match model.save() {
            Ok(()) => model.show_toast(ToastLevel::Info, "Saved"),
            Err(err) => model.show_toast(ToastLevel::Error, format!("{err:#}")),
        },
        Message::Resize(width, height) => model.view_size = (width, height),
        Message::Quit => model.should_quit = true,
    }

    model.ensure_cursor_visible();
    model
}
