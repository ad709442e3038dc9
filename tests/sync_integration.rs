use fieldsync::config::{SyncSettings, load_settings, save_settings};
use fieldsync::editor::{EditorBuffer, LineBuffer};
use fieldsync::frontmatter::{HeaderEnd, locate_header_end, value::normalize};
use fieldsync::sync::{EvalQueue, SyncEngine, SyncOutcome, sync_all};

fn focused(text: &str, line: usize, col: usize) -> EditorBuffer {
    let mut buffer = EditorBuffer::from_text(text);
    buffer.set_focus(true);
    buffer.move_to(line, col);
    buffer
}

#[test]
fn test_keystroke_sync_end_to_end() {
    // Cursor inside the inline value of "field:: 5".
    let mut buffer = focused("body text\nfield:: 5", 1, 8);
    let engine = SyncEngine::new(SyncSettings::default());

    let outcome = engine.evaluate(&mut buffer);
    assert_eq!(
        outcome,
        SyncOutcome::Synced {
            key: "field".to_string(),
            value: "5".to_string()
        }
    );
    assert_eq!(buffer.text(), "---\nfield: 5\n---\nbody text\n\\_field:: 5");
    assert_eq!(locate_header_end(&buffer), HeaderEnd::EndsAt(2));

    // Running the same evaluation again changes nothing.
    let before = buffer.text();
    engine.evaluate(&mut buffer);
    assert_eq!(buffer.text(), before);
}

#[test]
fn test_edit_then_resync_updates_header_value() {
    let mut buffer = focused("---\nrating: 4\n---\nbody\n\\_rating:: 4", 4, 12);
    let engine = SyncEngine::new(SyncSettings::default());

    // Simulate typing "2" at the end of the inline value.
    buffer.insert_char('2');
    engine.evaluate(&mut buffer);
    assert_eq!(
        buffer.text(),
        "---\nrating: 42\n---\nbody\n\\_rating:: 42"
    );
}

#[test]
fn test_invalid_field_name_never_mutates() {
    let mut buffer = focused("body\nmy field:: x", 1, 12);
    let engine = SyncEngine::new(SyncSettings::default());
    let before = buffer.text();
    assert!(matches!(
        engine.evaluate(&mut buffer),
        SyncOutcome::Skipped(_)
    ));
    assert_eq!(buffer.text(), before);
}

#[test]
fn test_normalizer_contract() {
    assert_eq!(normalize("true"), "true");
    assert_eq!(normalize("42"), "42");
    assert_eq!(normalize("2024-01-01"), "2024-01-01");
    assert_eq!(normalize("hello world"), "'hello world'");
    assert_eq!(normalize("\"already\""), "\"already\"");
}

#[test]
fn test_batch_sync_reaches_fixed_point() {
    let engine = SyncEngine::new(SyncSettings::default());
    let mut buffer = EditorBuffer::from_text(
        "# Notes\nrating:: 5\nsome prose\ndue:: 2024-01-01\nmood:: pretty good",
    );
    let synced = sync_all(&engine, &mut buffer);
    assert_eq!(synced, 3);

    let text = buffer.text();
    assert!(text.starts_with("---\n"));
    assert!(text.contains("rating: 5\n"));
    assert!(text.contains("due: 2024-01-01\n"));
    assert!(text.contains("mood: 'pretty good'\n"));
    assert!(text.contains("\\_rating:: 5"));

    // A second pass is a fixed point.
    sync_all(&engine, &mut buffer);
    assert_eq!(buffer.text(), text);
}

#[test]
fn test_settings_roundtrip_feeds_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let custom = SyncSettings {
        synced_inline_prefix: "@@".to_string(),
        undo_key: 'u',
    };
    save_settings(&path, &custom).unwrap();
    let loaded = load_settings(&path).unwrap();

    let engine = SyncEngine::new(loaded);
    let mut buffer = focused("body\nfield:: 7", 1, 8);
    engine.evaluate(&mut buffer);
    assert_eq!(buffer.text(), "---\nfield: 7\n---\nbody\n@@field:: 7");
}

#[test]
fn test_eval_queue_runs_every_scheduled_evaluation() {
    let mut queue = EvalQueue::new(50);
    let engine = SyncEngine::new(SyncSettings::default());
    let mut buffer = focused("body\ncount:: 1", 1, 8);

    // Two keystrokes in quick succession schedule two evaluations.
    queue.schedule(1000);
    queue.schedule(1001);
    assert_eq!(queue.take_ready(1040), 0);

    let due = queue.take_ready(1060);
    assert_eq!(due, 2);
    for _ in 0..due {
        engine.evaluate(&mut buffer);
    }
    // Both evaluations ran; the second found the field already prefixed.
    assert_eq!(buffer.text(), "---\ncount: 1\n---\nbody\n\\_count:: 1");
}

#[test]
fn test_line_buffer_multiline_write_contract() {
    let mut buffer = EditorBuffer::from_text("only line");
    buffer.set_line(0, "a\nb\nc");
    assert_eq!(buffer.last_line_index(), 2);
    assert_eq!(buffer.line(1), Some("b".to_string()));
}
