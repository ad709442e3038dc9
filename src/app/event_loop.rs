use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::editor::EditorBuffer;
use crate::sync::{EvalQueue, SyncEngine};

use super::input;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, terminal
    /// initialization fails, or the event loop encounters an I/O
    /// failure.
    pub fn run(&mut self) -> Result<()> {
        let text = std::fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; fieldsync requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut buffer = EditorBuffer::from_text(&text);
        buffer.set_focus(true);
        let engine = SyncEngine::new(self.settings.clone());
        let mut model = Model::new(
            self.file_path.clone(),
            buffer,
            engine,
            (size.width, size.height),
        );

        let result = Self::event_loop(&mut terminal, &mut model);
        ratatui::restore();
        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut eval_queue = EvalQueue::default();
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            // Dispatch every deferred evaluation that has come due. The
            // queue is not coalesced; a keystroke burst dispatches a
            // matching burst of evaluations here.
            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            for _ in 0..eval_queue.take_ready(now_ms) {
                *model = update(std::mem::take(model), Message::SyncEvaluate);
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if eval_queue.is_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                match event::read()? {
                    Event::Key(key) => {
                        // Refresh timestamp after the poll wait so the
                        // deferred delay starts at the keystroke.
                        let event_ms =
                            u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                        if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
                            && model.engine.should_schedule(&key)
                        {
                            eval_queue.schedule(event_ms);
                        }
                        if let Some(msg) = input::message_for_key(&key) {
                            *model = update(std::mem::take(model), msg);
                            needs_render = true;
                        }
                    }
                    Event::Resize(width, height) => {
                        *model = update(std::mem::take(model), Message::Resize(width, height));
                        needs_render = true;
                    }
                    Event::FocusGained => model.buffer.set_focus(true),
                    Event::FocusLost => model.buffer.set_focus(false),
                    _ => {}
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
