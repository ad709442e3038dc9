//! Fieldsync - keep inline fields in sync with frontmatter.
//!
//! # Usage
//!
//! ```bash
//! fieldsync note.md            # interactive editor with live sync
//! fieldsync --batch note.md    # sync every inline field once and exit
//! fieldsync --watch note.md    # re-sync whenever the file changes
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use fieldsync::app::App;
use fieldsync::config::{SyncSettings, load_settings, save_settings, settings_path};
use fieldsync::editor::EditorBuffer;
use fieldsync::sync::{SyncEngine, sync_all};
use fieldsync::watcher::{FileWatcher, hash_text};

/// Keep inline field:: value annotations in sync with YAML frontmatter
#[derive(Parser, Debug)]
#[command(name = "fieldsync", version, about, long_about = None)]
struct Cli {
    /// Markdown file to sync
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Sync every inline field once, write the file, and exit
    #[arg(long)]
    batch: bool,

    /// Watch the file and re-sync on every external change
    #[arg(short, long)]
    watch: bool,

    /// Override the prefix added to synced inline field names
    #[arg(long, value_name = "PREFIX")]
    prefix: Option<String>,

    /// Override the undo key guarded as ctrl+key
    #[arg(long, value_name = "KEY")]
    undo_key: Option<char>,

    /// Use a specific settings file instead of the platform default
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Persist the effective settings as the new defaults
    #[arg(long)]
    save_settings: bool,
}

fn effective_settings(cli: &Cli) -> Result<(PathBuf, SyncSettings)> {
    let path = cli.settings.clone().unwrap_or_else(settings_path);
    let mut settings = load_settings(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    if let Some(prefix) = &cli.prefix {
        settings.synced_inline_prefix.clone_from(prefix);
    }
    if let Some(undo_key) = cli.undo_key {
        settings.undo_key = undo_key;
    }
    Ok((path, settings))
}

/// Run one batch sync over the file, writing it back only when something
/// changed. Returns the number of fields synced.
fn run_batch(file: &Path, settings: SyncSettings) -> Result<usize> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let engine = SyncEngine::new(settings);
    let mut buffer = EditorBuffer::from_text(&text);
    let synced = sync_all(&engine, &mut buffer);
    let updated = buffer.text();
    if updated != text {
        std::fs::write(file, &updated)
            .with_context(|| format!("Failed to write {}", file.display()))?;
    }
    Ok(synced)
}

/// Watch the file and re-run the batch sync after every external change.
///
/// The daemon's own writes come back as change events; comparing the
/// content hash against the last text we produced filters them out.
fn run_watch(file: &Path, settings: SyncSettings) -> Result<()> {
    let engine = SyncEngine::new(settings);
    let mut watcher = FileWatcher::new(file, Duration::from_millis(200))
        .with_context(|| format!("Failed to watch {}", file.display()))?;
    tracing::info!(path = %watcher.target_path().display(), "watching");

    let mut last_written: Option<u64> = None;
    loop {
        if watcher.take_change_ready() {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            if last_written == Some(hash_text(&text)) {
                tracing::trace!("change was our own write, skipping");
            } else {
                let mut buffer = EditorBuffer::from_text(&text);
                let synced = sync_all(&engine, &mut buffer);
                let updated = buffer.text();
                if updated == text {
                    tracing::debug!("nothing to sync");
                } else {
                    std::fs::write(file, &updated)
                        .with_context(|| format!("Failed to write {}", file.display()))?;
                    last_written = Some(hash_text(&updated));
                    println!("synced {synced} field(s) in {}", file.display());
                }
            }
        }
        std::thread::sleep(Duration::from_millis(250));
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let (settings_file, settings) = effective_settings(&cli)?;

    if cli.save_settings {
        save_settings(&settings_file, &settings)
            .with_context(|| format!("Failed to save settings to {}", settings_file.display()))?;
    }

    // Verify file exists
    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    if cli.batch {
        let synced = run_batch(&cli.file, settings)?;
        println!("synced {synced} field(s) in {}", cli.file.display());
        return Ok(());
    }
    if cli.watch {
        return run_watch(&cli.file, settings);
    }

    // Run the interactive editor
    let mut app = App::new(cli.file).with_settings(settings);
    app.run().context("Application error")
}
