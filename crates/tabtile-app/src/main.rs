// ABOUTME: Headless entry point for the tab layout engine.
// ABOUTME: Restores the saved layout, replays a command script, and saves after each turn.

mod content;
mod session;

use std::io::Read;

use anyhow::{Context, Result};
use tabtile_core::{Config, FileStorage};
use tabtile_layout::{Persister, Workspace};

use session::{Command, Session};

fn read_script() -> Result<String> {
    match std::env::args().nth(1) {
        Some(path) if path != "-" => {
            std::fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))
        }
        _ => {
            let mut script = String::new();
            std::io::stdin()
                .read_to_string(&mut script)
                .context("Failed to read commands from stdin")?;
            Ok(script)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting tabtile");

    let config = match Config::default_path() {
        Some(path) => Config::load_or_init(&path).unwrap_or_else(|e| {
            tracing::warn!("Using default config, {} is unusable: {}", path.display(), e);
            Config::default()
        }),
        None => Config::default(),
    };
    let storage = match &config.persistence.state_dir {
        Some(dir) => FileStorage::new(dir),
        None => FileStorage::open_default()?,
    };
    tracing::info!("Layout stored in {}", storage.dir().display());

    let registry = content::registry();
    let mut persister = Persister::from_settings(storage, &config.persistence);
    let workspace = persister.load(&registry).unwrap_or_else(Workspace::new);
    let mut session = Session::new(workspace, &config);

    let script = read_script()?;
    for (number, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command: Command = serde_json::from_str(line)
            .with_context(|| format!("Invalid command on line {}", number + 1))?;
        if !session.apply(command, &registry) {
            tracing::debug!("Line {} changed nothing", number + 1);
        }
        persister.flush(session.workspace());
    }

    let snapshot = session.workspace().snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
