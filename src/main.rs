use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use avatar_replay::action_log::{load_action_log, reduce_latest_choices, ActionEvent, LogError};
use avatar_replay::config::{Settings, SETTINGS_FILE};
use avatar_replay::replay::ReplayDriver;
use avatar_replay::surface::CdpSurface;
use avatar_replay::taxonomy::Taxonomy;

/// Replay a recorded avatar customization session against a live editor.
#[derive(Parser, Debug)]
#[command(name = "avatar-replay", version, about)]
struct Cli {
    /// Path to the recorded action log.
    #[arg(default_value = "events.json")]
    events: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::load_or_default(Path::new(SETTINGS_FILE))?;

    // Taxonomy inconsistencies are the one fatal startup error.
    let taxonomy = Taxonomy::editor_default()?;

    let choices = load_choices(&cli.events);
    info!(count = choices.len(), "reduced action log to final choices");

    if let Err(err) = run_replay(settings, taxonomy, &choices).await {
        error!(error = %err, "replay failed");
    }

    // Keep the process (and with it the inspected browser page) alive until
    // terminated externally.
    info!("replay finished, leaving the editor open for inspection");
    std::future::pending::<()>().await;
    unreachable!("pending future never resolves")
}

/// Load and reduce the action log. Every load failure is recovered locally:
/// replay still opens the editor, just with nothing to apply.
fn load_choices(path: &Path) -> HashMap<String, ActionEvent> {
    match load_action_log(path) {
        Ok(events) => reduce_latest_choices(events),
        Err(err @ LogError::NotFound { .. }) => {
            error!(error = %err, "input file missing, replaying nothing");
            HashMap::new()
        }
        Err(err @ LogError::Parse(_)) => {
            error!(error = %err, "input file unparseable, replaying nothing");
            HashMap::new()
        }
        Err(err) => {
            error!(error = %err, "input file unreadable, replaying nothing");
            HashMap::new()
        }
    }
}

async fn run_replay(
    settings: Settings,
    taxonomy: Taxonomy,
    choices: &HashMap<String, ActionEvent>,
) -> Result<()> {
    let surface = CdpSurface::connect(
        &settings.devtools_endpoint,
        settings.page.clone(),
        settings.pacing.scroll_reveal(),
    )
    .await?;

    let driver = ReplayDriver::new(surface, taxonomy, settings);
    driver.run(choices).await?;
    Ok(())
}
