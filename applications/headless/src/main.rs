/// Cadence Headless - terminal runner for the player core
use cadence_headless::{config::Settings, runner};
use cadence_playback::{Catalog, Player, SimulatedClock};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "cadence_playback=info,cadence_headless=info";

#[derive(Parser)]
#[command(name = "cadence-headless")]
#[command(about = "Drive the Cadence player from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog file (TOML or JSON), overrides `catalog_path`
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Start playing immediately
    #[arg(long)]
    autoplay: bool,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::load(cli.config.as_deref())?;
    settings.validate()?;

    // Initialize tracing
    let fallback = settings
        .log_filter
        .clone()
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let catalog = match cli.catalog.as_ref().or(settings.catalog_path.as_ref()) {
        Some(path) => Catalog::load(path)?,
        None => Catalog::demo(),
    };
    tracing::info!(tracks = catalog.len(), "Catalog ready");

    let config = settings.player_config();
    let clock = SimulatedClock::new(config.tick_period);
    let (player, handle) = Player::new(Arc::new(catalog), &config, clock);
    let player_task = tokio::spawn(player.run());
    let printer = tokio::spawn(runner::print_status(handle.subscribe(), std::io::stdout()));

    if cli.autoplay || settings.autoplay {
        handle.toggle_play()?;
    }

    let mut out = std::io::stdout();
    println!("{}", runner::render(&handle, &handle.snapshot()));
    match cli.script {
        Some(path) => {
            let file = tokio::fs::File::open(&path).await?;
            runner::execute(&handle, BufReader::new(file), &mut out).await?;
        }
        None => {
            runner::execute(&handle, BufReader::new(tokio::io::stdin()), &mut out).await?;
        }
    }

    handle.shutdown()?;
    player_task.await?;
    printer.await?;

    tracing::info!("Player stopped");
    Ok(())
}
