//! Showroom desktop runner - the browser viewer in a native window

use anyhow::{Context, Result};
use clap::Parser;
use showroom_core::SceneManifest;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "showroom")]
#[command(about = "Interactive 3D showroom viewer")]
#[command(version)]
struct Args {
    /// Path to a scene manifest (TOML); the built-in scene is used when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Start in the dark theme
    #[arg(long)]
    dark: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Showroom v{}", env!("CARGO_PKG_VERSION"));

    let mut manifest = match &args.scene {
        Some(path) => SceneManifest::from_file(path)
            .with_context(|| format!("loading scene manifest {}", path.display()))?,
        None => SceneManifest::default(),
    };
    if args.dark {
        manifest.theme.start_dark = true;
    }

    showroom_web::app::run(manifest);
    Ok(())
}
