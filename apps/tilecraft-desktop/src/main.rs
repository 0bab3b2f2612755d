mod app;
mod keymap;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tilecraft_assets::TextureCatalog;
use tilecraft_common::WorldConfig;
use tilecraft_persist::DEFAULT_WORLD_PATH;
use tilecraft_session::Session;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::app::GpuApp;

#[derive(Parser)]
#[command(name = "tilecraft-desktop", about = "Tilecraft desktop application")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// World snapshot, loaded at startup and saved on quit
    #[arg(long, default_value = DEFAULT_WORLD_PATH)]
    world: PathBuf,

    /// Directory holding block textures and an optional catalog.json
    #[arg(long, default_value = "textures")]
    textures: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("tilecraft-desktop starting");

    let config = WorldConfig::default();
    let grid = tilecraft_persist::load(&cli.world, config.grid_size());
    let session = Session::with_grid(config, grid)?;
    let catalog = TextureCatalog::load_or_default(&cli.textures);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(session, catalog, cli.textures);
    event_loop.run_app(&mut app)?;

    let session = app.finish()?;
    if let Err(e) = tilecraft_persist::save(&cli.world, session.grid()) {
        tracing::error!(path = %cli.world.display(), "failed to save world: {e}");
    }
    tracing::info!("tilecraft-desktop exiting");
    Ok(())
}
