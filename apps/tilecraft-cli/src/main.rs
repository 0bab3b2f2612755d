use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tilecraft_assets::TextureCatalog;
use tilecraft_common::WorldConfig;
use tilecraft_kernel::PlayerState;
use tilecraft_persist::DEFAULT_WORLD_PATH;
use tilecraft_render::{FrameView, TextRenderer, draw_frame};
use tilecraft_session::Selection;
use tilecraft_tools::WorldInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tilecraft-cli", about = "CLI tool for tilecraft worlds")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Summarize a saved world
    Inspect {
        #[arg(default_value = DEFAULT_WORLD_PATH)]
        world: PathBuf,
    },
    /// Print a saved world as text, with the player at spawn
    Show {
        #[arg(default_value = DEFAULT_WORLD_PATH)]
        world: PathBuf,
    },
    /// Report every problem in a saved world; fails if there are any
    Validate {
        #[arg(default_value = DEFAULT_WORLD_PATH)]
        world: PathBuf,
    },
    /// Load a world with recovery and write it back in canonical form.
    /// An unreadable input is only rebuilt into a separate --output file.
    Repair {
        #[arg(default_value = DEFAULT_WORLD_PATH)]
        world: PathBuf,
        /// Write here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = WorldConfig::default();

    match cli.command {
        Commands::Info => {
            println!("tilecraft-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "world: {n}x{n} cells, {dim}px, reach {reach}",
                n = config.grid_size(),
                dim = config.world_dim(),
                reach = config.reach()
            );
            println!("persist: {}", tilecraft_persist::crate_info());
            println!("render: {}", tilecraft_render::crate_info());
            println!("tools: {}", tilecraft_tools::crate_info());
        }
        Commands::Inspect { world } => {
            let loaded = tilecraft_persist::load_report(&world, config.grid_size());
            println!("{}", WorldInspector::summary(&loaded.grid));
            println!("digest: {}", tilecraft_persist::snapshot_digest(&loaded.grid)?);
            if !loaded.is_clean() {
                println!("issues: {} (run `validate` for details)", loaded.issues.len());
            }
        }
        Commands::Show { world } => {
            let grid = tilecraft_persist::load(&world, config.grid_size());
            let player = PlayerState::spawn(&config);
            let textures = TextRenderer::textures(&TextureCatalog::default());
            let mut renderer = TextRenderer::new(&config);
            let view = FrameView::new(&config, &grid, &player, Selection::default().block());
            draw_frame(&mut renderer, &textures, &view)?;
            print!("{}", renderer.frame());
        }
        Commands::Validate { world } => {
            let loaded = tilecraft_persist::load_report(&world, config.grid_size());
            if loaded.is_clean() {
                println!("{}: OK", world.display());
            } else {
                for issue in &loaded.issues {
                    println!("{}: {issue}", world.display());
                }
                anyhow::bail!("{} problem(s) in {}", loaded.issues.len(), world.display());
            }
        }
        Commands::Repair { world, output } => {
            let loaded = tilecraft_persist::load_report(&world, config.grid_size());
            for issue in &loaded.issues {
                tracing::warn!("{issue}");
            }
            let target = output.unwrap_or_else(|| world.clone());
            if loaded.is_unreadable() && target == world {
                anyhow::bail!(
                    "{} could not be read; refusing to overwrite it with an empty world \
                     (pass --output to write elsewhere)",
                    world.display()
                );
            }
            tilecraft_persist::save(&target, &loaded.grid)?;
            println!(
                "repaired {} -> {} ({} issue(s) fixed)",
                world.display(),
                target.display(),
                loaded.issues.len()
            );
        }
    }

    Ok(())
}
