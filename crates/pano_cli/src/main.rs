//! Pano CLI
//!
//! - `pano check <gallery.toml>`: validate a gallery file and summarize it
//! - `pano simulate <gallery.toml>`: replay a scripted scroll session and log
//!   progress and visibility changes

mod simulate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pano_gallery::GalleryConfig;
use tracing_subscriber::EnvFilter;

use crate::simulate::SimulationOptions;

/// Smooth-scroll gallery tooling
#[derive(Parser, Debug)]
#[command(name = "pano")]
#[command(about = "Validate gallery files and replay scroll sessions")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a gallery file and print a summary
    Check {
        /// Gallery TOML file
        path: PathBuf,
    },
    /// Replay wheel input at 60 fps and log progress and visibility
    Simulate {
        /// Gallery TOML file
        path: PathBuf,

        /// Viewport width
        #[arg(long, default_value = "1280")]
        width: f32,

        /// Viewport height
        #[arg(long, default_value = "800")]
        height: f32,

        /// Number of frames to run
        #[arg(long, default_value = "240")]
        frames: u32,

        /// Wheel delta per event (px)
        #[arg(long, default_value = "120")]
        wheel: f32,

        /// Animate to this offset halfway through
        #[arg(long)]
        scroll_to: Option<f32>,

        /// Seed for visibility sampling
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Command::Check { path } => cmd_check(&path),
        Command::Simulate {
            path,
            width,
            height,
            frames,
            wheel,
            scroll_to,
            seed,
        } => cmd_simulate(
            &path,
            SimulationOptions {
                width,
                height,
                frames,
                wheel,
                scroll_to,
                seed,
            },
        ),
    }
}

fn load(path: &Path) -> Result<GalleryConfig> {
    GalleryConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn cmd_check(path: &Path) -> Result<()> {
    let config = load(path)?;
    let breakpoints = config.breakpoint_set();

    println!("{}: ok", config.name);
    println!("  axis: {:?}", config.axis);
    println!("  preload margin: {:?}", config.preload_margin);
    println!("  items: {}", config.items.len());
    for bp in breakpoints.iter() {
        let placed = config
            .items
            .iter()
            .filter(|item| item.placements.contains_key(&bp.name))
            .count();
        let (width, height) = config.content_size(bp.min_width);
        println!(
            "  breakpoint {} (>= {}px): {} placed, content {}x{}",
            bp.name, bp.min_width, placed, width, height
        );
    }
    Ok(())
}

fn cmd_simulate(path: &Path, options: SimulationOptions) -> Result<()> {
    let config = load(path)?;
    let report = simulate::run(&config, &options);

    println!(
        "{} frames, offset {:.1} / {:.1} (progress {:.3})",
        report.frames_run,
        report.final_progress.offset,
        report.limit,
        report.final_progress.progress
    );
    println!(
        "{} progress updates, {} visibility requests ({} changed the map)",
        report.progress_updates,
        report.visibility_requests.len(),
        report.visibility_changes
    );
    println!("visible items: {:?}", report.visible);
    Ok(())
}
