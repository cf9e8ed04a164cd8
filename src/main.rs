use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use glam::Vec2;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tilewalk::assets::FolderAssets;
use tilewalk::config::GameConfig;
use tilewalk::engine::{self, Simulation};
use tilewalk::map::{self, BuildOptions, MapDocument};
use tilewalk::movement::Mode;
use tilewalk::renderer::TraceSink;

/// Walk a character around an exported tile map.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Map document (JSON export).
    map: PathBuf,
    /// Asset folder with `tiles/`, `items/` and `items.json`.
    #[arg(long)]
    assets: PathBuf,
    /// Optional JSON config overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Spawn cell as `x,y`; defaults to the map centre.
    #[arg(long, value_parser = parse_cell)]
    spawn: Option<(i32, i32)>,
    /// Skip the window: walk to this cell, log the route and exit.
    #[arg(long, value_parser = parse_cell)]
    walk_to: Option<(i32, i32)>,
}

fn parse_cell(s: &str) -> Result<(i32, i32), String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected x,y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok((x, y))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tilewalk=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };

    let doc = MapDocument::from_path(&cli.map)?;
    let assets = FolderAssets::load(&cli.assets)
        .with_context(|| format!("loading assets from {:?}", cli.assets))?;
    let options = BuildOptions {
        tile_size: config.tile_size,
        highlight_blocking: config.highlight_blocking,
    };
    let built = map::build(&doc, &assets, options).context("building map grid")?;
    info!(
        width = doc.map_width,
        height = doc.map_height,
        sprites = built.sprites.len(),
        "map loaded from {:?}",
        cli.map
    );

    let spawn = cli
        .spawn
        .unwrap_or((doc.map_width as i32 / 2, doc.map_height as i32 / 2));
    let viewport = Vec2::new(config.window.width as f32, config.window.height as f32);
    let mut sim = Simulation::new(built.grid, spawn, viewport, &config);

    if let Some(goal) = cli.walk_to {
        return walk_headless(&mut sim, goal);
    }

    engine::run(sim, built.sprites, TraceSink::default(), &config)?;
    Ok(())
}

fn walk_headless<I>(sim: &mut Simulation<I>, goal: (i32, i32)) -> anyhow::Result<()> {
    let steps = sim.walk_to_cell(goal);
    if steps == 0 {
        bail!("no path from {:?} to {:?}", sim.controller().cell(), goal);
    }

    let dt = 1.0 / 60.0;
    let mut ticks = 0u32;
    while sim.controller().mode() != Mode::Idle {
        sim.tick(dt);
        ticks += 1;
    }
    info!(
        cells = steps,
        ticks,
        seconds = ticks as f32 * dt,
        position = ?sim.controller().position(),
        "arrived"
    );
    Ok(())
}
