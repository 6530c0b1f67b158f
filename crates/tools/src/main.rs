use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use gridmap::{GraphEdge, GridMap, GridMapConfig, Point2, runtime_seed};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with grid settings; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    rows: Option<u32>,
    #[arg(long)]
    cols: Option<u32>,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    width_scale: Option<f64>,
    #[arg(long)]
    height_scale: Option<f64>,
    #[arg(short, long)]
    paths: Option<u32>,
    /// Walk seed; the built-in default seed is used when absent
    #[arg(short, long)]
    seed: Option<u32>,
    /// Seed for vertex jitter; fresh entropy when absent
    #[arg(short, long)]
    jitter_seed: Option<u64>,
    /// Write the JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct MapExport<'a> {
    rows: u32,
    cols: u32,
    seed: u32,
    jitter_seed: u64,
    fingerprint: u64,
    vertices: &'a [Point2],
    edges: &'a [GraphEdge],
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = resolve_config(&args)?;
    let map = GridMap::from_config(&config).context("Grid configuration rejected")?;
    let jitter_seed = args.jitter_seed.unwrap_or_else(runtime_seed);
    let graph = map.generate_graph_with_seed(jitter_seed);

    let export = MapExport {
        rows: map.rows(),
        cols: map.cols(),
        seed: map.seed(),
        jitter_seed,
        fingerprint: graph.fingerprint(),
        vertices: &graph.vertices,
        edges: &graph.edges,
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&export)
    } else {
        serde_json::to_string(&export)
    }
    .context("Failed to serialize map graph")?;

    match &args.output {
        Some(path) => {
            write_atomic(path, &json)
                .with_context(|| format!("Failed to write map file: {}", path.display()))?;
            println!(
                "Wrote {} vertices and {} edges to {}",
                graph.vertices.len(),
                graph.edges.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn resolve_config(args: &Args) -> Result<GridMapConfig> {
    let mut config = match &args.config {
        Some(path) => GridMapConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => GridMapConfig::default(),
    };

    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(width_scale) = args.width_scale {
        config.width_scale = width_scale;
    }
    if let Some(height_scale) = args.height_scale {
        config.height_scale = height_scale;
    }
    if let Some(paths) = args.paths {
        config.num_paths = paths;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    Ok(config)
}

fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
