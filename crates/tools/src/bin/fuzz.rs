use anyhow::{Result, bail};
use clap::Parser;
use gridmap::audit::{audit_graph, audit_map};
use gridmap::{GridMap, GridMapConfig};
use log::debug;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    iterations: u32,
    #[arg(long, default_value_t = 32)]
    max_rows: u32,
    #[arg(long, default_value_t = 16)]
    max_cols: u32,
    #[arg(long, default_value_t = 24)]
    max_paths: u32,
}

fn pick(rng: &mut ChaCha8Rng, min_value: u32, max_value: u32) -> u32 {
    let range_size = u64::from(max_value - min_value) + 1;
    min_value + (rng.next_u64() % range_size) as u32
}

fn random_config(rng: &mut ChaCha8Rng, args: &Args) -> GridMapConfig {
    GridMapConfig::new(pick(rng, 2, args.max_rows.max(2)), pick(rng, 1, args.max_cols.max(1)))
        .with_paths(pick(rng, 0, args.max_paths))
        .with_seed(rng.next_u32())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} maps...", args.seed, args.iterations);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for iteration in 0..args.iterations {
        let config = random_config(&mut rng, &args);
        debug!("iteration {iteration}: {config:?}");
        let map = GridMap::from_config(&config)?;
        let graph = map.generate_graph_with_seed(rng.next_u64());

        if let Err(violation) = audit_map(&map).and_then(|()| audit_graph(&map, &graph)) {
            bail!("Invariant failed on iteration {iteration} with {config:?}: {violation}");
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
