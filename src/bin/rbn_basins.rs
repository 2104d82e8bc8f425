/*
   Generate one random Boolean network and compute the basins of attraction of all its
   attractors by exhaustive enumeration of the state space.

   Usage: rbn-basins <nodes> <connectivity> <seed> [bias]
*/

use biodivine_lib_rbn::exploration::BasinMap;
use biodivine_lib_rbn::random_source::RandomSource;
use biodivine_lib_rbn::simulation::{RbnConfig, DEFAULT_BIAS};
use biodivine_lib_rbn::{Connectivity, RandomBooleanNetwork};
use std::convert::TryFrom;
use std::process::exit;
use std::time::SystemTime;

fn main() {
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() < 4 || args.len() > 5 {
        eprintln!("Usage: rbn-basins <nodes> <connectivity> <seed> [bias]");
        exit(2);
    }

    let nodes: usize = args[1].parse().unwrap_or_else(|_| fail("Invalid number of nodes."));
    let connectivity = Connectivity::try_from(args[2].as_str()).unwrap_or_else(|e| fail(e));
    let seed: u64 = args[3].parse().unwrap_or_else(|_| fail("Invalid seed."));
    let bias: f64 = match args.get(4) {
        Some(it) => it.parse().unwrap_or_else(|_| fail("Invalid bias.")),
        None => DEFAULT_BIAS,
    };

    let config = RbnConfig::new(nodes, connectivity)
        .with_seed(seed)
        .with_bias(bias);
    config.validate().unwrap_or_else(|e| fail(e));
    let network = RandomBooleanNetwork::generate(&config, &mut RandomSource::new(seed))
        .unwrap_or_else(|e| fail(e));
    print!("{}", network);

    let start = SystemTime::now();
    let basins = BasinMap::compute(&network).unwrap_or_else(|e| fail(e));
    println!(
        "# {} attractors ({} fixed points) found in {}ms.",
        basins.num_attractors(),
        basins.num_fixed_points(),
        start.elapsed().map(|it| it.as_millis()).unwrap_or(0)
    );
    print!("{}", basins);
}

fn fail<E: std::fmt::Display>(error: E) -> ! {
    eprintln!("{}", error);
    exit(1)
}
