/*
   Generate one random Boolean network and simulate it from a random initial state.

   Usage: rbn-simulate <nodes> <connectivity> <steps> <seed> [bias] [noise]

   The connectivity is either a single number (`3`) or a range (`2..5`). The binary prints
   the generated network, the trajectory (one state per line, a heatmap with nodes as
   columns), the Hamming distance between consecutive states and, for noise-free runs,
   the detected attractor.
*/

use biodivine_lib_rbn::attractor::{AttractorDetector, AttractorSearch};
use biodivine_lib_rbn::simulation::{RbnConfig, Simulation, DEFAULT_BIAS};
use biodivine_lib_rbn::Connectivity;
use std::convert::TryFrom;
use std::process::exit;
use std::str::FromStr;

fn main() {
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() < 5 || args.len() > 7 {
        eprintln!("Usage: rbn-simulate <nodes> <connectivity> <steps> <seed> [bias] [noise]");
        exit(2);
    }

    let nodes: usize = parse_arg(&args[1], "nodes");
    let connectivity = Connectivity::try_from(args[2].as_str()).unwrap_or_else(|e| fail(e));
    let steps: usize = parse_arg(&args[3], "steps");
    let seed: u64 = parse_arg(&args[4], "seed");
    let bias: f64 = args.get(5).map_or(DEFAULT_BIAS, |it| parse_arg(it, "bias"));
    let noise: f64 = args.get(6).map_or(0.0, |it| parse_arg(it, "noise"));

    let config = RbnConfig::new(nodes, connectivity)
        .with_steps(steps)
        .with_seed(seed)
        .with_bias(bias)
        .with_noise(noise);
    let mut simulation = Simulation::new(config).unwrap_or_else(|e| fail(e));

    println!("# Network ({} nodes, seed {})", nodes, seed);
    print!("{}", simulation.network());
    println!(
        "# {} frozen nodes, state space of {} states.",
        simulation.network().frozen_nodes().len(),
        simulation.network().state_space_size()
    );

    let trajectory = simulation.run();
    println!("# Trajectory");
    print!("{}", trajectory);
    println!("# Hamming distances: {:?}", trajectory.hamming_distances());

    match AttractorDetector::detect(&trajectory) {
        Ok(AttractorSearch::Determined(attractor)) => {
            println!(
                "# Attractor: transient {}, period {}.",
                attractor.transient_length(),
                attractor.cycle_length()
            );
            for state in attractor.cycle_states() {
                println!("{}", state);
            }
        }
        Ok(AttractorSearch::Undetermined { observed_steps }) => {
            println!(
                "# No attractor found within {} steps. Try more steps.",
                observed_steps
            );
        }
        Err(e) => println!("# {}", e),
    }
}

fn parse_arg<T: FromStr>(value: &str, name: &str) -> T {
    value
        .parse::<T>()
        .unwrap_or_else(|_| fail(format!("Invalid {}: '{}'.", name, value)))
}

fn fail<E: std::fmt::Display>(error: E) -> ! {
    eprintln!("{}", error);
    exit(1)
}
