//! Whole-network analysis and batch runs.
//!
//! `BasinMap` follows every state of a (small) network to its attractor and groups the
//! states by the attractor they reach. `explore_configs` and `explore_seeds` run many
//! independent simulations in parallel. Each run owns its own `RandomSource`, so the results
//! do not depend on the scheduling of the worker threads.

use crate::attractor::{AttractorDescriptor, AttractorSearch};
use crate::biodivine_std::structs::{IdState, IdStateRange};
use crate::simulation::{RbnConfig, Simulation};
use crate::{NetworkState, RandomBooleanNetwork, RbnError};
use rayon::prelude::*;
use std::cmp::max;
use std::fmt::{Display, Error, Formatter};

/// The largest network for which `BasinMap::compute` enumerates the whole state space.
pub const MAX_EXHAUSTIVE_NODES: usize = 20;

/// **(internal)** Markers used in the basin table while states are being labeled.
const UNKNOWN: usize = usize::MAX;
const ON_PATH: usize = usize::MAX - 1;

/// One attractor together with the set of states that lead into it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Basin {
    cycle: Vec<NetworkState>,
    size: usize,
    max_transient: usize,
}

/// The partition of a state space into basins of attraction.
///
/// Basins are sorted by decreasing size; basins of equal size are ordered by their cycles.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BasinMap {
    num_nodes: usize,
    basins: Vec<Basin>,
}

/// The outcome of one run in a batch exploration.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub seed: u64,
    pub frozen_nodes: usize,
    pub search: AttractorSearch,
}

impl Basin {
    /// The attractor, rotated to start with its smallest state.
    pub fn cycle(&self) -> &[NetworkState] {
        &self.cycle
    }

    pub fn cycle_length(&self) -> usize {
        self.cycle.len()
    }

    pub fn is_fixed_point(&self) -> bool {
        self.cycle.len() == 1
    }

    /// The number of states (including the attractor itself) that end in this attractor.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The longest transient of any state in this basin.
    pub fn max_transient(&self) -> usize {
        self.max_transient
    }
}

impl BasinMap {
    /// Compute the basins of all attractors of `network` by labeling every one of its
    /// `2^N` states with its attractor and transient length. Successors are computed in
    /// parallel; labeling then visits every state once.
    ///
    /// Fails if the network has more than `MAX_EXHAUSTIVE_NODES` nodes.
    pub fn compute(network: &RandomBooleanNetwork) -> Result<BasinMap, RbnError> {
        let num_nodes = network.num_nodes();
        if num_nodes > MAX_EXHAUSTIVE_NODES {
            return Err(RbnError::config(format!(
                "Cannot enumerate the state space of {} nodes (at most {} allowed).",
                num_nodes, MAX_EXHAUSTIVE_NODES
            )));
        }
        let state_count = 1usize << num_nodes;
        if cfg!(feature = "print-progress") {
            println!(
                "Computing basins of attraction over {} states.",
                state_count
            );
        }

        // Successor of every state, indexed by the state's `IdState`.
        let successors: Vec<usize> = (0..state_count)
            .into_par_iter()
            .map(|id| {
                let state = NetworkState::from_id(num_nodes, IdState::from(id));
                network.successor(&state).to_id().map(usize::from)
            })
            .collect::<Option<Vec<usize>>>()
            .ok_or_else(|| RbnError::config("State space cannot be indexed by `usize`."))?;

        // Every state is visited once: a walk stops at the first state that already has a
        // basin, or closes a new cycle on its own path.
        let mut basin_of = vec![UNKNOWN; state_count];
        let mut depth = vec![0usize; state_count];
        let mut cycles: Vec<Vec<usize>> = Vec::new();
        let mut path: Vec<usize> = Vec::new();
        for id in IdStateRange::new(state_count) {
            let start = usize::from(id);
            if basin_of[start] != UNKNOWN {
                continue;
            }
            path.clear();
            let mut current = start;
            while basin_of[current] == UNKNOWN {
                basin_of[current] = ON_PATH;
                depth[current] = path.len();
                path.push(current);
                current = successors[current];
            }
            let (basin, exit_depth, transient_end) = if basin_of[current] == ON_PATH {
                let cycle_start = depth[current];
                let basin = cycles.len();
                for state in &path[cycle_start..] {
                    basin_of[*state] = basin;
                    depth[*state] = 0;
                }
                cycles.push(path[cycle_start..].to_vec());
                (basin, 0, cycle_start)
            } else {
                (basin_of[current], depth[current], path.len())
            };
            for (i, state) in path[..transient_end].iter().enumerate() {
                basin_of[*state] = basin;
                depth[*state] = exit_depth + transient_end - i;
            }
        }

        let mut sizes = vec![0usize; cycles.len()];
        let mut transients = vec![0usize; cycles.len()];
        for (basin, transient) in basin_of.iter().zip(depth.iter()) {
            sizes[*basin] += 1;
            transients[*basin] = max(transients[*basin], *transient);
        }

        let mut basins: Vec<Basin> = cycles
            .into_iter()
            .zip(sizes.into_iter().zip(transients))
            .map(|(cycle, (size, max_transient))| {
                let states: Vec<NetworkState> = cycle
                    .into_iter()
                    .map(|id| NetworkState::from_id(num_nodes, IdState::from(id)))
                    .collect();
                let cycle = AttractorDescriptor::new(0, states)
                    .map(|it| it.canonical_cycle())
                    .unwrap_or_default();
                Basin {
                    cycle,
                    size,
                    max_transient,
                }
            })
            .collect();
        basins.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.cycle.cmp(&b.cycle)));

        if cfg!(feature = "print-progress") {
            println!("Found {} attractors.", basins.len());
        }

        Ok(BasinMap { num_nodes, basins })
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn basins(&self) -> &[Basin] {
        &self.basins
    }

    /// The number of distinct attractors.
    pub fn num_attractors(&self) -> usize {
        self.basins.len()
    }

    pub fn num_fixed_points(&self) -> usize {
        self.basins.iter().filter(|it| it.is_fixed_point()).count()
    }

    /// The basin whose attractor contains `state`, if any.
    pub fn basin_of_attractor_state(&self, state: &NetworkState) -> Option<&Basin> {
        self.basins.iter().find(|it| it.cycle.contains(state))
    }
}

impl Display for BasinMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for basin in &self.basins {
            let cycle = basin
                .cycle
                .iter()
                .map(|it| it.to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            writeln!(
                f,
                "size {}, transient {}, period {}: {}",
                basin.size,
                basin.max_transient,
                basin.cycle_length(),
                cycle
            )?;
        }
        Ok(())
    }
}

/// Run every configuration as an independent `Simulation` and detect its attractor.
///
/// Results are returned in the order of `configs`. Invalid or noisy configurations produce
/// an `Err` entry without affecting the other runs.
pub fn explore_configs(configs: &[RbnConfig]) -> Vec<Result<RunSummary, RbnError>> {
    let results: Vec<Result<RunSummary, RbnError>> = configs
        .par_iter()
        .map(|config| -> Result<RunSummary, RbnError> {
            let mut simulation = Simulation::new(config.clone())?;
            let search = simulation.attractor()?;
            Ok(RunSummary {
                seed: config.seed,
                frozen_nodes: simulation.network().frozen_nodes().len(),
                search,
            })
        })
        .collect();
    if cfg!(feature = "print-progress") {
        let determined = results
            .iter()
            .filter(|it| matches!(it, Ok(summary) if summary.search.is_determined()))
            .count();
        println!(
            "Explored {} runs, {} with a determined attractor.",
            results.len(),
            determined
        );
    }
    results
}

/// Run `config` once for every seed in `seeds`.
pub fn explore_seeds(config: &RbnConfig, seeds: &[u64]) -> Vec<Result<RunSummary, RbnError>> {
    let configs: Vec<RbnConfig> = seeds
        .iter()
        .map(|seed| config.clone().with_seed(*seed))
        .collect();
    explore_configs(&configs)
}

#[cfg(test)]
mod tests {
    use crate::attractor::AttractorDetector;
    use crate::biodivine_std::structs::IdStateRange;
    use crate::exploration::{explore_configs, explore_seeds, BasinMap, MAX_EXHAUSTIVE_NODES};
    use crate::random_source::RandomSource;
    use crate::simulation::{RbnConfig, Simulation};
    use crate::{Connectivity, NetworkState, RandomBooleanNetwork, RbnError};
    use fxhash::FxHashMap;
    use pretty_assertions::assert_eq;
    use std::convert::TryFrom;

    fn states(values: &[&str]) -> Vec<NetworkState> {
        values
            .iter()
            .map(|it| NetworkState::try_from(*it).unwrap())
            .collect()
    }

    #[test]
    fn basins_of_rotation() {
        let network =
            RandomBooleanNetwork::try_from("n0 <- n2 : 01\nn1 <- n0 : 01\nn2 <- n1 : 01").unwrap();
        let map = BasinMap::compute(&network).unwrap();
        assert_eq!(3, map.num_nodes());
        assert_eq!(4, map.num_attractors());
        assert_eq!(2, map.num_fixed_points());
        let cycles: Vec<Vec<NetworkState>> =
            map.basins().iter().map(|it| it.cycle().to_vec()).collect();
        assert_eq!(
            vec![
                states(&["001", "100", "010"]),
                states(&["011", "101", "110"]),
                states(&["000"]),
                states(&["111"]),
            ],
            cycles
        );
        let sizes: Vec<usize> = map.basins().iter().map(|it| it.size()).collect();
        assert_eq!(vec![3, 3, 1, 1], sizes);
        assert!(map.basins().iter().all(|it| it.max_transient() == 0));
        assert_eq!(
            Some("size 3, transient 0, period 3: 001 -> 100 -> 010"),
            map.to_string().lines().next()
        );
    }

    #[test]
    fn basins_with_transients() {
        // n0 copies n1, n1 is constant true: every path ends in 11 within two steps.
        let network = RandomBooleanNetwork::try_from("n0 <- n1 : 01\nn1 <- : 1").unwrap();
        let map = BasinMap::compute(&network).unwrap();
        assert_eq!(1, map.num_attractors());
        let basin = &map.basins()[0];
        assert_eq!(states(&["11"]), basin.cycle().to_vec());
        assert_eq!(4, basin.size());
        assert_eq!(2, basin.max_transient());
        assert!(map
            .basin_of_attractor_state(&NetworkState::try_from("11").unwrap())
            .is_some());
        assert!(map
            .basin_of_attractor_state(&NetworkState::try_from("00").unwrap())
            .is_none());
    }

    #[test]
    fn basins_partition_the_state_space() {
        for seed in 0..10 {
            let config = RbnConfig::new(7, Connectivity::Fixed(2));
            let network =
                RandomBooleanNetwork::generate(&config, &mut RandomSource::new(seed)).unwrap();
            let map = BasinMap::compute(&network).unwrap();
            let total: usize = map.basins().iter().map(|it| it.size()).sum();
            assert_eq!(1 << 7, total);
            for basin in map.basins() {
                let start = basin.cycle()[0].clone();
                let search = AttractorDetector::find_attractor(&network, start, 1 << 7);
                let descriptor = search.descriptor().unwrap();
                assert_eq!(0, descriptor.transient_length());
                assert_eq!(basin.cycle().to_vec(), descriptor.canonical_cycle());
                assert!(basin.size() >= basin.cycle_length());
            }
        }
    }

    /// Labeling must agree with following every state separately to its attractor.
    #[test]
    fn basins_match_per_state_search() {
        for seed in 0..5 {
            let config = RbnConfig::new(9, Connectivity::Fixed(4));
            let network =
                RandomBooleanNetwork::generate(&config, &mut RandomSource::new(seed)).unwrap();
            let mut expected: FxHashMap<Vec<NetworkState>, (usize, usize)> = FxHashMap::default();
            for id in IdStateRange::new(1 << 9) {
                let initial = NetworkState::from_id(9, id);
                let search = AttractorDetector::find_attractor(&network, initial, 1 << 9);
                let descriptor = search.into_descriptor().unwrap();
                let entry = expected.entry(descriptor.canonical_cycle()).or_insert((0, 0));
                entry.0 += 1;
                entry.1 = entry.1.max(descriptor.transient_length());
            }
            let map = BasinMap::compute(&network).unwrap();
            assert_eq!(expected.len(), map.num_attractors());
            for basin in map.basins() {
                assert_eq!(
                    Some(&(basin.size(), basin.max_transient())),
                    expected.get(basin.cycle())
                );
            }
        }
    }

    #[test]
    fn basins_of_large_network_are_rejected() {
        let config = RbnConfig::new(MAX_EXHAUSTIVE_NODES + 1, Connectivity::Fixed(1));
        let network = RandomBooleanNetwork::generate(&config, &mut RandomSource::new(0)).unwrap();
        assert!(BasinMap::compute(&network).unwrap_err().is_config_error());
    }

    #[test]
    fn seed_exploration_matches_single_runs() {
        let config = RbnConfig::new(6, Connectivity::Fixed(2)).with_steps(65);
        let seeds = [3, 1, 4, 1, 5];
        let results = explore_seeds(&config, &seeds);
        assert_eq!(seeds.len(), results.len());
        for (seed, result) in seeds.iter().zip(results) {
            let summary = result.unwrap();
            assert_eq!(*seed, summary.seed);
            assert!(summary.search.is_determined());
            let mut simulation = Simulation::new(config.clone().with_seed(*seed)).unwrap();
            assert_eq!(simulation.attractor().unwrap(), summary.search);
            assert_eq!(
                simulation.network().frozen_nodes().len(),
                summary.frozen_nodes
            );
        }
    }

    #[test]
    fn failed_runs_do_not_affect_others() {
        let configs = vec![
            RbnConfig::new(4, Connectivity::Fixed(1)).with_steps(17),
            RbnConfig::new(4, Connectivity::Fixed(4)),
            RbnConfig::new(4, Connectivity::Fixed(1)).with_noise(0.25),
        ];
        let results = explore_configs(&configs);
        assert!(results[0].is_ok());
        assert!(results[1].as_ref().unwrap_err().is_config_error());
        assert_eq!(
            &RbnError::NoiseAttractorConflict(0.25),
            results[2].as_ref().unwrap_err()
        );
    }
}
