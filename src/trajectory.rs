//! Simulation of a network from an initial state for a fixed number of steps.
//!
//! A `TrajectoryRunner` produces a lazy `TrajectoryIter` which yields `T + 1` states (the
//! initial state and one state per step). The iterator can be dropped at any step boundary;
//! the states produced so far remain a valid (if possibly inconclusive) prefix. Collecting
//! the iterator yields a `Trajectory`, which is what the attractor detection and the
//! visualisation layers consume.

use crate::noise::NoiseInjector;
use crate::random_source::RandomSource;
use crate::{NetworkState, NodeId, RandomBooleanNetwork, RbnError};
use std::fmt::{Display, Error, Formatter};
use std::ops::Index;

/// A recorded sequence of network states, starting with the initial state.
///
/// The trajectory remembers the noise probability it was generated with, so that attractor
/// detection can refuse noisy data.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    states: Vec<NetworkState>,
    noise_probability: f64,
}

/// Drives the synchronous update of a network, optionally followed by noise injection.
#[derive(Clone, Copy, Debug)]
pub struct TrajectoryRunner<'a> {
    network: &'a RandomBooleanNetwork,
    noise: NoiseInjector,
}

/// A lazy iterator over the states of one run. See `TrajectoryRunner::iter`.
#[derive(Debug)]
pub struct TrajectoryIter<'a, 'r> {
    network: &'a RandomBooleanNetwork,
    noise: NoiseInjector,
    source: &'r mut RandomSource,
    initial: Option<NetworkState>,
    previous: Option<NetworkState>,
    remaining: usize,
}

impl<'a> TrajectoryRunner<'a> {
    /// A noise-free runner for the given `network`.
    pub fn new(network: &'a RandomBooleanNetwork) -> TrajectoryRunner<'a> {
        TrajectoryRunner {
            network,
            noise: NoiseInjector::disabled(),
        }
    }

    /// Apply the given `noise` after every update.
    pub fn with_noise(self, noise: NoiseInjector) -> TrajectoryRunner<'a> {
        TrajectoryRunner { noise, ..self }
    }

    pub fn noise(&self) -> NoiseInjector {
        self.noise
    }

    /// Start a lazy run of `steps` steps from `initial`. Randomness (if any) is drawn from
    /// `source` only as the iterator advances.
    ///
    /// Returns `Err` if `initial` does not have one value per network node.
    pub fn iter<'r>(
        &self,
        initial: NetworkState,
        steps: usize,
        source: &'r mut RandomSource,
    ) -> Result<TrajectoryIter<'a, 'r>, RbnError> {
        if initial.len() != self.network.num_nodes() {
            return Err(RbnError::config(format!(
                "Initial state has {} values, but the network has {} nodes.",
                initial.len(),
                self.network.num_nodes()
            )));
        }
        Ok(TrajectoryIter::start(
            self.network,
            self.noise,
            initial,
            steps,
            source,
        ))
    }

    /// Run `steps` steps from `initial` and record all `steps + 1` states.
    pub fn run(
        &self,
        initial: NetworkState,
        steps: usize,
        source: &mut RandomSource,
    ) -> Result<Trajectory, RbnError> {
        Ok(self.iter(initial, steps, source)?.into_trajectory())
    }
}

impl<'a, 'r> TrajectoryIter<'a, 'r> {
    /// **(internal)** Start a run without checking that `initial` fits the network.
    pub(crate) fn start(
        network: &'a RandomBooleanNetwork,
        noise: NoiseInjector,
        initial: NetworkState,
        steps: usize,
        source: &'r mut RandomSource,
    ) -> TrajectoryIter<'a, 'r> {
        TrajectoryIter {
            network,
            noise,
            source,
            initial: Some(initial),
            previous: None,
            remaining: steps,
        }
    }

    /// Run the remaining steps and record all states which were not consumed yet.
    pub fn into_trajectory(self) -> Trajectory {
        let noise_probability = self.noise.probability();
        let num_nodes = self.network.num_nodes();
        let states: Vec<NetworkState> = self.collect();
        if cfg!(feature = "print-progress") {
            println!(
                "Simulated {} states of a network with {} nodes (noise {}).",
                states.len(),
                num_nodes,
                noise_probability
            );
        }
        Trajectory {
            states,
            noise_probability,
        }
    }
}

impl<'a, 'r> Iterator for TrajectoryIter<'a, 'r> {
    type Item = NetworkState;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(initial) = self.initial.take() {
            self.previous = Some(initial.clone());
            return Some(initial);
        }
        if self.remaining == 0 {
            return None;
        }
        let previous = self.previous.as_ref()?;
        let mut next = self.network.successor(previous);
        self.noise.apply(&mut next, self.source);
        self.remaining -= 1;
        self.previous = Some(next.clone());
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.remaining + usize::from(self.initial.is_some());
        (left, Some(left))
    }
}

impl<'a, 'r> ExactSizeIterator for TrajectoryIter<'a, 'r> {}

impl Trajectory {
    /// Wrap explicitly given `states` (e.g. a truncated prefix of a run). At least one state
    /// is required and all states must have the same length.
    pub fn new(states: Vec<NetworkState>, noise_probability: f64) -> Result<Trajectory, RbnError> {
        let first = states
            .first()
            .ok_or_else(|| RbnError::config("A trajectory needs at least one state."))?;
        if states.iter().any(|it| it.len() != first.len()) {
            return Err(RbnError::config(
                "All states of a trajectory must have the same number of nodes.",
            ));
        }
        crate::_impl_truth_table::check_probability("noise probability", noise_probability)?;
        Ok(Trajectory {
            states,
            noise_probability,
        })
    }

    /// The number of recorded states (`T + 1`).
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false, a trajectory contains at least the initial state.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The number of simulated steps (`T`).
    pub fn steps(&self) -> usize {
        self.states.len() - 1
    }

    pub fn states(&self) -> &[NetworkState] {
        &self.states
    }

    pub fn initial(&self) -> &NetworkState {
        &self.states[0]
    }

    pub fn last(&self) -> &NetworkState {
        &self.states[self.states.len() - 1]
    }

    pub fn noise_probability(&self) -> f64 {
        self.noise_probability
    }

    /// True if the trajectory was generated with a non-zero noise probability.
    pub fn is_noisy(&self) -> bool {
        self.noise_probability > 0.0
    }

    /// Hamming distance between every pair of consecutive states (`T` values).
    pub fn hamming_distances(&self) -> Vec<usize> {
        self.states
            .windows(2)
            .map(|pair| pair[0].hamming_distance(&pair[1]))
            .collect()
    }

    /// Hamming distance of every state to the initial state (`T + 1` values).
    pub fn hamming_from_initial(&self) -> Vec<usize> {
        let initial = self.initial();
        self.states
            .iter()
            .map(|it| initial.hamming_distance(it))
            .collect()
    }

    /// Values of one node over time (one row of a heatmap).
    pub fn node_history(&self, node: NodeId) -> Vec<bool> {
        self.states.iter().map(|it| it.get(node)).collect()
    }

    pub fn into_states(self) -> Vec<NetworkState> {
        self.states
    }
}

impl Index<usize> for Trajectory {
    type Output = NetworkState;

    fn index(&self, index: usize) -> &Self::Output {
        &self.states[index]
    }
}

impl Display for Trajectory {
    /// One line per step: the step index followed by the state as a bit string.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let width = self.steps().to_string().len();
        for (i, state) in self.states.iter().enumerate() {
            writeln!(f, "{:>width$} {}", i, state, width = width)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::noise::NoiseInjector;
    use crate::random_source::RandomSource;
    use crate::trajectory::{Trajectory, TrajectoryRunner};
    use crate::{NetworkState, NodeId, RandomBooleanNetwork};
    use pretty_assertions::assert_eq;
    use std::convert::TryFrom;

    /// A three node rotation: every node copies its left neighbour.
    fn rotation() -> RandomBooleanNetwork {
        RandomBooleanNetwork::try_from("n0 <- n2 : 01\nn1 <- n0 : 01\nn2 <- n1 : 01").unwrap()
    }

    #[test]
    fn noise_free_run() {
        let network = rotation();
        let runner = TrajectoryRunner::new(&network);
        let initial = NetworkState::try_from("100").unwrap();
        let trajectory = runner
            .run(initial, 4, &mut RandomSource::new(0))
            .unwrap();
        assert_eq!(5, trajectory.len());
        assert_eq!(4, trajectory.steps());
        assert!(!trajectory.is_noisy());
        let text: Vec<String> = trajectory.states().iter().map(|s| s.to_string()).collect();
        assert_eq!(vec!["100", "010", "001", "100", "010"], text);
        assert_eq!(vec![2, 2, 2, 2], trajectory.hamming_distances());
        assert_eq!(vec![0, 2, 2, 0, 2], trajectory.hamming_from_initial());
        assert_eq!(
            vec![true, false, false, true, false],
            trajectory.node_history(NodeId::from(0))
        );
        assert_eq!("0 100\n1 010\n2 001\n3 100\n4 010\n", trajectory.to_string());
    }

    #[test]
    fn lazy_iteration_can_stop_early() {
        let network = rotation();
        let runner = TrajectoryRunner::new(&network).with_noise(NoiseInjector::new(0.5).unwrap());
        let mut source = RandomSource::new(3);
        let mut iter = runner
            .iter(NetworkState::new(3), 1000, &mut source)
            .unwrap();
        assert_eq!(1001, iter.len());
        let prefix: Vec<NetworkState> = iter.by_ref().take(3).collect();
        assert_eq!(3, prefix.len());
        assert_eq!(998, iter.len());
        assert_eq!(NetworkState::new(3), prefix[0]);
    }

    #[test]
    fn zero_steps() {
        let network = rotation();
        let initial = NetworkState::try_from("110").unwrap();
        let trajectory = TrajectoryRunner::new(&network)
            .run(initial.clone(), 0, &mut RandomSource::new(0))
            .unwrap();
        assert_eq!(1, trajectory.len());
        assert_eq!(&initial, trajectory.last());
        assert!(trajectory.hamming_distances().is_empty());
    }

    #[test]
    fn noisy_runs_are_reproducible() {
        let network = rotation();
        let runner = TrajectoryRunner::new(&network).with_noise(NoiseInjector::new(0.2).unwrap());
        let a = runner
            .run(NetworkState::new(3), 50, &mut RandomSource::new(9))
            .unwrap();
        let b = runner
            .run(NetworkState::new(3), 50, &mut RandomSource::new(9))
            .unwrap();
        assert_eq!(a, b);
        assert!(a.is_noisy());
        assert_eq!(0.2, a.noise_probability());
    }

    #[test]
    fn invalid_initial_state() {
        let network = rotation();
        let result =
            TrajectoryRunner::new(&network).run(NetworkState::new(4), 3, &mut RandomSource::new(0));
        assert!(result.unwrap_err().is_config_error());
    }

    #[test]
    fn explicit_trajectory() {
        assert!(Trajectory::new(Vec::new(), 0.0).is_err());
        let states = vec![NetworkState::new(2), NetworkState::new(3)];
        assert!(Trajectory::new(states, 0.0).is_err());
        let states = vec![NetworkState::new(2), NetworkState::new(2)];
        assert!(Trajectory::new(states.clone(), 2.0).is_err());
        let trajectory = Trajectory::new(states, 0.0).unwrap();
        assert_eq!(NetworkState::new(2), trajectory[1]);
    }
}
