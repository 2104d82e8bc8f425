//! Detection of attractors (fixed points and cycles) in deterministic trajectories.
//!
//! The detector walks a trajectory and remembers the step at which every state was first
//! seen. The first time a state repeats (at step `i`, first seen at step `j`), the prefix
//! `0..j` is the transient and the states `j..i` form the cycle. Since a state space of `N`
//! nodes has `2^N` states, a noise-free trajectory of `2^N` steps always contains a
//! recurrence. Shorter trajectories may end before the first recurrence, which is reported
//! as `AttractorSearch::Undetermined` rather than as an error.

use crate::biodivine_std::traits::{EvolutionOperator, State};
use crate::trajectory::Trajectory;
use crate::{NetworkState, RbnError};
use fxhash::FxHashMap;

/// The attractor reached by a deterministic trajectory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttractorDescriptor<S: State = NetworkState> {
    transient_length: usize,
    cycle_states: Vec<S>,
}

/// The outcome of an attractor search.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AttractorSearch<S: State = NetworkState> {
    /// A recurrence was found.
    Determined(AttractorDescriptor<S>),
    /// The trajectory ended after `observed_steps` steps without any repeated state.
    /// Running longer will eventually determine the attractor.
    Undetermined { observed_steps: usize },
}

/// Aggregates algorithms for detecting attractors in trajectories and in deterministic
/// dynamical systems.
pub struct AttractorDetector {
    _dummy: (),
}

impl AttractorDetector {
    /// Detect the attractor of a recorded `trajectory`.
    ///
    /// Returns `RbnError::NoiseAttractorConflict` if the trajectory was generated with
    /// noise, because its transitions are not deterministic and a repeated state does not
    /// imply a cycle.
    pub fn detect(trajectory: &Trajectory) -> Result<AttractorSearch, RbnError> {
        if trajectory.is_noisy() {
            return Err(RbnError::NoiseAttractorConflict(
                trajectory.noise_probability(),
            ));
        }
        Ok(AttractorDetector::detect_in_states(trajectory.states()))
    }

    /// Detect the first recurrence in a sequence of `states` which is assumed to be
    /// generated by a deterministic system.
    pub fn detect_in_states<S: State>(states: &[S]) -> AttractorSearch<S> {
        let mut first_seen: FxHashMap<&S, usize> = FxHashMap::default();
        for (i, state) in states.iter().enumerate() {
            if let Some(&j) = first_seen.get(state) {
                return AttractorSearch::Determined(AttractorDescriptor {
                    transient_length: j,
                    cycle_states: states[j..i].to_vec(),
                });
            }
            first_seen.insert(state, i);
        }
        AttractorSearch::Undetermined {
            observed_steps: states.len().saturating_sub(1),
        }
    }

    /// Follow a deterministic `operator` from `initial` until the first recurrence, but
    /// at most `max_steps` steps. Only the first successor of each state is followed.
    ///
    /// Unlike `detect`, this does not materialise states past the first recurrence.
    pub fn find_attractor<E: EvolutionOperator>(
        operator: &E,
        initial: E::State,
        max_steps: usize,
    ) -> AttractorSearch<E::State> {
        let mut first_seen: FxHashMap<E::State, usize> = FxHashMap::default();
        let mut history: Vec<E::State> = Vec::new();
        let mut current = initial;
        for i in 0..=max_steps {
            if let Some(&j) = first_seen.get(&current) {
                return AttractorSearch::Determined(AttractorDescriptor {
                    transient_length: j,
                    cycle_states: history.split_off(j),
                });
            }
            first_seen.insert(current.clone(), i);
            history.push(current.clone());
            if i == max_steps {
                break;
            }
            current = match operator.step(&current).next() {
                Some(next) => next,
                None => return AttractorSearch::Undetermined { observed_steps: i },
            };
        }
        AttractorSearch::Undetermined {
            observed_steps: max_steps,
        }
    }
}

impl<S: State> AttractorDescriptor<S> {
    /// Build a descriptor from explicit parts. Returns `None` if `cycle_states` is empty.
    pub fn new(transient_length: usize, cycle_states: Vec<S>) -> Option<AttractorDescriptor<S>> {
        if cycle_states.is_empty() {
            None
        } else {
            Some(AttractorDescriptor {
                transient_length,
                cycle_states,
            })
        }
    }

    /// The number of steps before the trajectory first enters the attractor.
    pub fn transient_length(&self) -> usize {
        self.transient_length
    }

    /// The period of the attractor.
    pub fn cycle_length(&self) -> usize {
        self.cycle_states.len()
    }

    /// The distinct states of the attractor, in the order in which they are visited.
    pub fn cycle_states(&self) -> &[S] {
        &self.cycle_states
    }

    pub fn is_fixed_point(&self) -> bool {
        self.cycle_states.len() == 1
    }

    pub fn contains(&self, state: &S) -> bool {
        self.cycle_states.contains(state)
    }

    /// The cycle rotated so that it starts with its smallest state. Two trajectories end in
    /// the same attractor exactly when their canonical cycles are equal.
    pub fn canonical_cycle(&self) -> Vec<S>
    where
        S: Ord,
    {
        let start = self
            .cycle_states
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let mut cycle = self.cycle_states.clone();
        cycle.rotate_left(start);
        cycle
    }
}

impl<S: State> AttractorSearch<S> {
    pub fn is_determined(&self) -> bool {
        matches!(self, AttractorSearch::Determined(_))
    }

    pub fn descriptor(&self) -> Option<&AttractorDescriptor<S>> {
        match self {
            AttractorSearch::Determined(descriptor) => Some(descriptor),
            AttractorSearch::Undetermined { .. } => None,
        }
    }

    pub fn into_descriptor(self) -> Option<AttractorDescriptor<S>> {
        match self {
            AttractorSearch::Determined(descriptor) => Some(descriptor),
            AttractorSearch::Undetermined { .. } => None,
        }
    }
}
