use std::hash::Hash;

/// A marker trait for anything that can be a state of a discrete dynamical system.
///
/// States must be hashable, because attractor detection remembers every visited state.
pub trait State: Hash + Eq + Clone {}

/// `EvolutionOperator`s represent an evolution of a dynamical system with discrete time,
/// i.e. given a current state, they provide possible states in the next time step.
///
/// A deterministic system (such as a noise-free synchronous network) yields exactly one
/// successor for every state.
pub trait EvolutionOperator {
    type State: State;
    type Iterator: Iterator<Item = Self::State>;
    fn step(&self, current: &Self::State) -> Self::Iterator;
}
