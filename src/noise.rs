//! Stochastic perturbation of network states.

use crate::_impl_truth_table::check_probability;
use crate::random_source::RandomSource;
use crate::{NetworkState, NodeId, RbnError};

/// Independently flips every node of a state with a fixed probability.
///
/// The injector is applied once per simulation step, after the synchronous update and
/// before the state is recorded. With probability zero, it is the identity and makes no
/// random draws at all.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseInjector {
    probability: f64,
}

impl NoiseInjector {
    /// Create an injector that flips each node with the given `probability`.
    pub fn new(probability: f64) -> Result<NoiseInjector, RbnError> {
        check_probability("noise probability", probability)?;
        Ok(NoiseInjector { probability })
    }

    /// An injector which never changes anything.
    pub fn disabled() -> NoiseInjector {
        NoiseInjector { probability: 0.0 }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// True if this injector never modifies a state.
    pub fn is_identity(&self) -> bool {
        self.probability == 0.0
    }

    /// Perturb `state` in place, drawing one bit per node (node `0` first). Returns the
    /// number of flipped nodes.
    pub fn apply(&self, state: &mut NetworkState, source: &mut RandomSource) -> usize {
        if self.is_identity() {
            return 0;
        }
        let mut flipped = 0;
        for i in 0..state.len() {
            if source.bit(self.probability) {
                state.flip(NodeId::from(i));
                flipped += 1;
            }
        }
        flipped
    }
}
