//! Configuration of a single random network run and the `Simulation` which executes it.
//!
//! A `Simulation` owns one `RandomSource` created from the configured seed. All random
//! decisions of the run are drawn from this source in a fixed order:
//!
//!  1. the wiring (per node: the number of inputs if a range is configured, then the inputs),
//!  2. the truth tables (per node, entries in index order),
//!  3. the initial state, unless one is given explicitly,
//!  4. noise, one draw per node and step, only if noise is enabled.
//!
//! Consequently, a configuration fully determines the network and, without noise, the whole
//! trajectory.

use crate::_impl_truth_table::check_probability;
use crate::attractor::{AttractorDetector, AttractorSearch};
use crate::noise::NoiseInjector;
use crate::random_source::RandomSource;
use crate::trajectory::{Trajectory, TrajectoryIter};
use crate::{
    Connectivity, InputSampling, NetworkState, RandomBooleanNetwork, RbnError, RuleScheme,
};

/// The default probability that a truth table entry is `true`.
pub const DEFAULT_BIAS: f64 = 0.5;

/// All options describing one run of a random Boolean network.
#[derive(Clone, Debug, PartialEq)]
pub struct RbnConfig {
    /// Number of nodes (`N`).
    pub nodes: usize,
    /// Number of inputs per node (`K`), fixed or a per-node range.
    pub connectivity: Connectivity,
    /// Number of simulation steps (`T`).
    pub steps: usize,
    /// How truth tables are generated. `RuleScheme::Biased(bias)` by default.
    pub rules: RuleScheme,
    /// Per-node, per-step flip probability. Zero disables noise.
    pub noise_probability: f64,
    pub seed: u64,
    /// Starting state. Sampled uniformly at random when `None`.
    pub initial_state: Option<NetworkState>,
    pub sampling: InputSampling,
    /// Whether a node can be one of its own inputs.
    pub allow_self_regulation: bool,
}

/// A single configured run: the generated network, its initial state and the random source
/// used for the remaining draws (noise).
#[derive(Clone, Debug)]
pub struct Simulation {
    config: RbnConfig,
    network: RandomBooleanNetwork,
    initial_state: NetworkState,
    noise: NoiseInjector,
    source: RandomSource,
}

impl RbnConfig {
    /// A configuration of `nodes` nodes with the given `connectivity` and default values
    /// for everything else: no steps, bias `0.5`, no noise, seed `0`, random initial state,
    /// inputs sampled without replacement and self-regulation allowed.
    pub fn new(nodes: usize, connectivity: Connectivity) -> RbnConfig {
        RbnConfig {
            nodes,
            connectivity,
            steps: 0,
            rules: RuleScheme::Biased(DEFAULT_BIAS),
            noise_probability: 0.0,
            seed: 0,
            initial_state: None,
            sampling: InputSampling::WithoutReplacement,
            allow_self_regulation: true,
        }
    }

    pub fn with_steps(self, steps: usize) -> RbnConfig {
        RbnConfig { steps, ..self }
    }

    /// Use random truth tables where each entry is `true` with probability `bias`.
    pub fn with_bias(self, bias: f64) -> RbnConfig {
        RbnConfig {
            rules: RuleScheme::Biased(bias),
            ..self
        }
    }

    pub fn with_rules(self, rules: RuleScheme) -> RbnConfig {
        RbnConfig { rules, ..self }
    }

    pub fn with_noise(self, noise_probability: f64) -> RbnConfig {
        RbnConfig {
            noise_probability,
            ..self
        }
    }

    pub fn with_seed(self, seed: u64) -> RbnConfig {
        RbnConfig { seed, ..self }
    }

    pub fn with_initial_state(self, initial_state: NetworkState) -> RbnConfig {
        RbnConfig {
            initial_state: Some(initial_state),
            ..self
        }
    }

    pub fn with_sampling(self, sampling: InputSampling) -> RbnConfig {
        RbnConfig { sampling, ..self }
    }

    pub fn with_self_regulation(self, allow_self_regulation: bool) -> RbnConfig {
        RbnConfig {
            allow_self_regulation,
            ..self
        }
    }

    /// The truth table bias, if tables are generated by independent draws.
    pub fn bias(&self) -> Option<f64> {
        match self.rules {
            RuleScheme::Biased(bias) => Some(bias),
            RuleScheme::Canonical => None,
        }
    }

    /// Check every option. This never draws any random values.
    pub fn validate(&self) -> Result<(), RbnError> {
        if self.nodes == 0 {
            return Err(RbnError::config("The number of nodes must be positive."));
        }
        self.connectivity
            .validate(self.nodes, self.sampling, self.allow_self_regulation)?;
        if let Some(bias) = self.bias() {
            check_probability("bias", bias)?;
        }
        check_probability("noise probability", self.noise_probability)?;
        if let Some(initial) = &self.initial_state {
            if initial.len() != self.nodes {
                return Err(RbnError::config(format!(
                    "Initial state {} has {} values, but the network has {} nodes.",
                    initial,
                    initial.len(),
                    self.nodes
                )));
            }
        }
        Ok(())
    }
}

impl Simulation {
    /// Validate `config` and generate the network and the initial state.
    ///
    /// Fails before making any random draws if the configuration is invalid.
    pub fn new(config: RbnConfig) -> Result<Simulation, RbnError> {
        config.validate()?;
        let noise = NoiseInjector::new(config.noise_probability)?;
        let mut source = RandomSource::new(config.seed);
        let network = RandomBooleanNetwork::generate(&config, &mut source)?;
        let initial_state = match &config.initial_state {
            Some(state) => state.clone(),
            None => NetworkState::random(config.nodes, &mut source),
        };
        if cfg!(feature = "print-progress") {
            println!(
                "Generated network with {} nodes (connectivity {}, {} frozen nodes) from seed {}.",
                network.num_nodes(),
                network.connectivity(),
                network.frozen_nodes().len(),
                config.seed
            );
        }
        Ok(Simulation {
            config,
            network,
            initial_state,
            noise,
            source,
        })
    }

    pub fn config(&self) -> &RbnConfig {
        &self.config
    }

    pub fn network(&self) -> &RandomBooleanNetwork {
        &self.network
    }

    pub fn initial_state(&self) -> &NetworkState {
        &self.initial_state
    }

    pub fn is_noisy(&self) -> bool {
        !self.noise.is_identity()
    }

    /// A lazy iterator over the `T + 1` states of the configured run.
    ///
    /// With noise enabled, every call continues the random stream, so consecutive runs
    /// differ. Create a new `Simulation` from the same configuration to replay a run.
    pub fn trajectory(&mut self) -> TrajectoryIter<'_, '_> {
        TrajectoryIter::start(
            &self.network,
            self.noise,
            self.initial_state.clone(),
            self.config.steps,
            &mut self.source,
        )
    }

    /// Run all `T` steps and record the trajectory.
    pub fn run(&mut self) -> Trajectory {
        self.trajectory().into_trajectory()
    }

    /// Run all `T` steps and detect the attractor of the resulting trajectory.
    ///
    /// Fails with `RbnError::NoiseAttractorConflict` if noise is enabled (without running
    /// the simulation).
    pub fn attractor(&mut self) -> Result<AttractorSearch, RbnError> {
        if self.is_noisy() {
            return Err(RbnError::NoiseAttractorConflict(self.noise.probability()));
        }
        AttractorDetector::detect(&self.run())
    }
}
