//! A library for generating and simulating *random Boolean networks* (RBNs).
//!
//! A random Boolean network consists of `N` binary nodes. Every node reads a fixed list of
//! `K` input nodes (its regulators) and computes its next value using a randomly generated
//! truth table over these inputs. All nodes are updated synchronously, hence a network
//! without noise is a deterministic dynamical system over `2^N` states and every trajectory
//! eventually enters an attractor (a fixed point or a cycle).
//!
//! The main entry point is a `Simulation` built from an `RbnConfig`:
//!
//! ```rust
//! use biodivine_lib_rbn::simulation::{RbnConfig, Simulation};
//! use biodivine_lib_rbn::Connectivity;
//!
//! let config = RbnConfig::new(3, Connectivity::Fixed(1))
//!     .with_steps(10)
//!     .with_seed(42);
//! let mut simulation = Simulation::new(config)?;
//! let trajectory = simulation.run();
//! assert_eq!(11, trajectory.len());
//!
//! let attractor = simulation.attractor()?;
//! let descriptor = attractor.descriptor().unwrap();
//! assert!(descriptor.cycle_length() < 8);
//! # Ok::<(), biodivine_lib_rbn::RbnError>(())
//! ```
//!
//! The individual building blocks (`Wiring`, `TruthTable`, `RandomBooleanNetwork`,
//! `trajectory::TrajectoryRunner`, `attractor::AttractorDetector`, ...) are also public, so
//! that networks can be assembled from explicit parts (see the text format accepted by
//! `RandomBooleanNetwork::try_from`).

use crate::biodivine_std::bitvector::ArrayBitVector;
use lazy_static::lazy_static;
use regex::Regex;
use std::iter::Map;
use std::ops::Range;

pub mod attractor;
pub mod biodivine_std;
pub mod exploration;
pub mod noise;
pub mod random_source;
pub mod simulation;
pub mod trajectory;

/// **(internal)** Declaration of the `RbnError` type.
mod _impl_error;
/// **(internal)** Parsing and validation of `Connectivity`.
mod _impl_connectivity;
/// **(internal)** Utility methods for `NodeId`.
mod _impl_node_id;
/// **(internal)** Utility methods for `NetworkState`.
mod _impl_network_state;
/// **(internal)** Construction, inspection and synchronous update of `RandomBooleanNetwork`.
mod _impl_random_boolean_network;
/// **(internal)** `RandomBooleanNetwork` to/from the `n0 <- n1, n2 : 0110` text format.
mod _impl_network_text_format;
/// **(internal)** Canonical Boolean rules and their truth tables.
mod _impl_boolean_rule;
/// **(internal)** Random and explicit construction of `TruthTable`s.
mod _impl_truth_table;
/// **(internal)** Random and explicit construction of `Wiring`s.
mod _impl_wiring;

pub use _impl_error::RbnError;

/// The largest number of inputs a single node can have. A truth table of a node with `K`
/// inputs has `2^K` entries.
pub const MAX_INPUTS: usize = 24;

lazy_static! {
    /// Matches a node name in the text format (`n` followed by a decimal index).
    static ref NODE_NAME_REGEX: Regex = Regex::new(r"^n(?P<index>[0-9]+)$").unwrap();
}

/// A type-safe index of a node inside a `RandomBooleanNetwork`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(usize);

/// The number of inputs (`K`) assigned to each node.
///
/// With `Fixed(k)`, every node reads exactly `k` inputs. With `Range { min, max }`, the
/// number of inputs is drawn uniformly from `min..=max` independently for each node, so
/// truth tables of different nodes can have different sizes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Connectivity {
    Fixed(usize),
    Range { min: usize, max: usize },
}

/// How the inputs of a single node are drawn from the `N` network nodes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum InputSampling {
    /// Inputs of one node are distinct. Duplicates are rejected and drawn again.
    #[default]
    WithoutReplacement,
    /// Inputs are drawn independently and may repeat.
    WithReplacement,
}

/// Assigns each node of a network its ordered list of input nodes.
///
/// The order of inputs is significant: the first input corresponds to the most significant
/// bit of the truth table index.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Wiring {
    inputs: Vec<Vec<NodeId>>,
}

/// An explicit Boolean function of `arity` inputs, stored as a flat table of `2^arity`
/// output bits.
///
/// Entry `i` is the output for the input vector whose packed binary value is `i`, with the
/// first input being the most significant bit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TruthTable {
    arity: usize,
    outputs: ArrayBitVector,
}

/// A small family of well-known Boolean functions that can be used instead of fully random
/// truth tables.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BooleanRule {
    And,
    Or,
    Not,
    Xor,
    Identity,
}

/// Describes how truth tables are generated for a random network.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RuleScheme {
    /// Every table entry is an independent Bernoulli draw with `P(1) = bias`.
    Biased(f64),
    /// Every node receives one `BooleanRule`, chosen uniformly at random.
    Canonical,
}

/// A synchronous Boolean network: per-node input lists and truth tables, stored as
/// parallel columns indexed by `NodeId`.
///
/// Once created, the network is immutable. Generating a new wiring or new truth tables
/// means creating a new network.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RandomBooleanNetwork {
    wiring: Wiring,
    tables: Vec<TruthTable>,
}

/// A valuation of all network nodes at a single time step.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct NetworkState(ArrayBitVector);

/// An iterator over all `NodeId`s of a `Wiring` (or a `RandomBooleanNetwork`).
pub type NodeIdIterator = Map<Range<usize>, fn(usize) -> NodeId>;
