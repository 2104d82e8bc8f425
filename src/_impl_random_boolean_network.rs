use crate::biodivine_std::traits::EvolutionOperator;
use crate::random_source::RandomSource;
use crate::simulation::RbnConfig;
use crate::{
    BooleanRule, Connectivity, NetworkState, NodeId, NodeIdIterator, RandomBooleanNetwork,
    RbnError, RuleScheme, TruthTable, Wiring,
};
use num_bigint::BigUint;
use num_traits::One;
use std::iter::{once, Once};
use std::ops::Index;

/// Methods for safely building `RandomBooleanNetwork`s.
impl RandomBooleanNetwork {
    /// Assemble a network from an explicit `wiring` and one truth table per node.
    ///
    /// Returns `Err` if the number of tables does not match the number of nodes, or when
    /// the arity of some table differs from the number of inputs of its node.
    pub fn new(wiring: Wiring, tables: Vec<TruthTable>) -> Result<RandomBooleanNetwork, RbnError> {
        if wiring.num_nodes() != tables.len() {
            return Err(RbnError::config(format!(
                "Wiring has {} nodes, but {} truth tables were given.",
                wiring.num_nodes(),
                tables.len()
            )));
        }
        for node in wiring.nodes() {
            let table = &tables[node.0];
            if table.arity() != wiring.arity(node) {
                return Err(RbnError::config(format!(
                    "Node {} has {} inputs, but its truth table has arity {}.",
                    node,
                    wiring.arity(node),
                    table.arity()
                )));
            }
        }
        Ok(RandomBooleanNetwork { wiring, tables })
    }

    /// Generate a random network described by `config`: first the wiring, then the truth
    /// tables, all drawn from `source`.
    ///
    /// The whole `config` is validated first, so an invalid configuration leaves `source`
    /// untouched.
    pub fn generate(
        config: &RbnConfig,
        source: &mut RandomSource,
    ) -> Result<RandomBooleanNetwork, RbnError> {
        config.validate()?;
        let wiring = Wiring::random(
            config.nodes,
            config.connectivity,
            config.sampling,
            config.allow_self_regulation,
            source,
        )?;
        RandomBooleanNetwork::with_random_tables(wiring, config.rules, source)
    }

    /// Keep the given `wiring`, but generate a random truth table for every node (in node
    /// index order) using the given `rules`.
    pub fn with_random_tables(
        wiring: Wiring,
        rules: RuleScheme,
        source: &mut RandomSource,
    ) -> Result<RandomBooleanNetwork, RbnError> {
        let mut tables = Vec::with_capacity(wiring.num_nodes());
        for node in wiring.nodes() {
            let arity = wiring.arity(node);
            let table = match rules {
                RuleScheme::Biased(bias) => TruthTable::random(arity, bias, source)?,
                RuleScheme::Canonical => {
                    TruthTable::from_rule(BooleanRule::random(source), arity)?
                }
            };
            tables.push(table);
        }
        Ok(RandomBooleanNetwork { wiring, tables })
    }
}

/// Methods for inspecting the structure of a `RandomBooleanNetwork`.
impl RandomBooleanNetwork {
    /// The number of nodes in this network.
    pub fn num_nodes(&self) -> usize {
        self.wiring.num_nodes()
    }

    /// Return an iterator over all node ids of this network.
    pub fn nodes(&self) -> NodeIdIterator {
        self.wiring.nodes()
    }

    pub fn as_wiring(&self) -> &Wiring {
        &self.wiring
    }

    /// The ordered inputs of the given `node`.
    pub fn regulators(&self, node: NodeId) -> &[NodeId] {
        self.wiring.inputs(node)
    }

    pub fn truth_table(&self, node: NodeId) -> &TruthTable {
        &self.tables[node.0]
    }

    /// The number of inputs of the given `node`.
    pub fn connectivity_of(&self, node: NodeId) -> usize {
        self.wiring.arity(node)
    }

    /// True if every node has the same number of inputs.
    pub fn is_uniform(&self) -> bool {
        self.wiring.uniform_arity().is_some()
    }

    /// The connectivity actually realised by this network: `Fixed` if all nodes have the same
    /// number of inputs, otherwise the `Range` between the smallest and largest arity.
    pub fn connectivity(&self) -> Connectivity {
        let arities = self.nodes().map(|it| self.connectivity_of(it));
        let min = arities.clone().min().unwrap_or(0);
        let max = arities.max().unwrap_or(0);
        if min == max {
            Connectivity::Fixed(min)
        } else {
            Connectivity::Range { min, max }
        }
    }

    /// Nodes whose update function is constant. After the first step, these nodes never
    /// change their value again.
    pub fn frozen_nodes(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|it| self.tables[it.0].constant_value().is_some())
            .collect()
    }

    /// The number of states of this network, `2^N`.
    pub fn state_space_size(&self) -> BigUint {
        BigUint::one() << self.num_nodes()
    }

    /// Binary logarithm of the number of networks sharing this wiring, i.e. the sum of
    /// `2^K` over all nodes.
    pub fn function_space_bits(&self) -> usize {
        self.tables.iter().map(|it| it.size()).sum()
    }

    /// The number of distinct networks with this wiring, i.e. the product of `2^(2^K)`
    /// over all nodes. Can be a very large number.
    pub fn function_space_size(&self) -> BigUint {
        BigUint::one() << self.function_space_bits()
    }
}

/// Synchronous update.
impl RandomBooleanNetwork {
    /// **(internal)** Panic if `state` does not belong to this network.
    fn check_state(&self, state: &NetworkState) {
        if state.len() != self.num_nodes() {
            panic!(
                "State of {} nodes used with a network of {} nodes.",
                state.len(),
                self.num_nodes()
            );
        }
    }

    /// The packed truth table index of `node` in the given `state` (first input is the
    /// most significant bit).
    pub fn input_index(&self, node: NodeId, state: &NetworkState) -> usize {
        self.wiring
            .inputs(node)
            .iter()
            .fold(0usize, |acc, input| (acc << 1) | usize::from(state.get(*input)))
    }

    /// Compute the next state of every node into `next`.
    ///
    /// All lookups read `current` only, so the result does not depend on the order in which
    /// nodes are processed.
    pub fn successor_into(&self, current: &NetworkState, next: &mut NetworkState) {
        self.check_state(current);
        self.check_state(next);
        for node in self.nodes() {
            let index = self.input_index(node, current);
            next.set(node, self.tables[node.0].output(index));
        }
    }

    /// The synchronous successor of `current`.
    pub fn successor(&self, current: &NetworkState) -> NetworkState {
        let mut next = NetworkState::new(self.num_nodes());
        self.successor_into(current, &mut next);
        next
    }

    /// True if `state` is its own successor.
    pub fn is_fixed_point(&self, state: &NetworkState) -> bool {
        &self.successor(state) == state
    }
}

impl EvolutionOperator for RandomBooleanNetwork {
    type State = NetworkState;
    type Iterator = Once<NetworkState>;

    fn step(&self, current: &NetworkState) -> Self::Iterator {
        once(self.successor(current))
    }
}

impl Index<NodeId> for RandomBooleanNetwork {
    type Output = TruthTable;

    fn index(&self, index: NodeId) -> &Self::Output {
        self.truth_table(index)
    }
}
