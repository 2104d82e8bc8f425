use crate::random_source::RandomSource;
use crate::{Connectivity, InputSampling, NodeId, NodeIdIterator, RbnError, Wiring};
use std::ops::Index;

/// Methods for safely building `Wiring`s.
impl Wiring {
    /// Create a `Wiring` from explicit input lists, one list per node.
    ///
    /// Returns `Err` if some input does not reference a valid node or if a node has more
    /// than `MAX_INPUTS` inputs.
    pub fn new(inputs: Vec<Vec<NodeId>>) -> Result<Wiring, RbnError> {
        let nodes = inputs.len();
        if nodes == 0 {
            return Err(RbnError::config("A network must have at least one node."));
        }
        for (target, regulators) in inputs.iter().enumerate() {
            if regulators.len() > crate::MAX_INPUTS {
                return Err(RbnError::config(format!(
                    "Node n{} has {} inputs, but at most {} are supported.",
                    target,
                    regulators.len(),
                    crate::MAX_INPUTS
                )));
            }
            if let Some(invalid) = regulators.iter().find(|it| it.0 >= nodes) {
                return Err(RbnError::config(format!(
                    "Node n{} reads {}, but the network only has {} nodes.",
                    target, invalid, nodes
                )));
            }
        }
        Ok(Wiring { inputs })
    }

    /// Generate a random `Wiring` of `nodes` nodes.
    ///
    /// Nodes are processed in index order. For each node, the number of inputs is drawn
    /// from `connectivity` (only if it is a range) and then the inputs themselves are drawn
    /// uniformly from all nodes. When sampling without replacement, duplicates are
    /// rejected and drawn again. When `allow_self_regulation` is false, the node itself is
    /// rejected as well.
    pub fn random(
        nodes: usize,
        connectivity: Connectivity,
        sampling: InputSampling,
        allow_self_regulation: bool,
        source: &mut RandomSource,
    ) -> Result<Wiring, RbnError> {
        if nodes == 0 {
            return Err(RbnError::config("A network must have at least one node."));
        }
        connectivity.validate(nodes, sampling, allow_self_regulation)?;
        let mut inputs = Vec::with_capacity(nodes);
        for target in 0..nodes {
            let arity = connectivity.sample(source);
            let mut regulators: Vec<NodeId> = Vec::with_capacity(arity);
            while regulators.len() < arity {
                let candidate = NodeId(source.index(nodes));
                if !allow_self_regulation && candidate.0 == target {
                    continue;
                }
                if sampling == InputSampling::WithoutReplacement && regulators.contains(&candidate)
                {
                    continue;
                }
                regulators.push(candidate);
            }
            inputs.push(regulators);
        }
        Ok(Wiring { inputs })
    }
}

/// Some utility methods for inspecting the structure of a `Wiring`.
impl Wiring {
    /// The number of nodes in this `Wiring`.
    pub fn num_nodes(&self) -> usize {
        self.inputs.len()
    }

    /// Return an iterator over all node ids of this wiring.
    pub fn nodes(&self) -> NodeIdIterator {
        (0..self.num_nodes()).map(NodeId)
    }

    /// The ordered inputs of the given `node`.
    pub fn inputs(&self, node: NodeId) -> &[NodeId] {
        &self.inputs[node.0]
    }

    /// The number of inputs of the given `node`.
    pub fn arity(&self, node: NodeId) -> usize {
        self.inputs[node.0].len()
    }

    /// If all nodes have the same number of inputs, return this number.
    pub fn uniform_arity(&self) -> Option<usize> {
        let first = self.inputs[0].len();
        if self.inputs.iter().all(|it| it.len() == first) {
            Some(first)
        } else {
            None
        }
    }

    /// Nodes which read the given `regulator` as one of their inputs (sorted, no duplicates).
    pub fn targets(&self, regulator: NodeId) -> Vec<NodeId> {
        self.nodes()
            .filter(|target| self.inputs[target.0].contains(&regulator))
            .collect()
    }
}

impl Index<NodeId> for Wiring {
    type Output = [NodeId];

    fn index(&self, index: NodeId) -> &Self::Output {
        self.inputs(index)
    }
}

#[cfg(test)]
mod tests {
    use crate::random_source::RandomSource;
    use crate::{Connectivity, InputSampling, NodeId, Wiring};

    #[test]
    fn random_wiring_is_valid() {
        for seed in 0..20 {
            let mut source = RandomSource::new(seed);
            let wiring = Wiring::random(
                10,
                Connectivity::Fixed(4),
                InputSampling::WithoutReplacement,
                true,
                &mut source,
            )
            .unwrap();
            assert_eq!(10, wiring.num_nodes());
            assert_eq!(Some(4), wiring.uniform_arity());
            for node in wiring.nodes() {
                let inputs = wiring.inputs(node);
                assert_eq!(4, inputs.len());
                assert!(inputs.iter().all(|it| it.to_index() < 10));
                for i in 0..inputs.len() {
                    for j in (i + 1)..inputs.len() {
                        assert_ne!(inputs[i], inputs[j]);
                    }
                }
            }
        }
    }

    #[test]
    fn random_wiring_range_and_self_regulation() {
        let mut source = RandomSource::new(11);
        let wiring = Wiring::random(
            15,
            Connectivity::Range { min: 1, max: 5 },
            InputSampling::WithoutReplacement,
            false,
            &mut source,
        )
        .unwrap();
        for node in wiring.nodes() {
            let arity = wiring.arity(node);
            assert!((1..=5).contains(&arity));
            assert!(!wiring[node].contains(&node));
        }
    }

    #[test]
    fn random_wiring_with_replacement() {
        let mut source = RandomSource::new(2);
        // More inputs than nodes is fine when duplicates are allowed.
        let wiring = Wiring::random(
            2,
            Connectivity::Fixed(5),
            InputSampling::WithReplacement,
            true,
            &mut source,
        )
        .unwrap();
        assert_eq!(5, wiring.arity(NodeId::from(0)));
        assert!(wiring.inputs(NodeId::from(1)).iter().all(|it| it.to_index() < 2));
    }

    #[test]
    fn random_wiring_rejects_invalid_connectivity() {
        let mut source = RandomSource::new(0);
        let result = Wiring::random(
            3,
            Connectivity::Fixed(3),
            InputSampling::WithoutReplacement,
            true,
            &mut source,
        );
        assert!(result.unwrap_err().is_config_error());
        let result = Wiring::random(
            0,
            Connectivity::Fixed(0),
            InputSampling::WithoutReplacement,
            true,
            &mut source,
        );
        assert!(result.is_err());
    }

    #[test]
    fn explicit_wiring() {
        let n = |i: usize| NodeId::from(i);
        let wiring = Wiring::new(vec![vec![n(1)], vec![n(0), n(2)], vec![]]).unwrap();
        assert_eq!(None, wiring.uniform_arity());
        assert_eq!(vec![n(1)], wiring.targets(n(0)));
        assert_eq!(vec![n(0)], wiring.targets(n(1)));
        assert_eq!(vec![n(1)], wiring.targets(n(2)));
        assert!(Wiring::new(vec![vec![n(3)], vec![], vec![]]).is_err());
        assert!(Wiring::new(Vec::new()).is_err());
    }
}
