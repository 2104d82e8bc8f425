use crate::biodivine_std::bitvector::{ArrayBitVector, BitVector};
use crate::biodivine_std::structs::IdState;
use crate::biodivine_std::traits::State;
use crate::random_source::RandomSource;
use crate::{NetworkState, NodeId, RbnError};
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt::{Debug, Display, Error, Formatter};

impl State for NetworkState {}

/// Methods for creating `NetworkState`s.
impl NetworkState {
    /// A state of `len` nodes which are all `false`.
    pub fn new(len: usize) -> NetworkState {
        NetworkState(ArrayBitVector::empty(len))
    }

    /// Sample a state uniformly at random. Node values are drawn in index order.
    pub fn random(len: usize, source: &mut RandomSource) -> NetworkState {
        let mut bits = ArrayBitVector::empty(len);
        for i in 0..len {
            if source.bit(0.5) {
                bits.set(i, true);
            }
        }
        NetworkState(bits)
    }

    /// Decode a state of `len` nodes from a dense `IdState`, where bit `i` of the id is the
    /// value of node `i`.
    pub fn from_id(len: usize, id: IdState) -> NetworkState {
        let mut bits = ArrayBitVector::empty(len);
        for i in 0..len {
            if id.get_bit(i) {
                bits.set(i, true);
            }
        }
        NetworkState(bits)
    }
}

/// Methods for reading and modifying `NetworkState`s.
impl NetworkState {
    /// **(internal)** Panic if `node` is not a valid index in this state.
    fn check_node(&self, node: NodeId) {
        if node.0 >= self.len() {
            panic!(
                "Node {} does not exist in a state of {} nodes.",
                node,
                self.len()
            );
        }
    }

    /// The number of nodes in this state.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The value of the given `node`.
    pub fn get(&self, node: NodeId) -> bool {
        self.check_node(node);
        self.0.get(node.0)
    }

    /// Set the value of the given `node`.
    pub fn set(&mut self, node: NodeId, value: bool) {
        self.check_node(node);
        self.0.set(node.0, value);
    }

    /// Invert the value of the given `node`.
    pub fn flip(&mut self, node: NodeId) {
        self.check_node(node);
        self.0.flip(node.0);
    }

    /// Node values in index order.
    pub fn values(&self) -> Vec<bool> {
        self.0.values()
    }

    /// The number of nodes which are `true`.
    pub fn count_ones(&self) -> usize {
        self.0.count_ones()
    }

    /// Nodes which are set to `true`.
    pub fn ones(&self) -> Vec<NodeId> {
        self.0.ones().into_iter().map(NodeId).collect()
    }

    /// The number of nodes in which the two states differ.
    ///
    /// Panics if the states have different lengths.
    pub fn hamming_distance(&self, other: &NetworkState) -> usize {
        if self.len() != other.len() {
            panic!(
                "Cannot compare states of {} and {} nodes.",
                self.len(),
                other.len()
            );
        }
        self.0.hamming_distance(&other.0)
    }

    /// Encode this state as a dense `IdState`. Returns `None` if the state has more nodes
    /// than there are bits in `usize`.
    pub fn to_id(&self) -> Option<IdState> {
        if self.len() > usize::BITS as usize {
            return None;
        }
        let id = self.0.ones().into_iter().fold(0usize, |acc, i| acc | (1 << i));
        Some(IdState::from(id))
    }
}

impl From<Vec<bool>> for NetworkState {
    fn from(values: Vec<bool>) -> Self {
        NetworkState(ArrayBitVector::from(values))
    }
}

impl TryFrom<&str> for NetworkState {
    type Error = RbnError;

    /// Parse a state from a string of `0`/`1` characters (node `0` first).
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let values = value
            .trim()
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(RbnError::parse(format!(
                    "Unexpected character '{}' in state '{}'.",
                    c, value
                ))),
            })
            .collect::<Result<Vec<bool>, RbnError>>()?;
        Ok(NetworkState::from(values))
    }
}

impl PartialOrd for NetworkState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NetworkState {
    /// States are ordered by length first, then lexicographically by node values.
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.values().cmp(&other.values()))
    }
}

impl Display for NetworkState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for i in 0..self.len() {
            write!(f, "{}", i32::from(self.0.get(i)))?;
        }
        Ok(())
    }
}

impl Debug for NetworkState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "NetworkState({})", self)
    }
}

#[cfg(test)]
mod tests {
    use crate::biodivine_std::structs::IdState;
    use crate::random_source::RandomSource;
    use crate::{NetworkState, NodeId};
    use std::collections::HashSet;
    use std::convert::TryFrom;

    #[test]
    fn state_basics() {
        let mut state = NetworkState::new(4);
        assert_eq!("0000", state.to_string());
        state.set(NodeId::from(1), true);
        state.flip(NodeId::from(3));
        assert_eq!("0101", state.to_string());
        assert!(state.get(NodeId::from(3)));
        assert_eq!(vec![NodeId::from(1), NodeId::from(3)], state.ones());
        assert_eq!(state, NetworkState::try_from("0101").unwrap());
        assert_eq!("NetworkState(0101)", format!("{:?}", state));
        assert!(NetworkState::try_from("01a").is_err());
    }

    #[test]
    fn state_hamming_and_order() {
        let a = NetworkState::try_from("0110").unwrap();
        let b = NetworkState::try_from("1100").unwrap();
        assert_eq!(2, a.hamming_distance(&b));
        assert_eq!(0, a.hamming_distance(&a));
        assert!(a < b);
        assert!(NetworkState::try_from("111").unwrap() < a);
    }

    #[test]
    fn state_hash_set() {
        let mut set = HashSet::new();
        set.insert(NetworkState::try_from("0110").unwrap());
        set.insert(NetworkState::try_from("0110").unwrap());
        set.insert(NetworkState::try_from("011").unwrap());
        assert_eq!(2, set.len());
    }

    #[test]
    fn state_id_conversion() {
        let state = NetworkState::try_from("01101").unwrap();
        let id = state.to_id().unwrap();
        assert_eq!(0b10110_usize, id.into());
        assert_eq!(state, NetworkState::from_id(5, id));
        assert_eq!(NetworkState::new(3), NetworkState::from_id(3, IdState::from(0)));
    }

    #[test]
    fn random_state_is_reproducible() {
        let a = NetworkState::random(40, &mut RandomSource::new(3));
        let b = NetworkState::random(40, &mut RandomSource::new(3));
        assert_eq!(a, b);
        assert_eq!(40, a.len());
    }

    #[test]
    #[should_panic]
    fn state_invalid_node() {
        NetworkState::new(3).get(NodeId::from(3));
    }
}
