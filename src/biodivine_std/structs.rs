use crate::biodivine_std::traits::State;
use std::fmt::{Display, Error, Formatter};

/// A dense encoding of a network state as a single `usize`, where bit `i` is the value
/// of node `i`. Only usable for networks with at most `usize::BITS` nodes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct IdState(usize);

/// Iterates over all `IdState`s of a state space with consecutive ids `0..state_count`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct IdStateRange {
    next: usize,
    remaining: usize,
}

impl State for IdState {}

impl From<usize> for IdState {
    fn from(val: usize) -> Self {
        IdState(val)
    }
}

impl From<IdState> for usize {
    fn from(state: IdState) -> Self {
        state.0
    }
}

impl Display for IdState {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "State({})", self.0)
    }
}

impl IdState {
    /// Test if the bit at the given position is set or not.
    pub fn get_bit(self, bit: usize) -> bool {
        (self.0 >> bit) & 1 == 1
    }
}

impl IdStateRange {
    pub fn new(state_count: usize) -> IdStateRange {
        IdStateRange {
            next: 0,
            remaining: state_count,
        }
    }
}

impl Iterator for IdStateRange {
    type Item = IdState;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            None
        } else {
            let result = self.next;
            self.remaining -= 1;
            self.next += 1;
            Some(IdState::from(result))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IdStateRange {}
