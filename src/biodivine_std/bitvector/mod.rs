//! Bitvectors are simply sequences of boolean values. In this crate, they store network
//! states (one bit per node) and truth tables (one bit per input combination).
//!
//! There are many rust libraries which implement bitvectors (and indeed, we are deferring
//! to the `bitvector` crate for the actual storage). The `BitVector` trait keeps the rest of
//! the crate independent of a specific library.
//!
//! ```rust
//! use biodivine_lib_rbn::biodivine_std::bitvector::{ArrayBitVector, BitVector};
//! // Create a BitVector of length 4 initialized to false.
//! let mut bv = ArrayBitVector::empty(4);
//! assert_eq!(4, bv.len());
//! bv.flip(1); // Invert value at given index.
//! bv.set(2, true); // Set value at index to a constant.
//! assert!(bv.get(1));
//! assert!(!bv.get(3));
//! assert_eq!(2, bv.count_ones());
//! // Should print BV(4)[1 2] using default `Display` implementation.
//! println!("{}", bv);
//! ```
//!
//! ### `BitVector` conversions
//!
//! Every `BitVector` can be built from a `Vec<bool>` and read back either as the exact
//! values or as the indices of `true` items.
//!
//! ```rust
//! use biodivine_lib_rbn::biodivine_std::bitvector::{ArrayBitVector, BitVector};
//! let bv = ArrayBitVector::from(vec![false, true, true, false]);
//! assert_eq!(vec![false, true, true, false], bv.values());
//! assert_eq!(vec![1,2], bv.ones());
//! ```

use std::fmt::{Display, Formatter};

mod _impl_array_bit_vector;

/// `BitVector` is a collection of boolean values of a fixed length.
///
/// When implementing `Display` and `From<Vec<bool>>`, please consult `BitVector::display` and
/// `BitVector::from_bool_vector`.
pub trait BitVector: Clone + Eq + Display + From<Vec<bool>> {
    /// Create a new `BitVector` with the given length. Once created, the length cannot
    /// be changed.
    fn empty(len: usize) -> Self;

    /// The number of elements stored in this `BitVector`.
    fn len(&self) -> usize;

    /// Get the boolean value at the given `index`.
    fn get(&self, index: usize) -> bool;

    /// Set the boolean `value` at the given `index`.
    fn set(&mut self, index: usize, value: bool);

    /// Invert the value at the given `index`.
    fn flip(&mut self, index: usize);

    /// Return a vector of the values in this `BitVector`.
    fn values(&self) -> Vec<bool> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }

    /// A vector of the indices of this `BitVector` which are set.
    fn ones(&self) -> Vec<usize> {
        (0..self.len()).filter(|i| self.get(*i)).collect()
    }

    /// The number of indices which are set.
    fn count_ones(&self) -> usize {
        self.ones().len()
    }

    /// The number of positions in which `self` and `other` differ. Both vectors must
    /// have the same length.
    fn hamming_distance(&self, other: &Self) -> usize {
        (0..self.len())
            .filter(|i| self.get(*i) != other.get(*i))
            .count()
    }

    /// A helper method for `Display` trait implementations for all variants of `BitVector`.
    fn display(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "BV({})[", self.len())?;
        let mut first = true;
        for i in 0..self.len() {
            if self.get(i) {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{i}")?;
                first = false;
            }
        }
        write!(f, "]")?;
        Ok(())
    }

    /// A helper method for converting a vector of Booleans into a `BitVector`. Useful when
    /// implementing `From<Vec<bool>>`.
    fn from_bool_vector(items: Vec<bool>) -> Self {
        let mut bits = Self::empty(items.len());
        for (i, val) in items.iter().enumerate() {
            if *val {
                bits.set(i, true);
            }
        }
        bits
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A `BitVector` implementation that uses the explicit implementation from the `bitvector` crate.
#[derive(Clone, PartialEq)]
pub struct ArrayBitVector {
    len: usize,
    values: bitvector::BitVector,
}
