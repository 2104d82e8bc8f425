use crate::biodivine_std::bitvector::{ArrayBitVector, BitVector};
use crate::random_source::RandomSource;
use crate::{BooleanRule, RbnError, TruthTable, MAX_INPUTS};
use std::convert::TryFrom;
use std::fmt::{Display, Error, Formatter};

/// **(internal)** Check that `probability` is a valid probability value.
pub(crate) fn check_probability(name: &str, probability: f64) -> Result<(), RbnError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(RbnError::config(format!(
            "The {} must be in [0, 1], but {} was given.",
            name, probability
        )))
    }
}

/// **(internal)** Check that a table of the given arity can be represented.
fn check_arity(arity: usize) -> Result<(), RbnError> {
    if arity > MAX_INPUTS {
        Err(RbnError::config(format!(
            "Truth tables with {} inputs are not supported (maximum is {}).",
            arity, MAX_INPUTS
        )))
    } else {
        Ok(())
    }
}

/// Methods for building `TruthTable`s.
impl TruthTable {
    /// Create a table of the given `arity` from explicit outputs. Output `i` belongs to the
    /// input vector with packed value `i` (first input is the most significant bit).
    pub fn new(arity: usize, outputs: Vec<bool>) -> Result<TruthTable, RbnError> {
        check_arity(arity)?;
        if outputs.len() != 1 << arity {
            return Err(RbnError::config(format!(
                "A truth table with {} inputs needs {} entries, but {} were given.",
                arity,
                1usize << arity,
                outputs.len()
            )));
        }
        Ok(TruthTable {
            arity,
            outputs: ArrayBitVector::from(outputs),
        })
    }

    /// A table without inputs which always outputs `value`.
    pub fn constant(value: bool) -> TruthTable {
        TruthTable {
            arity: 0,
            outputs: ArrayBitVector::from(vec![value]),
        }
    }

    /// Generate a random table: every entry is an independent draw which is `true` with
    /// probability `bias`. Entries are drawn in index order.
    pub fn random(
        arity: usize,
        bias: f64,
        source: &mut RandomSource,
    ) -> Result<TruthTable, RbnError> {
        check_arity(arity)?;
        check_probability("bias", bias)?;
        let size = 1usize << arity;
        let mut outputs = ArrayBitVector::empty(size);
        for i in 0..size {
            if source.bit(bias) {
                outputs.set(i, true);
            }
        }
        Ok(TruthTable { arity, outputs })
    }

    /// Build a table by evaluating `function` on every input vector of the given `arity`.
    pub fn from_fn<F>(arity: usize, function: F) -> Result<TruthTable, RbnError>
    where
        F: Fn(&[bool]) -> bool,
    {
        check_arity(arity)?;
        let size = 1usize << arity;
        let mut outputs = ArrayBitVector::empty(size);
        let mut inputs = vec![false; arity];
        for index in 0..size {
            for (j, input) in inputs.iter_mut().enumerate() {
                *input = (index >> (arity - 1 - j)) & 1 == 1;
            }
            if function(&inputs) {
                outputs.set(index, true);
            }
        }
        Ok(TruthTable { arity, outputs })
    }

    /// Build the table of a canonical `BooleanRule` with the given `arity`.
    pub fn from_rule(rule: BooleanRule, arity: usize) -> Result<TruthTable, RbnError> {
        TruthTable::from_fn(arity, |inputs| rule.evaluate(inputs))
    }
}

/// Methods for inspecting and evaluating `TruthTable`s.
impl TruthTable {
    /// The number of inputs of this function.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The number of entries, i.e. `2^arity`.
    pub fn size(&self) -> usize {
        self.outputs.len()
    }

    /// The output stored at the given packed input `index`.
    pub fn output(&self, index: usize) -> bool {
        self.outputs.get(index)
    }

    /// Evaluate the function for explicit input values.
    ///
    /// Panics if the number of `inputs` does not match the arity.
    pub fn evaluate(&self, inputs: &[bool]) -> bool {
        if inputs.len() != self.arity {
            panic!(
                "Truth table expects {} inputs, but {} were given.",
                self.arity,
                inputs.len()
            );
        }
        let index = inputs
            .iter()
            .fold(0usize, |acc, bit| (acc << 1) | usize::from(*bit));
        self.output(index)
    }

    /// If the table outputs the same value for every input, return this value.
    pub fn constant_value(&self) -> Option<bool> {
        let ones = self.count_ones();
        if ones == 0 {
            Some(false)
        } else if ones == self.size() {
            Some(true)
        } else {
            None
        }
    }

    /// The number of input vectors for which the output is `true`.
    pub fn count_ones(&self) -> usize {
        self.outputs.ones().len()
    }

    /// All outputs in index order.
    pub fn outputs(&self) -> Vec<bool> {
        self.outputs.values()
    }
}

impl TryFrom<&str> for TruthTable {
    type Error = RbnError;

    /// Parse a table from a string of `0`/`1` characters listed from index `0`. The length
    /// must be a power of two.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        let outputs = value
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(RbnError::parse(format!(
                    "Unexpected character '{}' in truth table '{}'.",
                    c, value
                ))),
            })
            .collect::<Result<Vec<bool>, RbnError>>()?;
        if !outputs.len().is_power_of_two() {
            return Err(RbnError::parse(format!(
                "Truth table '{}' has {} entries, which is not a power of two.",
                value,
                outputs.len()
            )));
        }
        let arity = outputs.len().trailing_zeros() as usize;
        TruthTable::new(arity, outputs)
    }
}

impl Display for TruthTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for i in 0..self.size() {
            write!(f, "{}", i32::from(self.output(i)))?;
        }
        Ok(())
    }
}
