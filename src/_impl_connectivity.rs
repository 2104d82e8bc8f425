use crate::random_source::RandomSource;
use crate::{Connectivity, InputSampling, RbnError, MAX_INPUTS};
use lazy_static::lazy_static;
use regex::Regex;
use std::convert::TryFrom;
use std::fmt::{Display, Error, Formatter};

lazy_static! {
    /// Matches a fixed connectivity (`3`) or an inclusive range (`2..5` or `2-5`).
    static ref CONNECTIVITY_REGEX: Regex =
        Regex::new(r"^\s*(?P<min>[0-9]+)\s*(?:(?:\.\.|-)\s*(?P<max>[0-9]+)\s*)?$").unwrap();
}

impl Connectivity {
    /// The smallest number of inputs a node can receive.
    pub fn min(&self) -> usize {
        match self {
            Connectivity::Fixed(k) => *k,
            Connectivity::Range { min, .. } => *min,
        }
    }

    /// The largest number of inputs a node can receive.
    pub fn max(&self) -> usize {
        match self {
            Connectivity::Fixed(k) => *k,
            Connectivity::Range { max, .. } => *max,
        }
    }

    /// True if every node receives the same number of inputs. A degenerate range
    /// (`min == max`) is also considered fixed.
    pub fn is_fixed(&self) -> bool {
        self.min() == self.max()
    }

    /// Check that this connectivity can be realised in a network of `nodes` nodes using
    /// the given sampling mode.
    pub fn validate(
        &self,
        nodes: usize,
        sampling: InputSampling,
        allow_self_regulation: bool,
    ) -> Result<(), RbnError> {
        if self.min() > self.max() {
            return Err(RbnError::config(format!(
                "Connectivity range {} is empty.",
                self
            )));
        }
        if self.max() > MAX_INPUTS {
            return Err(RbnError::config(format!(
                "Connectivity {} exceeds the supported maximum of {} inputs.",
                self, MAX_INPUTS
            )));
        }
        match sampling {
            InputSampling::WithoutReplacement => {
                if self.max() >= nodes {
                    return Err(RbnError::config(format!(
                        "Cannot sample {} distinct inputs in a network of {} nodes.",
                        self.max(),
                        nodes
                    )));
                }
            }
            InputSampling::WithReplacement => {
                if nodes == 1 && !allow_self_regulation && self.max() > 0 {
                    return Err(RbnError::config(
                        "A single-node network without self-regulation cannot have inputs.",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Draw the number of inputs of one node. A fixed connectivity makes no draw.
    pub fn sample(&self, source: &mut RandomSource) -> usize {
        match self {
            Connectivity::Fixed(k) => *k,
            Connectivity::Range { min, max } => source.in_range(*min, *max),
        }
    }
}

impl TryFrom<&str> for Connectivity {
    type Error = RbnError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let captures = CONNECTIVITY_REGEX.captures(value).ok_or_else(|| {
            RbnError::config(format!("'{}' is not a valid connectivity.", value))
        })?;
        let parse = |text: &str| {
            text.parse::<usize>()
                .map_err(|e| RbnError::config(format!("Invalid connectivity '{}': {}", value, e)))
        };
        let min = parse(&captures["min"])?;
        match captures.name("max") {
            None => Ok(Connectivity::Fixed(min)),
            Some(max) => {
                let max = parse(max.as_str())?;
                if min > max {
                    Err(RbnError::config(format!(
                        "Connectivity range '{}' is empty.",
                        value
                    )))
                } else {
                    Ok(Connectivity::Range { min, max })
                }
            }
        }
    }
}

impl Display for Connectivity {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Connectivity::Fixed(k) => write!(f, "{}", k),
            Connectivity::Range { min, max } => write!(f, "{}..{}", min, max),
        }
    }
}
