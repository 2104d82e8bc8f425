use crate::{NodeId, RandomBooleanNetwork, RbnError, TruthTable, Wiring};
use lazy_static::lazy_static;
use regex::Regex;
use std::convert::TryFrom;
use std::fmt::{Display, Error, Formatter};

lazy_static! {
    /// Matches one node declaration: `n2 <- n0, n1 : 0110`.
    static ref NODE_LINE_REGEX: Regex = Regex::new(
        r"^(?P<target>[a-z0-9_]+)\s*<-\s*(?P<inputs>[^:]*?)\s*:\s*(?P<table>[01]+)$"
    )
    .unwrap();
}

impl Display for RandomBooleanNetwork {
    /// Write one line per node: `n<i> <- <inputs> : <truth table>`, where the truth table
    /// lists outputs starting with index `0`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for node in self.nodes() {
            let inputs = self
                .regulators(node)
                .iter()
                .map(|it| it.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            if inputs.is_empty() {
                writeln!(f, "{} <- : {}", node, self.truth_table(node))?;
            } else {
                writeln!(f, "{} <- {} : {}", node, inputs, self.truth_table(node))?;
            }
        }
        Ok(())
    }
}

impl TryFrom<&str> for RandomBooleanNetwork {
    type Error = RbnError;

    /// Read a network from the line format produced by `Display`. Empty lines and lines
    /// starting with `#` are ignored. Every node `n0 .. n(N-1)` must be declared exactly once,
    /// in any order.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lines = value.lines().filter_map(|l| {
            let line = l.trim();
            if line.is_empty() || line.starts_with('#') {
                None
            } else {
                Some(line)
            }
        });

        let mut declarations: Vec<(NodeId, Vec<NodeId>, TruthTable)> = Vec::new();
        for line in lines {
            let captures = NODE_LINE_REGEX.captures(line).ok_or_else(|| {
                RbnError::parse(format!("Line \"{}\" is not a valid node declaration.", line))
            })?;
            let target = parse_node(&captures["target"])?;
            let inputs_text = captures["inputs"].trim();
            let inputs = if inputs_text.is_empty() {
                Vec::new()
            } else {
                inputs_text
                    .split(',')
                    .map(parse_node)
                    .collect::<Result<Vec<_>, _>>()?
            };
            let table = TruthTable::try_from(&captures["table"])?;
            declarations.push((target, inputs, table));
        }

        if declarations.is_empty() {
            return Err(RbnError::parse("Network has no nodes."));
        }

        declarations.sort_by_key(|(target, _, _)| *target);
        for (expected, (target, _, _)) in declarations.iter().enumerate() {
            if target.to_index() != expected {
                return Err(RbnError::parse(format!(
                    "Expected a declaration of n{}, but found {}.",
                    expected, target
                )));
            }
        }

        let (inputs, tables): (Vec<_>, Vec<_>) = declarations
            .into_iter()
            .map(|(_, inputs, table)| (inputs, table))
            .unzip();
        let wiring = Wiring::new(inputs).map_err(as_parse_error)?;
        RandomBooleanNetwork::new(wiring, tables).map_err(as_parse_error)
    }
}

/// **(internal)** Structural problems found while reading a network are reported as
/// parse errors.
fn as_parse_error(error: RbnError) -> RbnError {
    match error {
        RbnError::Config(message) => RbnError::Parse(message),
        other => other,
    }
}

/// **(internal)** Read a `NodeId` or fail with a descriptive error.
fn parse_node(name: &str) -> Result<NodeId, RbnError> {
    NodeId::try_from_name(name)
        .ok_or_else(|| RbnError::parse(format!("'{}' is not a valid node name.", name.trim())))
}
