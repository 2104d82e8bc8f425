use crate::random_source::RandomSource;
use crate::BooleanRule;
use std::fmt::{Display, Error, Formatter};

impl BooleanRule {
    /// All canonical rules, in the order used for random selection.
    pub const ALL: [BooleanRule; 5] = [
        BooleanRule::And,
        BooleanRule::Or,
        BooleanRule::Not,
        BooleanRule::Xor,
        BooleanRule::Identity,
    ];

    /// Pick one rule uniformly at random.
    pub fn random(source: &mut RandomSource) -> BooleanRule {
        BooleanRule::ALL[source.index(BooleanRule::ALL.len())]
    }

    /// Evaluate this rule on the given inputs.
    ///
    /// Rules are defined for any number of inputs: `And` of no inputs is `true` and `Or` of
    /// no inputs is `false`. `Not` and `Identity` only read the first input (`false` if there
    /// is none). `Xor` compares two inputs, copies a single input and is `false` otherwise.
    pub fn evaluate(&self, inputs: &[bool]) -> bool {
        match self {
            BooleanRule::And => inputs.iter().all(|it| *it),
            BooleanRule::Or => inputs.iter().any(|it| *it),
            BooleanRule::Not => inputs.first().map(|it| !*it).unwrap_or(false),
            BooleanRule::Identity => inputs.first().copied().unwrap_or(false),
            BooleanRule::Xor => match inputs {
                [a, b] => a != b,
                [a] => *a,
                _ => false,
            },
        }
    }
}

impl Display for BooleanRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let name = match self {
            BooleanRule::And => "and",
            BooleanRule::Or => "or",
            BooleanRule::Not => "not",
            BooleanRule::Xor => "xor",
            BooleanRule::Identity => "identity",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use crate::random_source::RandomSource;
    use crate::{BooleanRule, TruthTable};

    #[test]
    fn rule_semantics() {
        assert!(BooleanRule::And.evaluate(&[]));
        assert!(!BooleanRule::And.evaluate(&[true, false, true]));
        assert!(!BooleanRule::Or.evaluate(&[]));
        assert!(BooleanRule::Or.evaluate(&[false, false, true]));
        assert!(!BooleanRule::Not.evaluate(&[]));
        assert!(BooleanRule::Not.evaluate(&[false, true]));
        assert!(!BooleanRule::Identity.evaluate(&[]));
        assert!(BooleanRule::Identity.evaluate(&[true, false]));
        assert!(BooleanRule::Xor.evaluate(&[true, false]));
        assert!(!BooleanRule::Xor.evaluate(&[true, true]));
        assert!(BooleanRule::Xor.evaluate(&[true]));
        assert!(!BooleanRule::Xor.evaluate(&[true, false, false]));
    }

    #[test]
    fn rule_tables() {
        assert_eq!("0001", TruthTable::from_rule(BooleanRule::And, 2).unwrap().to_string());
        assert_eq!("0111", TruthTable::from_rule(BooleanRule::Or, 2).unwrap().to_string());
        assert_eq!("1100", TruthTable::from_rule(BooleanRule::Not, 2).unwrap().to_string());
        assert_eq!(
            "0011",
            TruthTable::from_rule(BooleanRule::Identity, 2).unwrap().to_string()
        );
        assert_eq!("1", TruthTable::from_rule(BooleanRule::And, 0).unwrap().to_string());
    }

    #[test]
    fn random_rule_covers_family() {
        let mut source = RandomSource::new(0);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let rule = BooleanRule::random(&mut source);
            if !seen.contains(&rule) {
                seen.push(rule);
            }
        }
        assert_eq!(BooleanRule::ALL.len(), seen.len());
        assert_eq!("identity", BooleanRule::Identity.to_string());
    }
}
