use crate::{NodeId, NODE_NAME_REGEX};
use std::fmt::{Display, Error, Formatter};

impl From<usize> for NodeId {
    fn from(val: usize) -> Self {
        NodeId(val)
    }
}

impl From<NodeId> for usize {
    fn from(value: NodeId) -> Self {
        value.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "n{}", self.0)
    }
}

impl NodeId {
    /// Convert this id to a plain index into network columns.
    pub fn to_index(self) -> usize {
        self.0
    }

    /// Parse a node name of the form `n<index>`.
    pub fn try_from_name(name: &str) -> Option<NodeId> {
        NODE_NAME_REGEX
            .captures(name.trim())
            .and_then(|c| c["index"].parse::<usize>().ok())
            .map(NodeId)
    }
}
