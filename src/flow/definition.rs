use crate::record::Status;
use serde::{Serialize, Serializer};
use std::fmt;

/// Identifies a node of the flow diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// The root node holding every record.
    Total,
    Status(Status),
}

impl NodeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeId::Total => "Total",
            NodeId::Status(status) => status.as_str(),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A population count at one stage of the diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    pub id: NodeId,
    pub display_name: String,
    pub count: usize,
    pub level: u8,
}

impl FlowNode {
    pub fn root(count: usize) -> Self {
        Self {
            id: NodeId::Total,
            display_name: "Total Applications".to_string(),
            count,
            level: 0,
        }
    }

    /// A status node. Applied reads "Still Applied" so it is not confused with
    /// the act of applying that the root node stands for.
    pub fn status(status: Status, count: usize) -> Self {
        let display_name = match status {
            Status::Applied => "Still Applied".to_string(),
            other => other.as_str().to_string(),
        };
        Self {
            id: NodeId::Status(status),
            display_name,
            count,
            level: 1,
        }
    }
}

/// A ribbon carrying `value` records from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLink {
    pub source: NodeId,
    pub target: NodeId,
    pub value: usize,
}

/// Nodes and links projected from a record collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowData {
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
    /// Number of input records, including those with an unrecognized status.
    pub total: usize,
    /// Records whose status is outside the known set; they feed `total` only.
    pub unrecognized: usize,
}

impl FlowData {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn node(&self, id: NodeId) -> Option<&FlowNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn nodes_at(&self, level: u8) -> impl Iterator<Item = &FlowNode> {
        self.nodes.iter().filter(move |node| node.level == level)
    }

    pub fn link_total(&self) -> usize {
        self.links.iter().map(|link| link.value).sum()
    }
}
