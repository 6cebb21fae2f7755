use crate::flow::NodeId;
use crate::record::Status;
use serde::{Deserialize, Serialize};

/// Fill colors for nodes and ribbon gradients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub total: String,
    pub accent: String,
    pub applied: String,
    pub interview: String,
    pub offer: String,
    pub rejected: String,
    pub withdrawn: String,
    pub label: String,
    pub placeholder: String,
    /// Opacity of both gradient stops on a ribbon.
    pub link_opacity: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            total: "#93c5fd".to_string(),
            accent: "#60a5fa".to_string(),
            applied: "#94a3b8".to_string(),
            interview: "#10b981".to_string(),
            offer: "#22c55e".to_string(),
            rejected: "#ef4444".to_string(),
            withdrawn: "#a855f7".to_string(),
            label: "#374151".to_string(),
            placeholder: "#6b7280".to_string(),
            link_opacity: 0.7,
        }
    }
}

impl Palette {
    pub fn node_color(&self, id: NodeId) -> &str {
        match id {
            NodeId::Total => &self.total,
            NodeId::Status(Status::Applied) => &self.applied,
            NodeId::Status(Status::Interview) => &self.interview,
            NodeId::Status(Status::Offer) => &self.offer,
            NodeId::Status(Status::Rejected) => &self.rejected,
            NodeId::Status(Status::Withdrawn) => &self.withdrawn,
        }
    }
}
