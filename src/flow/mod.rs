//! Projection of a record collection onto flow diagram nodes and links.
use crate::record::{ApplicationRecord, Status};
use itertools::Itertools;
use tracing::{debug, warn};

mod definition;

pub use definition::*;

/// Groups records by status into one root node fanning out to status nodes.
///
/// Status nodes follow `Status::ALL` order and only exist for statuses with at
/// least one record. Records with an unrecognized status count toward the root
/// only. An empty input yields an empty `FlowData`.
pub fn derive_flow(records: &[ApplicationRecord]) -> FlowData {
    if records.is_empty() {
        return FlowData::default();
    }

    let counts = records
        .iter()
        .filter_map(|record| record.status.known())
        .counts();
    let recognized: usize = counts.values().sum();
    let unrecognized = records.len() - recognized;
    if unrecognized > 0 {
        warn!(
            unrecognized,
            total = records.len(),
            "records with an unrecognized status are left out of the flow diagram"
        );
    }

    let mut nodes = vec![FlowNode::root(records.len())];
    let mut links = Vec::new();
    for status in Status::ALL {
        let Some(&count) = counts.get(&status) else {
            continue;
        };
        nodes.push(FlowNode::status(status, count));
        links.push(FlowLink {
            source: NodeId::Total,
            target: NodeId::Status(status),
            value: count,
        });
    }

    debug!(
        total = records.len(),
        status_nodes = nodes.len() - 1,
        "derived flow data"
    );

    FlowData {
        nodes,
        links,
        total: records.len(),
        unrecognized,
    }
}
