//! Geometry for the two-column flow diagram.
//!
//! [`FlowLayoutEngine::layout`] turns [`FlowData`] into node rectangles and
//! link ribbons in canvas coordinates. The engine holds only its validated
//! configuration, so one instance can be reused for every recomputation.
use crate::error::ConfigError;
use crate::flow::{FlowData, FlowLink, FlowNode, NodeId};
use ahash::AHashMap;
use serde::Serialize;
use tracing::debug;

mod config;
mod geometry;

pub use config::*;
pub use geometry::*;
pub(crate) use geometry::num;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub node: FlowNode,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedLink {
    pub link: FlowLink,
    /// Proportional thickness, never below the configured minimum.
    pub thickness: f64,
    pub path: LinkPath,
}

/// Renderable geometry for one flow diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLayout {
    pub width: f64,
    pub height: f64,
    /// Width of the accent bars flanking each root node.
    pub root_bar_width: f64,
    pub nodes: Vec<PositionedNode>,
    pub links: Vec<PositionedLink>,
}

impl FlowLayout {
    fn empty(config: &LayoutConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            root_bar_width: config.root_bar_width,
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    pub fn canvas(&self) -> Rect {
        Rect {
            x: 0.0,
            y: 0.0,
            width: self.width,
            height: self.height,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&PositionedNode> {
        self.nodes.iter().find(|positioned| positioned.node.id == id)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Lays out flow data on a fixed canvas.
#[derive(Debug, Clone)]
pub struct FlowLayoutEngine {
    config: LayoutConfig,
}

impl Default for FlowLayoutEngine {
    fn default() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }
}

impl FlowLayoutEngine {
    /// Creates an engine after checking that `config` can hold any diagram.
    pub fn new(config: LayoutConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Computes node rectangles and link paths for `flow`.
    ///
    /// Empty input short-circuits before any ratio is taken.
    pub fn layout(&self, flow: &FlowData) -> FlowLayout {
        if flow.is_empty() {
            return FlowLayout::empty(&self.config);
        }

        let inner = self.config.inner_area();
        let band = self.config.band_height();
        let total = flow.total as f64;

        let mut positions: AHashMap<NodeId, Rect> = AHashMap::new();
        let mut levels: AHashMap<NodeId, u8> = AHashMap::new();
        let mut nodes = Vec::with_capacity(flow.nodes.len());

        // Root column: sized relative to the largest root, centered.
        let max_root = flow.nodes_at(0).map(|node| node.count).max().unwrap_or(0);
        for node in flow.nodes_at(0) {
            let height = if max_root == 0 {
                0.0
            } else {
                node.count as f64 / max_root as f64 * band
            };
            let rect = Rect {
                x: inner.x,
                y: inner.y + (inner.height - height) / 2.0,
                width: self.config.root_node_width,
                height,
            };
            positions.insert(node.id, rect);
            levels.insert(node.id, node.level);
            nodes.push(PositionedNode {
                node: node.clone(),
                rect,
            });
        }

        // Status column: stacked in input order, centered as a whole.
        let status_nodes: Vec<&FlowNode> = flow.nodes_at(1).collect();
        let counts: Vec<usize> = status_nodes.iter().map(|node| node.count).collect();
        let heights = self.status_heights(&counts, total, inner.height);
        let stack_height = heights.iter().sum::<f64>()
            + self.config.node_padding * heights.len().saturating_sub(1) as f64;
        let x = inner.x + inner.width * self.config.status_column;
        let mut y = inner.y + (inner.height - stack_height) / 2.0;
        for (node, height) in status_nodes.into_iter().zip(heights) {
            let rect = Rect {
                x,
                y,
                width: self.config.status_node_width,
                height,
            };
            positions.insert(node.id, rect);
            levels.insert(node.id, node.level);
            nodes.push(PositionedNode {
                node: node.clone(),
                rect,
            });
            y += height + self.config.node_padding;
        }

        let links = flow
            .links
            .iter()
            .filter_map(|link| {
                let (Some(source), Some(target)) =
                    (positions.get(&link.source), positions.get(&link.target))
                else {
                    debug!(source = %link.source, target = %link.target, "dropping link to an absent node");
                    return None;
                };
                let source_is_root = levels.get(&link.source) == Some(&0);
                Some(self.place_link(flow, link, source, target, source_is_root, &positions))
            })
            .collect::<Vec<_>>();

        debug!(nodes = nodes.len(), links = links.len(), "computed flow layout");

        FlowLayout {
            width: self.config.width,
            height: self.config.height,
            root_bar_width: self.config.root_bar_width,
            nodes,
            links,
        }
    }

    fn place_link(
        &self,
        flow: &FlowData,
        link: &FlowLink,
        source: &Rect,
        target: &Rect,
        source_is_root: bool,
        positions: &AHashMap<NodeId, Rect>,
    ) -> PositionedLink {
        // Ribbons share the source node's height. The denominator never drops
        // below what the source actually sends out, so they cannot overflow it.
        let source_count = flow.node(link.source).map_or(0, |node| node.count);
        let outgoing: usize = flow
            .links
            .iter()
            .filter(|other| other.source == link.source)
            .map(|other| other.value)
            .sum();
        let denominator = source_count.max(outgoing);
        let proportional = |value: usize| {
            if denominator == 0 {
                0.0
            } else {
                value as f64 / denominator as f64 * source.height
            }
        };

        // Ribbons to targets higher up come first inside the source band.
        let offset: f64 = flow
            .links
            .iter()
            .filter(|other| other.source == link.source)
            .filter_map(|other| {
                let other_target = positions.get(&other.target)?;
                (other_target.y < target.y).then(|| proportional(other.value))
            })
            .sum();

        let thickness = proportional(link.value).max(self.config.min_link_thickness);
        let target_thickness = thickness.min(target.height);
        let start_x = if source_is_root {
            source.right() + self.config.root_bar_width
        } else {
            source.right()
        };

        let path = LinkPath::new(
            Point {
                x: start_x,
                y: source.y + offset,
            },
            thickness,
            Point {
                x: target.x,
                y: target.y,
            },
            target_thickness,
            self.config.curvature,
        );

        PositionedLink {
            link: link.clone(),
            thickness,
            path,
        }
    }

    /// Heights for the status column.
    ///
    /// Each node gets `max(min_node_height, count / total * band)`. When the
    /// clamped column plus padding would overflow `available`, the
    /// proportional part is scaled down until it fits; nodes that drop to the
    /// minimum stay pinned there.
    fn status_heights(&self, counts: &[usize], total: f64, available: f64) -> Vec<f64> {
        let min = self.config.min_node_height;
        let padding = self.config.node_padding * counts.len().saturating_sub(1) as f64;
        let natural_scale = self.config.band_height() / total;

        let natural: Vec<f64> = counts
            .iter()
            .map(|&count| (count as f64 * natural_scale).max(min))
            .collect();
        if natural.iter().sum::<f64>() + padding <= available {
            return natural;
        }

        let room = available - padding;
        let mut pinned = vec![false; counts.len()];
        let mut scale = natural_scale;
        loop {
            let pinned_height = pinned.iter().filter(|&&p| p).count() as f64 * min;
            let free: usize = counts
                .iter()
                .zip(&pinned)
                .filter(|(_, p)| !**p)
                .map(|(count, _)| *count)
                .sum();
            if free == 0 {
                break;
            }
            scale = (room - pinned_height) / free as f64;

            let mut changed = false;
            for (count, p) in counts.iter().zip(pinned.iter_mut()) {
                if !*p && (*count as f64 * scale) < min {
                    *p = true;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        debug!(scale, natural_scale, "status column scaled down to fit");
        counts
            .iter()
            .zip(&pinned)
            .map(|(&count, &p)| if p { min } else { count as f64 * scale })
            .collect()
    }
}
