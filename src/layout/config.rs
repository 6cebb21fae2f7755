use super::geometry::Rect;
use crate::error::ConfigError;
use crate::record::Status;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 150.0,
            bottom: 20.0,
            left: 150.0,
        }
    }
}

/// Fixed canvas and sizing options for the flow diagram.
///
/// Every field has a default, so a partial JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Thickness of the root column.
    pub root_node_width: f64,
    /// Accent bars drawn on both sides of the root node. Links leave from the right one.
    pub root_bar_width: f64,
    /// Thickness of the status column.
    pub status_node_width: f64,
    /// Vertical gap between stacked status nodes.
    pub node_padding: f64,
    pub min_node_height: f64,
    pub min_link_thickness: f64,
    /// Share of the inner height that proportional sizes are measured against.
    pub band_fraction: f64,
    /// Horizontal position of the status column as a share of the inner width.
    pub status_column: f64,
    /// Horizontal position of both Bézier control points as a share of the link span.
    pub curvature: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            margin: Margin::default(),
            root_node_width: 100.0,
            root_bar_width: 15.0,
            status_node_width: 15.0,
            node_padding: 20.0,
            min_node_height: 20.0,
            min_link_thickness: 2.0,
            band_fraction: 0.8,
            status_column: 0.7,
            curvature: 0.5,
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// The drawing area left after margins, in canvas coordinates.
    pub fn inner_area(&self) -> Rect {
        Rect {
            x: self.margin.left,
            y: self.margin.top,
            width: self.width - self.margin.left - self.margin.right,
            height: self.height - self.margin.top - self.margin.bottom,
        }
    }

    /// Height of the proportional band: what a node holding every record spans.
    pub fn band_height(&self) -> f64 {
        self.inner_area().height * self.band_fraction
    }

    /// Checks that any record collection can be laid out inside the canvas.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (option, value) in [
            ("width", self.width),
            ("height", self.height),
            ("root_node_width", self.root_node_width),
            ("status_node_width", self.status_node_width),
            ("min_node_height", self.min_node_height),
            ("min_link_thickness", self.min_link_thickness),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { option, value });
            }
        }
        for (option, value) in [
            ("margin.top", self.margin.top),
            ("margin.right", self.margin.right),
            ("margin.bottom", self.margin.bottom),
            ("margin.left", self.margin.left),
            ("root_bar_width", self.root_bar_width),
            ("node_padding", self.node_padding),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::OutOfRange {
                    option,
                    value,
                    min: 0.0,
                    max: f64::INFINITY,
                });
            }
        }
        for (option, value) in [
            ("band_fraction", self.band_fraction),
            ("status_column", self.status_column),
            ("curvature", self.curvature),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    option,
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        if self.band_fraction == 0.0 {
            return Err(ConfigError::NotPositive {
                option: "band_fraction",
                value: 0.0,
            });
        }

        let inner = self.inner_area();
        if inner.width <= 0.0 || inner.height <= 0.0 {
            return Err(ConfigError::NoDrawingArea {
                width: self.width,
                height: self.height,
            });
        }

        if self.min_link_thickness > self.min_node_height {
            return Err(ConfigError::OutOfRange {
                option: "min_link_thickness",
                value: self.min_link_thickness,
                min: 0.0,
                max: self.min_node_height,
            });
        }

        // A fully clamped status column must still fit.
        let slots = Status::ALL.len() as f64;
        let required = slots * self.min_node_height + (slots - 1.0) * self.node_padding;
        if required > inner.height {
            return Err(ConfigError::StackTooTall {
                required,
                available: inner.height,
            });
        }

        // The last ribbon may overshoot the root band by its minimum thickness.
        let slack = inner.height * (1.0 - self.band_fraction) / 2.0;
        if slack < self.min_link_thickness {
            return Err(ConfigError::StackTooTall {
                required: self.band_height() + 2.0 * self.min_link_thickness,
                available: inner.height,
            });
        }

        if self.root_bar_width > self.margin.left {
            return Err(ConfigError::ColumnsOverlap(format!(
                "root accent bar ({}) is wider than the left margin ({})",
                self.root_bar_width, self.margin.left
            )));
        }
        let status_x = inner.width * self.status_column;
        if self.root_node_width + self.root_bar_width >= status_x {
            return Err(ConfigError::ColumnsOverlap(format!(
                "root column ends at {} but the status column starts at {}",
                self.root_node_width + self.root_bar_width,
                status_x
            )));
        }
        if status_x + self.status_node_width > inner.width {
            return Err(ConfigError::ColumnsOverlap(format!(
                "status column ends at {} beyond the drawing width {}",
                status_x + self.status_node_width,
                inner.width
            )));
        }

        Ok(())
    }
}
