use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// True when `other` lies entirely inside `self`, allowing for float noise.
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f64 = 1e-9;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

/// A ribbon between two vertical edges, bounded by two cubic S-curves.
///
/// The upper curve runs from `source` to `target`; the lower curve runs back
/// from `target` shifted by `target_thickness` to `source` shifted by
/// `source_thickness`. Both curves put their control points at `control_x`,
/// so they leave and enter horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkPath {
    pub source: Point,
    pub target: Point,
    pub source_thickness: f64,
    pub target_thickness: f64,
    pub control_x: f64,
}

impl LinkPath {
    pub fn new(
        source: Point,
        source_thickness: f64,
        target: Point,
        target_thickness: f64,
        curvature: f64,
    ) -> Self {
        Self {
            source,
            target,
            source_thickness,
            target_thickness,
            control_x: source.x + (target.x - source.x) * curvature,
        }
    }

    /// Point on the upper edge at parameter `t` in `0..=1`.
    pub fn upper_at(&self, t: f64) -> Point {
        self.curve_at(self.source.y, self.target.y, t)
    }

    /// Point on the lower edge at parameter `t` in `0..=1`, measured from the source side.
    pub fn lower_at(&self, t: f64) -> Point {
        self.curve_at(
            self.source.y + self.source_thickness,
            self.target.y + self.target_thickness,
            t,
        )
    }

    fn curve_at(&self, y0: f64, y1: f64, t: f64) -> Point {
        let x = cubic(self.source.x, self.control_x, self.control_x, self.target.x, t);
        let y = cubic(y0, y0, y1, y1, t);
        Point { x, y }
    }

    /// Thinnest vertical extent of the ribbon.
    pub fn min_thickness(&self) -> f64 {
        self.source_thickness.min(self.target_thickness)
    }

    /// Axis-aligned bounds. Control points share the endpoint y values, so the
    /// curves never leave the box spanned by their endpoints.
    pub fn bounds(&self) -> Rect {
        let top = self.source.y.min(self.target.y);
        let bottom = (self.source.y + self.source_thickness)
            .max(self.target.y + self.target_thickness);
        let left = self.source.x.min(self.target.x);
        let right = self.source.x.max(self.target.x);
        Rect {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// SVG path data for the closed ribbon.
    pub fn to_svg_path(&self) -> String {
        let (x0, x1, xi) = (self.source.x, self.target.x, self.control_x);
        let (sy, ty) = (self.source.y, self.target.y);
        let sb = sy + self.source_thickness;
        let tb = ty + self.target_thickness;

        let mut d = String::new();
        // Writing to a String cannot fail.
        let _ = write!(
            d,
            "M {} {} C {} {}, {} {}, {} {} L {} {} C {} {}, {} {}, {} {} Z",
            num(x0),
            num(sy),
            num(xi),
            num(sy),
            num(xi),
            num(ty),
            num(x1),
            num(ty),
            num(x1),
            num(tb),
            num(xi),
            num(tb),
            num(xi),
            num(sb),
            num(x0),
            num(sb),
        );
        d
    }
}

fn cubic(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * mt * p0 + 3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t * p3
}

/// Formats a coordinate with at most two decimals and no trailing zeros.
pub(crate) fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        let text = format!("{:.2}", rounded);
        text.trim_end_matches('0').to_string()
    }
}
