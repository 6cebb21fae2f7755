//! SVG output for a computed [`FlowLayout`].
use crate::flow::NodeId;
use crate::layout::{FlowLayout, PositionedLink, PositionedNode, num};
use std::fmt::Write;

mod palette;

pub use palette::*;

/// Text shown instead of a diagram when there are no records.
pub const EMPTY_MESSAGE: &str = "No applications to display";

/// Renders flow layouts as standalone SVG documents.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    palette: Palette,
}

impl SvgRenderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Render `layout` to an SVG document. An empty layout produces a
    /// placeholder message rather than an empty drawing.
    pub fn render(&self, layout: &FlowLayout) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = num(layout.width),
            h = num(layout.height),
        );

        if layout.is_empty() {
            let _ = writeln!(
                out,
                r#"  <text x="{}" y="{}" text-anchor="middle" fill="{}">{}</text>"#,
                num(layout.width / 2.0),
                num(layout.height / 2.0),
                escape(&self.palette.placeholder),
                EMPTY_MESSAGE
            );
        } else {
            for (index, link) in layout.links.iter().enumerate() {
                self.write_link(&mut out, index, link);
            }
            for node in &layout.nodes {
                self.write_node(&mut out, layout.root_bar_width, node);
            }
        }

        out.push_str("</svg>\n");
        out
    }

    fn write_link(&self, out: &mut String, index: usize, positioned: &PositionedLink) {
        let link = &positioned.link;
        let opacity = self.palette.link_opacity;
        let _ = writeln!(out, r#"  <g class="link">"#);
        let _ = writeln!(
            out,
            r#"    <defs><linearGradient id="gradient-{index}" x1="0%" y1="0%" x2="100%" y2="0%"><stop offset="0%" stop-color="{}" stop-opacity="{opacity}"/><stop offset="100%" stop-color="{}" stop-opacity="{opacity}"/></linearGradient></defs>"#,
            escape(self.palette.node_color(link.source)),
            escape(self.palette.node_color(link.target)),
        );
        let _ = writeln!(
            out,
            r#"    <path d="{}" fill="url(#gradient-{index})" stroke="none"><title>{} applications to {}</title></path>"#,
            positioned.path.to_svg_path(),
            link.value,
            escape(link.target.as_str()),
        );
        let _ = writeln!(out, "  </g>");
    }

    fn write_node(&self, out: &mut String, bar_width: f64, positioned: &PositionedNode) {
        let node = &positioned.node;
        let rect = positioned.rect;
        let label = format!("{}: {}", escape(&node.display_name), node.count);
        let _ = writeln!(
            out,
            r#"  <g class="node" transform="translate({}, {})">"#,
            num(rect.x),
            num(rect.y)
        );

        if node.id == NodeId::Total {
            let bar = escape(&self.palette.accent);
            let bar_width = num(bar_width);
            let _ = writeln!(
                out,
                r#"    <rect x="-{bar_width}" width="{bar_width}" height="{}" fill="{bar}"/>"#,
                num(rect.height)
            );
            let _ = writeln!(
                out,
                r#"    <rect width="{}" height="{}" fill="{}"><title>{label} applications</title></rect>"#,
                num(rect.width),
                num(rect.height),
                escape(self.palette.node_color(node.id)),
            );
            let _ = writeln!(
                out,
                r#"    <rect x="{}" width="{bar_width}" height="{}" fill="{bar}"/>"#,
                num(rect.width),
                num(rect.height)
            );
            let mid = num(rect.height / 2.0);
            let _ = writeln!(
                out,
                r#"    <text x="-25" y="{mid}" text-anchor="middle" fill="{}" transform="rotate(-90, -25, {mid})">{label}</text>"#,
                escape(&self.palette.label),
            );
        } else {
            let _ = writeln!(
                out,
                r#"    <rect width="{}" height="{}" fill="{}"><title>{label} applications</title></rect>"#,
                num(rect.width),
                num(rect.height),
                escape(self.palette.node_color(node.id)),
            );
            let _ = writeln!(
                out,
                r#"    <text x="{}" y="{}" dy="0.35em" text-anchor="start" fill="{}">{label}</text>"#,
                num(rect.width + 8.0),
                num(rect.height / 2.0),
                escape(&self.palette.label),
            );
        }

        let _ = writeln!(out, "  </g>");
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
