//! Visual output for encoded streams.

pub mod svg;

pub use svg::{render_svg, RenderOptions};

/// Serialize an SVG tree as a standalone document.
pub fn svg_document(svg: &crate::components::Node) -> String {
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}\n", svg.to_html())
}
