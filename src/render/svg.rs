//! SVG plot of a codec block: the curve in black, the encoded stream as red
//! markers on top of it.

use crate::codec::{Point, SpatialCodec};
use crate::components::Node;
use serde::{Deserialize, Serialize};
use tracing::debug;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
// cos(30deg), sin(30deg) for the isometric view of the cube
const ISO_X: f64 = 0.866_025_403_784_438_6;
const ISO_Y: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Distance between neighbouring cells, in pixels.
    pub cell_size: u32,
    pub margin: u32,
    pub marker_radius: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_size: 32,
            margin: 16,
            marker_radius: 4,
        }
    }
}

fn project(point: &Point, cell: f64) -> (f64, f64) {
    match *point {
        Point::N2(x, y) => (f64::from(x) * cell, -f64::from(y) * cell),
        Point::N3(x, y, z) => {
            let (x, y, z) = (f64::from(x), f64::from(y), f64::from(z));
            ((x - y) * ISO_X * cell, (x + y) * ISO_Y * cell - z * cell)
        }
    }
}

fn fmt_coord(v: f64) -> String {
    let s = format!("{v:.1}");
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}

/// Render the block curve and `stream` as an SVG document tree.
pub fn render_svg(codec: &dyn SpatialCodec, stream: &[Point], options: &RenderOptions) -> Node {
    let cell = f64::from(options.cell_size.max(1));
    let margin = f64::from(options.margin);
    let curve: Vec<(f64, f64)> = codec.curve().iter().map(|p| project(p, cell)).collect();

    let (min_x, max_x, min_y, max_y) = curve.iter().fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(a, b, c, d), &(x, y)| (a.min(x), b.max(x), c.min(y), d.max(y)),
    );
    let shift = |(x, y): (f64, f64)| (x - min_x + margin, y - min_y + margin);
    let width = fmt_coord(max_x - min_x + 2.0 * margin);
    let height = fmt_coord(max_y - min_y + 2.0 * margin);

    let points = curve
        .iter()
        .map(|&p| {
            let (x, y) = shift(p);
            format!("{},{}", fmt_coord(x), fmt_coord(y))
        })
        .collect::<Vec<_>>()
        .join(" ");

    let markers = stream.iter().fold(
        Node::element("g").attr("class", "stream").attr("fill", "#d00"),
        |group, point| {
            let (x, y) = shift(project(point, cell));
            group.child(
                Node::element("circle")
                    .attr("cx", fmt_coord(x))
                    .attr("cy", fmt_coord(y))
                    .attr("r", options.marker_radius.to_string()),
            )
        },
    );
    debug!(
        codec = %codec.dimension(),
        cells = curve.len(),
        markers = stream.len(),
        "rendered svg"
    );

    Node::element("svg")
        .attr("xmlns", SVG_NS)
        .attr("width", width.clone())
        .attr("height", height.clone())
        .attr("viewBox", format!("0 0 {width} {height}"))
        .child(Node::element("title").text(format!(
            "{} curve, {}-bit block",
            codec.dimension(),
            codec.block_size()
        )))
        .child(
            Node::element("g").attr("class", "index").child(
                Node::element("polyline")
                    .attr("fill", "none")
                    .attr("stroke", "#000")
                    .attr("points", points),
            ),
        )
        .child(markers)
}
