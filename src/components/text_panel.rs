//! Static text-display panel.

use super::node::Node;
use serde::{Deserialize, Serialize};

pub const HEADING: &str = "First Component";
pub const ELEMENT_TEXT: &str = "Text from Element";
pub const CONTAINER_CLASS: &str = "comptext";

/// Displays a heading, the caller's text, and a fixed nested element.
///
/// The text is rendered verbatim (escaped only by the HTML serializer); empty
/// strings are allowed and produce an empty text node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPanel {
    pub display_text: String,
}

impl TextPanel {
    pub fn new(display_text: impl Into<String>) -> Self {
        Self {
            display_text: display_text.into(),
        }
    }

    pub fn render(&self) -> Node {
        Node::element("div")
            .attr("class", CONTAINER_CLASS)
            .child(Node::element("h3").text(HEADING))
            .text(self.display_text.as_str())
            .child(Node::element("div").text(ELEMENT_TEXT))
    }
}
