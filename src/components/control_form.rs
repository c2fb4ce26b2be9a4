//! Control panel form for the spatial codec.
//!
//! The form is inert: inputs are uncontrolled, the button is `type="button"`
//! and nothing is submitted, validated or stored.

use super::node::Node;
use serde::{Deserialize, Serialize};

pub const BUTTON_LABEL: &str = "Enter";

/// A labeled text input of the control form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlField {
    Dimensions,
    Frames,
    HexCode,
}

impl ControlField {
    pub const ALL: [ControlField; 3] = [Self::Dimensions, Self::Frames, Self::HexCode];

    pub fn id(self) -> &'static str {
        match self {
            Self::Dimensions => "dimensions",
            Self::Frames => "frames",
            Self::HexCode => "bitarray",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dimensions => "Dimensions",
            Self::Frames => "Frames",
            Self::HexCode => "Hex code",
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Dimensions => "dim form-control",
            Self::Frames => "frame form-control",
            Self::HexCode => "bitarray form-control",
        }
    }

    fn render(self) -> Node {
        Node::element("div")
            .attr("class", "form-group col")
            .child(
                Node::element("label")
                    .attr("for", self.id())
                    .text(self.label()),
            )
            .child(
                Node::element("input")
                    .attr("type", "text")
                    .attr("id", self.id())
                    .attr("class", self.class()),
            )
    }
}

/// Three labeled inputs and an "Enter" button with no attached behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlInputForm;

impl ControlInputForm {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self) -> Node {
        let row = ControlField::ALL
            .iter()
            .fold(Node::element("div").attr("class", "row"), |row, field| {
                row.child(field.render())
            });

        Node::element("div")
            .child(Node::element("form").attr("action", "").child(row))
            .child(
                Node::element("div").attr("class", "form-group row").child(
                    Node::element("button")
                        .attr("type", "button")
                        .text(BUTTON_LABEL),
                ),
            )
    }
}
