//! Presentational components served by the front end.
//!
//! Both components are plain value types whose `render` maps their inputs to a
//! [`Node`] tree. Rendering is pure: the same input always yields the same tree.

pub mod control_form;
pub mod node;
pub mod text_panel;

pub use control_form::{ControlField, ControlInputForm};
pub use node::{document, escape, Node};
pub use text_panel::TextPanel;

/// Render the control page: a text panel above the control form.
pub fn control_page(title: &str, display_text: &str) -> String {
    document(
        title,
        &[
            TextPanel::new(display_text).render(),
            ControlInputForm::new().render(),
        ],
    )
}
