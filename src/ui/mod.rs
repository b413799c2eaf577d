//! # User Interface Module
//!
//! Dear ImGui overlay: the [`UiManager`] glues ImGui to winit and wgpu, and
//! [`panel`] draws the matrix editor window.
//!
//! When the UI wants the mouse, camera controls are suspended so dragging a
//! widget does not orbit the view.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::{matrix_editor_panel, EditorStatus, PanelAction};
