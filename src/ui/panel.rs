// src/ui/panel.rs
//! The matrix editor panel
//!
//! Shows the 3x3 entry grid, the Update and Reset buttons and a status line.
//! The panel only edits the grid text; it reports button clicks as a
//! [`PanelAction`] for the app to carry out.

use imgui::{Condition, StyleColor};

use crate::editor::{ApplyOutcome, FieldGrid, GRID_SIZE};
use crate::error::EditorError;

const FIELD_WIDTH: f32 = 72.0;
const INVALID_FIELD_COLOR: [f32; 4] = [0.65, 0.15, 0.15, 1.0];
const ERROR_TEXT_COLOR: [f32; 4] = [1.0, 0.45, 0.45, 1.0];
const INFO_TEXT_COLOR: [f32; 4] = [0.75, 0.85, 0.75, 1.0];

/// What the user asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelAction {
    #[default]
    None,
    /// "Update" was clicked
    Apply,
    /// "Reset" was clicked
    ResetToIdentity,
}

/// Outcome of the last apply, shown under the buttons
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorStatus {
    #[default]
    Ready,
    Applied {
        vertex_count: usize,
    },
    Rejected {
        field: Option<usize>,
        message: String,
    },
}

impl EditorStatus {
    pub fn from_result(result: &Result<ApplyOutcome, EditorError>) -> Self {
        match result {
            Ok(outcome) => EditorStatus::Applied {
                vertex_count: outcome.vertex_count,
            },
            Err(err) => EditorStatus::Rejected {
                field: err.field_index(),
                message: err.to_string(),
            },
        }
    }

    /// Row-major index of the field to highlight
    pub fn invalid_field(&self) -> Option<usize> {
        match self {
            EditorStatus::Rejected { field, .. } => *field,
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, EditorStatus::Rejected { .. })
    }

    pub fn message(&self) -> String {
        match self {
            EditorStatus::Ready => "Edit the matrix and press Update".to_string(),
            EditorStatus::Applied { vertex_count } => {
                format!("Transformed {vertex_count} vertices")
            }
            EditorStatus::Rejected { message, .. } => message.clone(),
        }
    }
}

/// Draws the matrix editor window
///
/// # Arguments
/// * `ui` - ImGui UI context
/// * `grid` - Field texts, edited in place
/// * `status` - Result of the last apply
pub fn matrix_editor_panel(
    ui: &imgui::Ui,
    grid: &mut FieldGrid,
    status: &EditorStatus,
) -> PanelAction {
    let mut action = PanelAction::None;

    ui.window("Matrix")
        .position([20.0, 20.0], Condition::FirstUseEver)
        .always_auto_resize(true)
        .collapsible(true)
        .build(|| {
            ui.text("v' = M * v");
            ui.separator();

            let highlighted = status.invalid_field();
            for row in 0..GRID_SIZE {
                for col in 0..GRID_SIZE {
                    if col > 0 {
                        ui.same_line();
                    }
                    let _highlight = (highlighted == Some(row * GRID_SIZE + col))
                        .then(|| ui.push_style_color(StyleColor::FrameBg, INVALID_FIELD_COLOR));
                    ui.set_next_item_width(FIELD_WIDTH);
                    ui.input_text(format!("##m{row}{col}"), grid.entry_mut(row, col))
                        .build();
                }
            }

            ui.spacing();
            if ui.button("Update") {
                action = PanelAction::Apply;
            }
            ui.same_line();
            if ui.button("Reset") {
                action = PanelAction::ResetToIdentity;
            }

            ui.separator();
            let color = if status.is_error() {
                ERROR_TEXT_COLOR
            } else {
                INFO_TEXT_COLOR
            };
            ui.text_colored(color, status.message());
        });

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FieldError, SceneError};
    use crate::gfx::scene::MeshId;
    use cgmath::{Matrix3, SquareMatrix};

    #[test]
    fn test_rejected_status_highlights_field() {
        let err = EditorError::from(FieldError::Unparseable {
            index: 7,
            row: 2,
            col: 1,
            text: "x".to_string(),
        });
        let status = EditorStatus::from_result(&Err(err));

        assert!(status.is_error());
        assert_eq!(status.invalid_field(), Some(7));
        assert!(status.message().contains("row 2, column 1"));
    }

    #[test]
    fn test_scene_error_highlights_nothing() {
        let status = EditorStatus::Rejected {
            field: None,
            message: SceneError::UnknownMaterial("m".to_string()).to_string(),
        };
        assert!(status.is_error());
        assert_eq!(status.invalid_field(), None);
    }

    #[test]
    fn test_applied_status() {
        let outcome: Result<ApplyOutcome, EditorError> = Ok(ApplyOutcome {
            mesh: scene_mesh_id(),
            matrix: Matrix3::identity(),
            vertex_count: 561,
        });
        let status = EditorStatus::from_result(&outcome);

        assert!(!status.is_error());
        assert_eq!(status.invalid_field(), None);
        assert_eq!(status.message(), "Transformed 561 vertices");
        assert_eq!(EditorStatus::default(), EditorStatus::Ready);
    }

    fn scene_mesh_id() -> MeshId {
        use crate::config::{CameraConfig, SphereTessellation};
        use crate::editor::MatrixEditor;
        use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
        use crate::gfx::resources::material::DEFAULT_MATERIAL;
        use crate::gfx::scene::{Lighting, Scene};

        let config = CameraConfig::default();
        let mut scene = Scene::new(
            CameraManager::new(
                OrbitCamera::from_config(&config, 1.0),
                CameraController::from_config(&config),
            ),
            Lighting::default(),
        );
        MatrixEditor::new(&mut scene, DEFAULT_MATERIAL, SphereTessellation::default())
            .unwrap()
            .target()
    }
}
