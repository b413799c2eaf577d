//! # Matrix Editor
//!
//! The 3x3 grid of text fields and the operation that turns it into a
//! transformed sphere.
//!
//! [`FieldGrid`] holds the raw text the GUI edits. [`MatrixEditor`] remembers
//! which scene mesh it owns and, on [`MatrixEditor::apply_transform`], parses
//! the grid, regenerates a unit sphere, transforms every vertex and swaps the
//! result into the scene. A grid that fails to parse leaves the scene alone.

pub mod field_grid;
pub mod matrix_editor;

pub use field_grid::{FieldGrid, FIELD_COUNT, GRID_SIZE};
pub use matrix_editor::{ApplyOutcome, MatrixEditor, SPHERE_MESH_NAME};
