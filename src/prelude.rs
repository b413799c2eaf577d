//! # Prelude
//!
//! Commonly used types in one import:
//!
//! ```rust
//! use matrix_sphere::prelude::*;
//!
//! let grid = FieldGrid::from_entries(["2", "0", "0", "0", "2", "0", "0", "0", "2"]);
//! let matrix = grid.parse_matrix().unwrap();
//!
//! let mut sphere = generate_sphere(1.0, 32, 16);
//! sphere.apply_matrix3(&matrix);
//! assert_eq!(sphere.vertex_count(), 561);
//! ```

pub use crate::app::{build_scene, MatrixSphereApp};
pub use crate::config::{AppConfig, CameraConfig, LightingConfig, SphereTessellation};
pub use crate::editor::{ApplyOutcome, FieldGrid, MatrixEditor};
pub use crate::error::{EditorError, FieldError, SceneError};
pub use crate::gfx::{
    geometry::{generate_axes, generate_sphere, GeometryData},
    resources::material::Material,
    scene::{Lighting, MeshId, Object, Scene},
};

pub use cgmath::{Matrix3, Vector3};
