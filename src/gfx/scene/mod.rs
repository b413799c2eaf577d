//! # Scene Management Module
//!
//! Meshes, helpers, materials, lights and the camera that make up what gets
//! rendered each frame.
//!
//! ## Key Components
//!
//! - [`Scene`] - The main scene container; meshes are addressed by [`MeshId`]
//! - [`Object`] - A lit triangle mesh referencing a material by ID
//! - [`LineObject`] - Unlit coloured lines, used for the axes helper
//! - [`Lighting`] - One ambient and one point light
//!
//! Everything up to GPU upload is plain CPU data. Buffers are created lazily
//! by [`Scene::sync_gpu_resources`], so scenes can be built and edited without
//! a device.

pub mod light;
pub mod object;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod vertex;

use std::fmt;

// Re-export main types
pub use light::{AmbientLight, Lighting, PointLight};
pub use object::{DrawMesh, LineObject, Object};
pub use scene::{Scene, SceneStatistics};
pub use vertex::{LineVertex, Vertex3D};

/// Handle to a mesh owned by a [`Scene`]
///
/// Handles are never reused within a scene; a replaced or removed mesh's
/// handle stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(u64);

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mesh#{}", self.0)
    }
}
