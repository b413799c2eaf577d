//! # Graphics Module
//!
//! Everything between the matrix editor and the screen: camera, geometry,
//! scene, GPU resources and the render engine.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Orbit camera with rotate, zoom and pan
//! - **Geometry** ([`geometry`]) - Procedural sphere and axes, vertex transforms
//! - **Scene Management** ([`scene`]) - Meshes by handle, helpers, lights
//! - **Resource Management** ([`resources`]) - Materials, global uniforms, depth buffer
//! - **Rendering Pipeline** ([`rendering`]) - Blinn-Phong and line pipelines
//!
//! Scene contents live on the CPU until [`scene::Scene::sync_gpu_resources`]
//! uploads them, so the geometry and scene layers work without a device.

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
