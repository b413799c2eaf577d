// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Handles the depth buffer, global uniforms and materials.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUBO, GlobalUniform};
pub use material::{create_material_layout, Material, MaterialId, MaterialManager};
pub use texture_resource::TextureResource;
