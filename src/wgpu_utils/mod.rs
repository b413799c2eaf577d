// src/wgpu_utils/mod.rs
//! WGPU utility functions and helpers
//!
//! Provides convenient wrappers for the uniform buffers and bind groups the
//! renderer creates.

pub mod binding_types;
pub mod uniform_buffer;

// Re-export main types
pub use binding_types::{uniform_bind_group, uniform_layout};
pub use uniform_buffer::UniformBuffer;
