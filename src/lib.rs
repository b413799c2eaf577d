// src/lib.rs
//! Matrix Sphere
//!
//! Type nine numbers into a 3x3 grid and see them applied as a linear
//! transform to every vertex of a unit sphere, rendered with wgpu and winit.
//!
//! The GPU-free core is [`editor`]: a [`editor::FieldGrid`] of entry texts
//! and a [`editor::MatrixEditor`] that rebuilds its sphere in a
//! [`gfx::scene::Scene`] from that grid. [`app::MatrixSphereApp`] wraps it in
//! a window with an orbit camera and an ImGui panel.

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod gfx;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::MatrixSphereApp;
pub use config::AppConfig;

/// Creates the application with the default configuration
pub fn default() -> anyhow::Result<MatrixSphereApp> {
    MatrixSphereApp::new(AppConfig::default())
}
