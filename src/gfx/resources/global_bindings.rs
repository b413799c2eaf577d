//! Global uniform bindings for camera and scene data
//!
//! Manages the uniform buffer and bind group for per-frame state shared by
//! every pipeline: camera matrices and the two scene lights. Bound to slot 0.

use crate::{
    gfx::{camera::camera_utils::CameraUniform, scene::light::Lighting},
    wgpu_utils::{uniform_bind_group, uniform_layout, UniformBuffer},
};

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    view_position: [f32; 4],  // Camera position (homogeneous coordinates)
    view_proj: [[f32; 4]; 4], // Camera view-projection matrix

    ambient: [f32; 4],        // Ambient radiance in rgb
    light_position: [f32; 4], // Point light position, w = 1
    light_color: [f32; 4],    // Point light radiance in rgb
    light_decay: [f32; 4],    // x = linear, y = quadratic
}
// Total: 16 + 64 + 4 * 16 = 144 bytes

impl GlobalUniform {
    pub fn new(camera: CameraUniform, lighting: &Lighting) -> Self {
        let [ar, ag, ab] = lighting.ambient.radiance();
        let [px, py, pz] = lighting.point.position;
        let [lr, lg, lb] = lighting.point.radiance();

        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            ambient: [ar, ag, ab, 1.0],
            light_position: [px, py, pz, 1.0],
            light_color: [lr, lg, lb, 1.0],
            light_decay: [
                lighting.point.linear_decay,
                lighting.point.quadratic_decay,
                0.0,
                0.0,
            ],
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUniform>;

/// Owns the global uniform buffer together with its layout and bind group
pub struct GlobalBindings {
    layout: wgpu::BindGroupLayout,
    ubo: GlobalUBO,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let layout = uniform_layout(
            device,
            "Globals Bind Group Layout",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let ubo = GlobalUBO::new(device);
        let bind_group =
            uniform_bind_group(device, "Global Bind Group", &layout, ubo.binding_resource());

        Self {
            layout,
            ubo,
            bind_group,
        }
    }

    /// Uploads camera and light data; call once per frame before rendering
    pub fn update(&mut self, queue: &wgpu::Queue, camera: CameraUniform, lighting: &Lighting) {
        self.ubo
            .update_content(queue, GlobalUniform::new(camera, lighting));
    }

    /// Used when creating render pipelines that need access to global uniforms
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<GlobalUniform>(), 144);
    }

    #[test]
    fn test_lights_are_packed() {
        let uniform = GlobalUniform::new(CameraUniform::default(), &Lighting::default());
        assert_eq!(uniform.ambient, [0.8, 0.8, 0.8, 1.0]);
        assert_eq!(uniform.light_position, [1.0, 0.0, 2.0, 1.0]);
        assert_eq!(uniform.light_color, [5.0, 5.0, 5.0, 1.0]);
        assert_eq!(uniform.light_decay, [1.0, 1.0, 0.0, 0.0]);
    }
}
