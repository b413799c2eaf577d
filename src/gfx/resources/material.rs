//! Material system for Blinn-Phong rendering
//!
//! Provides material definitions and centralized management with GPU resource handling.
//! Materials are stored in MaterialManager and objects reference them by ID, so a
//! mesh that is regenerated keeps the material of the mesh it replaces.

use std::collections::{hash_map::Entry, HashMap};
use wgpu::Device;

use crate::wgpu_utils::{uniform_bind_group, uniform_layout, UniformBuffer};

/// Material ID for referencing materials
pub type MaterialId = String;

/// ID of the material every manager starts with
pub const DEFAULT_MATERIAL: &str = "default";

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    /// Specular colour in `xyz`, shininess exponent in `w`
    pub specular: [f32; 4],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Creates the bind group layout shared by all materials
pub fn create_material_layout(device: &Device) -> wgpu::BindGroupLayout {
    uniform_layout(device, "Material Bind Group Layout", wgpu::ShaderStages::FRAGMENT)
}

struct MaterialGpu {
    ubo: MaterialUBO,
    bind_group: wgpu::BindGroup,
}

/// Material definition with standard (Blinn-Phong) properties
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub specular_color: [f32; 3],
    pub shininess: f32,

    // Shared by all objects using this material
    gpu: Option<MaterialGpu>,
}

impl Default for Material {
    fn default() -> Self {
        Self::new(DEFAULT_MATERIAL, [0.8, 0.8, 0.8, 1.0])
    }
}

impl Material {
    /// Creates a standard material with grey highlights
    ///
    /// # Arguments
    /// * `name` - Unique name for this material
    /// * `base_color` - RGBA base color
    pub fn new(name: &str, base_color: [f32; 4]) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            specular_color: [0.5, 0.5, 0.5],
            shininess: 30.0,
            gpu: None,
        }
    }

    /// Builder pattern: Set specular highlight colour
    pub fn with_specular(mut self, r: f32, g: f32, b: f32) -> Self {
        self.specular_color = [r, g, b];
        self
    }

    /// Builder pattern: Set shininess exponent
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess.max(1.0);
        self
    }

    pub fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            base_color: self.base_color,
            specular: [
                self.specular_color[0],
                self.specular_color[1],
                self.specular_color[2],
                self.shininess,
            ],
        }
    }

    /// Creates GPU resources on first use and uploads current properties
    pub fn update_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
    ) {
        let uniform = self.uniform();
        let gpu = self.gpu.get_or_insert_with(|| {
            let ubo = MaterialUBO::new(device);
            let bind_group =
                uniform_bind_group(device, "Material Bind Group", layout, ubo.binding_resource());
            MaterialGpu { ubo, bind_group }
        });
        gpu.ubo.update_content(queue, uniform);
    }

    /// Gets the bind group for rendering
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu.as_ref().map(|gpu| &gpu.bind_group)
    }
}

/// Manages all materials in the scene
///
/// Objects reference materials by ID rather than storing material data
/// directly, so GPU resources are shared between objects.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialManager {
    /// Creates a new material manager with a default material
    pub fn new() -> Self {
        let mut materials = HashMap::new();
        materials.insert(DEFAULT_MATERIAL.to_string(), Material::default());
        Self { materials }
    }

    /// Adds a material, replacing any material with the same name
    pub fn add_material(&mut self, material: Material) -> &mut Material {
        match self.materials.entry(material.name.clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(material);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(material),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.materials.contains_key(id)
    }

    /// Gets material for an object with fallback to the default material
    pub fn get_material_for_object(&self, material_id: &str) -> Option<&Material> {
        self.materials
            .get(material_id)
            .or_else(|| self.materials.get(DEFAULT_MATERIAL))
    }

    pub fn list_materials(&self) -> Vec<&MaterialId> {
        self.materials.keys().collect()
    }

    /// Updates GPU resources for all materials
    pub fn update_all_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
    ) {
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue, layout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_has_default() {
        let manager = MaterialManager::new();
        assert!(manager.contains(DEFAULT_MATERIAL));
        assert_eq!(manager.list_materials().len(), 1);
    }

    #[test]
    fn test_fallback_to_default() {
        let mut manager = MaterialManager::new();
        manager.add_material(Material::new("blue", [0.0, 0.0, 0.545, 1.0]));

        let blue = manager.get_material_for_object("blue").unwrap();
        assert_eq!(blue.name, "blue");
        let missing = manager.get_material_for_object("missing").unwrap();
        assert_eq!(missing.name, DEFAULT_MATERIAL);
    }

    #[test]
    fn test_uniform_packs_shininess() {
        let material = Material::new("m", [1.0, 0.0, 0.0, 1.0])
            .with_specular(0.2, 0.3, 0.4)
            .with_shininess(0.0);
        let uniform = material.uniform();

        assert_eq!(uniform.base_color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(uniform.specular, [0.2, 0.3, 0.4, 1.0]);
        assert!(material.get_bind_group().is_none());
    }

    #[test]
    fn test_uniform_size_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<MaterialUniform>() % 16, 0);
    }
}
