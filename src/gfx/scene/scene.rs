use wgpu::Device;

use crate::error::SceneError;
use crate::gfx::{
    camera::camera_utils::CameraManager,
    resources::material::{Material, MaterialManager},
};

use super::{
    light::Lighting,
    object::{LineObject, Object},
    MeshId,
};

/// Main scene containing meshes, helpers, materials, lights and camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub material_manager: MaterialManager, // Centralized material storage
    pub lighting: Lighting,
    meshes: Vec<(MeshId, Object)>,
    helpers: Vec<LineObject>,
    next_id: u64,
}

impl Scene {
    /// Creates an empty scene with the given camera and lights
    pub fn new(camera_manager: CameraManager, lighting: Lighting) -> Self {
        Self {
            camera_manager,
            material_manager: MaterialManager::new(), // Initialize with default material
            lighting,
            meshes: Vec::new(),
            helpers: Vec::new(),
            next_id: 0,
        }
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    fn allocate_id(&mut self) -> MeshId {
        let id = MeshId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Adds a mesh and returns its handle
    pub fn add_mesh(&mut self, object: Object) -> MeshId {
        let id = self.allocate_id();
        log::debug!("Added {} '{}'", id, object.name);
        self.meshes.push((id, object));
        id
    }

    /// Swaps the mesh behind `id` for `object`, keeping its position in the
    /// draw order
    ///
    /// The old mesh's GPU buffers are released and `id` stops resolving; the
    /// returned handle addresses the new mesh.
    pub fn replace_mesh(&mut self, id: MeshId, object: Object) -> Result<MeshId, SceneError> {
        let index = self.index_of(id).ok_or(SceneError::UnknownMesh(id))?;
        let new_id = self.allocate_id();

        let (_, mut old) = std::mem::replace(&mut self.meshes[index], (new_id, object));
        old.release_gpu_resources();
        log::debug!("Replaced {} with {}", id, new_id);
        Ok(new_id)
    }

    /// Removes a mesh from the scene, releasing its GPU buffers
    pub fn remove_mesh(&mut self, id: MeshId) -> Result<Object, SceneError> {
        let index = self.index_of(id).ok_or(SceneError::UnknownMesh(id))?;
        let (_, mut object) = self.meshes.remove(index);
        object.release_gpu_resources();
        Ok(object)
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Object> {
        self.meshes
            .iter()
            .find(|(mesh_id, _)| *mesh_id == id)
            .map(|(_, object)| object)
    }

    pub fn contains_mesh(&self, id: MeshId) -> bool {
        self.index_of(id).is_some()
    }

    /// Gets the total number of meshes
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Mesh handles in draw order
    pub fn mesh_ids(&self) -> impl Iterator<Item = MeshId> + '_ {
        self.meshes.iter().map(|(id, _)| *id)
    }

    pub fn meshes(&self) -> impl Iterator<Item = &Object> {
        self.meshes.iter().map(|(_, object)| object)
    }

    fn index_of(&self, id: MeshId) -> Option<usize> {
        self.meshes.iter().position(|(mesh_id, _)| *mesh_id == id)
    }

    /// Adds a helper such as the axes
    pub fn add_helper(&mut self, helper: LineObject) {
        self.helpers.push(helper);
    }

    pub fn helpers(&self) -> &[LineObject] {
        &self.helpers
    }

    /// Adds a material to the material manager
    ///
    /// # Returns
    /// Mutable reference to the stored material
    pub fn add_material(&mut self, material: Material) -> &mut Material {
        self.material_manager.add_material(material)
    }

    /// Gets material for rendering an object
    ///
    /// Returns the material assigned to the object, or the default material
    /// if the assigned material doesn't exist.
    pub fn get_material_for_object(&self, object: &Object) -> Option<&Material> {
        self.material_manager
            .get_material_for_object(object.material_id())
    }

    /// Creates GPU resources for everything that lacks them and uploads
    /// material properties
    ///
    /// Called once per frame before rendering.
    pub fn sync_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        material_layout: &wgpu::BindGroupLayout,
    ) {
        for (_, object) in self.meshes.iter_mut() {
            object.init_gpu_resources(device);
        }
        for helper in self.helpers.iter_mut() {
            helper.init_gpu_resources(device);
        }
        self.material_manager
            .update_all_gpu_resources(device, queue, material_layout);
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        SceneStatistics {
            mesh_count: self.meshes.len(),
            material_count: self.material_manager.list_materials().len(),
            total_triangles: self.meshes().map(Object::triangle_count).sum(),
            total_vertices: self.meshes().map(Object::vertex_count).sum(),
        }
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub mesh_count: usize,
    pub material_count: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use crate::gfx::camera::{CameraController, OrbitCamera};
    use crate::gfx::geometry::{generate_axes, generate_sphere};

    fn empty_scene() -> Scene {
        let config = CameraConfig::default();
        let camera = CameraManager::new(
            OrbitCamera::from_config(&config, 1.5),
            CameraController::from_config(&config),
        );
        Scene::new(camera, Lighting::default())
    }

    fn sphere(name: &str, segments: u32) -> Object {
        Object::from_geometry(name, &generate_sphere(1.0, segments, segments), "default")
    }

    #[test]
    fn test_add_and_lookup() {
        let mut scene = empty_scene();
        let a = scene.add_mesh(sphere("a", 4));
        let b = scene.add_mesh(sphere("b", 8));

        assert_ne!(a, b);
        assert_eq!(scene.mesh_count(), 2);
        assert_eq!(scene.mesh(a).map(|m| m.name.as_str()), Some("a"));
        assert_eq!(scene.mesh(b).map(|m| m.name.as_str()), Some("b"));
    }

    #[test]
    fn test_replace_keeps_slot_and_retires_handle() {
        let mut scene = empty_scene();
        let first = scene.add_mesh(sphere("first", 4));
        let second = scene.add_mesh(sphere("second", 4));

        let replacement = scene.replace_mesh(first, sphere("replacement", 6)).unwrap();

        assert!(scene.mesh(first).is_none());
        assert_ne!(replacement, first);
        assert_eq!(scene.mesh_count(), 2);
        assert_eq!(
            scene.mesh_ids().collect::<Vec<_>>(),
            vec![replacement, second]
        );
        assert_eq!(scene.mesh(replacement).unwrap().name, "replacement");
    }

    #[test]
    fn test_unknown_handle_is_an_error() {
        let mut scene = empty_scene();
        let id = scene.add_mesh(sphere("a", 4));
        scene.remove_mesh(id).unwrap();

        assert_eq!(
            scene.replace_mesh(id, sphere("b", 4)).unwrap_err(),
            SceneError::UnknownMesh(id)
        );
        assert!(scene.remove_mesh(id).is_err());
        assert_eq!(scene.mesh_count(), 0);
    }

    #[test]
    fn test_handles_are_not_reused() {
        let mut scene = empty_scene();
        let a = scene.add_mesh(sphere("a", 4));
        scene.remove_mesh(a).unwrap();
        let b = scene.add_mesh(sphere("b", 4));
        assert_ne!(a, b);
    }

    #[test]
    fn test_materials_and_statistics() {
        let mut scene = empty_scene();
        scene
            .add_material(Material::new("blue", [0.0, 0.0, 0.545, 1.0]))
            .shininess = 12.0;
        let id = scene.add_mesh(Object::from_geometry(
            "sphere",
            &generate_sphere(1.0, 32, 16),
            "blue",
        ));
        scene.add_helper(LineObject::from_lines("axes", &generate_axes(10.0)));

        let object = scene.mesh(id).unwrap();
        let material = scene.get_material_for_object(object).unwrap();
        assert_eq!(material.shininess, 12.0);

        let stats = scene.get_statistics();
        assert_eq!(stats.mesh_count, 1);
        assert_eq!(stats.material_count, 2);
        assert_eq!(stats.total_vertices, 561);
        assert_eq!(stats.total_triangles, 1024);
        assert_eq!(scene.helpers().len(), 1);
    }
}
