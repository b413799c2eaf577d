//! Scene objects and their GPU buffers
//!
//! Objects keep their vertex data on the CPU and create GPU buffers lazily,
//! the first time the scene is synced with a device. Releasing an object
//! destroys its buffers immediately instead of waiting for the last handle to
//! drop.

use wgpu::{util::DeviceExt, Device};

use crate::gfx::{
    geometry::{GeometryData, LineGeometry},
    resources::material::MaterialId,
};

use super::vertex::{LineVertex, Vertex3D};

/// Vertex and optional index buffer uploaded for one object
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    element_count: u32,
}

impl GpuMesh {
    fn new<V: bytemuck::Pod>(
        device: &Device,
        label: &str,
        vertices: &[V],
        indices: Option<&[u32]>,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = indices.map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Index Buffer")),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let element_count = match indices {
            Some(indices) => indices.len() as u32,
            None => vertices.len() as u32,
        };

        Self {
            vertex_buffer,
            index_buffer,
            element_count,
        }
    }

    fn destroy(self) {
        self.vertex_buffer.destroy();
        if let Some(index_buffer) = self.index_buffer {
            index_buffer.destroy();
        }
    }
}

/// A lit triangle mesh: geometry plus a reference to a shared material
pub struct Object {
    pub name: String,
    pub visible: bool,
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    material_id: MaterialId,
    gpu: Option<GpuMesh>,
}

impl Object {
    /// Builds an object from generated geometry
    pub fn from_geometry(name: &str, geometry: &GeometryData, material_id: &str) -> Self {
        Self {
            name: name.to_owned(),
            visible: true,
            vertices: geometry.to_vertices(),
            indices: geometry.indices.clone(),
            material_id: material_id.to_owned(),
            gpu: None,
        }
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertex positions in buffer order
    pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn material_id(&self) -> &MaterialId {
        &self.material_id
    }

    pub fn is_uploaded(&self) -> bool {
        self.gpu.is_some()
    }

    /// Creates vertex and index buffers if they do not exist yet
    pub fn init_gpu_resources(&mut self, device: &Device) {
        if self.gpu.is_some() {
            return;
        }

        log::debug!(
            "Uploading '{}': {} vertices, {} triangles",
            self.name,
            self.vertices.len(),
            self.triangle_count()
        );
        self.gpu = Some(GpuMesh::new(
            device,
            &self.name,
            self.vertices.as_slice(),
            Some(self.indices.as_slice()),
        ));
    }

    /// Destroys the GPU buffers; CPU data stays available
    pub fn release_gpu_resources(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            log::debug!("Releasing GPU buffers of '{}'", self.name);
            gpu.destroy();
        }
    }

    pub(crate) fn gpu_mesh(&self) -> Option<&GpuMesh> {
        self.gpu.as_ref()
    }
}

/// Unlit coloured lines, used for helpers such as the axes
pub struct LineObject {
    pub name: String,
    pub visible: bool,
    vertices: Vec<LineVertex>,
    gpu: Option<GpuMesh>,
}

impl LineObject {
    pub fn from_lines(name: &str, lines: &LineGeometry) -> Self {
        Self {
            name: name.to_owned(),
            visible: true,
            vertices: lines.vertices.clone(),
            gpu: None,
        }
    }

    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    pub fn init_gpu_resources(&mut self, device: &Device) {
        if self.gpu.is_none() {
            self.gpu = Some(GpuMesh::new(device, &self.name, self.vertices.as_slice(), None));
        }
    }

    pub(crate) fn gpu_mesh(&self) -> Option<&GpuMesh> {
        self.gpu.as_ref()
    }
}

/// Draw helpers for uploaded meshes
pub trait DrawMesh {
    fn draw_gpu_mesh(&mut self, mesh: &GpuMesh);
}

impl DrawMesh for wgpu::RenderPass<'_> {
    fn draw_gpu_mesh(&mut self, mesh: &GpuMesh) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        match &mesh.index_buffer {
            Some(index_buffer) => {
                self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                self.draw_indexed(0..mesh.element_count, 0, 0..1);
            }
            None => self.draw(0..mesh.element_count, 0..1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{generate_axes, generate_sphere};

    #[test]
    fn test_object_from_geometry() {
        let sphere = generate_sphere(1.0, 32, 16);
        let object = Object::from_geometry("sphere", &sphere, "blue");

        assert_eq!(object.vertex_count(), 561);
        assert_eq!(object.triangle_count(), 1024);
        assert_eq!(object.material_id(), "blue");
        assert!(object.visible);
        assert!(!object.is_uploaded());
        assert_eq!(object.positions().next(), Some(sphere.vertices[0]));
    }

    #[test]
    fn test_release_without_upload_is_noop() {
        let mut object = Object::from_geometry("sphere", &generate_sphere(1.0, 4, 2), "m");
        object.release_gpu_resources();
        assert!(!object.is_uploaded());
        assert_eq!(object.vertex_count(), 15);
    }

    #[test]
    fn test_line_object() {
        let axes = LineObject::from_lines("axes", &generate_axes(2.0));
        assert_eq!(axes.vertices().len(), 6);
        assert!(axes.gpu_mesh().is_none());
    }
}
