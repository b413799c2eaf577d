use cgmath::Matrix3;

use crate::config::SphereTessellation;
use crate::error::{EditorError, SceneError};
use crate::gfx::{
    geometry::{generate_sphere, GeometryData},
    resources::material::MaterialId,
    scene::{MeshId, Object, Scene},
};

use super::field_grid::FieldGrid;

/// Name given to every sphere mesh the editor creates
pub const SPHERE_MESH_NAME: &str = "sphere";

/// Result of a successful [`MatrixEditor::apply_transform`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplyOutcome {
    /// Handle of the mesh now in the scene
    pub mesh: MeshId,
    /// Matrix that was applied
    pub matrix: Matrix3<f32>,
    pub vertex_count: usize,
}

/// Owns one sphere mesh in a scene and rebuilds it from a [`FieldGrid`]
///
/// The editor only keeps the handle of its mesh; the scene owns the data.
#[derive(Debug, Clone)]
pub struct MatrixEditor {
    target: MeshId,
    material_id: MaterialId,
    tessellation: SphereTessellation,
}

impl MatrixEditor {
    /// Adds an untransformed sphere to `scene` and returns an editor for it
    pub fn new(
        scene: &mut Scene,
        material_id: &str,
        tessellation: SphereTessellation,
    ) -> Result<Self, SceneError> {
        if !scene.material_manager.contains(material_id) {
            return Err(SceneError::UnknownMaterial(material_id.to_string()));
        }

        let geometry = sphere(&tessellation);
        let target = scene.add_mesh(Object::from_geometry(
            SPHERE_MESH_NAME,
            &geometry,
            material_id,
        ));
        log::info!(
            "Created {} with {} vertices",
            target,
            geometry.vertex_count()
        );

        Ok(Self {
            target,
            material_id: material_id.to_string(),
            tessellation,
        })
    }

    /// Handle of the mesh currently owned by the editor
    pub fn target(&self) -> MeshId {
        self.target
    }

    pub fn material_id(&self) -> &str {
        &self.material_id
    }

    pub fn tessellation(&self) -> &SphereTessellation {
        &self.tessellation
    }

    /// Replaces the target mesh with a fresh sphere transformed by the matrix
    /// in `grid`
    ///
    /// The sphere is regenerated every time, so applying the same grid twice
    /// gives the same result as applying it once. If any field fails to parse
    /// the scene is left untouched and the error names the field.
    pub fn apply_transform(
        &mut self,
        scene: &mut Scene,
        grid: &FieldGrid,
    ) -> Result<ApplyOutcome, EditorError> {
        let matrix = grid
            .parse_matrix()
            .inspect_err(|err| log::warn!("Matrix rejected: {err}"))?;

        if !scene.contains_mesh(self.target) {
            return Err(SceneError::UnknownMesh(self.target).into());
        }

        let mut geometry = sphere(&self.tessellation);
        geometry.apply_matrix3(&matrix);

        let object = Object::from_geometry(SPHERE_MESH_NAME, &geometry, &self.material_id);
        let vertex_count = object.vertex_count();
        let mesh = scene.replace_mesh(self.target, object)?;
        log::info!(
            "Applied matrix {:?} to {} vertices ({} -> {})",
            grid.entries(),
            vertex_count,
            self.target,
            mesh
        );
        self.target = mesh;

        Ok(ApplyOutcome {
            mesh,
            matrix,
            vertex_count,
        })
    }
}

fn sphere(tessellation: &SphereTessellation) -> GeometryData {
    generate_sphere(
        tessellation.radius,
        tessellation.longitude_segments,
        tessellation.latitude_segments,
    )
}
