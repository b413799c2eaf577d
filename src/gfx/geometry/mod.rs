//! # Procedural Geometry
//!
//! CPU-side geometry used by the scene: the UV sphere the matrix editor
//! regenerates on every apply, and the line segments of the axes helper.
//!
//! Geometry is plain data. Nothing here touches the GPU, so every vertex
//! operation can be exercised in tests.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{Matrix3, SquareMatrix, Vector3};
//! use matrix_sphere::gfx::geometry::generate_sphere;
//!
//! let mut sphere = generate_sphere(1.0, 32, 16);
//! sphere.apply_matrix3(&Matrix3::from_diagonal(Vector3::new(2.0, 1.0, 1.0)));
//! assert_eq!(sphere.vertex_count(), 561);
//! ```

pub mod primitives;

pub use primitives::*;

use cgmath::{InnerSpace, Matrix, Matrix3, SquareMatrix, Vector3};

use crate::gfx::scene::vertex::{LineVertex, Vertex3D};

/// Squared length below which a normal is treated as degenerate
const DEGENERATE_NORMAL_EPSILON: f32 = 1e-12;

/// Triangle geometry ready for GPU upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z), one per vertex
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Runs `op` on every vertex position in place
    ///
    /// Each vertex is visited exactly once; the visiting order carries no
    /// meaning.
    pub fn operate_on_vertices<F>(&mut self, op: F)
    where
        F: FnMut(&mut [f32; 3]),
    {
        self.vertices.iter_mut().for_each(op);
    }

    /// Applies `matrix` as a linear map to every vertex (`v' = M * v`)
    ///
    /// Normals follow the inverse-transpose of `matrix`. A singular matrix has
    /// no inverse, so normals are then rebuilt from the transformed faces.
    pub fn apply_matrix3(&mut self, matrix: &Matrix3<f32>) {
        let m = *matrix;
        self.operate_on_vertices(|position| {
            *position = (m * Vector3::from(*position)).into();
        });

        match m.invert() {
            Some(inverse) => {
                let normal_matrix = inverse.transpose();
                for normal in self.normals.iter_mut() {
                    let transformed = normal_matrix * Vector3::from(*normal);
                    if transformed.magnitude2() > DEGENERATE_NORMAL_EPSILON {
                        *normal = transformed.normalize().into();
                    }
                }
            }
            None => self.recompute_normals(),
        }
    }

    /// Rebuilds normals by averaging area-weighted face normals
    ///
    /// Vertices whose adjacent faces all collapsed keep their previous normal.
    pub fn recompute_normals(&mut self) {
        let mut accumulated = vec![Vector3::new(0.0f32, 0.0, 0.0); self.vertices.len()];

        for triangle in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            ];
            let v0 = Vector3::from(self.vertices[i0]);
            let v1 = Vector3::from(self.vertices[i1]);
            let v2 = Vector3::from(self.vertices[i2]);

            let face_normal = (v1 - v0).cross(v2 - v0);
            for index in [i0, i1, i2] {
                accumulated[index] += face_normal;
            }
        }

        self.normals.resize(self.vertices.len(), [0.0, 1.0, 0.0]);
        for (normal, sum) in self.normals.iter_mut().zip(accumulated) {
            if sum.magnitude2() > DEGENERATE_NORMAL_EPSILON {
                *normal = sum.normalize().into();
            }
        }
    }

    /// Interleaves positions and normals into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}

/// Coloured line-list geometry (two vertices per segment)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineGeometry {
    pub vertices: Vec<LineVertex>,
}

impl LineGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_segment(&mut self, from: [f32; 3], to: [f32; 3], color: [f32; 3]) {
        self.vertices.push(LineVertex {
            position: from,
            color,
        });
        self.vertices.push(LineVertex {
            position: to,
            color,
        });
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Zero;
    use rand::Rng;

    fn length(v: [f32; 3]) -> f32 {
        Vector3::from(v).magnitude()
    }

    #[test]
    fn test_operate_on_vertices_visits_every_vertex() {
        let mut sphere = generate_sphere(1.0, 8, 4);
        let mut visited = 0;
        sphere.operate_on_vertices(|v| {
            visited += 1;
            v[1] = 0.0;
        });

        assert_eq!(visited, sphere.vertex_count());
        assert!(sphere.vertices.iter().all(|v| v[1] == 0.0));
    }

    #[test]
    fn test_identity_keeps_geometry() {
        let reference = generate_sphere(1.0, 32, 16);
        let mut sphere = reference.clone();
        sphere.apply_matrix3(&Matrix3::identity());

        for (a, b) in sphere.vertices.iter().zip(&reference.vertices) {
            for k in 0..3 {
                assert_relative_eq!(a[k], b[k], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_uniform_scale_doubles_distance() {
        let reference = generate_sphere(1.0, 32, 16);
        let mut sphere = reference.clone();
        sphere.apply_matrix3(&Matrix3::from_diagonal(Vector3::new(2.0, 2.0, 2.0)));

        for (a, b) in sphere.vertices.iter().zip(&reference.vertices) {
            assert_relative_eq!(length(*a), 2.0 * length(*b), epsilon = 1e-5);
        }
        for normal in &sphere.normals {
            assert_relative_eq!(length(*normal), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_matrix_vector_product_is_row_by_column() {
        let mut data = GeometryData {
            vertices: vec![[1.0, 2.0, 3.0]],
            normals: vec![[0.0, 1.0, 0.0]],
            indices: vec![],
        };
        // Rows (1 2 3), (0 1 0), (0 0 2)
        let m = Matrix3::new(1.0, 0.0, 0.0, 2.0, 1.0, 0.0, 3.0, 0.0, 2.0);
        data.apply_matrix3(&m);

        assert_eq!(data.vertices[0], [14.0, 2.0, 6.0]);
    }

    #[test]
    fn test_zero_matrix_collapses_and_keeps_normals() {
        let reference = generate_sphere(1.0, 32, 16);
        let mut sphere = reference.clone();
        sphere.apply_matrix3(&Matrix3::zero());

        assert!(sphere.vertices.iter().all(|v| *v == [0.0, 0.0, 0.0]));
        assert_eq!(sphere.normals, reference.normals);
    }

    #[test]
    fn test_singular_projection_rebuilds_normals() {
        // Flatten onto the XZ plane; surviving faces point along +-Y
        let mut sphere = generate_sphere(1.0, 16, 8);
        sphere.apply_matrix3(&Matrix3::from_diagonal(Vector3::new(1.0, 0.0, 1.0)));

        assert!(sphere.vertices.iter().all(|v| v[1] == 0.0));
        for normal in &sphere.normals {
            assert_relative_eq!(length(*normal), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_random_matrices_are_linear() {
        let mut rng = rand::rng();
        let reference = generate_sphere(1.0, 12, 6);

        for _ in 0..16 {
            let values: Vec<f32> = (0..9).map(|_| rng.random_range(-4.0..4.0)).collect();
            let m = Matrix3::new(
                values[0], values[1], values[2], values[3], values[4], values[5], values[6],
                values[7], values[8],
            );

            let mut sphere = reference.clone();
            sphere.apply_matrix3(&m);

            for (out, input) in sphere.vertices.iter().zip(&reference.vertices) {
                let expected = m * Vector3::from(*input);
                assert_relative_eq!(out[0], expected.x, epsilon = 1e-5);
                assert_relative_eq!(out[1], expected.y, epsilon = 1e-5);
                assert_relative_eq!(out[2], expected.z, epsilon = 1e-5);
            }
            assert_eq!(sphere.normals.len(), sphere.vertices.len());
        }
    }

    #[test]
    fn test_to_vertices_interleaves() {
        let sphere = generate_sphere(1.0, 4, 2);
        let vertices = sphere.to_vertices();

        assert_eq!(vertices.len(), sphere.vertex_count());
        assert_eq!(vertices[3].position, sphere.vertices[3]);
        assert_eq!(vertices[3].normal, sphere.normals[3]);
    }
}
