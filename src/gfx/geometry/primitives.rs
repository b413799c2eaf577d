//! # Primitive Shape Generation
//!
//! The UV sphere the editor transforms, and the axes helper drawn next to it.

use super::{GeometryData, LineGeometry};
use std::f32::consts::PI;

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments (longitude lines), at least 3
/// * `latitude_segments` - Number of horizontal segments (latitude lines), at least 2
///
/// Returns a Y-up sphere centered at the origin with
/// `(longitude + 1) * (latitude + 1)` vertices. The seam column and the pole
/// rows are duplicated so every ring is a closed strip.
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    let ring = (long_segs + 1) as usize;
    data.vertices.reserve(ring * (lat_segs + 1) as usize);
    data.normals.reserve(ring * (lat_segs + 1) as usize);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            data.vertices
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            data.normals.push(normal);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, second, first + 1]);
            data.indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    data
}

/// Generate the three axis lines from the origin
///
/// X is red, Y is green, Z is blue.
pub fn generate_axes(length: f32) -> LineGeometry {
    let mut lines = LineGeometry::new();
    let origin = [0.0, 0.0, 0.0];

    lines.push_segment(origin, [length, 0.0, 0.0], [1.0, 0.0, 0.0]);
    lines.push_segment(origin, [0.0, length, 0.0], [0.0, 1.0, 0.0]);
    lines.push_segment(origin, [0.0, 0.0, length], [0.0, 0.0, 1.0]);

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(1.0, 32, 16);
        assert_eq!(sphere.vertex_count(), 33 * 17);
        assert_eq!(sphere.triangle_count(), 32 * 16 * 2);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert!(sphere
            .indices
            .iter()
            .all(|&i| (i as usize) < sphere.vertex_count()));
    }

    #[test]
    fn test_sphere_is_unit() {
        let sphere = generate_sphere(1.0, 32, 16);
        for v in &sphere.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert_relative_eq!(r, 1.0, epsilon = 1e-5);
        }
        assert_relative_eq!(sphere.vertices[0][1], 1.0);
        assert_relative_eq!(sphere.vertices.last().unwrap()[1], -1.0);
    }

    #[test]
    fn test_sphere_radius_and_clamping() {
        let sphere = generate_sphere(2.5, 1, 1);
        assert_eq!(sphere.vertex_count(), 4 * 3);
        for (v, n) in sphere.vertices.iter().zip(&sphere.normals) {
            assert_relative_eq!(v[0], n[0] * 2.5, epsilon = 1e-6);
            assert_relative_eq!(v[1], n[1] * 2.5, epsilon = 1e-6);
            assert_relative_eq!(v[2], n[2] * 2.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_sphere_is_deterministic() {
        assert_eq!(generate_sphere(1.0, 32, 16), generate_sphere(1.0, 32, 16));
    }

    #[test]
    fn test_axes_generation() {
        let axes = generate_axes(10.0);
        assert_eq!(axes.segment_count(), 3);
        assert_eq!(axes.vertices[1].position, [10.0, 0.0, 0.0]);
        assert_eq!(axes.vertices[3].color, [0.0, 1.0, 0.0]);
        assert_eq!(axes.vertices[5].position, [0.0, 0.0, 10.0]);
    }
}
