//! Application configuration
//!
//! [`AppConfig`] gathers every tunable the application uses at startup. The
//! defaults describe a dark blue unit sphere lit by a white ambient and a
//! white point light, seen from `(0, 0, 3)` over a grey background.

use cgmath::Vector3;

/// Opaque white
pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
/// Default sphere colour
pub const DARK_BLUE: [f32; 3] = [0.0, 0.0, 0.545];
/// Background clear colour
pub const GRAY: [f32; 3] = [0.5, 0.5, 0.5];

/// Segment counts of the generated sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereTessellation {
    pub radius: f32,
    pub longitude_segments: u32,
    pub latitude_segments: u32,
}

impl SphereTessellation {
    /// Number of vertices a sphere with this tessellation has
    pub fn vertex_count(&self) -> usize {
        ((self.longitude_segments.max(3) + 1) * (self.latitude_segments.max(2) + 1)) as usize
    }
}

impl Default for SphereTessellation {
    fn default() -> Self {
        Self {
            radius: 1.0,
            longitude_segments: 32,
            latitude_segments: 16,
        }
    }
}

/// Window creation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Matrix Sphere".to_string(),
            width: 1200,
            height: 800,
        }
    }
}

/// Perspective camera and orbit control parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub target: Vector3<f32>,
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    /// Vertical field of view in degrees
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target: Vector3::new(0.0, 0.0, 0.0),
            distance: 3.0,
            pitch: 0.0,
            yaw: 0.0,
            fovy_degrees: 60.0,
            znear: 0.3,
            zfar: 1000.0,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            pan_speed: 0.01,
        }
    }
}

/// Ambient and point light parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingConfig {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub point_color: [f32; 3],
    pub point_intensity: f32,
    pub point_position: [f32; 3],
    pub linear_decay: f32,
    pub quadratic_decay: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: WHITE,
            ambient_intensity: 0.8,
            point_color: WHITE,
            point_intensity: 5.0,
            point_position: [1.0, 0.0, 2.0],
            linear_decay: 1.0,
            quadratic_decay: 1.0,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub sphere: SphereTessellation,
    pub sphere_color: [f32; 3],
    pub clear_color: [f32; 3],
    /// Length of the axes helper; `None` disables it
    pub axes_length: Option<f32>,
    pub vsync: bool,
    pub font_size: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            sphere: SphereTessellation::default(),
            sphere_color: DARK_BLUE,
            clear_color: GRAY,
            axes_length: Some(10.0),
            vsync: true,
            font_size: 16.0,
        }
    }
}

impl AppConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.window.title = title.to_owned();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width.max(1);
        self.window.height = height.max(1);
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_lighting(mut self, lighting: LightingConfig) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn with_sphere(mut self, sphere: SphereTessellation) -> Self {
        self.sphere = sphere;
        self
    }

    pub fn with_sphere_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.sphere_color = [r, g, b];
        self
    }

    pub fn with_clear_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.clear_color = [r, g, b];
        self
    }

    pub fn with_axes(mut self, length: Option<f32>) -> Self {
        self.axes_length = length.filter(|l| *l > 0.0);
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size.max(6.0);
        self
    }

    /// Initial aspect ratio derived from the window size
    pub fn aspect(&self) -> f32 {
        self.window.width as f32 / self.window.height.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_scene() {
        let config = AppConfig::default();
        assert_eq!(config.sphere.longitude_segments, 32);
        assert_eq!(config.sphere.latitude_segments, 16);
        assert_eq!(config.sphere.radius, 1.0);
        assert_eq!(config.camera.distance, 3.0);
        assert_eq!(config.lighting.ambient_intensity, 0.8);
        assert_eq!(config.lighting.point_intensity, 5.0);
        assert_eq!(config.lighting.point_position, [1.0, 0.0, 2.0]);
        assert_eq!(config.clear_color, GRAY);
        assert_eq!(config.sphere_color, DARK_BLUE);
        assert_eq!(config.axes_length, Some(10.0));
    }

    #[test]
    fn test_sphere_vertex_count() {
        assert_eq!(SphereTessellation::default().vertex_count(), 561);
    }

    #[test]
    fn test_builders() {
        let config = AppConfig::default()
            .with_title("test")
            .with_window_size(0, 300)
            .with_axes(Some(-1.0))
            .with_font_size(2.0);

        assert_eq!(config.window.title, "test");
        assert_eq!(config.window.width, 1);
        assert_eq!(config.window.height, 300);
        assert_eq!(config.axes_length, None);
        assert_eq!(config.font_size, 6.0);
    }

    #[test]
    fn test_scene_builders() {
        let camera = CameraConfig {
            distance: 5.0,
            fovy_degrees: 45.0,
            ..CameraConfig::default()
        };
        let lighting = LightingConfig {
            point_intensity: 2.0,
            ..LightingConfig::default()
        };
        let sphere = SphereTessellation {
            radius: 2.0,
            longitude_segments: 8,
            latitude_segments: 4,
        };

        let config = AppConfig::default()
            .with_camera(camera)
            .with_lighting(lighting)
            .with_sphere(sphere)
            .with_sphere_color(1.0, 0.0, 0.0)
            .with_clear_color(0.1, 0.2, 0.3)
            .with_vsync(false);

        assert_eq!(config.camera, camera);
        assert_eq!(config.lighting, lighting);
        assert_eq!(config.sphere, sphere);
        assert_eq!(config.sphere.vertex_count(), 45);
        assert_eq!(config.sphere_color, [1.0, 0.0, 0.0]);
        assert_eq!(config.clear_color, [0.1, 0.2, 0.3]);
        assert!(!config.vsync);
    }

    #[test]
    fn test_aspect() {
        let config = AppConfig::default().with_window_size(800, 400);
        assert_eq!(config.aspect(), 2.0);
    }
}
