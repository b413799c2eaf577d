//! Scene lights: one ambient term and one point light

use crate::config::LightingConfig;

/// Uniform light applied to every surface regardless of orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: [f32; 3], intensity: f32) -> Self {
        Self { color, intensity }
    }

    /// Colour premultiplied by intensity, as the shader consumes it
    pub fn radiance(&self) -> [f32; 3] {
        scale(self.color, self.intensity)
    }
}

/// Omnidirectional light with distance attenuation
///
/// Attenuation is `1 / (1 + linear * d + quadratic * d^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: [f32; 3],
    pub linear_decay: f32,
    pub quadratic_decay: f32,
}

impl PointLight {
    pub fn new(color: [f32; 3], intensity: f32) -> Self {
        Self {
            color,
            intensity,
            position: [0.0, 0.0, 0.0],
            linear_decay: 1.0,
            quadratic_decay: 1.0,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = [x, y, z];
        self
    }

    pub fn with_decay(mut self, linear: f32, quadratic: f32) -> Self {
        self.linear_decay = linear.max(0.0);
        self.quadratic_decay = quadratic.max(0.0);
        self
    }

    pub fn radiance(&self) -> [f32; 3] {
        scale(self.color, self.intensity)
    }

    pub fn attenuation(&self, distance: f32) -> f32 {
        1.0 / (1.0 + self.linear_decay * distance + self.quadratic_decay * distance * distance)
    }
}

/// All lights of a scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub point: PointLight,
}

impl From<&LightingConfig> for Lighting {
    fn from(config: &LightingConfig) -> Self {
        let [x, y, z] = config.point_position;
        Self {
            ambient: AmbientLight::new(config.ambient_color, config.ambient_intensity),
            point: PointLight::new(config.point_color, config.point_intensity)
                .with_position(x, y, z)
                .with_decay(config.linear_decay, config.quadratic_decay),
        }
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::from(&LightingConfig::default())
    }
}

fn scale(color: [f32; 3], intensity: f32) -> [f32; 3] {
    [color[0] * intensity, color[1] * intensity, color[2] * intensity]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lighting_from_config() {
        let lighting = Lighting::default();
        assert_eq!(lighting.ambient.radiance(), [0.8, 0.8, 0.8]);
        assert_eq!(lighting.point.radiance(), [5.0, 5.0, 5.0]);
        assert_eq!(lighting.point.position, [1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_attenuation() {
        let light = PointLight::new([1.0; 3], 1.0).with_decay(1.0, 1.0);
        assert_eq!(light.attenuation(0.0), 1.0);
        assert_eq!(light.attenuation(1.0), 1.0 / 3.0);
        assert!(light.with_decay(-1.0, -1.0).attenuation(10.0) == 1.0);
    }
}
