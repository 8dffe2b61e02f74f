use crate::coords::Vec3;
use crate::paint::Color;

/// Light reaching every point equally.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self { color, intensity }
    }

    /// Color scaled by intensity.
    pub fn radiance(&self) -> Color {
        self.color.scaled(self.intensity)
    }
}

/// Omnidirectional light with distance falloff.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

impl PointLight {
    pub fn new(color: Color, intensity: f32, position: Vec3) -> Self {
        Self { color, intensity, position }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}
