use crate::coords::Vec3;
use crate::paint::Color;

/// A colored world-space line segment.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineSegment {
    pub a: Vec3,
    pub b: Vec3,
    pub color: Color,
}

/// A group of segments added to the scene as one node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSet {
    pub segments: Vec<LineSegment>,
}

impl LineSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, a: Vec3, b: Vec3, color: Color) {
        self.segments.push(LineSegment { a, b, color });
    }
}
