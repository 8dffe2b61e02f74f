//! Debug geometry helpers.

use crate::coords::Vec3;
use crate::paint::Color;

use super::LineSet;

/// Axes gizmo: X red, Y green, Z blue, each `size` long from the origin.
pub fn axes(size: f32) -> LineSet {
    let mut set = LineSet::new();
    set.push(Vec3::zero(), Vec3::X * size, Color::RED);
    set.push(Vec3::zero(), Vec3::Y * size, Color::GREEN);
    set.push(Vec3::zero(), Vec3::Z * size, Color::BLUE);
    set
}
