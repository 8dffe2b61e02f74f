//! Coordinate and geometry types shared by the scene and the renderers.
//!
//! Two spaces are in use:
//! - overlay space: logical pixels, origin top-left, +X right, +Y down
//!   (`Vec2`, `Viewport`)
//! - world space: right-handed, +Y up, camera looks down -Z by default
//!   (`Vec3`, `Mat4`)
//!
//! `Mat4` produces clip space with wgpu's 0..1 depth range.

mod mat4;
mod vec2;
mod vec3;
mod viewport;

pub use mat4::Mat4;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use viewport::Viewport;
