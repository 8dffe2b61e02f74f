//! clockcal engine crate.
//!
//! Owns the platform + GPU runtime pieces the clock view is built on: the
//! window loop, the wgpu device, input translation, frame pacing, a small
//! 3D scene model and the renderers that draw it.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
