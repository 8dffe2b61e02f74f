//! Color model shared between the scene and the renderers.

pub mod color;

pub use color::Color;
