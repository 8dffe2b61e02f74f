//! Font loading and measurement for overlay labels.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
