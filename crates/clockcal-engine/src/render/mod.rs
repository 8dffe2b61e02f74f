//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers) and builds them
//! lazily on first use, rebuilding when the surface format changes.
//!
//! Conventions:
//! - world geometry goes through the camera's view-projection matrix
//! - overlay geometry is in logical pixels (top-left origin, +Y down) and is
//!   converted to NDC in the shader with a viewport uniform

mod common;
mod ctx;
mod lines;
mod text;

pub use ctx::{RenderCtx, RenderTarget};
pub use lines::LineRenderer;
pub use text::TextRenderer;
