//! wgpu device and window surface.
//!
//! [`Gpu`] is created once per window and hands out one [`GpuFrame`] per
//! redraw; [`GpuInit`] carries the two settings the application can choose.

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
