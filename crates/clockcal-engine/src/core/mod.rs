//! Core engine-facing contracts.
//!
//! The stable interface between the window runtime and the application: the
//! `App` hooks and the per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;

pub(crate) use ctx::logical_viewport;
