use crate::coords::Viewport;
use crate::input::InputEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Every hook runs on the thread that owns the event loop.
pub trait App {
    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called after the window was resized, with the new logical size.
    fn on_resize(&mut self, viewport: Viewport) {
        let _ = viewport;
    }

    /// Called for every translated input event, before the next frame.
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Polled at `RuntimeConfig::idle_poll` even when no frame is drawn
    /// (minimized or occluded window).
    fn on_idle(&mut self) -> AppControl {
        AppControl::Continue
    }
}
