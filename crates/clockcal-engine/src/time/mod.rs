//! Time subsystem.
//!
//! Provides testable frame timing utilities without coupling to the runtime:
//! - one `FrameClock` per window; `tick()` once per presented frame
//! - one `FrameRater` per render loop; `start()` / `wait()` around the frame
//!   body to pace to a target rate, `fps()` for a periodic readout

mod frame_clock;
mod frame_rater;

pub use frame_clock::{FrameClock, FrameTime};
pub use frame_rater::FrameRater;
