//! Messages exchanged between the logic and view tasks.
//!
//! One closed enum per direction. Messages are moved into a queue and never
//! touched again by the sender.

use chrono::{DateTime, Local};

/// Wall-clock time sampled by the logic task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub local: DateTime<Local>,
}

impl ClockReading {
    pub fn now() -> Self {
        Self { local: Local::now() }
    }
}

/// Logic → view.
#[derive(Debug, Clone, PartialEq)]
pub enum ToView {
    Tick(ClockReading),
    /// A message kind the view does not understand. Logged, never fatal.
    Unrecognized { tag: String },
}

/// View → logic.
#[derive(Debug, Clone, PartialEq)]
pub enum ToLogic {
    /// The camera distance changed after a scroll.
    CameraZoom { distance: f32 },
    /// A message kind the logic task does not understand. Fatal.
    Unrecognized { tag: String },
}
