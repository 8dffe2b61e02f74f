//! clockcal: a 3D desktop clock/calendar.
//!
//! Two tasks share two bounded queues and one shutdown signal:
//! - the logic task (`supervisor`) watches queue health, publishes the time
//!   and consumes view messages
//! - the view task (`view`) owns the window and renders the scene
//!
//! Queue saturation, an unknown message on the logic side and the view
//! exiting all shut the whole process down.

pub mod bus;
pub mod config;
pub mod message;
pub mod shutdown;
pub mod supervisor;
pub mod view;
