//! Application configuration, built in code.

use std::time::Duration;

use clockcal_engine::device::GpuInit;
use clockcal_engine::window::RuntimeConfig;

/// Scroll zoom limits for the camera distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomConfig {
    pub initial: f32,
    /// Multiplier per scroll step away from the user, divisor towards.
    pub factor: f32,
    pub min: f32,
    pub max: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            initial: 100.0,
            factor: 1.5,
            min: 10.0,
            max: 1000.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Capacity of both the logic→view and view→logic queues.
    pub queue_capacity: usize,
    /// Period of the supervisor's health check; the first check runs one
    /// period after start.
    pub health_interval: Duration,
    pub target_fps: u32,
    /// Minimum time between two FPS readout refreshes.
    pub fps_interval: Duration,
    pub window: RuntimeConfig,
    pub gpu: GpuInit,
    pub zoom: ZoomConfig,
    /// Camera far plane; must exceed `zoom.max`.
    pub far_plane: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 10,
            health_interval: Duration::from_secs(1),
            target_fps: 60,
            fps_interval: Duration::from_millis(60),
            window: RuntimeConfig::default(),
            gpu: GpuInit::default(),
            zoom: ZoomConfig::default(),
            far_plane: 1400.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_the_camera_inside_the_far_plane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.queue_capacity, 10);
        assert!(cfg.zoom.max < cfg.far_plane);
        assert!(cfg.zoom.min <= cfg.zoom.initial && cfg.zoom.initial <= cfg.zoom.max);
    }
}
