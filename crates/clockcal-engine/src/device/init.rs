/// GPU settings chosen by the application.
///
/// The overlay is drawn in sRGB and the window is opaque; neither is
/// configurable.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct GpuInit {
    /// Sync presentation to the display. Off by default: the render loop
    /// paces itself and reports the unpaced (potential) frame rate.
    pub vsync: bool,
    /// Prefer an integrated adapter over a discrete one.
    pub low_power: bool,
}

impl GpuInit {
    pub(crate) fn present_mode(self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }

    pub(crate) fn power_preference(self) -> wgpu::PowerPreference {
        if self.low_power {
            wgpu::PowerPreference::LowPower
        } else {
            wgpu::PowerPreference::HighPerformance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vsync_selects_a_synced_present_mode() {
        let init = GpuInit { vsync: true, ..GpuInit::default() };
        assert_eq!(init.present_mode(), wgpu::PresentMode::AutoVsync);
        assert_eq!(GpuInit::default().present_mode(), wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn low_power_selects_the_integrated_adapter() {
        let init = GpuInit { low_power: true, ..GpuInit::default() };
        assert_eq!(init.power_preference(), wgpu::PowerPreference::LowPower);
    }
}
