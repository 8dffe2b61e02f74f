use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// The window surface together with its current configuration.
///
/// A minimized window reports a 0×0 size, which cannot be configured; the
/// size is remembered and the surface is reconfigured once it grows again.
pub(crate) struct WindowSurface<'w> {
    surface: wgpu::Surface<'w>,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
}

impl<'w> WindowSurface<'w> {
    pub(crate) fn new(
        surface: wgpu::Surface<'w>,
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        size: PhysicalSize<u32>,
        present_mode: wgpu::PresentMode,
    ) -> Result<Self> {
        let caps = surface.get_capabilities(adapter);
        let format = pick_format(&caps.formats).context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode: pick_alpha_mode(&caps.alpha_modes),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        log::debug!("surface {format:?} {present_mode:?} {}x{}", size.width, size.height);

        let mut this = Self { surface, config, size };
        this.configure(device);
        Ok(this)
    }

    pub(crate) fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub(crate) fn acquire(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    pub(crate) fn resize(&mut self, device: &wgpu::Device, size: PhysicalSize<u32>) {
        self.size = size;
        self.config.width = size.width;
        self.config.height = size.height;
        self.configure(device);
    }

    /// Decides how to continue after a failed acquire.
    pub(crate) fn recover(
        &mut self,
        device: &wgpu::Device,
        err: wgpu::SurfaceError,
    ) -> SurfaceErrorAction {
        let action = action_for(&err);
        if action == SurfaceErrorAction::Reconfigured {
            self.configure(device);
        }
        action
    }

    fn configure(&mut self, device: &wgpu::Device) {
        if self.size.width > 0 && self.size.height > 0 {
            self.surface.configure(device, &self.config);
        }
    }
}

/// sRGB variant if the surface offers one, otherwise its preferred format.
fn pick_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| formats.first().copied())
}

fn pick_alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    if modes.contains(&wgpu::CompositeAlphaMode::Opaque) {
        wgpu::CompositeAlphaMode::Opaque
    } else {
        modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}

fn action_for(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat as F;

    #[test]
    fn srgb_format_is_preferred() {
        assert_eq!(pick_format(&[F::Bgra8Unorm, F::Bgra8UnormSrgb]), Some(F::Bgra8UnormSrgb));
        assert_eq!(pick_format(&[F::Rgba16Float]), Some(F::Rgba16Float));
        assert_eq!(pick_format(&[]), None);
    }

    #[test]
    fn opaque_alpha_when_available() {
        use wgpu::CompositeAlphaMode as A;
        assert_eq!(pick_alpha_mode(&[A::PreMultiplied, A::Opaque]), A::Opaque);
        assert_eq!(pick_alpha_mode(&[A::Inherit]), A::Inherit);
        assert_eq!(pick_alpha_mode(&[]), A::Auto);
    }

    #[test]
    fn only_out_of_memory_is_fatal() {
        assert_eq!(action_for(&wgpu::SurfaceError::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(action_for(&wgpu::SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(action_for(&wgpu::SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
    }
}
