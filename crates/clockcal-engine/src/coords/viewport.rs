/// Drawable size in logical pixels.
///
/// The text renderer converts overlay positions to NDC against this size; the
/// camera derives its aspect ratio from it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height, or `None` for a degenerate (minimized) viewport.
    #[inline]
    pub fn aspect(self) -> Option<f32> {
        self.is_valid().then(|| self.width / self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_of_full_hd() {
        assert_eq!(Viewport::new(1920.0, 1080.0).aspect(), Some(1920.0 / 1080.0));
    }

    #[test]
    fn zero_height_has_no_aspect() {
        assert_eq!(Viewport::new(800.0, 0.0).aspect(), None);
    }
}
