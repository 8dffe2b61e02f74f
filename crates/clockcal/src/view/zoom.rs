use crate::config::ZoomConfig;

/// Camera distance driven by the scroll wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollZoom {
    distance: f32,
    limits: ZoomConfig,
}

impl ScrollZoom {
    pub fn new(limits: ZoomConfig) -> Self {
        Self {
            distance: limits.initial.clamp(limits.min, limits.max),
            limits,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Applies one scroll delta. Positive moves away (×factor, capped at
    /// `max`), negative moves closer (÷factor, floored at `min`); only the
    /// sign matters.
    ///
    /// Returns the new distance when it changed.
    pub fn scroll(&mut self, delta: f32) -> Option<f32> {
        let next = if delta > 0.0 {
            (self.distance * self.limits.factor).min(self.limits.max)
        } else if delta < 0.0 {
            (self.distance / self.limits.factor).max(self.limits.min)
        } else {
            return None;
        };

        if next == self.distance {
            return None;
        }
        self.distance = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zoom() -> ScrollZoom {
        ScrollZoom::new(ZoomConfig::default())
    }

    #[test]
    fn starts_at_one_hundred() {
        assert_eq!(zoom().distance(), 100.0);
    }

    #[test]
    fn scroll_out_multiplies_until_the_cap() {
        let mut z = zoom();
        assert_eq!(z.scroll(1.0), Some(150.0));
        assert_eq!(z.scroll(3.0), Some(225.0));
        for _ in 0..10 {
            z.scroll(1.0);
        }
        assert_eq!(z.distance(), 1000.0);
        assert_eq!(z.scroll(1.0), None);
    }

    #[test]
    fn scroll_in_divides_until_the_floor() {
        let mut z = zoom();
        let d = z.scroll(-1.0).expect("changed");
        assert!((d - 100.0 / 1.5).abs() < 1e-4);
        for _ in 0..10 {
            z.scroll(-0.5);
        }
        assert_eq!(z.distance(), 10.0);
        assert_eq!(z.scroll(-1.0), None);
    }

    #[test]
    fn zero_delta_is_ignored() {
        let mut z = zoom();
        assert_eq!(z.scroll(0.0), None);
        assert_eq!(z.distance(), 100.0);
    }
}
