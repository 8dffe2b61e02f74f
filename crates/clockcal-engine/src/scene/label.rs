use crate::coords::{Vec2, Viewport};
use crate::paint::Color;
use crate::text::FontId;

/// Corner of the viewport a label is pinned to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Anchor {
    #[default]
    TopLeft,
    TopRight,
}

/// Screen-space text overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// `None` until a font is assigned; such labels are not drawn.
    pub font: Option<FontId>,
    pub anchor: Anchor,
    /// Offset from the anchored corner, pointing into the viewport.
    pub margin: Vec2,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: 14.0,
            color: Color::WHITE,
            font: None,
            anchor: Anchor::TopLeft,
            margin: Vec2::new(8.0, 8.0),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_font(mut self, font: Option<FontId>) -> Self {
        self.font = font;
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor, margin: Vec2) -> Self {
        self.anchor = anchor;
        self.margin = margin;
        self
    }

    /// Top-left corner of the text block for a measured `extent`.
    pub fn origin(&self, viewport: Viewport, extent: Vec2) -> Vec2 {
        match self.anchor {
            Anchor::TopLeft => self.margin,
            Anchor::TopRight => Vec2::new(
                (viewport.width - extent.x - self.margin.x).max(0.0),
                self.margin.y,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_right_label_hugs_the_edge() {
        let label = Label::new("12:00:00").with_anchor(Anchor::TopRight, Vec2::new(10.0, 6.0));
        let o = label.origin(Viewport::new(800.0, 600.0), Vec2::new(90.0, 24.0));
        assert_eq!(o, Vec2::new(700.0, 6.0));
    }

    #[test]
    fn oversized_label_stays_on_screen() {
        let label = Label::new("x").with_anchor(Anchor::TopRight, Vec2::new(10.0, 0.0));
        let o = label.origin(Viewport::new(50.0, 50.0), Vec2::new(200.0, 24.0));
        assert_eq!(o.x, 0.0);
    }
}
