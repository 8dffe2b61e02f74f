use std::path::Path;

use crate::coords::Vec2;

/// Well-known locations of a sans-serif font on Linux distributions.
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Error returned when a font cannot be loaded.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FontLoadError {
    #[error("font parse error: {0}")]
    Parse(String),
    #[error("no usable system font found in {searched} locations")]
    NotFound { searched: usize },
}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns the loaded fonts. Fonts are immutable after loading.
///
/// Owned by the view and passed to `TextRenderer::render` every frame so new
/// glyphs can be rasterized on demand.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError::Parse(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    /// Loads the first readable and parseable font from the well-known system
    /// locations.
    pub fn load_system_font(&mut self) -> Result<FontId, FontLoadError> {
        for path in SYSTEM_FONT_PATHS {
            let Ok(bytes) = std::fs::read(Path::new(path)) else {
                continue;
            };
            match self.load_font(&bytes) {
                Ok(id) => {
                    log::debug!("loaded overlay font {path}");
                    return Ok(id);
                }
                Err(e) => log::debug!("skipping {path}: {e}"),
            }
        }
        Err(FontLoadError::NotFound { searched: SYSTEM_FONT_PATHS.len() })
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Bounding box of a single-line string, in logical pixels.
    ///
    /// An unknown font or an empty string yields a zero width and one line of
    /// height.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

        let line = Vec2::new(0.0, size * 1.2);
        let Some(font) = self.get(id) else {
            return line;
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return line;
        }

        // Pen position after each glyph, not the bitmap edge: trailing spaces count.
        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = glyphs
            .iter()
            .map(|g| g.y + g.height as f32)
            .fold(line.y, f32::max);
        Vec2::new(w, h)
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        let mut fs = FontSystem::new();
        assert!(matches!(fs.load_font(b"not a font"), Err(FontLoadError::Parse(_))));
    }

    #[test]
    fn unknown_font_measures_one_empty_line() {
        let fs = FontSystem::new();
        let size = fs.measure_text("12:00", FontId(3), 20.0);
        assert_eq!(size, Vec2::new(0.0, 24.0));
    }
}
