//! Chart text rasterized from the embedded DejaVu Sans font

use ab_glyph::{point, Font, FontRef, InvalidFont, PxScale, ScaleFont};
use image::GrayImage;

static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Parse the embedded font
pub fn chart_font() -> Result<FontRef<'static>, InvalidFont> {
    FontRef::try_from_slice(DEJAVU_SANS)
}

/// Anti-aliased coverage of one line of text. (0, 0) is the top-left corner
/// of the line box, which spans ascent to descent.
pub struct TextMask {
    pub width: u32,
    pub height: u32,
    coverage: GrayImage,
}

impl TextMask {
    pub fn rasterize(font: &FontRef<'_>, text: &str, px: f32) -> Self {
        let scaled = font.as_scaled(PxScale::from(px));
        let ascent = scaled.ascent();
        let height = (ascent - scaled.descent()).ceil().max(0.0) as u32;

        let mut caret = 0.0f32;
        let mut previous = None;
        let mut glyphs = Vec::new();
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(scaled.scale(), point(caret, ascent)));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }
        let width = caret.ceil().max(0.0) as u32;

        let mut coverage = GrayImage::new(width, height);
        for glyph in glyphs {
            let Some(outlined) = scaled.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, c| {
                let gx = bounds.min.x as i64 + x as i64;
                let gy = bounds.min.y as i64 + y as i64;
                if gx < 0 || gy < 0 || gx >= width as i64 || gy >= height as i64 {
                    return;
                }
                let value = (c.clamp(0.0, 1.0) * 255.0).round() as u8;
                let pixel = coverage.get_pixel_mut(gx as u32, gy as u32);
                pixel.0[0] = pixel.0[0].max(value);
            });
        }

        Self {
            width,
            height,
            coverage,
        }
    }

    /// Coverage at `(x, y)`; 0 outside the mask
    pub fn get(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0;
        }
        self.coverage.get_pixel(x as u32, y as u32).0[0]
    }

    /// Number of pixels with any ink in rows `rows`
    #[cfg(test)]
    fn inked_in_rows(&self, rows: std::ops::Range<u32>) -> usize {
        rows.flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.get(x as i64, y as i64) > 0)
            .count()
    }
}
