//! Bar chart of the most common words, rendered to PNG

use image::{ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};

use crate::core::model::{FrequencyRow, TextError};
use crate::report::font::{chart_font, TextMask};

pub const CHART_WIDTH: u32 = 1000;
pub const CHART_HEIGHT: u32 = 600;
pub const CHART_TITLE: &str = "Top 10 Most Common Words";

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);
/// matplotlib "skyblue"
const BAR_COLOR: Rgb<u8> = Rgb([135, 206, 235]);

const MARGIN_LEFT: u32 = 90;
const MARGIN_RIGHT: u32 = 30;
const MARGIN_TOP: u32 = 60;
const MARGIN_BOTTOM: u32 = 170;

const LABEL_PX: f32 = 16.0;
const TITLE_PX: f32 = 24.0;
const LABEL_ANGLE_DEG: f64 = 45.0;

/// Render and save the chart; an empty slice is a no-op returning `None`
pub fn write_bar_chart(path: &Path, rows: &[FrequencyRow]) -> Result<Option<PathBuf>, TextError> {
    if rows.is_empty() {
        return Ok(None);
    }

    let chart = render_bar_chart(rows).map_err(|source| TextError::Font { source })?;
    chart
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| TextError::Chart {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Some(path.to_path_buf()))
}

/// Draw bars, axes, ticks and labels for `rows` in their given order
pub fn render_bar_chart(rows: &[FrequencyRow]) -> Result<RgbImage, ab_glyph::InvalidFont> {
    let font = chart_font()?;
    let mut img = RgbImage::from_pixel(CHART_WIDTH, CHART_HEIGHT, BACKGROUND);

    let left = MARGIN_LEFT as f64;
    let right = (CHART_WIDTH - MARGIN_RIGHT) as f64;
    let top = MARGIN_TOP as f64;
    let bottom = (CHART_HEIGHT - MARGIN_BOTTOM) as f64;
    let plot_width = right - left;
    let plot_height = bottom - top;

    let max_count = rows.iter().map(|row| row.count).max().unwrap_or(0);
    let step = tick_step(max_count);
    let y_max = (max_count.div_ceil(step) * step).max(step);

    if !rows.is_empty() {
        let slot = plot_width / rows.len() as f64;
        for (i, row) in rows.iter().enumerate() {
            let x0 = left + slot * i as f64 + slot * 0.1;
            let x1 = x0 + slot * 0.8;
            let height = row.count as f64 / y_max as f64 * plot_height;
            fill_rect(&mut img, x0, bottom - height, x1, bottom, BAR_COLOR);

            let mask = TextMask::rasterize(&font, &row.word, LABEL_PX);
            let center = x0 + slot * 0.4;
            draw_text(
                &mut img,
                &mask,
                (mask.width as f64, mask.height as f64 / 2.0),
                (center, bottom + 10.0),
                LABEL_ANGLE_DEG,
            );
        }
    }

    // Axes
    fill_rect(&mut img, left - 1.0, top, left + 1.0, bottom + 1.0, INK);
    fill_rect(&mut img, left - 1.0, bottom - 1.0, right, bottom + 1.0, INK);

    // Y ticks
    let mut value = 0;
    while value <= y_max {
        let y = bottom - value as f64 / y_max as f64 * plot_height;
        fill_rect(&mut img, left - 6.0, y - 1.0, left, y + 1.0, INK);
        let mask = TextMask::rasterize(&font, &value.to_string(), LABEL_PX);
        draw_text(
            &mut img,
            &mask,
            (mask.width as f64, mask.height as f64 / 2.0),
            (left - 10.0, y),
            0.0,
        );
        value += step;
    }

    let title = TextMask::rasterize(&font, CHART_TITLE, TITLE_PX);
    draw_text(
        &mut img,
        &title,
        (title.width as f64 / 2.0, 0.0),
        (CHART_WIDTH as f64 / 2.0, 18.0),
        0.0,
    );

    let x_label = TextMask::rasterize(&font, "Words", LABEL_PX);
    draw_text(
        &mut img,
        &x_label,
        (x_label.width as f64 / 2.0, x_label.height as f64),
        ((left + right) / 2.0, CHART_HEIGHT as f64 - 12.0),
        0.0,
    );

    let y_label = TextMask::rasterize(&font, "Frequency", LABEL_PX);
    draw_text(
        &mut img,
        &y_label,
        (y_label.width as f64 / 2.0, y_label.height as f64 / 2.0),
        (24.0, (top + bottom) / 2.0),
        90.0,
    );

    Ok(img)
}

/// Integer tick spacing giving roughly five ticks (1, 2 or 5 times a power of ten)
fn tick_step(max_count: usize) -> usize {
    let raw = (max_count as f64 / 5.0).max(1.0);
    let magnitude = 10f64.powf(raw.log10().floor());
    for factor in [1.0, 2.0, 5.0, 10.0] {
        if factor * magnitude >= raw {
            return ((factor * magnitude) as usize).max(1);
        }
    }
    (10.0 * magnitude) as usize
}

fn fill_rect(img: &mut RgbImage, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb<u8>) {
    let clamp_x = |v: f64| v.round().clamp(0.0, img.width() as f64) as u32;
    let clamp_y = |v: f64| v.round().clamp(0.0, img.height() as f64) as u32;
    let (xa, xb) = (clamp_x(x0), clamp_x(x1));
    let (ya, yb) = (clamp_y(y0), clamp_y(y1));

    for y in ya..yb {
        for x in xa..xb {
            img.put_pixel(x, y, color);
        }
    }
}

/// Blend `mask` in ink, rotated counterclockwise by `angle_deg` so that the
/// mask point `pivot` lands on image point `anchor`
fn draw_text(
    img: &mut RgbImage,
    mask: &TextMask,
    pivot: (f64, f64),
    anchor: (f64, f64),
    angle_deg: f64,
) {
    if mask.width == 0 {
        return;
    }

    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let to_image = |u: f64, v: f64| {
        let (du, dv) = (u - pivot.0, v - pivot.1);
        (anchor.0 + du * cos + dv * sin, anchor.1 - du * sin + dv * cos)
    };

    let (w, h) = (mask.width as f64, mask.height as f64);
    let corners = [to_image(0.0, 0.0), to_image(w, 0.0), to_image(0.0, h), to_image(w, h)];
    let min_x = corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max);
    let min_y = corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
    let max_y = corners.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max);

    let x_start = min_x.floor().max(0.0) as u32;
    let x_end = max_x.ceil().min(img.width() as f64) as u32;
    let y_start = min_y.floor().max(0.0) as u32;
    let y_end = max_y.ceil().min(img.height() as f64) as u32;

    for y in y_start..y_end {
        for x in x_start..x_end {
            // Sample the mask at the pixel center, mapped back into text space
            let dx = x as f64 + 0.5 - anchor.0;
            let dy = y as f64 + 0.5 - anchor.1;
            let u = dx * cos - dy * sin + pivot.0;
            let v = dx * sin + dy * cos + pivot.1;
            let alpha = mask.get(u.floor() as i64, v.floor() as i64);
            if alpha > 0 {
                let pixel = img.get_pixel_mut(x, y);
                *pixel = blend(*pixel, INK, alpha);
            }
        }
    }
}

fn blend(under: Rgb<u8>, over: Rgb<u8>, alpha: u8) -> Rgb<u8> {
    let a = alpha as u32;
    let mix = |u: u8, o: u8| ((u as u32 * (255 - a) + o as u32 * a + 127) / 255) as u8;
    Rgb([
        mix(under.0[0], over.0[0]),
        mix(under.0[1], over.0[1]),
        mix(under.0[2], over.0[2]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rows(data: &[(&str, usize)]) -> Vec<FrequencyRow> {
        data.iter()
            .enumerate()
            .map(|(i, (word, count))| FrequencyRow {
                rank: i + 1,
                word: word.to_string(),
                count: *count,
            })
            .collect()
    }

    #[test]
    fn test_tick_step() {
        assert_eq!(tick_step(0), 1);
        assert_eq!(tick_step(3), 1);
        assert_eq!(tick_step(12), 5);
        assert_eq!(tick_step(40), 10);
        assert_eq!(tick_step(95), 20);
    }

    #[test]
    fn test_render_dimensions() {
        let img = render_bar_chart(&rows(&[("the", 4), ("cat", 2)])).unwrap();
        assert_eq!(img.dimensions(), (CHART_WIDTH, CHART_HEIGHT));
    }

    #[test]
    fn test_tallest_bar_is_filled() {
        let img = render_bar_chart(&rows(&[("the", 4), ("cat", 2)])).unwrap();
        let plot_width = (CHART_WIDTH - MARGIN_RIGHT - MARGIN_LEFT) as f64;
        let center_x = (MARGIN_LEFT as f64 + plot_width / 4.0) as u32;
        let bottom = CHART_HEIGHT - MARGIN_BOTTOM;

        assert_eq!(*img.get_pixel(center_x, bottom - 10), BAR_COLOR);
        assert_eq!(*img.get_pixel(center_x, MARGIN_TOP + 5), BAR_COLOR);
    }

    #[test]
    fn test_shorter_bar_stops_halfway() {
        let img = render_bar_chart(&rows(&[("the", 4), ("cat", 2)])).unwrap();
        let plot_width = (CHART_WIDTH - MARGIN_RIGHT - MARGIN_LEFT) as f64;
        let center_x = (MARGIN_LEFT as f64 + plot_width * 0.75) as u32;

        assert_eq!(*img.get_pixel(center_x, MARGIN_TOP + 5), BACKGROUND);
        assert_eq!(*img.get_pixel(center_x, CHART_HEIGHT - MARGIN_BOTTOM - 10), BAR_COLOR);
    }

    #[test]
    fn test_blend() {
        assert_eq!(blend(BACKGROUND, INK, 0), BACKGROUND);
        assert_eq!(blend(BACKGROUND, INK, 255), INK);
        assert_eq!(blend(BACKGROUND, INK, 128), Rgb([127, 127, 127]));
    }

    /// Dark pixels in the band below the x axis, where the word labels sit
    fn label_ink(img: &RgbImage) -> usize {
        let bottom = CHART_HEIGHT - MARGIN_BOTTOM;
        (bottom + 4..bottom + 140)
            .flat_map(|y| (MARGIN_LEFT + 2..CHART_WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| img.get_pixel(x, y).0[0] < 128)
            .count()
    }

    #[test]
    fn test_non_ascii_label_is_rendered() {
        let plain = render_bar_chart(&rows(&[("cafe", 2)])).unwrap();
        let accented = render_bar_chart(&rows(&[("café", 2)])).unwrap();

        assert!(label_ink(&accented) > 0);
        assert_ne!(plain, accented);
    }

    #[test]
    fn test_long_label_is_not_truncated() {
        let short = render_bar_chart(&rows(&[("internationali", 1)])).unwrap();
        let long = render_bar_chart(&rows(&[("internationalization", 1)])).unwrap();
        assert!(label_ink(&long) > label_ink(&short));
    }

    #[test]
    fn test_write_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("top_10_words.png");

        let written = write_bar_chart(&path, &rows(&[("word", 3)])).unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), CHART_WIDTH);
        assert_eq!(decoded.height(), CHART_HEIGHT);
    }

    #[test]
    fn test_empty_rows_skip_rendering() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("top_10_words.png");

        assert!(write_bar_chart(&path, &[]).unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("top_10_words.png");
        assert!(matches!(
            write_bar_chart(&path, &rows(&[("word", 1)])),
            Err(TextError::Chart { .. })
        ));
    }
}
