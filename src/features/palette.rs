use image::DynamicImage;

use crate::{
    features::resize_max,
    types::{PaletteMetrics, Swatch},
};

/// Up to this many dominant swatches are emitted.
pub const MAX_SWATCHES: usize = 8;

/// Working resolution for the quantization pass.
const QUANT_MAX_DIM: u32 = 64;

/// Working resolution for the saturation/brightness means.
const HSV_MAX_DIM: u32 = 128;

/// Extracts dominant color swatches and scalar HSV summaries.
///
/// Quantization bins opaque pixels of a ≤64px copy into a 4-bit-per-channel
/// RGB histogram (4096 cells) and keeps the most populated cells; each
/// swatch's hex value is the mean color of its cell, its population the
/// cell's share of opaque pixels. Saturation/brightness are averaged over a
/// separate ≤128px copy and are `None` when the image has no opaque pixels.
pub fn analyze(img: &DynamicImage) -> PaletteMetrics {
    let quant = resize_max(img, QUANT_MAX_DIM).to_rgba8();
    let swatches = dominant_swatches(&quant);

    let hsv = resize_max(img, HSV_MAX_DIM).to_rgba8();
    let (avg_saturation, avg_brightness) = hsv_means(&hsv);

    PaletteMetrics {
        swatches,
        avg_saturation,
        avg_brightness,
    }
}

fn dominant_swatches(rgba: &image::RgbaImage) -> Vec<Swatch> {
    // cell index -> (count, sum r, sum g, sum b)
    let mut cells: Vec<(u32, u64, u64, u64)> = vec![(0, 0, 0, 0); 1 << 12];
    let mut total: u64 = 0;

    for p in rgba.pixels() {
        let [r, g, b, a] = p.0;
        if a == 0 {
            continue;
        }
        let key = (((r >> 4) as usize) << 8) | (((g >> 4) as usize) << 4) | ((b >> 4) as usize);
        let cell = &mut cells[key];
        cell.0 += 1;
        cell.1 += r as u64;
        cell.2 += g as u64;
        cell.3 += b as u64;
        total += 1;
    }

    if total == 0 {
        return Vec::new();
    }

    let mut populated: Vec<&(u32, u64, u64, u64)> =
        cells.iter().filter(|c| c.0 > 0).collect();
    populated.sort_by(|a, b| b.0.cmp(&a.0));

    populated
        .into_iter()
        .take(MAX_SWATCHES)
        .map(|&(count, sr, sg, sb)| {
            let n = count as u64;
            Swatch {
                hex: format!("#{:02x}{:02x}{:02x}", sr / n, sg / n, sb / n),
                population: count as f32 / total as f32,
            }
        })
        .collect()
}

fn hsv_means(rgba: &image::RgbaImage) -> (Option<f32>, Option<f32>) {
    let mut sat_sum = 0.0f64;
    let mut val_sum = 0.0f64;
    let mut count: u64 = 0;

    for p in rgba.pixels() {
        let [r, g, b, a] = p.0;
        if a == 0 {
            continue;
        }
        let max = r.max(g).max(b) as f64 / 255.0;
        let min = r.min(g).min(b) as f64 / 255.0;
        let sat = if max > 0.0 { (max - min) / max } else { 0.0 };
        sat_sum += sat;
        val_sum += max;
        count += 1;
    }

    if count == 0 {
        return (None, None);
    }
    (
        Some((sat_sum / count as f64) as f32),
        Some((val_sum / count as f64) as f32),
    )
}
