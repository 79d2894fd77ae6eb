use std::f32::consts::PI;

use image::DynamicImage;

use crate::{
    features::{resize_max, sobel},
    types::StrokeMetrics,
};

/// Number of equal-width angular bins over `[0, 2π)`.
pub const BIN_COUNT: usize = 12;

/// Working resolution for the orientation pass.
pub const WORKING_MAX_DIM: u32 = 256;

/// Gradient magnitudes below this floor are treated as sensor/compression
/// noise and excluded from the histogram.
pub const MAG_FLOOR: f32 = 20.0;

/// Computes the stroke-direction histogram and coherence score.
///
/// For every pixel whose Sobel gradient magnitude reaches the noise floor,
/// the orientation `atan2(gy, gx) + π` (folded into `[0, 2π)`) accumulates
/// its magnitude into one of 12 bins, plus into a 2D resultant vector. The
/// histogram is normalized to sum to 1; coherence is the resultant's length
/// over the total magnitude — near 1 for strongly aligned brushwork, near 0
/// for scattered edges. A sub-threshold image yields an all-zero histogram
/// and `None` coherence.
pub fn analyze(img: &DynamicImage) -> StrokeMetrics {
    let gray = resize_max(img, WORKING_MAX_DIM).to_luma8();
    let grads = sobel(&gray);
    let n = (grads.width as usize) * (grads.height as usize);

    let mut hist = vec![0.0f64; BIN_COUNT];
    let mut total = 0.0f64;
    let mut res_x = 0.0f64;
    let mut res_y = 0.0f64;
    let bin_width = 2.0 * PI / BIN_COUNT as f32;

    for i in 0..n {
        let mag = grads.magnitude(i);
        if mag < MAG_FLOOR {
            continue;
        }

        let mut angle = grads.gy[i].atan2(grads.gx[i]) + PI;
        if angle >= 2.0 * PI {
            angle -= 2.0 * PI;
        }

        let bin = ((angle / bin_width) as usize).min(BIN_COUNT - 1);
        hist[bin] += mag as f64;
        res_x += (mag * angle.cos()) as f64;
        res_y += (mag * angle.sin()) as f64;
        total += mag as f64;
    }

    if total <= 0.0 {
        return StrokeMetrics {
            bins: BIN_COUNT as u32,
            hist: vec![0.0; BIN_COUNT],
            coherence: None,
        };
    }

    let hist = hist.iter().map(|&h| (h / total) as f32).collect();
    let coherence = ((res_x * res_x + res_y * res_y).sqrt() / total).min(1.0) as f32;

    StrokeMetrics {
        bins: BIN_COUNT as u32,
        hist,
        coherence: Some(coherence),
    }
}
