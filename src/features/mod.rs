//! Visual-metric analyzers for cached artwork rasters.
//!
//! Three hand-picked metrics, one module each:
//!
//! - [`palette`] — dominant color swatches plus mean HSV saturation/brightness
//! - [`texture`] — normalized gradient-magnitude map and a relative
//!   edge-energy score (the map doubles as the viewer's displacement map)
//! - [`strokes`] — 12-bin gradient-orientation histogram with a coherence
//!   score for how strongly stroke directions agree
//!
//! All analyzers are pure with respect to their input image: no I/O, no
//! shared mutable state, deterministic output. That makes the extraction run
//! embarrassingly parallel across artworks.

pub mod palette;
pub mod strokes;
pub mod texture;

use image::{DynamicImage, GrayImage, imageops::FilterType};

/// Downsamples so the longest edge is at most `max_dim`, preserving aspect
/// ratio. Images already within bounds are returned untouched.
pub fn resize_max(img: &DynamicImage, max_dim: u32) -> DynamicImage {
    if img.width().max(img.height()) <= max_dim {
        img.clone()
    } else {
        img.resize(max_dim, max_dim, FilterType::Triangle)
    }
}

/// Per-pixel directional gradients of a grayscale image.
pub struct Gradients {
    pub width: u32,
    pub height: u32,
    pub gx: Vec<f32>,
    pub gy: Vec<f32>,
}

impl Gradients {
    pub fn magnitude(&self, idx: usize) -> f32 {
        (self.gx[idx] * self.gx[idx] + self.gy[idx] * self.gy[idx]).sqrt()
    }
}

/// 3×3 Sobel convolution in x and y with replicated borders.
pub fn sobel(gray: &GrayImage) -> Gradients {
    let (width, height) = gray.dimensions();
    let w = width as i64;
    let h = height as i64;
    let n = (w * h) as usize;
    let mut gx = vec![0.0f32; n];
    let mut gy = vec![0.0f32; n];

    let luma = |x: i64, y: i64| -> f32 {
        let cx = x.clamp(0, w - 1) as u32;
        let cy = y.clamp(0, h - 1) as u32;
        gray.get_pixel(cx, cy)[0] as f32
    };

    for y in 0..h {
        for x in 0..w {
            let tl = luma(x - 1, y - 1);
            let tc = luma(x, y - 1);
            let tr = luma(x + 1, y - 1);
            let ml = luma(x - 1, y);
            let mr = luma(x + 1, y);
            let bl = luma(x - 1, y + 1);
            let bc = luma(x, y + 1);
            let br = luma(x + 1, y + 1);

            let idx = (y * w + x) as usize;
            gx[idx] = (tr + 2.0 * mr + br) - (tl + 2.0 * ml + bl);
            gy[idx] = (bl + 2.0 * bc + br) - (tl + 2.0 * tc + tr);
        }
    }

    Gradients {
        width,
        height,
        gx,
        gy,
    }
}
