use image::{DynamicImage, GrayImage};

use crate::{
    features::{resize_max, sobel},
    types::TextureMetrics,
};

/// Working resolution of the displacement map.
pub const WORKING_MAX_DIM: u32 = 512;

/// Computes the edge-energy metric and the normalized gradient-magnitude map.
///
/// The image is grayscaled at ≤512px, run through a 3×3 Sobel in x and y, and
/// the Euclidean magnitude is normalized by the maximum magnitude observed in
/// this image (per-image normalization, not a global constant) before 8-bit
/// quantization. `avg_edge_magnitude` is the mean of the quantized map over
/// 255 — how much of the per-image dynamic range is activated on average. A
/// flat image (zero max magnitude) yields an all-zero map and `None` energy.
pub fn analyze(img: &DynamicImage) -> (TextureMetrics, GrayImage) {
    let gray = resize_max(img, WORKING_MAX_DIM).to_luma8();
    let grads = sobel(&gray);
    let (width, height) = (grads.width, grads.height);
    let n = (width as usize) * (height as usize);

    let mags: Vec<f32> = (0..n).map(|i| grads.magnitude(i)).collect();
    let max_mag = mags.iter().cloned().fold(0.0f32, f32::max);

    if max_mag <= 0.0 {
        let map = GrayImage::new(width, height);
        return (
            TextureMetrics {
                avg_edge_magnitude: None,
                width,
                height,
            },
            map,
        );
    }

    let mut sum: u64 = 0;
    let quantized: Vec<u8> = mags
        .iter()
        .map(|&m| {
            let q = ((m / max_mag) * 255.0).round() as u8;
            sum += q as u64;
            q
        })
        .collect();

    let map = GrayImage::from_raw(width, height, quantized)
        .unwrap_or_else(|| GrayImage::new(width, height));
    let avg = (sum as f64 / n as f64 / 255.0) as f32;

    (
        TextureMetrics {
            avg_edge_magnitude: Some(avg),
            width,
            height,
        },
        map,
    )
}
