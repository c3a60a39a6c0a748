use image::RgbaImage;

use crate::foundation::error::{BlinkmarkError, BlinkmarkResult};

/// Uniform alpha value for each of `count` variants.
///
/// Variant `i` gets `(255 / count) * i` (integer floor), so index 0 is
/// fully transparent and index `count - 1` carries the strongest alpha
/// the ramp reaches. With more than 255 variants the floor collapses the
/// whole ramp to zero; that many variants is never a sensible blink.
pub fn variant_alphas(count: usize) -> BlinkmarkResult<Vec<u8>> {
    if count < 1 {
        return Err(BlinkmarkError::configuration("variant count must be >= 1"));
    }
    let step = 255 / count;
    Ok((0..count).map(|i| (step * i) as u8).collect())
}

/// Mask an icon with a uniform alpha, destination-in style.
///
/// Per pixel: output alpha = `round(alpha_in * alpha / 255)`, color
/// channels untouched. Returns a new image; the source is never mutated.
pub fn apply_uniform_alpha(src: &RgbaImage, alpha: u8) -> RgbaImage {
    let mut out = src.clone();
    if alpha == 255 {
        return out;
    }
    let mask = u16::from(alpha);
    for px in out.chunks_exact_mut(4) {
        px[3] = ((u16::from(px[3]) * mask + 127) / 255) as u8;
    }
    out
}

/// Produce `count` opacity-graded copies of `src`, most transparent first.
pub fn opacity_variants(src: &RgbaImage, count: usize) -> BlinkmarkResult<Vec<RgbaImage>> {
    Ok(variant_alphas(count)?
        .into_iter()
        .map(|alpha| apply_uniform_alpha(src, alpha))
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/variant/opacity.rs"]
mod tests;
