use super::*;

use image::Rgba;

fn solid(width: u32, height: u32, px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(px))
}

#[test]
fn ramp_is_floor_step_times_index() {
    assert_eq!(
        variant_alphas(10).unwrap(),
        vec![0, 25, 50, 75, 100, 125, 150, 175, 200, 225]
    );
    assert_eq!(variant_alphas(5).unwrap(), vec![0, 51, 102, 153, 204]);
    assert_eq!(variant_alphas(1).unwrap(), vec![0]);
}

#[test]
fn ramp_is_strictly_increasing_for_sane_counts() {
    let alphas = variant_alphas(30).unwrap();
    assert!(alphas.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(alphas[29], (255 / 30) * 29);
}

#[test]
fn zero_variants_are_rejected() {
    assert!(variant_alphas(0).is_err());
    assert!(opacity_variants(&solid(2, 2, [9, 9, 9, 255]), 0).is_err());
}

#[test]
fn mask_scales_alpha_and_preserves_color() {
    let src = solid(3, 2, [10, 20, 30, 200]);
    let out = apply_uniform_alpha(&src, 128);
    for px in out.pixels() {
        // (200 * 128 + 127) / 255 = 100
        assert_eq!(px.0, [10, 20, 30, 100]);
    }
}

#[test]
fn mask_at_full_alpha_is_identity() {
    let src = solid(2, 2, [1, 2, 3, 77]);
    assert_eq!(apply_uniform_alpha(&src, 255), src);
}

#[test]
fn source_image_is_never_mutated() {
    let src = solid(4, 4, [50, 60, 70, 255]);
    let before = src.clone();
    let _ = opacity_variants(&src, 8).unwrap();
    assert_eq!(src, before);
}

#[test]
fn variants_order_most_transparent_first() {
    let src = solid(2, 2, [0, 0, 0, 255]);
    let variants = opacity_variants(&src, 5).unwrap();
    assert_eq!(variants.len(), 5);

    let alphas: Vec<u8> = variants.iter().map(|v| v.get_pixel(0, 0).0[3]).collect();
    assert_eq!(alphas, vec![0, 51, 102, 153, 204]);
}
