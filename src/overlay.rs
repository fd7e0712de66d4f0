//! Centered translucent compositing.
//!
//! One operation: alpha-blend an overlay image onto the center of a base
//! image at a caller-set opacity. Placement is clamped to the top-left
//! corner when the overlay is larger than the base, so the overlay is
//! cropped at the base's edges rather than rejected.
//!
//! The blend itself is `image::imageops::overlay` (source-over); opacity is
//! applied by scaling the overlay's alpha channel beforehand, which is
//! equivalent to compositing the whole overlay at that constant alpha.

use image::imageops;
use image::{Rgba, RgbaImage};

/// Constant opacity for an overlay pass, clamped to `0.0..=1.0` on
/// construction. Defaults to 0.8 — translucent enough that the base image
/// reads through a watermark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opacity(f32);

impl Opacity {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self(0.8)
    }
}

/// Composite `overlay` centered on `base` at the given opacity.
///
/// Returns a new buffer with the base's dimensions; neither input is
/// modified. An overlay larger than the base is anchored at (0, 0) and
/// cropped by the base's bounds.
pub fn overlay_centered(base: &RgbaImage, overlay: &RgbaImage, opacity: Opacity) -> RgbaImage {
    let x = center_offset(base.width(), overlay.width());
    let y = center_offset(base.height(), overlay.height());

    let mut composited = base.clone();
    let faded = apply_opacity(overlay, opacity);
    imageops::overlay(&mut composited, &faded, x, y);
    composited
}

/// Top-left offset that centers `inner` within `outer`, clamped to 0.
fn center_offset(outer: u32, inner: u32) -> i64 {
    let offset = (f64::from(outer) / 2.0) - (f64::from(inner) / 2.0);
    (offset.max(0.0)) as i64
}

/// Scale every pixel's alpha by the opacity factor.
fn apply_opacity(overlay: &RgbaImage, opacity: Opacity) -> RgbaImage {
    let factor = opacity.value();
    let mut faded = overlay.clone();
    for Rgba([_, _, _, alpha]) in faded.pixels_mut() {
        *alpha = (f32::from(*alpha) * factor).round() as u8;
    }
    faded
}
