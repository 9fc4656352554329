//! Procedural puzzle pictures.
//!
//! A level's [`SourceImage`] only carries pixel dimensions and a pattern name;
//! the colours are computed on demand from normalized image coordinates.
//! Every pattern varies across the whole image so tiles stay distinguishable.

use crate::fb::Rgb;
use crate::types::{ImagePattern, SourceImage};

const WARM: Rgb = Rgb::new(240, 140, 60);
const COOL: Rgb = Rgb::new(40, 110, 220);
const LEAF: Rgb = Rgb::new(70, 190, 110);
const PLUM: Rgb = Rgb::new(160, 60, 170);

/// Colour of the image at pixel (`px`, `py`). Out-of-range inputs are clamped.
pub fn sample(image: &SourceImage, px: f32, py: f32) -> Rgb {
    let u = (px / image.width.max(1) as f32).clamp(0.0, 1.0);
    let v = (py / image.height.max(1) as f32).clamp(0.0, 1.0);
    sample_uv(image.pattern, u, v)
}

/// Colour at normalized coordinates `u`, `v` in `[0, 1]`.
pub fn sample_uv(pattern: ImagePattern, u: f32, v: f32) -> Rgb {
    let base = WARM.mix(COOL, u).mix(LEAF, v * 0.6);
    match pattern {
        ImagePattern::Gradient => base.mix(PLUM, (1.0 - u) * v * 0.5),
        ImagePattern::Rings => {
            let d = ((u - 0.5).powi(2) + (v - 0.5).powi(2)).sqrt();
            if ((d * 14.0) as u32) % 2 == 0 {
                base
            } else {
                base.scale(0.45).mix(PLUM, 0.3)
            }
        }
        ImagePattern::Checker => {
            if ((u * 8.0) as u32 + (v * 6.0) as u32) % 2 == 0 {
                base.scale(1.15)
            } else {
                base.scale(0.5)
            }
        }
        ImagePattern::Stripes => match (((u + v) * 9.0) as u32) % 3 {
            0 => base,
            1 => base.mix(PLUM, 0.6),
            _ => base.scale(0.4),
        },
    }
}
