//! Per-channel blend mode formulas.
//!
//! Each function takes the existing (base) channel value and the layer (blend)
//! channel value and returns the blended channel.

use crate::image_pipeline::buffer::clamp_channel;

/// Blend modes available to tint layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Overlay,
    SoftLight,
}

impl BlendMode {
    #[inline]
    pub fn apply(self, base: u8, blend: u8) -> u8 {
        match self {
            BlendMode::Overlay => overlay(base, blend),
            BlendMode::SoftLight => soft_light(base, blend),
        }
    }
}

/// Overlay: multiplies dark bases and screens light ones.
#[inline]
pub fn overlay(base: u8, blend: u8) -> u8 {
    let b = base as f32;
    let s = blend as f32;
    let value = if base < 128 {
        2.0 * b * s / 255.0
    } else {
        255.0 - 2.0 * (255.0 - b) * (255.0 - s) / 255.0
    };
    clamp_channel(value)
}

/// Soft light (W3C compositing formula): darkens when `blend < 128`, lightens otherwise.
#[inline]
pub fn soft_light(base: u8, blend: u8) -> u8 {
    let cb = base as f32 / 255.0;
    let cs = blend as f32 / 255.0;

    let value = if blend < 128 {
        cb - (1.0 - 2.0 * cs) * cb * (1.0 - cb)
    } else {
        let d = if cb <= 0.25 {
            ((16.0 * cb - 12.0) * cb + 4.0) * cb
        } else {
            cb.sqrt()
        };
        cb + (2.0 * cs - 1.0) * (d - cb)
    };
    clamp_channel(value * 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_dark_and_light_branches() {
        assert_eq!(overlay(0, 200), 0);
        assert_eq!(overlay(255, 0), 255);
        // 2 * 100 * 51 / 255 = 40
        assert_eq!(overlay(100, 51), 40);
        // 255 - 2 * 55 * 204 / 255 = 167
        assert_eq!(overlay(200, 51), 167);
    }

    #[test]
    fn test_soft_light_darkens_and_lightens() {
        for base in [30u8, 100, 180, 230] {
            assert!(soft_light(base, 20) <= base, "base {base} should darken");
            assert!(soft_light(base, 230) >= base, "base {base} should lighten");
        }
    }

    #[test]
    fn test_soft_light_keeps_extremes() {
        for blend in [0u8, 64, 128, 255] {
            assert_eq!(soft_light(0, blend), 0);
            assert_eq!(soft_light(255, blend), 255);
        }
        // Black layer squares the base: 128^2 / 255 = 64.25
        assert_eq!(soft_light(128, 0), 64);
    }

    #[test]
    fn test_blend_mode_dispatch() {
        assert_eq!(BlendMode::Overlay.apply(100, 51), overlay(100, 51));
        assert_eq!(BlendMode::SoftLight.apply(100, 200), soft_light(100, 200));
    }
}
