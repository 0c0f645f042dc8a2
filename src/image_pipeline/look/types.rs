//! Look configuration types

use crate::image_pipeline::buffer::clamp_channel;
use crate::image_pipeline::convolution::Kernel;
use crate::image_pipeline::look::blend::BlendMode;

/// A solid colour layer composited over the whole frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TintLayer {
    /// Layer colour as RGB
    pub color: [u8; 3],
    /// Layer opacity in `[0, 1]`
    pub opacity: f32,
    /// How the layer combines with the frame underneath
    pub mode: BlendMode,
}

impl TintLayer {
    /// Faint dark blue pushed into the shadows.
    pub const SHADOW_TINT: TintLayer = TintLayer {
        color: [0, 0, 20],
        opacity: 0.10,
        mode: BlendMode::Overlay,
    };

    /// Warm orange lifting the highlights.
    pub const HIGHLIGHT_WARMTH: TintLayer = TintLayer {
        color: [255, 150, 50],
        opacity: 0.15,
        mode: BlendMode::SoftLight,
    };

    /// Composites the layer onto one RGBA pixel, leaving alpha alone.
    #[inline]
    pub fn composite(&self, pixel: &mut [u8]) {
        for (channel, &tint) in pixel.iter_mut().take(3).zip(self.color.iter()) {
            let base = *channel as f32;
            let blended = self.mode.apply(*channel, tint) as f32;
            *channel = clamp_channel(base + (blended - base) * self.opacity);
        }
    }
}

/// Configuration for the look processor
#[derive(Debug, Clone)]
pub struct LookConfig {
    /// First layer, composited over the merged frame
    pub shadow_tint: TintLayer,
    /// Second layer, composited after the shadow tint
    pub highlight_warmth: TintLayer,
    /// Contrast multiplier around mid-gray (1.0 = no change)
    pub contrast: f32,
    /// Saturation multiplier around each pixel's luma (1.0 = no change)
    pub saturation: f32,
    /// Kernel applied after the colour stages, if any
    pub sharpening: Option<Kernel>,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            shadow_tint: TintLayer::SHADOW_TINT,
            highlight_warmth: TintLayer::HIGHLIGHT_WARMTH,
            contrast: 1.15,
            saturation: 1.10,
            sharpening: None,
        }
    }
}

impl LookConfig {
    pub fn builder() -> LookConfigBuilder {
        LookConfigBuilder::default()
    }
}

/// Builder for LookConfig
#[derive(Default)]
pub struct LookConfigBuilder {
    shadow_tint: Option<TintLayer>,
    highlight_warmth: Option<TintLayer>,
    contrast: Option<f32>,
    saturation: Option<f32>,
    sharpening: Option<Option<Kernel>>,
}

impl LookConfigBuilder {
    pub fn shadow_tint(mut self, layer: TintLayer) -> Self {
        self.shadow_tint = Some(layer);
        self
    }

    pub fn highlight_warmth(mut self, layer: TintLayer) -> Self {
        self.highlight_warmth = Some(layer);
        self
    }

    pub fn contrast(mut self, contrast: f32) -> Self {
        self.contrast = Some(contrast);
        self
    }

    pub fn saturation(mut self, saturation: f32) -> Self {
        self.saturation = Some(saturation);
        self
    }

    pub fn sharpening(mut self, kernel: Option<Kernel>) -> Self {
        self.sharpening = Some(kernel);
        self
    }

    pub fn build(self) -> LookConfig {
        let default = LookConfig::default();
        LookConfig {
            shadow_tint: self.shadow_tint.unwrap_or(default.shadow_tint),
            highlight_warmth: self.highlight_warmth.unwrap_or(default.highlight_warmth),
            contrast: self.contrast.unwrap_or(default.contrast),
            saturation: self.saturation.unwrap_or(default.saturation),
            sharpening: self.sharpening.unwrap_or(default.sharpening),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = LookConfig::builder()
            .contrast(1.3)
            .sharpening(Some(Kernel::sharpen()))
            .build();

        assert_eq!(config.contrast, 1.3);
        assert_eq!(config.saturation, 1.10);
        assert_eq!(config.shadow_tint, TintLayer::SHADOW_TINT);
        assert!(config.sharpening.is_some());
    }

    #[test]
    fn test_zero_opacity_layer_is_a_no_op() {
        let layer = TintLayer {
            opacity: 0.0,
            ..TintLayer::HIGHLIGHT_WARMTH
        };
        let mut pixel = [12, 130, 250, 99];
        layer.composite(&mut pixel);
        assert_eq!(pixel, [12, 130, 250, 99]);
    }

    #[test]
    fn test_composite_leaves_alpha() {
        let mut pixel = [128, 128, 128, 42];
        TintLayer::SHADOW_TINT.composite(&mut pixel);
        assert_eq!(pixel[3], 42);
        // 128 overlays with a zero channel to 1; 10% of the way is 115.3
        assert_eq!(pixel[0], 115);
    }
}
