//! Hue cycling for the trail's rainbow gradient.

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Hue advance per draw call, in degrees.
pub const DEFAULT_HUE_STEP: f64 = 0.5;

/// Hue/saturation/brightness color. Hue in degrees, the rest in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsb {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

impl Hsb {
    pub fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Converts to opaque linear RGBA.
    pub fn to_rgba(self) -> Vec4 {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = self.saturation.clamp(0.0, 1.0);
        let v = self.brightness.clamp(0.0, 1.0);

        let chroma = v * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = v - chroma;
        Vec4::new((r + m) as f32, (g + m) as f32, (b + m) as f32, 1.0)
    }
}

/// Monotonically advancing hue, read back modulo 360.
#[derive(Debug, Clone)]
pub struct ColorCycler {
    accumulator: f64,
    step: f64,
}

impl Default for ColorCycler {
    fn default() -> Self {
        Self::new(DEFAULT_HUE_STEP)
    }
}

impl ColorCycler {
    pub fn new(step: f64) -> Self {
        Self {
            accumulator: 0.0,
            step,
        }
    }

    /// Current hue without advancing.
    pub fn hue(&self) -> f64 {
        self.accumulator
    }

    /// Advances by one step and returns the new hue in `[0, 360)`.
    pub fn next_hue(&mut self) -> f64 {
        // kept wrapped so long sessions don't lose precision
        self.accumulator = (self.accumulator + self.step).rem_euclid(360.0);
        self.accumulator
    }

    /// Fully saturated color at the next hue.
    pub fn next_color(&mut self, brightness: f64) -> Hsb {
        Hsb::new(self.next_hue(), 1.0, brightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_wraps_after_full_turn() {
        let mut colors = ColorCycler::default();
        let initial = colors.hue();
        let mut last = initial;
        for _ in 0..720 {
            last = colors.next_hue();
            assert!((0.0..360.0).contains(&last));
        }
        assert_eq!(last, initial);
    }

    #[test]
    fn hue_advances_by_step() {
        let mut colors = ColorCycler::default();
        assert_eq!(colors.next_hue(), 0.5);
        assert_eq!(colors.next_hue(), 1.0);
        let color = colors.next_color(0.7);
        assert_eq!(color, Hsb::new(1.5, 1.0, 0.7));
    }

    #[test]
    fn primary_hues_convert() {
        assert_eq!(Hsb::new(0.0, 1.0, 1.0).to_rgba(), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(Hsb::new(120.0, 1.0, 1.0).to_rgba(), Vec4::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(Hsb::new(240.0, 1.0, 1.0).to_rgba(), Vec4::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(Hsb::new(360.0, 1.0, 1.0).to_rgba(), Vec4::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn brightness_scales_channels() {
        let rgba = Hsb::new(60.0, 1.0, 0.5).to_rgba();
        assert_eq!(rgba, Vec4::new(0.5, 0.5, 0.0, 1.0));
        assert_eq!(Hsb::new(200.0, 0.0, 1.0).to_rgba(), Vec4::ONE);
    }
}
