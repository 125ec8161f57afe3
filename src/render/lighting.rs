// src/render/lighting.rs

//! Distance shading. Falloff is applied in linear light, not in display (sRGB) space.

use serde::{Deserialize, Serialize};

/// Display (sRGB) value in `[0, 1]` to linear light.
pub fn srgb_to_linear(value: f64) -> f64 {
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear light back to a display (sRGB) value.
pub fn linear_to_srgb(value: f64) -> f64 {
    if value <= 0.0031308 {
        12.92 * value
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

/// Inverse-square falloff. A non-positive distance returns `intensity` unscaled.
pub fn light_falloff(distance: f64, intensity: f64) -> f64 {
    if distance <= 0.0 {
        return intensity;
    }
    intensity / (distance * distance)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lighting {
    /// Light strength at unit distance.
    pub intensity: f64,
    /// Base display brightness of walls, `[0, 1]`.
    pub base_level: f64,
}

impl Default for Lighting {
    fn default() -> Self {
        Lighting {
            intensity: 50.0,
            base_level: 0.8,
        }
    }
}

impl Lighting {
    /// Shade factor in `[0, 1]` for a wall `distance` away.
    pub fn shade(&self, distance: f64) -> f64 {
        let linear = srgb_to_linear(self.base_level) * light_falloff(distance, self.intensity);
        linear_to_srgb(linear).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_gamma_round_trip() {
        for i in 0..=20 {
            let v = i as f64 / 20.0;
            assert_approx_eq!(linear_to_srgb(srgb_to_linear(v)), v, 1e-9);
        }
    }

    #[test]
    fn test_falloff_guards_zero_distance() {
        assert_eq!(light_falloff(0.0, 7.0), 7.0);
        assert_eq!(light_falloff(-1.0, 7.0), 7.0);
        assert_eq!(light_falloff(2.0, 8.0), 2.0);
    }

    #[test]
    fn test_shade_darkens_with_distance_and_clamps() {
        let lighting = Lighting::default();
        assert_eq!(lighting.shade(0.5), 1.0);
        let near = lighting.shade(8.0);
        let far = lighting.shade(16.0);
        assert!(near > far);
        assert!(far > 0.0 && near < 1.0);
    }

    #[test]
    fn test_shade_matches_formula() {
        let lighting = Lighting {
            intensity: 4.0,
            base_level: 0.5,
        };
        let expected = linear_to_srgb(srgb_to_linear(0.5) * 4.0 / 9.0);
        assert_approx_eq!(lighting.shade(3.0), expected, 1e-12);
    }
}
