//! Keyframe interpolation.
//!
//! Hold, linear and cubic-bezier timing. Values are scalar `f32` scene
//! properties, so every interpolator reduces to easing `t` and lerping.

pub mod functions;

use crate::data::Interpolation;
use functions::{bezier_ease_t, lerp_f32};

/// Interpolate between `a` and `b` at local segment time `t` in [0, 1].
#[inline]
pub fn interpolate(interpolation: Interpolation, a: f32, b: f32, t: f32) -> f32 {
    match interpolation {
        Interpolation::Hold => a,
        Interpolation::Linear => lerp_f32(a, b, t.clamp(0.0, 1.0)),
        Interpolation::Cubic { x1, y1, x2, y2 } => lerp_f32(a, b, bezier_ease_t(t, x1, y1, x2, y2)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_keeps_left_value() {
        assert_eq!(interpolate(Interpolation::Hold, 2.0, 8.0, 0.99), 2.0);
    }

    #[test]
    fn linear_cubic_matches_linear() {
        let cubic = Interpolation::Cubic {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
        };
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let a = interpolate(Interpolation::Linear, 0.0, 4.0, t);
            let b = interpolate(cubic, 0.0, 4.0, t);
            assert!((a - b).abs() < 1e-5, "t={t} linear={a} cubic={b}");
        }
    }
}
