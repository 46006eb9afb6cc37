//! Keyframe sampling.
//!
//! Model:
//! - A keyed property holds keyframes ordered by time (seconds).
//! - Before the first key the first value holds; after the last key the last value holds.
//! - Between keys the LEFT key's interpolation decides the segment shape
//!   (hold, linear, cubic-bezier timing).

use crate::interp::interpolate;
use crate::timeline::KeyFrame;

/// Find the segment [i, i+1] that contains `seconds`, and return (i, i+1, local_t),
/// where local_t is normalized to [0, 1] between keys[i].seconds .. keys[i+1].seconds.
/// Edge cases:
/// - If seconds <= first.seconds, returns (0, 0, 0).
/// - If seconds >= last.seconds, returns (last, last, 0).
fn find_segment(keys: &[KeyFrame], seconds: f32) -> (usize, usize, f32) {
    let n = keys.len();
    if n <= 1 || seconds <= keys[0].seconds {
        return (0, 0, 0.0);
    }
    if seconds >= keys[n - 1].seconds {
        return (n - 1, n - 1, 0.0);
    }
    // First key strictly after `seconds`; the guards above keep it in 1..n.
    let right = keys.partition_point(|k| k.seconds <= seconds);
    let left = right - 1;
    let t0 = keys[left].seconds;
    let t1 = keys[right].seconds;
    let denom = (t1 - t0).max(f32::EPSILON);
    (left, right, ((seconds - t0) / denom).clamp(0.0, 1.0))
}

/// Sample keyframes at `seconds`. Returns `None` when there are no keys.
pub fn sample_keyframes(keys: &[KeyFrame], seconds: f32) -> Option<f32> {
    match keys.len() {
        0 => None,
        1 => Some(keys[0].value),
        _ => {
            let (i0, i1, lt) = find_segment(keys, seconds);
            if i0 == i1 {
                return Some(keys[i0].value);
            }
            let left = &keys[i0];
            let right = &keys[i1];
            Some(interpolate(left.interpolation, left.value, right.value, lt))
        }
    }
}
