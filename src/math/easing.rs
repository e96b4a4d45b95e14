//! Easing and interpolation for particle motion

/// Ease-out-cubic curve `1 - (1 - t)^3`
///
/// Fast start, slow settle. `t` is clamped to `[0, 1]` and the endpoints map
/// exactly: `ease_out_cubic(0.0) == 0.0` and `ease_out_cubic(1.0) == 1.0`.
pub fn ease_out_cubic(t: f32) -> f32 {
    let remaining = 1.0 - t.clamp(0.0, 1.0);
    remaining.mul_add(-(remaining * remaining), 1.0)
}

/// Linear interpolation between `start` and `end`
///
/// Weighted as `start * (1 - w) + end * w` so a weight of 0 returns `start`
/// and a weight of 1 returns `end` without rounding drift.
pub fn lerp(start: f32, end: f32, weight: f32) -> f32 {
    start.mul_add(1.0 - weight, end * weight)
}
