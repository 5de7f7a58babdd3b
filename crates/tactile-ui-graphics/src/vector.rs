//! Bounds, rubberband and snapping over [`Vec2`].
//!
//! All functions are total: malformed inputs (inverted bounds, empty snap
//! sets, non-finite factors) return the input unchanged.

use crate::{MovementBounds, Range, SnapConfig, Vec2};

/// Component-wise clamp into `bounds`.
pub fn clamp(v: Vec2, bounds: &MovementBounds) -> Vec2 {
    Vec2::new(bounds.x_range().clamp(v.x), bounds.y_range().clamp(v.y))
}

/// Resistance-scaled overshoot past `bounds`.
///
/// A component outside `[min, max]` becomes `boundary + (x - boundary) * factor`.
/// Components inside the bounds pass through untouched.
pub fn rubberband(v: Vec2, bounds: &MovementBounds, factor: f32) -> Vec2 {
    if !factor.is_finite() || factor < 0.0 {
        return v;
    }
    Vec2::new(
        rubberband_axis(v.x, bounds.x_range(), factor),
        rubberband_axis(v.y, bounds.y_range(), factor),
    )
}

fn rubberband_axis(value: f32, range: Range, factor: f32) -> f32 {
    if range.min > range.max {
        return value;
    }
    if value > range.max {
        range.max + (value - range.max) * factor
    } else if value < range.min {
        range.min + (value - range.min) * factor
    } else {
        value
    }
}

/// Replaces each component with its nearest snap candidate when that
/// candidate lies strictly closer than the threshold.
///
/// Ties keep the first candidate in iteration order.
pub fn snap(v: Vec2, config: &SnapConfig, default_threshold: f32) -> Vec2 {
    let threshold = config.threshold_or(default_threshold);
    if threshold.is_nan() || threshold <= 0.0 {
        return v;
    }
    Vec2::new(
        snap_axis(v.x, config.points.x(), threshold),
        snap_axis(v.y, config.points.y(), threshold),
    )
}

fn snap_axis(value: f32, candidates: &[f32], threshold: f32) -> f32 {
    let mut nearest: Option<(f32, f32)> = None;
    for &candidate in candidates {
        let distance = (candidate - value).abs();
        if distance.is_nan() {
            continue;
        }
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((candidate, distance)),
        }
    }
    match nearest {
        Some((candidate, distance)) if distance < threshold => candidate,
        _ => value,
    }
}

/// Euclidean norm.
pub fn magnitude(v: Vec2) -> f32 {
    v.length()
}
