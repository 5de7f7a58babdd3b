//! Offset post-processing: bounds first, then snapping.

use crate::config::GestureConfig;
use crate::event::GestureKind;
use tactile_ui_graphics::{clamp, rubberband, snap, Vec2};

/// Constrains a raw offset before it is emitted.
///
/// Movement bounds stretch by the rubberband factor when one is set and
/// clamp otherwise. Pinch offsets are clamped by the scale and angle ranges
/// instead, falling back to the movement bounds when neither is set. Snapping only happens on the final update of a gesture that has
/// no inertia, since the simulator snaps when it settles.
pub fn process_offset(
    kind: GestureKind,
    offset: Vec2,
    config: &GestureConfig,
    is_final: bool,
    physics_enabled: bool,
    default_snap_threshold: f32,
) -> Vec2 {
    let mut offset = offset;

    if let Some(bounds) = &config.bounds {
        let pinch_ranges = bounds.scale.is_some() || bounds.angle.is_some();
        if kind == GestureKind::Pinch && pinch_ranges {
            if let Some(scale) = bounds.scale {
                offset.x = scale.clamp(offset.x);
            }
            if let Some(angle) = bounds.angle {
                offset.y = angle.clamp(offset.y);
            }
        } else if let Some(movement) = &bounds.movement {
            offset = match bounds.rubberband {
                Some(factor) => rubberband(offset, movement, factor),
                None => clamp(offset, movement),
            };
        }
    }

    if is_final && !physics_enabled {
        if let Some(snap_config) = &config.snap {
            offset = snap(offset, snap_config, default_snap_threshold);
        }
    }

    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Bounds, DEFAULT_SNAP_THRESHOLD};
    use tactile_ui_graphics::{SnapConfig, SnapPoints};

    fn process(config: &GestureConfig, offset: Vec2, is_final: bool, physics: bool) -> Vec2 {
        process_offset(
            GestureKind::Drag,
            offset,
            config,
            is_final,
            physics,
            DEFAULT_SNAP_THRESHOLD,
        )
    }

    #[test]
    fn clamps_without_rubberband() {
        let config = GestureConfig::new().with_bounds(Bounds::movement([0.0, 0.0], [100.0, 100.0]));
        assert_eq!(
            process(&config, Vec2::new(150.0, 40.0), false, false),
            Vec2::new(100.0, 40.0)
        );
    }

    #[test]
    fn rubberband_lets_offsets_overshoot() {
        let config = GestureConfig::new()
            .with_bounds(Bounds::movement([0.0, 0.0], [100.0, 100.0]).with_rubberband(0.2));
        let out = process(&config, Vec2::new(150.0, -50.0), false, false);
        assert!((out.x - 110.0).abs() < 1e-4);
        assert!((out.y + 10.0).abs() < 1e-4);
    }

    #[test]
    fn snaps_only_on_final_update_without_physics() {
        let config = GestureConfig::new().with_snap(SnapConfig::new(SnapPoints::unified([0.0, 50.0])));
        let raw = Vec2::new(45.0, 3.0);
        assert_eq!(process(&config, raw, false, false), raw);
        assert_eq!(process(&config, raw, true, true), raw);
        assert_eq!(process(&config, raw, true, false), Vec2::new(50.0, 0.0));
    }

    #[test]
    fn bounds_apply_before_snap() {
        let config = GestureConfig::new()
            .with_bounds(Bounds::movement([0.0, 0.0], [100.0, 100.0]))
            .with_snap(SnapConfig::new(SnapPoints::unified([90.0])).with_threshold(15.0));
        assert_eq!(
            process(&config, Vec2::new(400.0, 95.0), true, false),
            Vec2::new(90.0, 90.0)
        );
    }

    #[test]
    fn pinch_uses_scale_and_angle_ranges() {
        let config = GestureConfig::new().with_bounds(
            Bounds::movement([0.0, 0.0], [1.0, 1.0])
                .with_scale(0.5, 3.0)
                .with_angle(-90.0, 90.0),
        );
        let out = process_offset(
            GestureKind::Pinch,
            Vec2::new(4.0, -120.0),
            &config,
            false,
            false,
            DEFAULT_SNAP_THRESHOLD,
        );
        assert_eq!(out, Vec2::new(3.0, -90.0));
    }

    #[test]
    fn pinch_without_ranges_falls_back_to_movement_bounds() {
        let config =
            GestureConfig::new().with_bounds(Bounds::movement([0.5, -45.0], [2.0, 45.0]));
        let out = process_offset(
            GestureKind::Pinch,
            Vec2::new(4.0, -120.0),
            &config,
            false,
            false,
            DEFAULT_SNAP_THRESHOLD,
        );
        assert_eq!(out, Vec2::new(2.0, -45.0));
    }

    #[test]
    fn empty_snap_points_are_identity() {
        let config = GestureConfig::new().with_snap(SnapConfig::default());
        let raw = Vec2::new(12.0, 7.0);
        assert_eq!(process(&config, raw, true, false), raw);
    }
}
