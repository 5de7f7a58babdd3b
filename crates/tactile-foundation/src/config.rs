//! Per-element gesture configuration.
//!
//! A [`GestureConfig`] is built once per bound element. Every sub-config is
//! optional; a gesture kind is recognized only when its sub-config or its
//! typed callback is present.

use crate::css_value::{
    CssVarReader, LONG_PRESS_CANCEL_DISTANCE_VAR, LONG_PRESS_HAPTIC_VAR,
    LONG_PRESS_THRESHOLD_VAR, SNAP_THRESHOLD_VAR,
};
use crate::css_vars::CssVarConfig;
use crate::event::{Axis, GestureEvent, GestureKind, GesturePhase, PointerType, SwipeDirection};
use smallvec::SmallVec;
use std::rc::Rc;
use tactile_animation::DecaySpec;
use tactile_ui_graphics::{MovementBounds, Range, SnapConfig, Vec2};

/// Snap threshold used when neither the config nor the host sets one.
pub const DEFAULT_SNAP_THRESHOLD: f32 = 20.0;

/// Long-press threshold used when neither the config nor the host sets one.
pub const DEFAULT_LONG_PRESS_THRESHOLD_MS: u64 = 500;

/// Receives every recognized update together with its phase.
pub type GestureHandler = Rc<dyn Fn(&GestureEvent, GesturePhase)>;
pub type SwipeHandler = Rc<dyn Fn(SwipeDirection)>;
pub type CoordinateTransform = Rc<dyn Fn(Vec2) -> Vec2>;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragConfig {
    /// Locks the drag to one axis.
    pub axis: Option<Axis>,
    /// Lets the recognizer report taps as drags with `tap` set.
    pub filter_taps: bool,
}

impl DragConfig {
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn with_filter_taps(mut self, filter_taps: bool) -> Self {
        self.filter_taps = filter_taps;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PinchConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollConfig {
    pub axis: Option<Axis>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelConfig {
    pub axis: Option<Axis>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HoverConfig;

/// Limits applied to offsets before they are emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub movement: Option<MovementBounds>,
    /// Overshoot factor; when set, movement bounds stretch instead of clamping.
    pub rubberband: Option<f32>,
    /// Clamp for the pinch scale (offset x).
    pub scale: Option<Range>,
    /// Clamp for the pinch angle in degrees (offset y).
    pub angle: Option<Range>,
}

impl Bounds {
    pub fn movement(min: impl Into<Vec2>, max: impl Into<Vec2>) -> Self {
        Self {
            movement: Some(MovementBounds::new(min, max)),
            ..Self::default()
        }
    }

    pub fn with_rubberband(mut self, factor: f32) -> Self {
        self.rubberband = Some(factor);
        self
    }

    pub fn with_scale(mut self, min: f32, max: f32) -> Self {
        self.scale = Some(Range::new(min, max));
        self
    }

    pub fn with_angle(mut self, min: f32, max: f32) -> Self {
        self.angle = Some(Range::new(min, max));
        self
    }
}

/// Momentum after a drag is released.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhysicsConfig {
    /// Inertia runs only when a decay is configured.
    pub decay: Option<DecaySpec>,
    /// Scales the recognizer's release velocity into per-frame units.
    pub velocity_multiplier: Option<f32>,
}

impl PhysicsConfig {
    pub fn decay(power: f32, rest_delta: f32) -> Self {
        Self {
            decay: Some(DecaySpec::new(power, rest_delta)),
            velocity_multiplier: None,
        }
    }

    pub fn with_velocity_multiplier(mut self, multiplier: f32) -> Self {
        self.velocity_multiplier = Some(multiplier);
        self
    }

    pub fn velocity_multiplier_or_default(&self) -> f32 {
        match self.velocity_multiplier {
            Some(m) if m.is_finite() => m,
            Some(m) => {
                log::warn!("ignoring non-finite velocity multiplier {m}");
                1.0
            }
            None => 1.0,
        }
    }
}

/// Long-press timing and feedback.
///
/// Omitted durations are resolved from the host's custom properties, see
/// [`LongPressConfig::resolve`].
#[derive(Clone, Default)]
pub struct LongPressConfig {
    pub threshold_ms: Option<u64>,
    /// Pointer travel in px that cancels a press in progress.
    pub cancel_distance: Option<f32>,
    /// Vibration length in ms when the press fires.
    pub haptic_ms: Option<u32>,
    /// Re-fires the press every interval while held.
    pub repeat_interval_ms: Option<u64>,
    /// Called each time the press fires, repeats included.
    pub on_activate: Option<Rc<dyn Fn(PointerType)>>,
}

impl LongPressConfig {
    pub fn with_threshold_ms(mut self, threshold_ms: u64) -> Self {
        self.threshold_ms = Some(threshold_ms);
        self
    }

    pub fn with_cancel_distance(mut self, distance: f32) -> Self {
        self.cancel_distance = Some(distance);
        self
    }

    pub fn with_haptic_ms(mut self, duration_ms: u32) -> Self {
        self.haptic_ms = Some(duration_ms);
        self
    }

    pub fn with_repeat_interval_ms(mut self, interval_ms: u64) -> Self {
        self.repeat_interval_ms = Some(interval_ms);
        self
    }

    pub fn on_activate(mut self, f: impl Fn(PointerType) + 'static) -> Self {
        self.on_activate = Some(Rc::new(f));
        self
    }

    /// Fills omitted durations from the host, then from built-in defaults.
    pub fn resolve(&self, css: Option<&dyn CssVarReader>) -> ResolvedLongPress {
        let threshold_ms = self
            .threshold_ms
            .or_else(|| css.and_then(|c| c.read_css_ms(LONG_PRESS_THRESHOLD_VAR)))
            .unwrap_or(DEFAULT_LONG_PRESS_THRESHOLD_MS);
        if threshold_ms == 0 {
            log::warn!("long-press threshold is zero; presses fire immediately");
        }
        let cancel_distance = self
            .cancel_distance
            .or_else(|| css.and_then(|c| c.read_css_px(LONG_PRESS_CANCEL_DISTANCE_VAR)));
        let haptic_ms = self.haptic_ms.or_else(|| {
            css.and_then(|c| c.read_css_ms(LONG_PRESS_HAPTIC_VAR))
                .map(|ms| ms.min(u32::MAX as u64) as u32)
        });
        ResolvedLongPress {
            threshold_ms,
            cancel_distance,
            haptic_ms: haptic_ms.filter(|ms| *ms > 0),
            repeat_interval_ms: self.repeat_interval_ms.unwrap_or(0),
        }
    }
}

impl std::fmt::Debug for LongPressConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LongPressConfig")
            .field("threshold_ms", &self.threshold_ms)
            .field("cancel_distance", &self.cancel_distance)
            .field("haptic_ms", &self.haptic_ms)
            .field("repeat_interval_ms", &self.repeat_interval_ms)
            .field("on_activate", &self.on_activate.is_some())
            .finish()
    }
}

/// Long-press settings with every default applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedLongPress {
    pub threshold_ms: u64,
    pub cancel_distance: Option<f32>,
    pub haptic_ms: Option<u32>,
    /// Zero disables repeating.
    pub repeat_interval_ms: u64,
}

/// Typed per-kind callbacks plus the generic ones.
#[derive(Clone, Default)]
pub struct GestureCallbacks {
    pub on_drag: Option<GestureHandler>,
    pub on_pinch: Option<GestureHandler>,
    pub on_scroll: Option<GestureHandler>,
    pub on_wheel: Option<GestureHandler>,
    pub on_move: Option<GestureHandler>,
    pub on_hover: Option<GestureHandler>,
    pub on_long_press: Option<GestureHandler>,
    /// Called after the typed callback for every kind.
    pub on_gesture: Option<GestureHandler>,
    pub on_swipe: Option<SwipeHandler>,
}

impl GestureCallbacks {
    pub fn typed(&self, kind: GestureKind) -> Option<&GestureHandler> {
        match kind {
            GestureKind::Drag => self.on_drag.as_ref(),
            GestureKind::Pinch => self.on_pinch.as_ref(),
            GestureKind::Scroll => self.on_scroll.as_ref(),
            GestureKind::Wheel => self.on_wheel.as_ref(),
            GestureKind::Move => self.on_move.as_ref(),
            GestureKind::Hover => self.on_hover.as_ref(),
            GestureKind::LongPress => self.on_long_press.as_ref(),
        }
    }

    /// Typed callback first, then `on_gesture`.
    pub(crate) fn dispatch(&self, event: &GestureEvent, phase: GesturePhase) {
        if let Some(handler) = self.typed(event.kind()) {
            handler(event, phase);
        }
        if let Some(handler) = &self.on_gesture {
            handler(event, phase);
        }
    }
}

impl std::fmt::Debug for GestureCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: SmallVec<[&str; 9]> = [
            ("on_drag", self.on_drag.is_some()),
            ("on_pinch", self.on_pinch.is_some()),
            ("on_scroll", self.on_scroll.is_some()),
            ("on_wheel", self.on_wheel.is_some()),
            ("on_move", self.on_move.is_some()),
            ("on_hover", self.on_hover.is_some()),
            ("on_long_press", self.on_long_press.is_some()),
            ("on_gesture", self.on_gesture.is_some()),
            ("on_swipe", self.on_swipe.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect();
        f.debug_tuple("GestureCallbacks").field(&names).finish()
    }
}

/// Everything one bound element needs.
#[derive(Clone, Default)]
pub struct GestureConfig {
    pub drag: Option<DragConfig>,
    pub pinch: Option<PinchConfig>,
    pub scroll: Option<ScrollConfig>,
    pub wheel: Option<WheelConfig>,
    pub pointer_move: Option<MoveConfig>,
    pub hover: Option<HoverConfig>,
    pub long_press: Option<LongPressConfig>,
    pub bounds: Option<Bounds>,
    pub snap: Option<SnapConfig>,
    pub physics: Option<PhysicsConfig>,
    pub css_vars: Option<CssVarConfig>,
    /// Maps pointer positions of Drag, Hover and Move before events are built.
    pub transform: Option<CoordinateTransform>,
    pub callbacks: GestureCallbacks,
    pub disabled: bool,
}

impl GestureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drag(mut self, drag: DragConfig) -> Self {
        self.drag = Some(drag);
        self
    }

    pub fn with_pinch(mut self, pinch: PinchConfig) -> Self {
        self.pinch = Some(pinch);
        self
    }

    pub fn with_scroll(mut self, scroll: ScrollConfig) -> Self {
        self.scroll = Some(scroll);
        self
    }

    pub fn with_wheel(mut self, wheel: WheelConfig) -> Self {
        self.wheel = Some(wheel);
        self
    }

    pub fn with_move(mut self, pointer_move: MoveConfig) -> Self {
        self.pointer_move = Some(pointer_move);
        self
    }

    pub fn with_hover(mut self, hover: HoverConfig) -> Self {
        self.hover = Some(hover);
        self
    }

    pub fn with_long_press(mut self, long_press: LongPressConfig) -> Self {
        self.long_press = Some(long_press);
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_snap(mut self, snap: SnapConfig) -> Self {
        self.snap = Some(snap);
        self
    }

    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = Some(physics);
        self
    }

    pub fn with_css_vars(mut self, css_vars: CssVarConfig) -> Self {
        self.css_vars = Some(css_vars);
        self
    }

    pub fn with_transform(mut self, transform: impl Fn(Vec2) -> Vec2 + 'static) -> Self {
        self.transform = Some(Rc::new(transform));
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_drag(mut self, f: impl Fn(&GestureEvent, GesturePhase) + 'static) -> Self {
        self.callbacks.on_drag = Some(Rc::new(f));
        self
    }

    pub fn on_pinch(mut self, f: impl Fn(&GestureEvent, GesturePhase) + 'static) -> Self {
        self.callbacks.on_pinch = Some(Rc::new(f));
        self
    }

    pub fn on_scroll(mut self, f: impl Fn(&GestureEvent, GesturePhase) + 'static) -> Self {
        self.callbacks.on_scroll = Some(Rc::new(f));
        self
    }

    pub fn on_wheel(mut self, f: impl Fn(&GestureEvent, GesturePhase) + 'static) -> Self {
        self.callbacks.on_wheel = Some(Rc::new(f));
        self
    }

    pub fn on_move(mut self, f: impl Fn(&GestureEvent, GesturePhase) + 'static) -> Self {
        self.callbacks.on_move = Some(Rc::new(f));
        self
    }

    pub fn on_hover(mut self, f: impl Fn(&GestureEvent, GesturePhase) + 'static) -> Self {
        self.callbacks.on_hover = Some(Rc::new(f));
        self
    }

    pub fn on_long_press(mut self, f: impl Fn(&GestureEvent, GesturePhase) + 'static) -> Self {
        self.callbacks.on_long_press = Some(Rc::new(f));
        self
    }

    pub fn on_gesture(mut self, f: impl Fn(&GestureEvent, GesturePhase) + 'static) -> Self {
        self.callbacks.on_gesture = Some(Rc::new(f));
        self
    }

    pub fn on_swipe(mut self, f: impl Fn(SwipeDirection) + 'static) -> Self {
        self.callbacks.on_swipe = Some(Rc::new(f));
        self
    }

    /// Whether the sub-config for `kind` is present.
    pub fn configures(&self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::Drag => self.drag.is_some(),
            GestureKind::Pinch => self.pinch.is_some(),
            GestureKind::Scroll => self.scroll.is_some(),
            GestureKind::Wheel => self.wheel.is_some(),
            GestureKind::Move => self.pointer_move.is_some(),
            GestureKind::Hover => self.hover.is_some(),
            GestureKind::LongPress => self.long_press.is_some(),
        }
    }

    /// Coordinate kinds handed to the recognizer, in a fixed order.
    pub fn recognized_kinds(&self) -> SmallVec<[GestureKind; 6]> {
        GestureKind::COORDINATE_KINDS
            .into_iter()
            .filter(|kind| self.configures(*kind) || self.callbacks.typed(*kind).is_some())
            .collect()
    }

    /// Inertia applies to drags with a decay configured.
    pub fn physics_enabled(&self, kind: GestureKind) -> bool {
        kind == GestureKind::Drag && self.physics.is_some_and(|p| p.decay.is_some())
    }

    pub fn snap_threshold(&self, css: Option<&dyn CssVarReader>) -> f32 {
        css.and_then(|c| c.read_css_px(SNAP_THRESHOLD_VAR))
            .unwrap_or(DEFAULT_SNAP_THRESHOLD)
    }
}

impl std::fmt::Debug for GestureConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureConfig")
            .field("drag", &self.drag)
            .field("pinch", &self.pinch)
            .field("scroll", &self.scroll)
            .field("wheel", &self.wheel)
            .field("pointer_move", &self.pointer_move)
            .field("hover", &self.hover)
            .field("long_press", &self.long_press)
            .field("bounds", &self.bounds)
            .field("snap", &self.snap)
            .field("physics", &self.physics)
            .field("css_vars", &self.css_vars)
            .field("transform", &self.transform.is_some())
            .field("callbacks", &self.callbacks)
            .field("disabled", &self.disabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[derive(Default)]
    struct Vars(FxHashMap<&'static str, &'static str>);

    impl CssVarReader for Vars {
        fn read_css_var(&self, name: &str) -> Option<String> {
            self.0.get(name).map(|v| v.to_string())
        }
    }

    #[test]
    fn long_press_defaults_without_host() {
        let resolved = LongPressConfig::default().resolve(None);
        assert_eq!(
            resolved,
            ResolvedLongPress {
                threshold_ms: DEFAULT_LONG_PRESS_THRESHOLD_MS,
                cancel_distance: None,
                haptic_ms: None,
                repeat_interval_ms: 0,
            }
        );
    }

    #[test]
    fn long_press_reads_omitted_fields_from_host() {
        let mut vars = Vars::default();
        vars.0.insert(LONG_PRESS_THRESHOLD_VAR, "0.8s");
        vars.0.insert(LONG_PRESS_CANCEL_DISTANCE_VAR, "12px");
        vars.0.insert(LONG_PRESS_HAPTIC_VAR, "30ms");
        let resolved = LongPressConfig::default()
            .with_threshold_ms(300)
            .resolve(Some(&vars));
        assert_eq!(resolved.threshold_ms, 300);
        assert_eq!(resolved.cancel_distance, Some(12.0));
        assert_eq!(resolved.haptic_ms, Some(30));
    }

    #[test]
    fn snap_threshold_falls_back_on_bad_values() {
        let mut vars = Vars::default();
        vars.0.insert(SNAP_THRESHOLD_VAR, "wide");
        let config = GestureConfig::new();
        assert_eq!(config.snap_threshold(Some(&vars)), DEFAULT_SNAP_THRESHOLD);
        vars.0.insert(SNAP_THRESHOLD_VAR, "8px");
        assert_eq!(config.snap_threshold(Some(&vars)), 8.0);
    }

    #[test]
    fn recognized_kinds_follow_configs_and_callbacks() {
        let config = GestureConfig::new()
            .with_drag(DragConfig::default())
            .on_wheel(|_, _| {})
            .with_long_press(LongPressConfig::default());
        assert_eq!(
            config.recognized_kinds().as_slice(),
            &[GestureKind::Drag, GestureKind::Wheel]
        );
    }

    #[test]
    fn physics_only_for_drag_with_decay() {
        let config = GestureConfig::new().with_physics(PhysicsConfig::default());
        assert!(!config.physics_enabled(GestureKind::Drag));
        let config = config.with_physics(PhysicsConfig::decay(0.9, 0.5));
        assert!(config.physics_enabled(GestureKind::Drag));
        assert!(!config.physics_enabled(GestureKind::Pinch));
    }
}
