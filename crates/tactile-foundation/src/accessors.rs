//! Typed accessors and predicates over [`GestureEvent`].
//!
//! Accessors never panic: a field the variant does not carry reads as `None`.

use crate::event::{GestureEvent, GestureState, PointerType, SwipeDirection};
use tactile_ui_graphics::Vec2;

impl GestureEvent {
    pub fn is_drag(&self) -> bool {
        matches!(self, GestureEvent::Drag(_))
    }

    pub fn is_hover(&self) -> bool {
        matches!(self, GestureEvent::Hover(_))
    }

    pub fn is_move(&self) -> bool {
        matches!(self, GestureEvent::Move(_))
    }

    pub fn is_pinch(&self) -> bool {
        matches!(self, GestureEvent::Pinch(_))
    }

    pub fn is_scroll(&self) -> bool {
        matches!(self, GestureEvent::Scroll(_))
    }

    pub fn is_wheel(&self) -> bool {
        matches!(self, GestureEvent::Wheel(_))
    }

    pub fn is_long_press(&self) -> bool {
        matches!(self, GestureEvent::LongPress(_))
    }

    /// True for the six coordinate variants.
    pub fn has_state(&self) -> bool {
        self.gesture_state().is_some()
    }

    /// The shared raw snapshot, absent for LongPress.
    pub fn gesture_state(&self) -> Option<&GestureState> {
        match self {
            GestureEvent::Drag(s) => Some(&s.state),
            GestureEvent::Hover(s) | GestureEvent::Move(s) => Some(&s.state),
            GestureEvent::Pinch(s) => Some(&s.state),
            GestureEvent::Scroll(s) | GestureEvent::Wheel(s) => Some(&s.state),
            GestureEvent::LongPress(_) => None,
        }
    }

    pub fn offset(&self) -> Option<Vec2> {
        self.gesture_state().map(|s| s.offset)
    }

    pub fn velocity(&self) -> Option<Vec2> {
        self.gesture_state().map(|s| s.velocity)
    }

    pub fn movement(&self) -> Option<Vec2> {
        self.gesture_state().map(|s| s.movement)
    }

    pub fn delta(&self) -> Option<Vec2> {
        self.gesture_state().map(|s| s.delta)
    }

    pub fn direction(&self) -> Option<Vec2> {
        self.gesture_state().map(|s| s.direction)
    }

    pub fn distance(&self) -> Option<Vec2> {
        self.gesture_state().map(|s| s.distance)
    }

    pub fn initial(&self) -> Option<Vec2> {
        self.gesture_state().map(|s| s.initial)
    }

    pub fn overflow(&self) -> Option<Vec2> {
        self.gesture_state().map(|s| s.overflow)
    }

    pub fn elapsed_time(&self) -> Option<f32> {
        self.gesture_state().map(|s| s.elapsed_time)
    }

    /// Pointer position for Drag, Hover and Move.
    pub fn xy(&self) -> Option<Vec2> {
        match self {
            GestureEvent::Drag(s) => Some(s.xy),
            GestureEvent::Hover(s) | GestureEvent::Move(s) => Some(s.xy),
            _ => None,
        }
    }

    pub fn origin(&self) -> Option<Vec2> {
        match self {
            GestureEvent::Pinch(s) => Some(s.origin),
            _ => None,
        }
    }

    pub fn da(&self) -> Option<Vec2> {
        match self {
            GestureEvent::Pinch(s) => Some(s.da),
            _ => None,
        }
    }

    pub fn turns(&self) -> Option<f32> {
        match self {
            GestureEvent::Pinch(s) => Some(s.turns),
            _ => None,
        }
    }

    pub fn tap(&self) -> Option<bool> {
        match self {
            GestureEvent::Drag(s) => Some(s.tap),
            _ => None,
        }
    }

    pub fn swipe(&self) -> Option<SwipeDirection> {
        match self {
            GestureEvent::Drag(s) => s.swipe,
            _ => None,
        }
    }

    pub fn progress(&self) -> Option<f32> {
        match self {
            GestureEvent::LongPress(s) => Some(s.progress),
            _ => None,
        }
    }

    pub fn pointer_type(&self) -> Option<PointerType> {
        match self {
            GestureEvent::LongPress(s) => Some(s.pointer_type),
            _ => None,
        }
    }

    /// LongPress is active while its progress is strictly between 0 and 1.
    pub fn is_active(&self) -> bool {
        match self {
            GestureEvent::LongPress(s) => s.progress > 0.0 && s.progress < 1.0,
            _ => self.gesture_state().is_some_and(|s| s.active),
        }
    }

    /// LongPress is first at progress 0.
    pub fn is_first(&self) -> bool {
        match self {
            GestureEvent::LongPress(s) => s.progress <= 0.0,
            _ => self.gesture_state().is_some_and(|s| s.first),
        }
    }

    /// LongPress is last once the threshold is reached.
    pub fn is_last(&self) -> bool {
        match self {
            GestureEvent::LongPress(s) => s.progress >= 1.0,
            _ => self.gesture_state().is_some_and(|s| s.last),
        }
    }

    /// LongPress never reports itself canceled; see [`crate::GesturePhase::Cancel`].
    pub fn is_canceled(&self) -> bool {
        match self {
            GestureEvent::LongPress(_) => false,
            _ => self.gesture_state().is_some_and(|s| s.canceled),
        }
    }

    /// LongPress becomes intentional as soon as any progress was made.
    pub fn is_intentional(&self) -> bool {
        match self {
            GestureEvent::LongPress(s) => s.progress > 0.0,
            _ => self.gesture_state().is_some_and(|s| s.intentional),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::event::*;
    use tactile_ui_graphics::Vec2;

    fn raw(first: bool, last: bool) -> RawGestureState {
        RawGestureState {
            state: GestureState {
                offset: Vec2::new(3.0, 4.0),
                velocity: Vec2::new(0.5, 0.0),
                active: !last,
                first,
                last,
                intentional: true,
                ..GestureState::default()
            },
            xy: Vec2::new(10.0, 20.0),
            origin: Vec2::new(1.0, 1.0),
            da: Vec2::new(50.0, 90.0),
            turns: 0.25,
            swipe: Vec2::new(-1.0, 0.0),
            ..RawGestureState::default()
        }
    }

    struct Describe;

    impl GestureEventMatcher for Describe {
        type Output = &'static str;

        fn on_drag(self, _: &DragState) -> &'static str {
            "drag"
        }
        fn on_hover(self, _: &PointerState) -> &'static str {
            "hover"
        }
        fn on_move(self, _: &PointerState) -> &'static str {
            "move"
        }
        fn on_pinch(self, _: &PinchState) -> &'static str {
            "pinch"
        }
        fn on_scroll(self, _: &AxisState) -> &'static str {
            "scroll"
        }
        fn on_wheel(self, _: &AxisState) -> &'static str {
            "wheel"
        }
        fn on_long_press(self, _: &LongPressState) -> &'static str {
            "longpress"
        }
    }

    #[test]
    fn matcher_visits_every_variant() {
        for kind in GestureKind::COORDINATE_KINDS {
            let event = GestureEvent::from_raw(kind, &raw(true, false)).expect("coordinate kind");
            assert_eq!(event.kind(), kind);
            assert_eq!(event.match_with(Describe), kind.as_str());
        }
        let long_press = GestureEvent::long_press(0.5, PointerType::Touch);
        assert_eq!(long_press.match_with(Describe), "longpress");
        assert!(GestureEvent::from_raw(GestureKind::LongPress, &raw(true, false)).is_none());
    }

    #[test]
    fn accessors_are_absent_for_foreign_fields() {
        let drag = GestureEvent::from_raw(GestureKind::Drag, &raw(false, false)).unwrap();
        assert_eq!(drag.offset(), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(drag.xy(), Some(Vec2::new(10.0, 20.0)));
        assert_eq!(drag.tap(), Some(false));
        assert_eq!(drag.origin(), None);
        assert_eq!(drag.turns(), None);
        assert_eq!(drag.progress(), None);

        let pinch = GestureEvent::from_raw(GestureKind::Pinch, &raw(false, false)).unwrap();
        assert_eq!(pinch.da(), Some(Vec2::new(50.0, 90.0)));
        assert_eq!(pinch.turns(), Some(0.25));
        assert_eq!(pinch.xy(), None);
        assert_eq!(pinch.swipe(), None);

        let long_press = GestureEvent::long_press(0.3, PointerType::Mouse);
        assert!(!long_press.has_state());
        assert_eq!(long_press.offset(), None);
        assert_eq!(long_press.velocity(), None);
        assert_eq!(long_press.pointer_type(), Some(PointerType::Mouse));
    }

    #[test]
    fn swipe_only_present_on_last_update() {
        let moving = GestureEvent::from_raw(GestureKind::Drag, &raw(false, false)).unwrap();
        assert_eq!(moving.swipe(), None);
        let released = GestureEvent::from_raw(GestureKind::Drag, &raw(false, true)).unwrap();
        assert_eq!(released.swipe(), Some(SwipeDirection::Left));
    }

    #[test]
    fn swipe_direction_mapping() {
        assert_eq!(SwipeDirection::from_vector(Vec2::new(1.0, 0.0)), Some(SwipeDirection::Right));
        assert_eq!(SwipeDirection::from_vector(Vec2::new(-1.0, 0.0)), Some(SwipeDirection::Left));
        assert_eq!(SwipeDirection::from_vector(Vec2::new(0.0, 1.0)), Some(SwipeDirection::Down));
        assert_eq!(SwipeDirection::from_vector(Vec2::new(0.0, -1.0)), Some(SwipeDirection::Up));
        assert_eq!(SwipeDirection::from_vector(Vec2::ZERO), None);
        assert_eq!(SwipeDirection::from_vector(Vec2::new(1.0, 1.0)), None);
        assert_eq!(SwipeDirection::from_vector(Vec2::new(0.5, 0.0)), None);
    }

    #[test]
    fn long_press_predicates_follow_progress() {
        let started = GestureEvent::long_press(0.0, PointerType::Touch);
        assert!(started.is_first());
        assert!(!started.is_active());
        assert!(!started.is_intentional());

        let pressing = GestureEvent::long_press(0.4, PointerType::Touch);
        assert!(pressing.is_active());
        assert!(pressing.is_intentional());
        assert!(!pressing.is_last());

        let fired = GestureEvent::long_press(1.7, PointerType::Touch);
        assert_eq!(fired.progress(), Some(1.0));
        assert!(fired.is_last());
        assert!(!fired.is_canceled());
    }

    #[test]
    fn coordinate_predicates_defer_to_raw_state() {
        let first = GestureEvent::from_raw(GestureKind::Scroll, &raw(true, false)).unwrap();
        assert!(first.is_first());
        assert!(first.is_active());
        assert!(first.is_intentional());
        assert!(!first.is_last());
        assert_eq!(GesturePhase::from_flags(true, true), GesturePhase::Start);
        assert_eq!(GesturePhase::from_flags(false, true), GesturePhase::End);
        assert_eq!(GesturePhase::from_flags(false, false), GesturePhase::Move);
    }
}
