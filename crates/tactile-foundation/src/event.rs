//! The gesture event vocabulary.
//!
//! Six coordinate variants (Drag, Hover, Move, Pinch, Scroll, Wheel) carry a
//! full [`GestureState`] snapshot. LongPress carries only its progress and
//! the pointer type that started it.

use tactile_ui_graphics::Vec2;

/// Every gesture kind the engine recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GestureKind {
    Drag,
    Hover,
    Move,
    Pinch,
    Scroll,
    Wheel,
    LongPress,
}

impl GestureKind {
    /// Kinds delivered by the multi-pointer recognizer.
    pub const COORDINATE_KINDS: [GestureKind; 6] = [
        GestureKind::Drag,
        GestureKind::Hover,
        GestureKind::Move,
        GestureKind::Pinch,
        GestureKind::Scroll,
        GestureKind::Wheel,
    ];

    /// Slug used in attribute and custom-property names.
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureKind::Drag => "drag",
            GestureKind::Hover => "hover",
            GestureKind::Move => "move",
            GestureKind::Pinch => "pinch",
            GestureKind::Scroll => "scroll",
            GestureKind::Wheel => "wheel",
            GestureKind::LongPress => "longpress",
        }
    }

    pub fn is_coordinate(&self) -> bool {
        !matches!(self, GestureKind::LongPress)
    }

    /// Name of the `data-{kind}-state` attribute.
    pub fn state_attribute(&self) -> String {
        format!("data-{}-state", self.as_str())
    }
}

impl std::fmt::Display for GestureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where in its lifecycle an update sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    Start,
    Move,
    End,
    /// Only emitted by the long-press machine when movement cancels a press.
    Cancel,
}

impl GesturePhase {
    /// `first` wins over `last`, anything else is a move.
    pub fn from_flags(first: bool, last: bool) -> Self {
        if first {
            GesturePhase::Start
        } else if last {
            GesturePhase::End
        } else {
            GesturePhase::Move
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GesturePhase::Start => "start",
            GesturePhase::Move => "move",
            GesturePhase::End => "end",
            GesturePhase::Cancel => "cancel",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PointerType {
    #[default]
    Mouse,
    Pen,
    Touch,
    Keyboard,
    Virtual,
}

impl PointerType {
    /// Maps the DOM `pointerType` string. Unknown values are treated as mouse.
    pub fn from_dom(value: &str) -> Self {
        match value {
            "touch" => PointerType::Touch,
            "pen" => PointerType::Pen,
            "keyboard" => PointerType::Keyboard,
            "virtual" => PointerType::Virtual,
            _ => PointerType::Mouse,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Compass direction of a recognized swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    /// Maps one of the four unit vectors to a direction; anything else,
    /// including the zero vector, maps to `None`.
    pub fn from_vector(v: Vec2) -> Option<Self> {
        match (v.x, v.y) {
            (x, y) if x == 1.0 && y == 0.0 => Some(SwipeDirection::Right),
            (x, y) if x == -1.0 && y == 0.0 => Some(SwipeDirection::Left),
            (x, y) if x == 0.0 && y == 1.0 => Some(SwipeDirection::Down),
            (x, y) if x == 0.0 && y == -1.0 => Some(SwipeDirection::Up),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Vec2 {
        match self {
            SwipeDirection::Left => Vec2::new(-1.0, 0.0),
            SwipeDirection::Right => Vec2::new(1.0, 0.0),
            SwipeDirection::Up => Vec2::new(0.0, -1.0),
            SwipeDirection::Down => Vec2::new(0.0, 1.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
            SwipeDirection::Up => "up",
            SwipeDirection::Down => "down",
        }
    }
}

/// Fields shared by every coordinate variant.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GestureState {
    pub offset: Vec2,
    pub movement: Vec2,
    pub delta: Vec2,
    pub velocity: Vec2,
    pub direction: Vec2,
    pub distance: Vec2,
    pub initial: Vec2,
    pub overflow: Vec2,
    pub active: bool,
    pub first: bool,
    pub last: bool,
    pub canceled: bool,
    pub intentional: bool,
    /// Milliseconds since the gesture started.
    pub elapsed_time: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DragState {
    pub state: GestureState,
    pub xy: Vec2,
    pub tap: bool,
    /// Set only on the terminal update of a recognized swipe.
    pub swipe: Option<SwipeDirection>,
}

/// Payload of Hover and Move.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PointerState {
    pub state: GestureState,
    pub xy: Vec2,
}

/// Pinch offsets are `(scale, angle in degrees)`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PinchState {
    pub state: GestureState,
    pub origin: Vec2,
    /// `(distance, angle)` between the two pointers.
    pub da: Vec2,
    pub turns: f32,
}

/// Payload of Scroll and Wheel.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct AxisState {
    pub state: GestureState,
    pub axis: Option<Axis>,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LongPressState {
    /// In `[0, 1]`; 1 once the threshold is reached.
    pub progress: f32,
    pub pointer_type: PointerType,
}

/// One recognized gesture update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Drag(DragState),
    Hover(PointerState),
    Move(PointerState),
    Pinch(PinchState),
    Scroll(AxisState),
    Wheel(AxisState),
    LongPress(LongPressState),
}

/// Per-kind snapshot handed over by the recognition primitive.
///
/// It carries every kind-specific extra; [`GestureEvent::from_raw`] keeps the
/// ones that belong to the requested kind.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RawGestureState {
    pub state: GestureState,
    pub xy: Vec2,
    pub origin: Vec2,
    pub da: Vec2,
    pub turns: f32,
    pub tap: bool,
    /// Recognizer swipe classification, one of the four unit vectors or zero.
    pub swipe: Vec2,
    pub axis: Option<Axis>,
}

impl GestureEvent {
    /// Builds the coordinate variant for `kind`. Returns `None` for
    /// [`GestureKind::LongPress`], which has no raw state.
    pub fn from_raw(kind: GestureKind, raw: &RawGestureState) -> Option<Self> {
        let state = raw.state;
        let event = match kind {
            GestureKind::Drag => GestureEvent::Drag(DragState {
                state,
                xy: raw.xy,
                tap: raw.tap,
                swipe: if state.last {
                    SwipeDirection::from_vector(raw.swipe)
                } else {
                    None
                },
            }),
            GestureKind::Hover => GestureEvent::Hover(PointerState { state, xy: raw.xy }),
            GestureKind::Move => GestureEvent::Move(PointerState { state, xy: raw.xy }),
            GestureKind::Pinch => GestureEvent::Pinch(PinchState {
                state,
                origin: raw.origin,
                da: raw.da,
                turns: raw.turns,
            }),
            GestureKind::Scroll => GestureEvent::Scroll(AxisState {
                state,
                axis: raw.axis,
            }),
            GestureKind::Wheel => GestureEvent::Wheel(AxisState {
                state,
                axis: raw.axis,
            }),
            GestureKind::LongPress => return None,
        };
        Some(event)
    }

    pub fn long_press(progress: f32, pointer_type: PointerType) -> Self {
        GestureEvent::LongPress(LongPressState {
            progress: progress.clamp(0.0, 1.0),
            pointer_type,
        })
    }

    pub fn kind(&self) -> GestureKind {
        match self {
            GestureEvent::Drag(_) => GestureKind::Drag,
            GestureEvent::Hover(_) => GestureKind::Hover,
            GestureEvent::Move(_) => GestureKind::Move,
            GestureEvent::Pinch(_) => GestureKind::Pinch,
            GestureEvent::Scroll(_) => GestureKind::Scroll,
            GestureEvent::Wheel(_) => GestureKind::Wheel,
            GestureEvent::LongPress(_) => GestureKind::LongPress,
        }
    }

    /// Dispatches to the matcher method for this variant.
    pub fn match_with<M: GestureEventMatcher>(&self, matcher: M) -> M::Output {
        match self {
            GestureEvent::Drag(s) => matcher.on_drag(s),
            GestureEvent::Hover(s) => matcher.on_hover(s),
            GestureEvent::Move(s) => matcher.on_move(s),
            GestureEvent::Pinch(s) => matcher.on_pinch(s),
            GestureEvent::Scroll(s) => matcher.on_scroll(s),
            GestureEvent::Wheel(s) => matcher.on_wheel(s),
            GestureEvent::LongPress(s) => matcher.on_long_press(s),
        }
    }
}

/// Exhaustive visitor over [`GestureEvent`].
///
/// No method has a default body, so adding a variant breaks every matcher
/// at compile time instead of silently skipping the new case.
pub trait GestureEventMatcher {
    type Output;

    fn on_drag(self, state: &DragState) -> Self::Output;
    fn on_hover(self, state: &PointerState) -> Self::Output;
    fn on_move(self, state: &PointerState) -> Self::Output;
    fn on_pinch(self, state: &PinchState) -> Self::Output;
    fn on_scroll(self, state: &AxisState) -> Self::Output;
    fn on_wheel(self, state: &AxisState) -> Self::Output;
    fn on_long_press(self, state: &LongPressState) -> Self::Output;
}
