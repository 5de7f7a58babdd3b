//! A recognizer whose updates are scripted by the test.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tactile_foundation::{
    BoundProps, GestureConfig, GestureKind, GestureRecognizer, GestureState, InputEvent,
    RawGestureState, RecognizerHandlers, ON_POINTER_DOWN,
};
use tactile_ui_graphics::Vec2;

/// Stores the handlers it is bound with and replays raw updates into them.
#[derive(Default)]
pub struct ScriptedRecognizer {
    handlers: RefCell<RecognizerHandlers>,
    bind_count: Cell<usize>,
    pointer_downs: Rc<Cell<usize>>,
}

impl ScriptedRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kinds registered by the latest bind.
    pub fn bound_kinds(&self) -> Vec<GestureKind> {
        self.handlers.borrow().kinds().collect()
    }

    pub fn bind_count(&self) -> usize {
        self.bind_count.get()
    }

    /// How often the recognizer's own `onPointerDown` prop ran.
    pub fn pointer_downs(&self) -> usize {
        self.pointer_downs.get()
    }

    /// Feeds `raw` to the handler for `kind`. Returns false when the kind
    /// was not registered.
    pub fn dispatch(&self, kind: GestureKind, raw: RawGestureState) -> bool {
        let handler = self.handlers.borrow().get(kind).cloned();
        match handler {
            Some(handler) => {
                handler(&raw);
                true
            }
            None => false,
        }
    }
}

impl GestureRecognizer for ScriptedRecognizer {
    fn bind(&self, handlers: RecognizerHandlers, _config: &GestureConfig) -> BoundProps {
        *self.handlers.borrow_mut() = handlers;
        self.bind_count.set(self.bind_count.get() + 1);
        let downs = Rc::clone(&self.pointer_downs);
        BoundProps::new().with_handler(ON_POINTER_DOWN, move |_: &InputEvent| {
            downs.set(downs.get() + 1);
        })
    }
}

/// Builder for raw recognizer snapshots.
///
/// Starts as an active, intentional mid-gesture update.
#[derive(Clone, Copy, Debug)]
pub struct RawGesture {
    raw: RawGestureState,
}

impl RawGesture {
    pub fn new() -> Self {
        Self {
            raw: RawGestureState {
                state: GestureState {
                    active: true,
                    intentional: true,
                    ..GestureState::default()
                },
                ..RawGestureState::default()
            },
        }
    }

    /// A first update: active and `first`.
    pub fn start() -> Self {
        let mut gesture = Self::new();
        gesture.raw.state.first = true;
        gesture
    }

    /// A terminal update: `last` and no longer active.
    pub fn end() -> Self {
        let mut gesture = Self::new();
        gesture.raw.state.last = true;
        gesture.raw.state.active = false;
        gesture
    }

    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.raw.state.offset = Vec2::new(x, y);
        self.raw.state.movement = Vec2::new(x, y);
        self
    }

    pub fn velocity(mut self, x: f32, y: f32) -> Self {
        self.raw.state.velocity = Vec2::new(x, y);
        self
    }

    pub fn delta(mut self, x: f32, y: f32) -> Self {
        self.raw.state.delta = Vec2::new(x, y);
        self
    }

    pub fn xy(mut self, x: f32, y: f32) -> Self {
        self.raw.xy = Vec2::new(x, y);
        self
    }

    pub fn swipe(mut self, x: f32, y: f32) -> Self {
        self.raw.swipe = Vec2::new(x, y);
        self
    }

    pub fn canceled(mut self) -> Self {
        self.raw.state.canceled = true;
        self
    }

    pub fn elapsed(mut self, millis: f32) -> Self {
        self.raw.state.elapsed_time = millis;
        self
    }

    pub fn build(self) -> RawGestureState {
        self.raw
    }
}

impl Default for RawGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl From<RawGesture> for RawGestureState {
    fn from(gesture: RawGesture) -> Self {
        gesture.build()
    }
}
