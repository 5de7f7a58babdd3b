//! Gesture and interaction engine for Tactile components
//!
//! A [`Gestures`] binding turns raw recognizer updates and native press
//! events into one typed [`GestureEvent`] vocabulary, constrains offsets,
//! mirrors gesture state into inline custom properties and runs inertia and
//! long-press timing on the cooperative runtime from `tactile-core`.

mod accessors;
pub mod config;
pub mod css_value;
pub mod css_vars;
pub mod event;
pub mod gestures;
pub mod host;
pub mod long_press;
pub mod motion;
pub mod props;
pub mod recognizer;
pub mod state;

pub use config::*;
pub use css_value::{parse_ms, parse_px, CssValueError, CssVarReader};
pub use css_vars::{
    css_values, progress_property, sync_css_vars, write_position, CssField, CssVarConfig,
    LONG_PRESS_PROGRESS_VAR,
};
pub use event::*;
pub use gestures::{GestureBinding, Gestures};
pub use host::{
    ElementRef, GestureElement, GestureEnvironment, GlobalPointerEvents, Haptics,
    ListenerRegistration,
};
pub use long_press::{LongPressMachine, LongPressStatus, LONG_PRESS_PROGRESS_ATTRIBUTE};
pub use motion::process_offset;
pub use props::*;
pub use recognizer::{
    touch_action_for, GestureAdapter, GestureRecognizer, RawGestureHandler, RecognizerHandlers,
};
pub use state::GestureStateMap;

pub mod prelude {
    pub use crate::config::{
        Bounds, DragConfig, GestureConfig, LongPressConfig, PhysicsConfig, PinchConfig,
    };
    pub use crate::css_vars::{CssField, CssVarConfig};
    pub use crate::event::{GestureEvent, GestureKind, GesturePhase, PointerType, SwipeDirection};
    pub use crate::gestures::{GestureBinding, Gestures};
    pub use crate::host::{ElementRef, GestureElement, GestureEnvironment};
    pub use crate::props::{BoundProps, InputEvent};
    pub use tactile_ui_graphics::{SnapConfig, SnapPoints, Vec2};
}
