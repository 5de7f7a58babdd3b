//! Adapter over a multi-pointer recognition primitive.
//!
//! The recognizer reports raw per-kind state; the adapter turns each update
//! into a processed [`GestureEvent`], records it, mirrors it onto the element
//! and runs the configured callbacks. Released drags hand over to the
//! inertia simulator when physics is configured.

use crate::config::GestureConfig;
use crate::css_vars::{sync_css_vars, write_position};
use crate::event::{Axis, GestureEvent, GestureKind, GesturePhase, RawGestureState};
use crate::host::{ElementRef, GestureEnvironment};
use crate::motion::process_offset;
use crate::props::BoundProps;
use crate::state::GestureStateMap;
use indexmap::IndexMap;
use std::cell::Cell;
use std::rc::{Rc, Weak};
use tactile_animation::InertiaAnimation;

pub type RawGestureHandler = Rc<dyn Fn(&RawGestureState)>;

/// Per-kind raw handlers handed to a recognizer, in registration order.
#[derive(Clone, Default)]
pub struct RecognizerHandlers {
    handlers: IndexMap<GestureKind, RawGestureHandler>,
}

impl RecognizerHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: GestureKind, handler: RawGestureHandler) {
        self.handlers.insert(kind, handler);
    }

    pub fn get(&self, kind: GestureKind) -> Option<&RawGestureHandler> {
        self.handlers.get(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = GestureKind> + '_ {
        self.handlers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for RecognizerHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.handlers.keys()).finish()
    }
}

/// The external recognition primitive.
///
/// `bind` installs the handlers and returns the DOM props that feed it.
pub trait GestureRecognizer {
    fn bind(&self, handlers: RecognizerHandlers, config: &GestureConfig) -> BoundProps;
}

/// Inline `touch-action` for an element with `config`.
pub fn touch_action_for(config: &GestureConfig) -> &'static str {
    if let Some(drag) = &config.drag {
        return match drag.axis {
            Some(Axis::X) => "pan-y",
            Some(Axis::Y) => "pan-x",
            None => "none",
        };
    }
    if config.pinch.is_some() || config.scroll.is_some() {
        return "none";
    }
    "auto"
}

struct AdapterInner {
    config: Rc<GestureConfig>,
    element: ElementRef,
    state: GestureStateMap,
    inertia: InertiaAnimation,
    snap_threshold: f32,
    disabled: Cell<bool>,
}

impl AdapterInner {
    fn handle_update(&self, kind: GestureKind, raw: &RawGestureState) {
        if self.disabled.get() {
            return;
        }
        let config = &self.config;
        let flags = raw.state;
        if kind == GestureKind::Drag && flags.first && self.inertia.is_running() {
            self.inertia.cancel();
        }

        let phase = GesturePhase::from_flags(flags.first, flags.last);
        let physics_enabled = config.physics_enabled(kind);

        let mut processed = *raw;
        processed.state.offset = process_offset(
            kind,
            raw.state.offset,
            config,
            flags.last,
            physics_enabled,
            self.snap_threshold,
        );
        if let Some(transform) = &config.transform {
            if matches!(kind, GestureKind::Drag | GestureKind::Hover | GestureKind::Move) {
                processed.xy = transform(raw.xy);
            }
        }
        let Some(event) = GestureEvent::from_raw(kind, &processed) else {
            return;
        };
        log::trace!(
            "{kind} {} offset={:?} raw={:?}",
            phase.as_str(),
            processed.state.offset,
            raw.state.offset
        );

        self.state.insert(event);
        let status = if flags.active { "active" } else { "idle" };
        self.element
            .with(|el| el.set_attribute(&kind.state_attribute(), status));
        sync_css_vars(&self.element, &event, config.css_vars.as_ref());

        config.callbacks.dispatch(&event, phase);

        // A callback may have disabled the binding.
        if self.disabled.get() || kind != GestureKind::Drag || !flags.last {
            return;
        }
        if let (Some(swipe), Some(on_swipe)) = (event.swipe(), &config.callbacks.on_swipe) {
            log::debug!("swipe {}", swipe.as_str());
            on_swipe(swipe);
        }
        if physics_enabled {
            self.start_inertia(&processed);
        }
    }

    fn start_inertia(&self, processed: &RawGestureState) {
        let Some(physics) = self.config.physics else {
            return;
        };
        let spec = physics.decay.unwrap_or_default().sanitized();
        let velocity = processed.state.velocity * physics.velocity_multiplier_or_default();
        let snap = self
            .config
            .snap
            .clone()
            .map(|snap| (snap, self.snap_threshold));

        let element = self.element.clone();
        let config = Rc::clone(&self.config);
        self.inertia.start(
            processed.state.offset,
            velocity,
            spec,
            snap,
            move |position| {
                write_position(
                    &element,
                    GestureKind::Drag,
                    position,
                    config.css_vars.as_ref(),
                )
            },
            |position| log::debug!("drag inertia finished at {position:?}"),
        );
    }
}

/// Turns raw recognizer updates into processed gesture events for one element.
#[derive(Clone)]
pub struct GestureAdapter {
    inner: Rc<AdapterInner>,
}

impl GestureAdapter {
    pub fn new(
        config: Rc<GestureConfig>,
        element: ElementRef,
        env: &GestureEnvironment,
        state: GestureStateMap,
    ) -> Self {
        let snap_threshold = config.snap_threshold(env.css.as_deref());
        Self {
            inner: Rc::new(AdapterInner {
                config,
                element,
                state,
                inertia: InertiaAnimation::new(env.runtime.clone()),
                snap_threshold,
                disabled: Cell::new(false),
            }),
        }
    }

    /// Runs one raw update through the pipeline.
    pub fn handle_update(&self, kind: GestureKind, raw: &RawGestureState) {
        self.inner.handle_update(kind, raw);
    }

    /// Raw handlers for every recognized kind. They hold the adapter weakly.
    pub fn handlers(&self) -> RecognizerHandlers {
        let mut handlers = RecognizerHandlers::new();
        for kind in self.inner.config.recognized_kinds() {
            let weak: Weak<AdapterInner> = Rc::downgrade(&self.inner);
            handlers.insert(
                kind,
                Rc::new(move |raw: &RawGestureState| {
                    if let Some(inner) = weak.upgrade() {
                        inner.handle_update(kind, raw);
                    }
                }),
            );
        }
        handlers
    }

    /// Binds the handlers to `recognizer` and adds the `touch-action` style.
    pub fn bind(&self, recognizer: &dyn GestureRecognizer) -> BoundProps {
        let handlers = self.handlers();
        let props = if handlers.is_empty() {
            BoundProps::new()
        } else {
            recognizer.bind(handlers, &self.inner.config)
        };
        props.with_style("touch-action", touch_action_for(&self.inner.config))
    }

    pub fn is_inertia_running(&self) -> bool {
        self.inner.inertia.is_running()
    }

    pub fn cancel_inertia(&self) {
        self.inner.inertia.cancel();
    }

    pub fn is_disabled(&self) -> bool {
        self.inner.disabled.get()
    }

    /// Ignores further updates and stops inertia. Re-enabling resumes
    /// processing; nothing else needs re-arming.
    pub fn set_disabled(&self, disabled: bool) {
        self.inner.disabled.set(disabled);
        if disabled {
            self.inner.inertia.cancel();
        }
    }
}

impl std::fmt::Debug for GestureAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureAdapter")
            .field("kinds", &self.inner.config.recognized_kinds())
            .field("inertia", &self.inner.inertia)
            .field("disabled", &self.inner.disabled.get())
            .finish()
    }
}
