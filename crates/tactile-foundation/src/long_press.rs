//! Long-press timing state machine.
//!
//! A press moves `Idle -> Pressing -> (Completed | Canceled) -> Idle`. While
//! pressing, a self-rescheduling frame callback publishes the progress and a
//! timeout fires the press at the threshold. Every frame, timer and listener
//! belongs to the current session and is dropped with it.

use crate::config::{GestureCallbacks, LongPressConfig, ResolvedLongPress};
use crate::css_vars::{progress_property, CssField, CssVarConfig};
use crate::event::{GestureEvent, GesturePhase, PointerType};
use crate::host::{
    ElementRef, GestureEnvironment, GlobalPointerEvents, Haptics, ListenerRegistration,
};
use crate::props::{
    BoundProps, InputEvent, ON_CHANGE, ON_KEY_DOWN, ON_KEY_UP, ON_POINTER_CANCEL, ON_POINTER_DOWN,
    ON_POINTER_UP,
};
use crate::state::GestureStateMap;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tactile_core::{FrameCallbackRegistration, RuntimeHandle, TimerRegistration, NANOS_PER_MILLI};
use tactile_ui_graphics::Vec2;

/// Attribute mirroring the progress of the current press.
pub const LONG_PRESS_PROGRESS_ATTRIBUTE: &str = "data-longpress-progress";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LongPressStatus {
    Idle,
    Pressing,
    Completed,
    Canceled,
}

fn is_activation_key(key: Option<&str>) -> bool {
    matches!(key, Some("Enter") | Some(" ") | Some("Spacebar"))
}

struct Session {
    pointer_type: PointerType,
    start_position: Vec2,
    started_at_nanos: u64,
    progress: f32,
    progress_frame: Option<FrameCallbackRegistration>,
    completion: Option<TimerRegistration>,
    repeat: Option<TimerRegistration>,
    move_listener: Option<ListenerRegistration>,
}

impl Session {
    /// Stops the progress loop and the pending completion.
    fn halt(&mut self) {
        self.progress_frame = None;
        self.completion = None;
    }
}

struct MachineInner {
    settings: ResolvedLongPress,
    on_activate: Option<Rc<dyn Fn(PointerType)>>,
    callbacks: GestureCallbacks,
    element: ElementRef,
    state: GestureStateMap,
    runtime: RuntimeHandle,
    haptics: Option<Rc<dyn Haptics>>,
    pointer_events: Option<Rc<dyn GlobalPointerEvents>>,
    progress_var: String,
    status: Cell<LongPressStatus>,
    session: RefCell<Option<Session>>,
    disabled: Cell<bool>,
}

impl MachineInner {
    fn progress_at(&self, started_at_nanos: u64, now_nanos: u64) -> f32 {
        if self.settings.threshold_ms == 0 {
            return 1.0;
        }
        let elapsed_ms = now_nanos.saturating_sub(started_at_nanos) as f64 / NANOS_PER_MILLI as f64;
        (elapsed_ms / self.settings.threshold_ms as f64).min(1.0) as f32
    }

    fn write_progress(&self, progress: f32) {
        let value = CssField::Progress.format(progress);
        self.element.with(|el| {
            el.set_style_property(&self.progress_var, &value);
            el.set_attribute(LONG_PRESS_PROGRESS_ATTRIBUTE, &value);
        });
    }

    fn emit(&self, progress: f32, pointer_type: PointerType, phase: GesturePhase) {
        let event = GestureEvent::long_press(progress, pointer_type);
        log::debug!("long-press {} progress={progress}", phase.as_str());
        self.state.insert(event);
        self.callbacks.dispatch(&event, phase);
    }

    fn vibrate(&self) {
        if let (Some(ms), Some(haptics)) = (self.settings.haptic_ms, &self.haptics) {
            if haptics.is_supported() {
                haptics.vibrate(ms);
            }
        }
    }
}

fn start(inner: &Rc<MachineInner>, position: Vec2, pointer_type: PointerType) {
    if inner.disabled.get() || inner.session.borrow().is_some() {
        return;
    }
    let started_at_nanos = inner.runtime.now_nanos();
    *inner.session.borrow_mut() = Some(Session {
        pointer_type,
        start_position: position,
        started_at_nanos,
        progress: 0.0,
        progress_frame: None,
        completion: None,
        repeat: None,
        move_listener: None,
    });
    inner.status.set(LongPressStatus::Pressing);
    inner.write_progress(0.0);

    let weak = Rc::downgrade(inner);
    let completion = inner
        .runtime
        .set_timeout(inner.settings.threshold_ms, move || {
            if let Some(inner) = weak.upgrade() {
                complete(&inner);
            }
        });
    // Keyboard presses have no pointer to track.
    let tracked_distance = inner
        .settings
        .cancel_distance
        .filter(|_| pointer_type != PointerType::Keyboard);
    let move_listener = match (tracked_distance, &inner.pointer_events) {
        (Some(distance), Some(events)) => {
            let weak = Rc::downgrade(inner);
            Some(events.add_pointer_move_listener(Rc::new(move |point: Vec2| {
                if let Some(inner) = weak.upgrade() {
                    cancel_on_move(&inner, point, distance);
                }
            })))
        }
        _ => None,
    };
    if let Some(session) = inner.session.borrow_mut().as_mut() {
        session.completion = Some(completion);
        session.move_listener = move_listener;
    }
    schedule_progress_frame(inner);

    inner.emit(0.0, pointer_type, GesturePhase::Start);
}

/// Publishes progress on the next frame and reschedules itself until the
/// press stops pressing.
fn schedule_progress_frame(inner: &Rc<MachineInner>) {
    let weak: Weak<MachineInner> = Rc::downgrade(inner);
    let registration = inner
        .runtime
        .frame_clock()
        .with_frame_nanos(move |frame_time_nanos| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if inner.status.get() != LongPressStatus::Pressing {
                return;
            }
            let (progress, pointer_type) = {
                let mut guard = inner.session.borrow_mut();
                let Some(session) = guard.as_mut() else {
                    return;
                };
                let progress = inner
                    .progress_at(session.started_at_nanos, frame_time_nanos)
                    .max(session.progress);
                session.progress = progress;
                session.progress_frame = None;
                (progress, session.pointer_type)
            };
            log::trace!("long-press progress {progress}");
            inner.write_progress(progress);
            inner
                .state
                .insert(GestureEvent::long_press(progress, pointer_type));
            if progress < 1.0 {
                schedule_progress_frame(&inner);
            }
        });
    if let Some(session) = inner.session.borrow_mut().as_mut() {
        session.progress_frame = Some(registration);
    }
}

fn complete(inner: &Rc<MachineInner>) {
    let pointer_type = {
        let mut guard = inner.session.borrow_mut();
        let Some(session) = guard.as_mut() else {
            return;
        };
        if inner.status.get() != LongPressStatus::Pressing {
            return;
        }
        session.halt();
        session.progress = 1.0;
        session.pointer_type
    };
    inner.status.set(LongPressStatus::Completed);
    inner.write_progress(1.0);
    inner.vibrate();
    inner.emit(1.0, pointer_type, GesturePhase::Move);
    if let Some(on_activate) = &inner.on_activate {
        on_activate(pointer_type);
    }

    let interval = inner.settings.repeat_interval_ms;
    if interval == 0 || inner.status.get() != LongPressStatus::Completed {
        return;
    }
    let weak = Rc::downgrade(inner);
    let repeat = inner.runtime.set_interval(interval, move || {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if inner.status.get() != LongPressStatus::Completed {
            return;
        }
        log::trace!("long-press repeat");
        inner.vibrate();
        inner.emit(1.0, pointer_type, GesturePhase::Move);
        if let Some(on_activate) = &inner.on_activate {
            on_activate(pointer_type);
        }
    });
    if let Some(session) = inner.session.borrow_mut().as_mut() {
        session.repeat = Some(repeat);
    }
}

fn cancel_on_move(inner: &Rc<MachineInner>, point: Vec2, cancel_distance: f32) {
    if inner.status.get() != LongPressStatus::Pressing {
        return;
    }
    let now = inner.runtime.now_nanos();
    let (progress, pointer_type, listener) = {
        let mut guard = inner.session.borrow_mut();
        let Some(session) = guard.as_mut() else {
            return;
        };
        if (point - session.start_position).length() <= cancel_distance {
            return;
        }
        session.halt();
        session.progress = inner
            .progress_at(session.started_at_nanos, now)
            .max(session.progress);
        (
            session.progress,
            session.pointer_type,
            session.move_listener.take(),
        )
    };
    // Detached outside the borrow; the host may be iterating its listeners.
    drop(listener);
    inner.status.set(LongPressStatus::Canceled);
    inner
        .element
        .with(|el| el.remove_style_property(&inner.progress_var));
    inner.emit(progress, pointer_type, GesturePhase::Cancel);
}

/// Drops every resource of the current session. Returns the session's
/// status, progress and pointer type when there was one.
fn tear_down(inner: &MachineInner) -> Option<(LongPressStatus, f32, PointerType)> {
    let session = inner.session.borrow_mut().take()?;
    let status = inner.status.replace(LongPressStatus::Idle);
    inner.element.with(|el| {
        el.remove_style_property(&inner.progress_var);
        el.remove_attribute(LONG_PRESS_PROGRESS_ATTRIBUTE);
    });
    let summary = (status, session.progress, session.pointer_type);
    drop(session);
    Some(summary)
}

fn end(inner: &Rc<MachineInner>) {
    let Some((status, progress, pointer_type)) = tear_down(inner) else {
        return;
    };
    let progress = if status == LongPressStatus::Canceled {
        progress
    } else {
        1.0
    };
    inner.emit(progress, pointer_type, GesturePhase::End);
}

/// Long-press recognition for one element.
#[derive(Clone)]
pub struct LongPressMachine {
    inner: Rc<MachineInner>,
}

impl LongPressMachine {
    pub fn new(
        config: &LongPressConfig,
        callbacks: GestureCallbacks,
        css_vars: Option<&CssVarConfig>,
        element: ElementRef,
        env: &GestureEnvironment,
        state: GestureStateMap,
    ) -> Self {
        let settings = config.resolve(env.css.as_deref());
        log::debug!("long-press settings {settings:?}");
        Self {
            inner: Rc::new(MachineInner {
                settings,
                on_activate: config.on_activate.clone(),
                callbacks,
                element,
                state,
                runtime: env.runtime.clone(),
                haptics: env.haptics.clone(),
                pointer_events: env.pointer_events.clone(),
                progress_var: progress_property(css_vars),
                status: Cell::new(LongPressStatus::Idle),
                session: RefCell::new(None),
                disabled: Cell::new(false),
            }),
        }
    }

    pub fn settings(&self) -> ResolvedLongPress {
        self.inner.settings
    }

    pub fn status(&self) -> LongPressStatus {
        self.inner.status.get()
    }

    /// Progress of the current press, 0 when idle.
    pub fn progress(&self) -> f32 {
        self.inner
            .session
            .borrow()
            .as_ref()
            .map_or(0.0, |session| session.progress)
    }

    pub fn progress_property(&self) -> &str {
        &self.inner.progress_var
    }

    /// Native press start.
    pub fn start(&self, position: Vec2, pointer_type: PointerType) {
        start(&self.inner, position, pointer_type);
    }

    /// Native press end.
    pub fn end(&self) {
        end(&self.inner);
    }

    /// Cancels every frame, timer and listener without emitting.
    pub fn teardown(&self) {
        if tear_down(&self.inner).is_some() {
            log::debug!("long-press torn down");
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.inner.disabled.get()
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.inner.disabled.set(disabled);
        if disabled {
            self.teardown();
        }
    }

    /// Pointer, keyboard and press-change handlers driving the machine.
    pub fn props(&self) -> BoundProps {
        let down = Rc::downgrade(&self.inner);
        let up = Rc::downgrade(&self.inner);
        let cancel = Rc::downgrade(&self.inner);
        let key_down = Rc::downgrade(&self.inner);
        let key_up = Rc::downgrade(&self.inner);
        let change = Rc::downgrade(&self.inner);
        BoundProps::new()
            .with_handler(ON_POINTER_DOWN, move |event| {
                if let Some(inner) = down.upgrade() {
                    start(&inner, event.position, event.pointer_type);
                }
            })
            .with_handler(ON_POINTER_UP, move |_| {
                if let Some(inner) = up.upgrade() {
                    end(&inner);
                }
            })
            .with_handler(ON_POINTER_CANCEL, move |_| {
                if let Some(inner) = cancel.upgrade() {
                    end(&inner);
                }
            })
            .with_handler(ON_KEY_DOWN, move |event: &InputEvent| {
                if event.repeat || !is_activation_key(event.key.as_deref()) {
                    return;
                }
                if let Some(inner) = key_down.upgrade() {
                    start(&inner, Vec2::ZERO, PointerType::Keyboard);
                }
            })
            .with_handler(ON_KEY_UP, move |event: &InputEvent| {
                if !is_activation_key(event.key.as_deref()) {
                    return;
                }
                if let Some(inner) = key_up.upgrade() {
                    end(&inner);
                }
            })
            .with_handler(ON_CHANGE, move |event: &InputEvent| {
                let Some(inner) = change.upgrade() else {
                    return;
                };
                match event.pressed {
                    Some(true) => start(&inner, event.position, event.pointer_type),
                    Some(false) => end(&inner),
                    None => {}
                }
            })
    }
}

impl std::fmt::Debug for LongPressMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LongPressMachine")
            .field("settings", &self.inner.settings)
            .field("status", &self.status())
            .field("progress", &self.progress())
            .finish()
    }
}

impl Drop for MachineInner {
    fn drop(&mut self) {
        if let Some(session) = self.session.get_mut().take() {
            drop(session);
            self.element.with(|el| {
                el.remove_style_property(&self.progress_var);
                el.remove_attribute(LONG_PRESS_PROGRESS_ATTRIBUTE);
            });
        }
    }
}

#[cfg(test)]
#[path = "tests/long_press_tests.rs"]
mod tests;
