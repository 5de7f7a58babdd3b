use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use crate::timer::TimerRegistration;
use crate::{FrameCallbackId, TimerId, NANOS_PER_MILLI};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

enum TimerCallback {
    Once(Option<Box<dyn FnOnce() + 'static>>),
    Repeating {
        period_nanos: u64,
        callback: Rc<RefCell<Box<dyn FnMut() + 'static>>>,
    },
}

struct TimerEntry {
    id: TimerId,
    deadline_nanos: u64,
    callback: TimerCallback,
}

/// A timer that is due, taken out of the queue so it can run without holding
/// any runtime borrow.
enum DueTimer {
    Once(Box<dyn FnOnce() + 'static>),
    Repeating(Rc<RefCell<Box<dyn FnMut() + 'static>>>),
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    now_nanos: Cell<u64>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<FrameCallbackId>,
    timers: RefCell<Vec<TimerEntry>>,
    next_timer_id: Cell<TimerId>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            now_nanos: Cell::new(0),
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            timers: RefCell::new(Vec::new()),
            next_timer_id: Cell::new(1),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        if callbacks.is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn register_timer(&self, delay_nanos: u64, callback: TimerCallback) -> TimerId {
        let id = self.next_timer_id.get();
        self.next_timer_id.set(id + 1);
        let deadline_nanos = self.now_nanos.get().saturating_add(delay_nanos);
        self.timers.borrow_mut().push(TimerEntry {
            id,
            deadline_nanos,
            callback,
        });
        id
    }

    fn cancel_timer(&self, id: TimerId) {
        self.timers.borrow_mut().retain(|entry| entry.id != id);
    }

    fn has_pending_timers(&self) -> bool {
        !self.timers.borrow().is_empty()
    }

    /// Removes the earliest timer due at or before `target`, rescheduling it
    /// first when it repeats.
    fn take_due_timer(&self, target: u64) -> Option<(u64, DueTimer)> {
        let mut timers = self.timers.borrow_mut();
        let index = timers
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline_nanos <= target)
            .min_by_key(|(_, entry)| (entry.deadline_nanos, entry.id))
            .map(|(index, _)| index)?;

        let deadline = timers[index].deadline_nanos;
        if let TimerCallback::Repeating {
            period_nanos,
            callback,
        } = &timers[index].callback
        {
            let callback = Rc::clone(callback);
            let next_deadline = deadline.saturating_add((*period_nanos).max(1));
            timers[index].deadline_nanos = next_deadline;
            return Some((deadline, DueTimer::Repeating(callback)));
        }

        match timers.remove(index).callback {
            TimerCallback::Once(Some(callback)) => Some((deadline, DueTimer::Once(callback))),
            _ => None,
        }
    }

    fn advance_time(&self, target_nanos: u64) {
        while let Some((deadline, timer)) = self.take_due_timer(target_nanos) {
            if deadline > self.now_nanos.get() {
                self.now_nanos.set(deadline);
            }
            match timer {
                DueTimer::Once(callback) => callback(),
                DueTimer::Repeating(callback) => {
                    if let Ok(mut callback) = callback.try_borrow_mut() {
                        (callback)();
                    } else {
                        log::warn!("repeating timer re-entered while running; skipping tick");
                    }
                }
            }
        }
        if target_nanos > self.now_nanos.get() {
            self.now_nanos.set(target_nanos);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.advance_time(frame_time_nanos);
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        let now = self.now_nanos.get();
        for callback in pending {
            callback(now);
        }
        if !self.has_frame_callbacks() {
            self.needs_frame.set(false);
        }
    }
}

/// Owns the frame-callback queue and the timer set.
///
/// Handles hold a weak reference, so work registered against a dropped
/// runtime is silently discarded.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Arc::new(DefaultScheduler))
    }
}

#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn schedule(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.schedule();
        }
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Runtime time in nanoseconds, as of the last frame or time advance.
    pub fn now_nanos(&self) -> u64 {
        self.inner
            .upgrade()
            .map(|inner| inner.now_nanos.get())
            .unwrap_or(0)
    }

    pub fn now_millis(&self) -> u64 {
        self.now_nanos() / NANOS_PER_MILLI
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    /// Fires due timers, then runs every frame callback registered before
    /// this call. Callbacks registered while draining wait for the next frame.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    /// Moves runtime time forward, firing timers in deadline order.
    pub fn advance_time(&self, target_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.advance_time(target_nanos);
        }
    }

    /// Runs `callback` once after `delay_millis`.
    pub fn set_timeout(
        &self,
        delay_millis: u64,
        callback: impl FnOnce() + 'static,
    ) -> TimerRegistration {
        match self.inner.upgrade() {
            Some(inner) => {
                let id = inner.register_timer(
                    delay_millis.saturating_mul(NANOS_PER_MILLI),
                    TimerCallback::Once(Some(Box::new(callback))),
                );
                TimerRegistration::new(self.clone(), id)
            }
            None => TimerRegistration::inactive(self.clone()),
        }
    }

    /// Runs `callback` every `period_millis` until the registration is dropped.
    pub fn set_interval(
        &self,
        period_millis: u64,
        callback: impl FnMut() + 'static,
    ) -> TimerRegistration {
        match self.inner.upgrade() {
            Some(inner) => {
                let period_nanos = period_millis.max(1).saturating_mul(NANOS_PER_MILLI);
                let id = inner.register_timer(
                    period_nanos,
                    TimerCallback::Repeating {
                        period_nanos,
                        callback: Rc::new(RefCell::new(Box::new(callback))),
                    },
                );
                TimerRegistration::new(self.clone(), id)
            }
            None => TimerRegistration::inactive(self.clone()),
        }
    }

    pub fn cancel_timer(&self, id: TimerId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_timer(id);
        }
    }

    pub fn has_pending_timers(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_pending_timers())
            .unwrap_or(false)
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}
