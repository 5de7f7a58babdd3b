//! Inertia animation driver.
//!
//! Drives a [`DecaySimulation`] using the runtime's frame callback system.

use crate::{DecaySimulation, DecaySpec};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tactile_core::{FrameCallbackRegistration, FrameClock, RuntimeHandle};
use tactile_ui_graphics::{SnapConfig, Vec2};

/// Minimum initial speed that starts an animation at all.
/// Slower releases end immediately at the release position.
pub const MIN_INERTIA_VELOCITY: f32 = 0.01;

/// State for an active inertia animation.
struct InertiaState {
    /// Identifies the run this state belongs to. Frame callbacks from an
    /// older run compare against it and bail out.
    generation: u64,
    simulation: DecaySimulation,
    /// Pending frame callback; dropping it cancels the frame.
    registration: Option<FrameCallbackRegistration>,
    frames: u32,
}

fn is_current(state: &RefCell<Option<InertiaState>>, generation: u64) -> bool {
    state
        .borrow()
        .as_ref()
        .is_some_and(|s| s.generation == generation)
}

/// Schedules the next simulation frame. Called recursively from inside each
/// frame callback until the simulation settles or the run is cancelled.
fn schedule_next_frame<F, G>(
    state: Rc<RefCell<Option<InertiaState>>>,
    frame_clock: FrameClock,
    generation: u64,
    mut on_frame: F,
    on_end: G,
) where
    F: FnMut(Vec2) + 'static,
    G: FnOnce(Vec2) + 'static,
{
    let state_for_closure = Rc::clone(&state);
    let frame_clock_for_closure = frame_clock.clone();

    let registration = frame_clock.with_frame_nanos(move |_frame_time_nanos| {
        let frame = {
            let mut guard = state_for_closure.borrow_mut();
            let Some(anim_state) = guard.as_mut() else {
                return;
            };
            if anim_state.generation != generation {
                return;
            }
            anim_state.frames += 1;
            let frame = anim_state.simulation.step();
            log::trace!(
                "inertia frame {} position={:?} velocity={:?}",
                anim_state.frames,
                frame.position,
                frame.velocity
            );
            frame
        };

        on_frame(frame.position);

        if frame.settled {
            let finished = {
                let mut guard = state_for_closure.borrow_mut();
                if guard.as_ref().is_some_and(|s| s.generation == generation) {
                    guard.take()
                } else {
                    None
                }
            };
            if let Some(finished) = finished {
                log::debug!(
                    "inertia settled at {:?} after {} frames",
                    frame.position,
                    finished.frames
                );
                drop(finished);
                on_end(frame.position);
            }
        } else if is_current(&state_for_closure, generation) {
            schedule_next_frame(
                state_for_closure,
                frame_clock_for_closure,
                generation,
                on_frame,
                on_end,
            );
        }
    });

    // Store the registration to keep the callback alive
    let mut guard = state.borrow_mut();
    if let Some(anim_state) = guard.as_mut() {
        if anim_state.generation == generation {
            anim_state.registration = Some(registration);
        }
    }
}

/// Drives an inertia (decay) animation for one target.
///
/// Each frame, it hands the simulated position to `on_frame`. The state
/// machine is Idle until [`InertiaAnimation::start`] and returns to Idle when
/// the motion settles or [`InertiaAnimation::cancel`] is called.
pub struct InertiaAnimation {
    state: Rc<RefCell<Option<InertiaState>>>,
    frame_clock: FrameClock,
    next_generation: Rc<Cell<u64>>,
}

impl InertiaAnimation {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            state: Rc::new(RefCell::new(None)),
            frame_clock: runtime.frame_clock(),
            next_generation: Rc::new(Cell::new(1)),
        }
    }

    /// Starts decaying from `position` with `velocity` (units per frame).
    ///
    /// Any running animation is cancelled first. `on_frame` receives the
    /// position to present on every frame, `on_end` the settled position.
    pub fn start<F, G>(
        &self,
        position: Vec2,
        velocity: Vec2,
        spec: DecaySpec,
        snap: Option<(SnapConfig, f32)>,
        on_frame: F,
        on_end: G,
    ) where
        F: FnMut(Vec2) + 'static,
        G: FnOnce(Vec2) + 'static,
    {
        self.cancel();

        if !velocity.is_finite() || velocity.length() < MIN_INERTIA_VELOCITY {
            on_end(position);
            return;
        }

        let mut simulation = DecaySimulation::new(position, velocity, spec);
        if let Some((config, default_threshold)) = snap {
            simulation = simulation.with_snap(config, default_threshold);
        }

        let generation = self.next_generation.get();
        self.next_generation.set(generation + 1);

        log::debug!(
            "inertia start position={:?} velocity={:?} spec={:?}",
            position,
            velocity,
            simulation.spec()
        );

        *self.state.borrow_mut() = Some(InertiaState {
            generation,
            simulation,
            registration: None,
            frames: 0,
        });

        schedule_next_frame(
            Rc::clone(&self.state),
            self.frame_clock.clone(),
            generation,
            on_frame,
            on_end,
        );
    }

    /// Stops the animation. The pending frame callback is cancelled before
    /// this returns.
    pub fn cancel(&self) {
        let taken = self.state.borrow_mut().take();
        if let Some(state) = taken {
            log::debug!("inertia cancelled after {} frames", state.frames);
            // Registration is dropped, cancelling the callback
            drop(state.registration);
        }
    }

    /// Returns true while the animation is decaying.
    pub fn is_running(&self) -> bool {
        self.state.borrow().is_some()
    }
}

impl Clone for InertiaAnimation {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            frame_clock: self.frame_clock.clone(),
            next_generation: Rc::clone(&self.next_generation),
        }
    }
}

impl std::fmt::Debug for InertiaAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InertiaAnimation")
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/inertia_tests.rs"]
mod tests;
