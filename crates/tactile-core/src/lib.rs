//! Cooperative runtime for Tactile
//!
//! Everything here runs on a single thread. The host drives the runtime by
//! calling [`RuntimeHandle::drain_frame_callbacks`] once per display refresh
//! and [`RuntimeHandle::advance_time`] whenever wall-clock time moves between
//! frames. Frame callbacks and timers are cancelled by dropping their
//! registration handles.

mod clock;
mod frame_clock;
mod platform;
mod runtime;
mod timer;

pub use clock::MonotonicClock;
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::RuntimeScheduler;
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};
pub use timer::TimerRegistration;

pub type FrameCallbackId = u64;
pub type TimerId = u64;

/// Nanoseconds per millisecond, used when converting host timestamps.
pub const NANOS_PER_MILLI: u64 = 1_000_000;
