//! Host seam for frame scheduling.

/// Schedules work for the runtime.
///
/// Implementations are responsible for requesting a display refresh on
/// behalf of the runtime whenever a frame callback is pending.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}
