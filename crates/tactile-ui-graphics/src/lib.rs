//! Pure math for the Tactile gesture engine
//!
//! This crate contains the 2D vector type shared by every gesture kind,
//! together with the bounds, rubberband and snapping helpers that the
//! motion post-processor and the inertia simulator build upon.

mod geometry;
mod snap;
mod vector;

pub use geometry::*;
pub use snap::*;
pub use vector::*;

pub mod prelude {
    pub use crate::geometry::{MovementBounds, Range, Vec2};
    pub use crate::snap::{SnapConfig, SnapPoints};
    pub use crate::vector::{clamp, magnitude, rubberband, snap};
}
