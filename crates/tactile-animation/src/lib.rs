//! Inertia animation for Tactile
//!
//! A released drag keeps moving: its velocity decays geometrically frame by
//! frame until it falls under a rest threshold. [`DecaySimulation`] is the
//! pure stepping model, [`InertiaAnimation`] drives it from the runtime's
//! frame clock.

mod decay_spec;
mod inertia;

pub use decay_spec::*;
pub use inertia::*;
