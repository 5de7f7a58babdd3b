//! Testing utilities and harness for Tactile

pub mod fakes;
pub mod recognizer;
pub mod rule;

pub use fakes::*;
pub use recognizer::*;
pub use rule::*;

pub mod prelude {
    pub use crate::fakes::{FakeCssReader, FakeElement, FakeHaptics, FakePointerEvents};
    pub use crate::recognizer::{RawGesture, ScriptedRecognizer};
    pub use crate::rule::{GestureTestRule, TEST_FRAME_MILLIS};
}
