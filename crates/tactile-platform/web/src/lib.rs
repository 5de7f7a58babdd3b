//! Browser bindings for the Tactile gesture engine.
//!
//! Implements the host seams of `tactile-foundation` over `web-sys` and
//! drives the runtime from `requestAnimationFrame`.

mod element;
mod events;
mod frame;
mod services;

pub use element::WebElement;
pub use events::{input_event_from_key, input_event_from_pointer, WebPointerEvents};
pub use frame::WebFrameDriver;
pub use services::{WebCssReader, WebHaptics};

use std::rc::Rc;
use tactile_core::Runtime;
use tactile_foundation::GestureEnvironment;

/// Environment wired to the browser window.
///
/// Hosts without `navigator.vibrate` still get haptics; the feature test in
/// [`WebHaptics`] reports them as unsupported.
pub fn web_environment(runtime: &Runtime) -> GestureEnvironment {
    GestureEnvironment::new(runtime.handle())
        .with_haptics(Rc::new(WebHaptics))
        .with_pointer_events(Rc::new(WebPointerEvents))
        .with_css_reader(Rc::new(WebCssReader))
}
