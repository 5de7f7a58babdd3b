//! Seams to the host document.
//!
//! The engine never touches a DOM directly. Hosts implement these traits for
//! their element type, haptics API and global event target; the test harness
//! implements them with in-memory recorders.

use crate::css_value::CssVarReader;
use std::cell::RefCell;
use std::rc::Rc;
use tactile_core::RuntimeHandle;
use tactile_ui_graphics::Vec2;

/// The element a gesture binding instruments.
///
/// Methods take `&self`: host elements are handles with interior mutability,
/// and writes must be tolerated at any time.
pub trait GestureElement {
    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);
    /// Sets an inline style property, custom properties included.
    fn set_style_property(&self, name: &str, value: &str);
    fn remove_style_property(&self, name: &str);
}

/// Nullable, shareable reference to the bound element.
///
/// Every write goes through [`ElementRef::with`], which is a no-op while the
/// element is detached.
#[derive(Clone, Default)]
pub struct ElementRef {
    slot: Rc<RefCell<Option<Rc<dyn GestureElement>>>>,
}

impl ElementRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached(element: Rc<dyn GestureElement>) -> Self {
        let element_ref = Self::new();
        element_ref.attach(element);
        element_ref
    }

    pub fn attach(&self, element: Rc<dyn GestureElement>) {
        *self.slot.borrow_mut() = Some(element);
    }

    pub fn release(&self) {
        self.slot.borrow_mut().take();
    }

    pub fn is_attached(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Runs `f` with the element, if one is attached.
    pub fn with<R>(&self, f: impl FnOnce(&dyn GestureElement) -> R) -> Option<R> {
        let element = self.slot.borrow().clone();
        element.map(|element| f(element.as_ref()))
    }
}

impl std::fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementRef")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Vibration feedback.
pub trait Haptics {
    /// Feature test. Unsupported hosts are skipped silently.
    fn is_supported(&self) -> bool;

    fn vibrate(&self, duration_millis: u32);
}

/// Global `pointermove` subscription used for long-press cancellation.
pub trait GlobalPointerEvents {
    fn add_pointer_move_listener(&self, listener: Rc<dyn Fn(Vec2)>) -> ListenerRegistration;
}

/// Keeps a global listener attached. Dropping it detaches the listener.
pub struct ListenerRegistration {
    detach: Option<Box<dyn FnOnce()>>,
}

impl ListenerRegistration {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    pub fn inactive() -> Self {
        Self { detach: None }
    }

    pub fn is_active(&self) -> bool {
        self.detach.is_some()
    }
}

impl Drop for ListenerRegistration {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for ListenerRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistration")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Host services shared by every binding on a page.
#[derive(Clone)]
pub struct GestureEnvironment {
    pub runtime: RuntimeHandle,
    pub haptics: Option<Rc<dyn Haptics>>,
    pub pointer_events: Option<Rc<dyn GlobalPointerEvents>>,
    pub css: Option<Rc<dyn CssVarReader>>,
}

impl GestureEnvironment {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            runtime,
            haptics: None,
            pointer_events: None,
            css: None,
        }
    }

    pub fn with_haptics(mut self, haptics: Rc<dyn Haptics>) -> Self {
        self.haptics = Some(haptics);
        self
    }

    pub fn with_pointer_events(mut self, pointer_events: Rc<dyn GlobalPointerEvents>) -> Self {
        self.pointer_events = Some(pointer_events);
        self
    }

    pub fn with_css_reader(mut self, css: Rc<dyn CssVarReader>) -> Self {
        self.css = Some(css);
        self
    }
}

impl std::fmt::Debug for GestureEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureEnvironment")
            .field("haptics", &self.haptics.is_some())
            .field("pointer_events", &self.pointer_events.is_some())
            .field("css", &self.css.is_some())
            .finish()
    }
}
