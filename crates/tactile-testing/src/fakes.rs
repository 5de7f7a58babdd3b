//! In-memory host implementations that record what the engine does.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tactile_foundation::{
    CssVarReader, GestureElement, GlobalPointerEvents, Haptics, ListenerRegistration,
};
use tactile_ui_graphics::Vec2;

/// Element that keeps its attributes and inline style in insertion order.
#[derive(Default)]
pub struct FakeElement {
    attributes: RefCell<IndexMap<String, String>>,
    styles: RefCell<IndexMap<String, String>>,
    writes: Cell<usize>,
}

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    pub fn style(&self, name: &str) -> Option<String> {
        self.styles.borrow().get(name).cloned()
    }

    pub fn has_style(&self, name: &str) -> bool {
        self.styles.borrow().contains_key(name)
    }

    /// Inline style serialized the way `element.style.cssText` reads.
    pub fn style_text(&self) -> String {
        self.styles
            .borrow()
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Total number of set and remove calls.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    fn touch(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

impl GestureElement for FakeElement {
    fn set_attribute(&self, name: &str, value: &str) {
        self.touch();
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, name: &str) {
        self.touch();
        self.attributes.borrow_mut().shift_remove(name);
    }

    fn set_style_property(&self, name: &str, value: &str) {
        self.touch();
        self.styles
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn remove_style_property(&self, name: &str) {
        self.touch();
        self.styles.borrow_mut().shift_remove(name);
    }
}

/// Records vibration requests.
pub struct FakeHaptics {
    supported: Cell<bool>,
    vibrations: RefCell<Vec<u32>>,
}

impl FakeHaptics {
    pub fn new(supported: bool) -> Self {
        Self {
            supported: Cell::new(supported),
            vibrations: RefCell::new(Vec::new()),
        }
    }

    pub fn set_supported(&self, supported: bool) {
        self.supported.set(supported);
    }

    pub fn vibrations(&self) -> Vec<u32> {
        self.vibrations.borrow().clone()
    }
}

impl Default for FakeHaptics {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Haptics for FakeHaptics {
    fn is_supported(&self) -> bool {
        self.supported.get()
    }

    fn vibrate(&self, duration_millis: u32) {
        self.vibrations.borrow_mut().push(duration_millis);
    }
}

type MoveListener = Rc<dyn Fn(Vec2)>;

/// Global `pointermove` target driven by the test.
#[derive(Default)]
pub struct FakePointerEvents {
    listeners: Rc<RefCell<IndexMap<u64, MoveListener>>>,
    next_id: Cell<u64>,
}

impl FakePointerEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Delivers a move to every listener attached right now.
    pub fn dispatch_move(&self, position: impl Into<Vec2>) {
        let position = position.into();
        let snapshot: Vec<MoveListener> = self.listeners.borrow().values().cloned().collect();
        for listener in snapshot {
            listener(position);
        }
    }
}

impl GlobalPointerEvents for FakePointerEvents {
    fn add_pointer_move_listener(&self, listener: Rc<dyn Fn(Vec2)>) -> ListenerRegistration {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().insert(id, listener);
        let listeners = Rc::clone(&self.listeners);
        ListenerRegistration::new(move || {
            listeners.borrow_mut().shift_remove(&id);
        })
    }
}

/// Computed custom properties set by the test.
#[derive(Default)]
pub struct FakeCssReader {
    vars: RefCell<FxHashMap<String, String>>,
    reads: Cell<usize>,
}

impl FakeCssReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.borrow_mut().insert(name.into(), value.into());
    }

    pub fn read_count(&self) -> usize {
        self.reads.get()
    }
}

impl CssVarReader for FakeCssReader {
    fn read_css_var(&self, name: &str) -> Option<String> {
        self.reads.set(self.reads.get() + 1);
        self.vars.borrow().get(name).cloned()
    }
}
