//! Bindable element props: DOM-style handlers, inline style and attributes.

use crate::event::PointerType;
use indexmap::IndexMap;
use std::rc::Rc;
use tactile_ui_graphics::Vec2;

pub const ON_POINTER_DOWN: &str = "onPointerDown";
pub const ON_POINTER_UP: &str = "onPointerUp";
pub const ON_POINTER_CANCEL: &str = "onPointerCancel";
pub const ON_POINTER_MOVE: &str = "onPointerMove";
pub const ON_KEY_DOWN: &str = "onKeyDown";
pub const ON_KEY_UP: &str = "onKeyUp";
pub const ON_CHANGE: &str = "onChange";

/// Host input delivered to a bound handler.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputEvent {
    /// Client position of the pointer, zero for keyboard input.
    pub position: Vec2,
    pub pointer_type: PointerType,
    /// DOM `key` value of keyboard events.
    pub key: Option<String>,
    /// New pressed state of `onChange` notifications.
    pub pressed: Option<bool>,
    /// Whether the key event is an auto-repeat.
    pub repeat: bool,
}

impl InputEvent {
    pub fn pointer(position: impl Into<Vec2>, pointer_type: PointerType) -> Self {
        Self {
            position: position.into(),
            pointer_type,
            ..Self::default()
        }
    }

    pub fn key(key: impl Into<String>) -> Self {
        Self {
            pointer_type: PointerType::Keyboard,
            key: Some(key.into()),
            ..Self::default()
        }
    }

    pub fn change(pressed: bool) -> Self {
        Self {
            pressed: Some(pressed),
            ..Self::default()
        }
    }
}

pub type EventHandler = Rc<dyn Fn(&InputEvent)>;

/// Props to spread onto the bound element.
#[derive(Clone, Default)]
pub struct BoundProps {
    handlers: IndexMap<&'static str, EventHandler>,
    style: IndexMap<String, String>,
    attributes: IndexMap<String, String>,
}

impl BoundProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler(mut self, name: &'static str, handler: impl Fn(&InputEvent) + 'static) -> Self {
        self.handlers.insert(name, Rc::new(handler));
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn handler(&self, name: &str) -> Option<&EventHandler> {
        self.handlers.get(name)
    }

    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn handler_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    /// Calls the handler bound to `name`. Returns false when there is none.
    pub fn invoke(&self, name: &str, event: &InputEvent) -> bool {
        match self.handlers.get(name) {
            Some(handler) => {
                let handler = Rc::clone(handler);
                handler(event);
                true
            }
            None => false,
        }
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.style.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Drops the handler bound to `name`.
    pub fn without(mut self, name: &str) -> Self {
        self.handlers.shift_remove(name);
        self
    }

    /// Combines two prop sets.
    ///
    /// Handlers bound to the same name on both sides are chained, `self`'s
    /// first. Style and attribute entries of `other` override `self`'s.
    pub fn merge(mut self, other: BoundProps) -> Self {
        for (name, handler) in other.handlers {
            let merged = match self.handlers.shift_remove(name) {
                Some(first) => {
                    let second = handler;
                    Rc::new(move |event: &InputEvent| {
                        first(event);
                        second(event);
                    }) as EventHandler
                }
                None => handler,
            };
            self.handlers.insert(name, merged);
        }
        self.style.extend(other.style);
        self.attributes.extend(other.attributes);
        self
    }
}

impl std::fmt::Debug for BoundProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundProps")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("style", &self.style)
            .field("attributes", &self.attributes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn merge_chains_handlers_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (Rc::clone(&log), Rc::clone(&log));
        let merged = BoundProps::new()
            .with_handler(ON_POINTER_DOWN, move |_| a.borrow_mut().push("first"))
            .merge(BoundProps::new().with_handler(ON_POINTER_DOWN, move |_| b.borrow_mut().push("second")));

        assert!(merged.invoke(ON_POINTER_DOWN, &InputEvent::default()));
        assert_eq!(*log.borrow(), vec!["first", "second"]);
        assert!(!merged.invoke(ON_KEY_DOWN, &InputEvent::default()));
    }

    #[test]
    fn merge_overrides_style_and_attributes() {
        let merged = BoundProps::new()
            .with_style("touch-action", "none")
            .with_attribute("data-a", "1")
            .merge(
                BoundProps::new()
                    .with_style("touch-action", "pan-y")
                    .with_attribute("data-b", "2"),
            );
        assert_eq!(merged.style("touch-action"), Some("pan-y"));
        assert_eq!(merged.attribute("data-a"), Some("1"));
        assert_eq!(merged.attribute("data-b"), Some("2"));
    }

    #[test]
    fn without_removes_one_handler() {
        let props = BoundProps::new()
            .with_handler(ON_CHANGE, |_| {})
            .with_handler(ON_KEY_UP, |_| {})
            .without(ON_CHANGE);
        assert!(!props.has_handler(ON_CHANGE));
        assert_eq!(props.handler_names().collect::<Vec<_>>(), vec![ON_KEY_UP]);
    }
}
