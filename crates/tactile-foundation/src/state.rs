use crate::event::{GestureEvent, GestureKind};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Latest event per gesture kind for one bound element.
///
/// Consumers get a read-only view; only the engine overwrites entries.
#[derive(Clone, Default)]
pub struct GestureStateMap {
    events: Rc<RefCell<FxHashMap<GestureKind, GestureEvent>>>,
}

impl GestureStateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: GestureKind) -> Option<GestureEvent> {
        self.events.borrow().get(&kind).copied()
    }

    pub fn drag(&self) -> Option<GestureEvent> {
        self.get(GestureKind::Drag)
    }

    pub fn pinch(&self) -> Option<GestureEvent> {
        self.get(GestureKind::Pinch)
    }

    pub fn long_press(&self) -> Option<GestureEvent> {
        self.get(GestureKind::LongPress)
    }

    /// Whether the latest `kind` event is active.
    pub fn is_active(&self, kind: GestureKind) -> bool {
        self.get(kind).is_some_and(|event| event.is_active())
    }

    pub fn kinds(&self) -> Vec<GestureKind> {
        let mut kinds: Vec<_> = self.events.borrow().keys().copied().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub(crate) fn insert(&self, event: GestureEvent) {
        self.events.borrow_mut().insert(event.kind(), event);
    }

    pub(crate) fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl std::fmt::Debug for GestureStateMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.kinds()
                    .into_iter()
                    .filter_map(|kind| self.get(kind).map(|event| (kind, event))),
            )
            .finish()
    }
}
