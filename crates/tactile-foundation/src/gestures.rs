//! Public entry point: one gesture binding per element.

use crate::config::GestureConfig;
use crate::event::GestureKind;
use crate::host::{ElementRef, GestureEnvironment};
use crate::long_press::LongPressMachine;
use crate::props::{BoundProps, ON_CHANGE};
use crate::recognizer::{GestureAdapter, GestureRecognizer};
use crate::state::GestureStateMap;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// What a component spreads onto its element and reads while rendering.
#[derive(Clone, Debug)]
pub struct GestureBinding {
    pub props: BoundProps,
    pub state: GestureStateMap,
}

/// Recognizer adapter and long-press machine for one element.
///
/// Owns every frame loop, timer and listener the element uses. Disabling or
/// dropping the binding cancels all of them before returning.
pub struct Gestures {
    config: Rc<GestureConfig>,
    element: ElementRef,
    recognizer: Rc<dyn GestureRecognizer>,
    adapter: GestureAdapter,
    long_press: Option<LongPressMachine>,
    state: GestureStateMap,
    props: RefCell<BoundProps>,
    disabled: Cell<bool>,
}

impl Gestures {
    pub fn new(
        config: GestureConfig,
        element: ElementRef,
        env: GestureEnvironment,
        recognizer: Rc<dyn GestureRecognizer>,
    ) -> Self {
        let config = Rc::new(config);
        let state = GestureStateMap::new();
        let adapter = GestureAdapter::new(Rc::clone(&config), element.clone(), &env, state.clone());
        let long_press = config.long_press.as_ref().map(|long_press| {
            LongPressMachine::new(
                long_press,
                config.callbacks.clone(),
                config.css_vars.as_ref(),
                element.clone(),
                &env,
                state.clone(),
            )
        });
        let gestures = Self {
            config: Rc::clone(&config),
            element,
            recognizer,
            adapter,
            long_press,
            state,
            props: RefCell::new(BoundProps::new()),
            disabled: Cell::new(false),
        };
        if config.disabled {
            gestures.set_disabled(true);
        } else {
            gestures.rebind();
        }
        gestures
    }

    fn rebind(&self) {
        let mut props = self.adapter.bind(self.recognizer.as_ref());
        if let Some(long_press) = &self.long_press {
            let mut press_props = long_press.props();
            if self.config.drag.is_some() {
                press_props = press_props.without(ON_CHANGE);
            }
            props = props.merge(press_props);
        }
        log::debug!("bound gesture props {props:?}");
        *self.props.borrow_mut() = props;
    }

    pub fn binding(&self) -> GestureBinding {
        GestureBinding {
            props: self.props(),
            state: self.state(),
        }
    }

    pub fn props(&self) -> BoundProps {
        self.props.borrow().clone()
    }

    pub fn state(&self) -> GestureStateMap {
        self.state.clone()
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn adapter(&self) -> &GestureAdapter {
        &self.adapter
    }

    pub fn long_press(&self) -> Option<&LongPressMachine> {
        self.long_press.as_ref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    /// Disabling tears down inertia, the long press and every snapshot, and
    /// strips the handlers. Enabling binds again from a clean state.
    pub fn set_disabled(&self, disabled: bool) {
        if self.disabled.replace(disabled) == disabled {
            return;
        }
        self.adapter.set_disabled(disabled);
        if let Some(long_press) = &self.long_press {
            long_press.set_disabled(disabled);
        }
        if disabled {
            self.teardown();
            *self.props.borrow_mut() = BoundProps::new().with_style("touch-action", "auto");
            log::debug!("gestures disabled");
        } else {
            self.rebind();
            log::debug!("gestures enabled");
        }
    }

    /// Releases every resource and detaches from the element.
    pub fn unmount(&self) {
        self.adapter.set_disabled(true);
        if let Some(long_press) = &self.long_press {
            long_press.set_disabled(true);
        }
        self.teardown();
        *self.props.borrow_mut() = BoundProps::new();
        self.element.release();
    }

    fn teardown(&self) {
        self.adapter.cancel_inertia();
        if let Some(long_press) = &self.long_press {
            long_press.teardown();
        }
        let kinds = self.state.kinds();
        self.state.clear();
        self.element.with(|el| {
            for kind in kinds.iter().filter(|kind| **kind != GestureKind::LongPress) {
                el.remove_attribute(&kind.state_attribute());
            }
        });
    }
}

impl Drop for Gestures {
    fn drop(&mut self) {
        self.adapter.set_disabled(true);
        self.teardown();
    }
}

impl std::fmt::Debug for Gestures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gestures")
            .field("element", &self.element)
            .field("adapter", &self.adapter)
            .field("long_press", &self.long_press)
            .field("disabled", &self.disabled.get())
            .finish()
    }
}
