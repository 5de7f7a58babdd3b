use std::rc::Rc;
use tactile_foundation::{GlobalPointerEvents, InputEvent, ListenerRegistration, PointerType};
use tactile_ui_graphics::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, PointerEvent};

/// `pointermove` listeners on `window`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebPointerEvents;

impl GlobalPointerEvents for WebPointerEvents {
    fn add_pointer_move_listener(&self, listener: Rc<dyn Fn(Vec2)>) -> ListenerRegistration {
        let Some(window) = web_sys::window() else {
            return ListenerRegistration::inactive();
        };
        let closure = Closure::wrap(Box::new(move |event: PointerEvent| {
            listener(Vec2::new(event.client_x() as f32, event.client_y() as f32));
        }) as Box<dyn FnMut(_)>);

        if let Err(err) =
            window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to add pointermove listener: {err:?}");
            return ListenerRegistration::inactive();
        }

        ListenerRegistration::new(move || {
            if let Err(err) = window.remove_event_listener_with_callback(
                "pointermove",
                closure.as_ref().unchecked_ref(),
            ) {
                log::debug!("failed to remove pointermove listener: {err:?}");
            }
        })
    }
}

/// Converts a DOM pointer event into the engine's input event.
pub fn input_event_from_pointer(event: &PointerEvent) -> InputEvent {
    InputEvent::pointer(
        [event.client_x() as f32, event.client_y() as f32],
        PointerType::from_dom(&event.pointer_type()),
    )
}

/// Converts a DOM keyboard event into the engine's input event.
pub fn input_event_from_key(event: &KeyboardEvent) -> InputEvent {
    let mut input = InputEvent::key(event.key());
    input.repeat = event.repeat();
    input
}
