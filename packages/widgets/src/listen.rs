use std::rc::Rc;

use clonelet::clone;
use wasm_bindgen::{closure::Closure, JsCast, UnwrapThrowExt};
use web_sys::EventTarget;

/// Handler shared between a live registration and its owner, so removal
/// hands the event bus the same function identity that registration did.
pub type SharedHandler = Rc<Closure<dyn FnMut(web_sys::Event)>>;

pub fn shared_handler(handler: impl FnMut(web_sys::Event) + 'static) -> SharedHandler {
    Rc::new(Closure::new(handler))
}

/// A single `addEventListener` registration, removed on drop.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    handler: SharedHandler,
}

impl Listener {
    /// Registers an existing handler, which can be re-registered after this
    /// `Listener` is dropped.
    pub fn attach(target: &EventTarget, event: &'static str, handler: &SharedHandler) -> Self {
        target
            .add_event_listener_with_callback(event, function(handler))
            .unwrap_throw();
        clone!(target, handler);

        Self {
            target,
            event,
            handler,
        }
    }

    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Self {
        Self::attach(target, event, &shared_handler(handler))
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.target
            .remove_event_listener_with_callback(self.event, function(&self.handler))
            .unwrap_throw();
    }
}

fn function(handler: &SharedHandler) -> &js_sys::Function {
    (**handler).as_ref().unchecked_ref()
}
