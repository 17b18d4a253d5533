//! Element lookup and event listeners that unregister themselves.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Document, Event, EventTarget, HtmlElement, Window};

use crate::error::DomError;

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

/// The element with `id`, cast to `T`.
pub fn by_id<T: JsCast>(id: &'static str) -> Result<T, DomError> {
    document()?
        .get_element_by_id(id)
        .ok_or(DomError::MissingElement(id))?
        .dyn_into::<T>()
        .map_err(|_| DomError::WrongElementType(id))
}

/// Like [`by_id`] for elements the page may leave out.
pub fn optional_by_id<T: JsCast>(id: &'static str) -> Option<T> {
    match by_id(id) {
        Ok(el) => Some(el),
        Err(DomError::MissingElement(_)) => None,
        Err(err) => {
            log::warn!("{err}");
            None
        }
    }
}

/// Read a numeric window property such as `innerWidth`.
pub fn number(value: Result<JsValue, JsValue>) -> f64 {
    value.map_or(0.0, |v| v.as_f64().unwrap_or(0.0))
}

pub fn set_opacity(el: &HtmlElement, opacity: f64) {
    if let Err(err) = el.style().set_property("opacity", &opacity.to_string()) {
        log::warn!("could not set opacity: {err:?}");
    }
}

/// An event listener that is removed when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Click handler on the element with `id`.
    pub fn click(id: &'static str, mut handler: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let el: HtmlElement = by_id(id)?;
        Self::new(&el, "click", false, move |_| handler())
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("could not remove {} listener: {err:?}", self.event);
        }
    }
}
