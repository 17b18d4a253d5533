//! The full-screen menu: binds [`Menu`] to its DOM and runs the request and
//! reveal tasks.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{abortable, AbortHandle};
use futures::StreamExt;
use gloo_timers::future::IntervalStream;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlButtonElement, HtmlElement};

use super::client::GeminiClient;
use super::dom;
use crate::config::{Config, Prompt};
use crate::error::DomError;
use crate::explain::Explainer;
use crate::menu::{self, Menu, Reveal};

const GENERATE_LABEL: &str = "GENERATE EXPLANATION";
const LOADING_LABEL: &str = "COMPUTING...";

struct MenuView {
    root: HtmlElement,
    intro: HtmlElement,
    response: HtmlElement,
    text: HtmlElement,
    generate: HtmlButtonElement,
    generate_label: HtmlElement,
}

impl MenuView {
    fn find() -> Result<Self, DomError> {
        Ok(Self {
            root: dom::by_id("menu")?,
            intro: dom::by_id("menu-intro")?,
            response: dom::by_id("menu-response")?,
            text: dom::by_id("menu-text")?,
            generate: dom::by_id("menu-generate")?,
            generate_label: dom::by_id("menu-generate-label")?,
        })
    }

    fn render(&self, menu: &Menu) {
        let reveal = menu.reveal();
        self.root.set_hidden(!menu.is_open());
        self.intro.set_hidden(reveal.is_some());
        self.response.set_hidden(reveal.is_none());
        self.generate.set_disabled(!menu.can_request());
        let label = if menu.is_loading() {
            LOADING_LABEL
        } else {
            GENERATE_LABEL
        };
        self.generate_label.set_text_content(Some(label));
        self.text.set_text_content(Some(reveal.map_or("", Reveal::visible)));
    }
}

/// Aborts the reveal ticker when dropped.
struct RevealTask(AbortHandle);

impl Drop for RevealTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

pub struct Overlay {
    menu: Rc<RefCell<Menu>>,
    view: MenuView,
    explainer: Rc<Explainer<GeminiClient>>,
    prompt: Rc<Prompt>,
    reveal_interval: Duration,
    reveal: RefCell<Option<RevealTask>>,
}

impl Overlay {
    pub fn new(config: &Config) -> Result<Rc<Self>, DomError> {
        let explainer =
            Explainer::new(config.api_key.clone(), |key| GeminiClient::new(key, config));
        let overlay = Rc::new(Self {
            menu: Rc::new(RefCell::new(Menu::new())),
            view: MenuView::find()?,
            explainer: Rc::new(explainer),
            prompt: Rc::new(config.prompt.clone()),
            reveal_interval: config.reveal_interval,
            reveal: RefCell::new(None),
        });
        overlay.sync();
        Ok(overlay)
    }

    fn sync(&self) {
        self.view.render(&self.menu.borrow());
    }

    pub fn open(&self) {
        if self.menu.borrow_mut().open() {
            self.sync();
        }
    }

    pub fn close(&self) {
        self.stop_reveal();
        if self.menu.borrow_mut().close() {
            self.sync();
        }
    }

    pub fn reset(&self) {
        self.stop_reveal();
        if self.menu.borrow_mut().reset() {
            self.sync();
        }
    }

    /// Ask for the explanation; ignored unless the idle panel is up.
    pub fn request(self: &Rc<Self>) {
        let Some(id) = self.menu.borrow_mut().request() else {
            return;
        };
        self.sync();

        let weak_menu = Rc::downgrade(&self.menu);
        let overlay = Rc::downgrade(self);
        let explainer = Rc::clone(&self.explainer);
        let prompt = Rc::clone(&self.prompt);
        spawn_local(async move {
            let applied = menu::fulfil(&weak_menu, id, &explainer, &prompt).await;
            let Some(overlay) = overlay.upgrade() else {
                return;
            };
            if applied {
                overlay.start_reveal();
            }
            overlay.sync();
        });
    }

    fn start_reveal(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let millis = self.reveal_interval.as_millis();
        let millis = u32::try_from(millis).unwrap_or(u32::MAX);
        let (ticker, handle) = abortable(async move {
            let mut ticks = IntervalStream::new(millis);
            while ticks.next().await.is_some() {
                let Some(overlay) = weak.upgrade() else {
                    break;
                };
                let more = overlay.menu.borrow_mut().advance_reveal();
                overlay.sync();
                if !more {
                    break;
                }
            }
        });
        // Replacing the slot aborts any earlier reveal.
        self.reveal.replace(Some(RevealTask(handle)));
        spawn_local(async move {
            if ticker.await.is_err() {
                log::debug!("reveal stopped before the end of the text");
            }
        });
    }

    pub fn stop_reveal(&self) {
        self.reveal.borrow_mut().take();
    }
}
