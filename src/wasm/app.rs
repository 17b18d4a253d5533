//! Mounts the app: owns the progress cell, the render loop, the menu and
//! every DOM listener, and releases them all on [`unmount`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{HtmlCanvasElement, HtmlElement, Window};

use super::dom::{self, Listener};
use super::overlay::Overlay;
use super::render::{FrameLoop, Renderer};
use crate::config::{Config, Overrides};
use crate::error::DomError;
use crate::progress::{Progress, ScrollMetrics};

const CANVAS_ID: &str = "c";
const CONFIG_ID: &str = "pi-trace-config";

thread_local! {
    static MOUNTED: RefCell<Option<App>> = const { RefCell::new(None) };
}

pub fn mount() -> Result<(), JsValue> {
    let app = App::new()?;
    let previous = MOUNTED.with(|slot| slot.borrow_mut().replace(app));
    if previous.is_some() {
        log::warn!("mount called twice; previous app dropped");
    }
    log::info!("pi_trace mounted");
    Ok(())
}

pub fn unmount() {
    let app = MOUNTED.with(|slot| slot.borrow_mut().take());
    if let Some(app) = app {
        drop(app);
        log::info!("pi_trace unmounted");
    }
}

/// Writes the progress cell; the frame loop is its only reader.
struct ScrollTracker {
    window: Window,
    body: HtmlElement,
    progress: Rc<Cell<Progress>>,
    hint: Option<HtmlElement>,
}

impl ScrollTracker {
    fn update(&self) {
        let metrics = ScrollMetrics {
            scroll_y: self.window.scroll_y().unwrap_or(0.0),
            viewport_height: dom::number(self.window.inner_height()),
            document_height: f64::from(self.body.scroll_height()),
        };
        let progress = metrics.progress();
        self.progress.set(progress);
        if let Some(hint) = &self.hint {
            dom::set_opacity(hint, progress.hint_opacity());
        }
    }
}

struct App {
    overlay: Rc<Overlay>,
    _frames: FrameLoop,
    _listeners: Vec<Listener>,
}

impl App {
    fn new() -> Result<Self, JsValue> {
        let window = dom::window()?;
        let body = dom::document()?.body().ok_or(DomError::NoBody)?;
        let config = load_config();

        let progress = Rc::new(Cell::new(Progress::START));
        let tracker = Rc::new(ScrollTracker {
            window: window.clone(),
            body,
            progress: Rc::clone(&progress),
            hint: dom::optional_by_id("scroll-hint"),
        });
        tracker.update();

        let canvas: HtmlCanvasElement = dom::by_id(CANVAS_ID)?;
        let frames = FrameLoop::start(Renderer::new(canvas)?, progress)?;

        let overlay = Overlay::new(&config)?;
        let listeners = vec![
            Listener::new(&window, "scroll", true, move |_| tracker.update())?,
            Listener::click("menu-trigger", {
                let overlay = Rc::clone(&overlay);
                move || overlay.open()
            })?,
            Listener::click("menu-close", {
                let overlay = Rc::clone(&overlay);
                move || overlay.close()
            })?,
            Listener::click("menu-generate", {
                let overlay = Rc::clone(&overlay);
                move || overlay.request()
            })?,
            Listener::click("menu-reset", {
                let overlay = Rc::clone(&overlay);
                move || overlay.reset()
            })?,
        ];

        Ok(Self {
            overlay,
            _frames: frames,
            _listeners: listeners,
        })
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.overlay.stop_reveal();
    }
}

/// Build-time config with the page's JSON block, if any, on top.
fn load_config() -> Config {
    let config = Config::from_build_env();
    let Some(block) = dom::optional_by_id::<HtmlElement>(CONFIG_ID) else {
        return config;
    };
    let raw = block.text_content().unwrap_or_default();
    match Overrides::from_json(&raw) {
        Ok(overrides) => config.with(overrides),
        Err(err) => {
            log::warn!("ignoring malformed #{CONFIG_ID}: {err}");
            config
        }
    }
}
