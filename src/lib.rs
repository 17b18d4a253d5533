//! Scroll-driven trace of `e^(it) + e^(iπt)` on a browser canvas.
//!
//! The page's scroll position sets how far along the curve the two-link arm
//! has drawn; the trail is stroked additively, so where the non-repeating
//! path overlaps itself the disk brightens toward white. A full-screen menu
//! asks a generative-AI service for a short text about π.
//!
//! | Module | Role |
//! |--------|------|
//! | [`progress`] | Scroll geometry to a clamped `[0, 1]` progress |
//! | [`curve`] | The curve, the arm and the polyline vertices |
//! | [`layout`] | Canvas size and curve-to-canvas transform |
//! | [`menu`] | Overlay menu state machine and text reveal |
//! | [`explain`] | Generator capability with fallback texts |
//! | [`gemini`] | `generateContent` request/response types |
//! | [`config`] | Defaults, build env and page overrides |
//! | [`site`] | Copies the built site into `dist/` |
//! | `wasm` | DOM binding, render loop, HTTP client (wasm32 only) |

pub mod config;
pub mod consts;
pub mod curve;
pub mod error;
pub mod explain;
pub mod gemini;
pub mod layout;
pub mod menu;
pub mod progress;
pub mod site;

// Only compile browser-facing code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    mod app;
    pub mod client;
    pub mod dom;
    pub mod overlay;
    pub mod render;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let level = if cfg!(debug_assertions) {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        if console_log::init_with_level(level).is_err() {
            log::debug!("logger already installed");
        }

        app::mount()
    }

    /// Remove every listener, stop the render loop and drop the menu.
    #[wasm_bindgen]
    pub fn unmount() {
        app::unmount();
    }
}
