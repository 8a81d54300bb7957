//! Browser entry point of the depth-map parallax gallery.
//!
//! On load the module reads the page query, fills the sidebar from the
//! artwork manifest and brings up the parallax preview for the selected
//! artwork. Everything except [`preview`] and [`settings`] talks to the DOM
//! and only builds for `wasm32`.
//!
//! ```text
//! page URL ──▶ PageSettings ──┬──▶ manifest ──▶ sidebar links
//!                             ├──▶ alt toggle
//!                             └──▶ color + depth ──▶ canvas ──▶ frame loop
//! ```

pub mod preview;
pub mod settings;

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod frame_loop;
#[cfg(target_arch = "wasm32")]
mod links;
#[cfg(target_arch = "wasm32")]
mod mount;
#[cfg(target_arch = "wasm32")]
mod run;
#[cfg(target_arch = "wasm32")]
mod toggle;

pub use preview::{show_preview, PreviewMount, PreviewRequest};
pub use settings::PageSettings;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    run::start()?;
    Ok(())
}

/// Stops the preview animation. The last frame stays on the canvas.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop_preview() {
    run::stop_preview();
}
