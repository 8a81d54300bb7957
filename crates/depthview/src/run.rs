use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use gallery::{load_manifest, nav_links, GalleryClient};
use renderer::{ParallaxLoop, ShaderSources};
use tracing_subscriber::EnvFilter;
use viewconfig::ViewerConfig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use crate::console::ConsoleMakeWriter;
use crate::dom::{self, DomError};
use crate::frame_loop::{self, FrameLoopHandle, PerformanceClock};
use crate::links::render_links;
use crate::mount::CanvasMount;
use crate::preview::show_preview;
use crate::settings::PageSettings;
use crate::toggle::install_alt_toggle;

thread_local! {
    static ACTIVE_LOOP: RefCell<Option<FrameLoopHandle>> = const { RefCell::new(None) };
}

/// Launches once the document is parsed.
pub fn start() -> Result<(), DomError> {
    let document = dom::document()?;
    let state = js_sys::Reflect::get(&document, &JsValue::from_str("readyState"))
        .map_err(DomError::js)?
        .as_string()
        .unwrap_or_default();

    if state == "loading" {
        let on_ready = Closure::once_into_js(move || {
            if let Err(err) = launch() {
                report_launch_failure(&err);
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .map_err(DomError::js)?;
        return Ok(());
    }

    if let Err(err) = launch() {
        report_launch_failure(&err);
    }
    Ok(())
}

/// Stops the running animation, if any.
pub fn stop_preview() {
    ACTIVE_LOOP.with(|active| {
        if let Some(handle) = active.borrow_mut().take() {
            handle.stop();
        }
    });
}

fn report_launch_failure(err: &anyhow::Error) {
    // Tracing may not be installed yet.
    web_sys::console::error_1(&JsValue::from_str(&format!("depthview failed to start: {err:#}")));
}

fn initialise_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(ConsoleMakeWriter)
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing already initialised");
    }
}

fn launch() -> Result<()> {
    let config = ViewerConfig::bundled().context("loading bundled configuration")?;
    let window = dom::window()?;
    let document = dom::document()?;
    let page = dom::page_url(&window)?;
    let settings = Rc::new(PageSettings::new(config, page));

    initialise_tracing(&settings.view.log);
    tracing::info!(art = %settings.view.art, alt = settings.view.alt, "starting viewer");

    {
        let document = document.clone();
        let settings = settings.clone();
        spawn_local(async move {
            if let Err(err) = populate_sidebar(&document, &settings).await {
                tracing::error!("sidebar: {err:#}");
            }
        });
    }

    if let Err(err) = install_alt_toggle(&document, &settings) {
        tracing::warn!(%err, "alt toggle unavailable");
    }

    spawn_local(async move {
        if let Err(err) = run_preview(&document, &settings).await {
            tracing::error!("preview: {err:#}");
        }
    });
    Ok(())
}

async fn populate_sidebar(document: &Document, settings: &PageSettings) -> Result<()> {
    let client = GalleryClient::new()?;
    let manifest_url = settings.manifest_url()?;
    let ids = load_manifest(&client, &manifest_url, settings.config.manifest.sort)
        .await
        .with_context(|| format!("loading manifest {manifest_url}"))?;
    let links = nav_links(&ids, &settings.page);
    render_links(document, &settings.config.dom.sidebar, &links)?;
    tracing::info!(count = links.len(), "sidebar populated");
    Ok(())
}

async fn run_preview(document: &Document, settings: &PageSettings) -> Result<()> {
    let sources = ShaderSources::new(
        dom::script_text(document, &settings.config.shaders.vertex)?,
        dom::script_text(document, settings.fragment_shader_id())?,
    );
    let request = settings.preview_request()?;
    let client = GalleryClient::new()?;
    let mut mount = CanvasMount::new(document, &settings.config.dom.preview, sources)?;

    let renderer = show_preview(&client, &mut mount, &request).await?;

    let clock = PerformanceClock::new(&dom::window()?)?;
    let parallax = ParallaxLoop::new(renderer, settings.motion(), clock).with_tilt(settings.tilt());
    let handle = frame_loop::start(parallax, mount.container().clone())?;

    ACTIVE_LOOP.with(|active| {
        if let Some(previous) = active.borrow_mut().replace(handle) {
            previous.stop();
        }
    });
    Ok(())
}
