//! Drives a [`ParallaxLoop`] from `requestAnimationFrame`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use renderer::{FrameTarget, LoopControl, ParallaxLoop, TimeSource};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Performance, Window};

use crate::dom::{self, DomError};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `performance.now()` in milliseconds.
pub struct PerformanceClock {
    performance: Performance,
}

impl PerformanceClock {
    pub fn new(window: &Window) -> Result<Self, DomError> {
        let performance = window
            .performance()
            .ok_or(DomError::MissingGlobal("performance"))?;
        Ok(Self { performance })
    }
}

impl TimeSource for PerformanceClock {
    fn now_ms(&mut self) -> f64 {
        self.performance.now()
    }
}

/// Stops a running frame loop and cancels its pending frame.
pub struct FrameLoopHandle {
    control: LoopControl,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoopHandle {
    pub fn stop(&self) {
        self.control.stop();
        if let Some(id) = self.pending.take() {
            if let Ok(window) = dom::window() {
                if let Err(error) = window.cancel_animation_frame(id) {
                    tracing::warn!(error = %DomError::js(error), "failed to cancel animation frame");
                }
            }
        }
        self.callback.borrow_mut().take();
        tracing::debug!("frame loop stopped");
    }
}

/// Schedules `parallax` on every animation frame and applies each frame's
/// tilt to `container`. Runs until [`FrameLoopHandle::stop`] or a draw error.
pub fn start<T, C>(mut parallax: ParallaxLoop<T, C>, container: HtmlElement) -> Result<FrameLoopHandle, DomError>
where
    T: FrameTarget + 'static,
    C: TimeSource + 'static,
{
    let window = dom::window()?;
    let control = parallax.control();
    let pending = Rc::new(Cell::new(None));
    let callback: FrameCallback = Rc::new(RefCell::new(None));

    let scheduled = callback.clone();
    let pending_frame = pending.clone();
    let frame_window = window.clone();
    *callback.borrow_mut() = Some(Closure::new(move || {
        pending_frame.set(None);
        match parallax.tick() {
            Ok(Some(update)) => {
                if let Err(error) = container
                    .style()
                    .set_property("transform", &update.css_transform())
                {
                    tracing::warn!(error = %DomError::js(error), "failed to tilt preview");
                }
            }
            Ok(None) => return,
            Err(error) => {
                tracing::error!(%error, "frame failed; stopping animation");
                return;
            }
        }
        if let Some(next) = scheduled.borrow().as_ref() {
            match frame_window.request_animation_frame(next.as_ref().unchecked_ref()) {
                Ok(id) => pending_frame.set(Some(id)),
                Err(error) => tracing::error!(error = %DomError::js(error), "failed to schedule frame"),
            }
        }
    }));

    if let Some(first) = callback.borrow().as_ref() {
        let id = window
            .request_animation_frame(first.as_ref().unchecked_ref())
            .map_err(DomError::js)?;
        pending.set(Some(id));
    }

    Ok(FrameLoopHandle {
        control,
        pending,
        callback,
    })
}
