use viewconfig::{AltToggle, QueryParams};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlInputElement};

use crate::dom::{self, DomError};
use crate::settings::PageSettings;

/// Wires the alt-shader checkbox, if the page has one. Changing it reloads
/// the page with the toggled query.
pub fn install_alt_toggle(document: &Document, settings: &PageSettings) -> Result<(), DomError> {
    let toggle = AltToggle::new(&settings.config.toggle);
    if !toggle.is_enabled() {
        return Ok(());
    }
    let id = &settings.config.dom.alt_toggle;
    if document.get_element_by_id(id).is_none() {
        tracing::debug!(id, "page has no alt toggle");
        return Ok(());
    }

    let checkbox: HtmlInputElement = dom::element_as(document, id, "a checkbox input")?;
    checkbox.set_checked(toggle.is_checked(&QueryParams::from_url(&settings.page)));

    let page = settings.page.clone();
    let toggle_settings = settings.config.toggle.clone();
    let on_change = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let checked = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            .is_some_and(|input| input.checked());
        let url = AltToggle::new(&toggle_settings).navigation_url(&page, checked);
        tracing::debug!(%url, checked, "alt toggle changed");
        let navigated = dom::window().and_then(|window| {
            window
                .location()
                .set_href(url.as_str())
                .map_err(DomError::js)
        });
        if let Err(error) = navigated {
            tracing::error!(%error, "failed to navigate");
        }
    });
    checkbox
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        .map_err(DomError::js)?;
    // The listener lives as long as the page.
    on_change.forget();
    Ok(())
}
