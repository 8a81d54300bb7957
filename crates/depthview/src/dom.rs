use url::Url;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Window};

#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("no global `{0}` available")]
    MissingGlobal(&'static str),
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("element #{id} is not {expected}")]
    WrongElement { id: String, expected: &'static str },
    #[error("page url is not valid: {0}")]
    PageUrl(#[from] url::ParseError),
    #[error("javascript error: {0}")]
    Js(String),
}

impl DomError {
    pub fn js(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|error| String::from(error.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(message)
    }
}

impl From<DomError> for JsValue {
    fn from(error: DomError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::MissingGlobal("window"))
}

pub fn document() -> Result<Document, DomError> {
    window()?
        .document()
        .ok_or(DomError::MissingGlobal("document"))
}

pub fn page_url(window: &Window) -> Result<Url, DomError> {
    let href = window.location().href().map_err(DomError::js)?;
    Ok(Url::parse(&href)?)
}

pub fn element_by_id(document: &Document, id: &str) -> Result<Element, DomError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(id.to_string()))
}

/// Looks up `id` and casts it to `T`, naming `expected` on mismatch.
pub fn element_as<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<T, DomError> {
    element_by_id(document, id)?
        .dyn_into::<T>()
        .map_err(|_| DomError::WrongElement {
            id: id.to_string(),
            expected,
        })
}

/// Text of an inline `<script>` block, such as an embedded shader.
pub fn script_text(document: &Document, id: &str) -> Result<String, DomError> {
    Ok(element_by_id(document, id)?
        .text_content()
        .unwrap_or_default())
}
