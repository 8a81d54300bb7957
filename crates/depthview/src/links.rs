use gallery::{NavLink, LINK_CLASS};
use web_sys::Document;

use crate::dom::{element_by_id, DomError};

/// Appends `<ul>` with one `<li><a class="link">` per link to the sidebar.
pub fn render_links(document: &Document, sidebar_id: &str, links: &[NavLink]) -> Result<(), DomError> {
    let sidebar = element_by_id(document, sidebar_id)?;
    let list = document.create_element("ul").map_err(DomError::js)?;
    for link in links {
        let item = document.create_element("li").map_err(DomError::js)?;
        let anchor = document.create_element("a").map_err(DomError::js)?;
        anchor.set_class_name(LINK_CLASS);
        anchor
            .set_attribute("href", link.href.as_str())
            .map_err(DomError::js)?;
        anchor.set_text_content(Some(&link.label));
        item.append_child(&anchor).map_err(DomError::js)?;
        list.append_child(&item).map_err(DomError::js)?;
    }
    sidebar.append_child(&list).map_err(DomError::js)?;
    Ok(())
}
