use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlElement};

use crate::error::Result;
use crate::item::CarouselItems;
use crate::layout::ItemTransform;
use crate::stage::Stage;

pub const POSTER_CLASS: &str = "poster";
const CENTER_CLASS: &str = "is-center";
/// Below this opacity a poster is taken out of hit testing.
const HIDDEN_OPACITY: f64 = 0.001;

/// Posters rendered as absolutely positioned elements inside the container.
pub struct DomStage {
    container: HtmlElement,
    posters: Vec<HtmlElement>,
    centered: Option<usize>,
}

impl DomStage {
    /// Build one poster element per item. The container is emptied first;
    /// the item list, not existing markup, is the source of truth.
    pub fn mount(document: &Document, container: HtmlElement, items: &CarouselItems) -> Result<Self> {
        container.set_inner_html("");
        let mut posters = Vec::with_capacity(items.len());
        for item in items {
            let poster = create(document, "div")?;
            poster.set_class_name(POSTER_CLASS);
            poster.set_attribute("data-index", &item.index().to_string())?;
            poster.set_attribute("data-category", item.category())?;
            poster.set_attribute("role", "button")?;
            poster.set_attribute("aria-label", item.title())?;

            if let Some(src) = item.image() {
                let img = create(document, "img")?;
                img.set_attribute("src", src)?;
                img.set_attribute("alt", "")?;
                img.set_attribute("draggable", "false")?;
                poster.append_child(&img)?;
            }
            let title = create(document, "span")?;
            title.set_class_name("poster-title");
            title.set_text_content(Some(item.title()));
            poster.append_child(&title)?;

            container.append_child(&poster)?;
            posters.push(poster);
        }
        Ok(Self {
            container,
            posters,
            centered: None,
        })
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    #[cfg(test)]
    pub fn poster(&self, index: usize) -> Option<&HtmlElement> {
        self.posters.get(index)
    }
}

impl Stage for DomStage {
    fn apply_transform(&mut self, index: usize, transform: &ItemTransform) {
        let Some(poster) = self.posters.get(index) else {
            return;
        };
        let hidden = transform.opacity <= HIDDEN_OPACITY;
        set_style(poster, "transform", &transform.css_transform());
        set_style(poster, "opacity", &format!("{:.3}", transform.opacity));
        set_style(poster, "filter", &transform.css_filter());
        set_style(poster, "z-index", &transform.z_index.to_string());
        set_style(poster, "visibility", if hidden { "hidden" } else { "visible" });
        set_style(poster, "pointer-events", if hidden { "none" } else { "auto" });
    }

    fn set_container_opacity(&mut self, opacity: f64) {
        set_style(&self.container, "opacity", &format!("{opacity:.3}"));
    }

    fn mark_centered(&mut self, index: usize) {
        if self.centered == Some(index) {
            return;
        }
        if let Some(previous) = self.centered.and_then(|i| self.posters.get(i)) {
            let _ = previous.class_list().remove_1(CENTER_CLASS);
        }
        if let Some(poster) = self.posters.get(index) {
            let _ = poster.class_list().add_1(CENTER_CLASS);
        }
        self.centered = Some(index);
    }
}

/// Index of the poster an event landed on, if any.
pub fn poster_index(target: Option<EventTarget>) -> Option<usize> {
    target?
        .dyn_into::<Element>()
        .ok()?
        .closest(&format!(".{POSTER_CLASS}"))
        .ok()??
        .get_attribute("data-index")?
        .parse()
        .ok()
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        log::debug!("failed to set {property}: {err:?}");
    }
}

fn create(document: &Document, tag: &str) -> Result<HtmlElement> {
    Ok(document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)?)
}
