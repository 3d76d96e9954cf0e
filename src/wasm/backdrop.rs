use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use super::dom::set_style;
use crate::config::{BackgroundConfig, MountConfig};
use crate::stage::Backdrop;

/// Two stacked layers; each change loads the back layer and cross-fades it
/// over the front one.
pub struct DomBackdrop {
    layers: [HtmlElement; 2],
    front: usize,
    current: Option<usize>,
    config: BackgroundConfig,
}

impl DomBackdrop {
    /// `None` when the page has no backdrop element; the carousel then runs
    /// without a background slideshow.
    pub fn mount(document: &Document, config: &BackgroundConfig, mount: &MountConfig) -> Option<Self> {
        let Some(root) = document.get_element_by_id(&mount.backdrop_id) else {
            log::info!("no #{} element, background sync disabled", mount.backdrop_id);
            return None;
        };
        match Self::build(document, &root, config) {
            Ok(backdrop) => Some(backdrop),
            Err(err) => {
                log::warn!("failed to build backdrop layers: {err:?}");
                None
            }
        }
    }

    fn build(
        document: &Document,
        root: &web_sys::Element,
        config: &BackgroundConfig,
    ) -> Result<Self, JsValue> {
        root.set_inner_html("");
        let layer = || -> Result<HtmlElement, JsValue> {
            let el = document.create_element("div")?.dyn_into::<HtmlElement>()?;
            el.set_class_name("backdrop-layer");
            set_style(&el, "opacity", "0");
            root.append_child(&el)?;
            Ok(el)
        };
        let layers = [layer()?, layer()?];
        Ok(Self {
            layers,
            front: 0,
            current: None,
            config: config.clone(),
        })
    }
}

impl Backdrop for DomBackdrop {
    fn total_images(&self) -> usize {
        self.config.total_images()
    }

    fn set_background_image(&mut self, index: usize, transition_ms: f64) {
        if self.current == Some(index) {
            return;
        }
        let Some(url) = self.config.image_url(index) else {
            log::debug!("no background image at {index}");
            return;
        };
        let back = 1 - self.front;
        let transition = format!("opacity {transition_ms:.0}ms ease");
        let (incoming, outgoing) = (&self.layers[back], &self.layers[self.front]);
        set_style(incoming, "transition", &transition);
        set_style(outgoing, "transition", &transition);
        set_style(incoming, "background-image", &format!("url(\"{url}\")"));
        set_style(incoming, "opacity", "1");
        set_style(outgoing, "opacity", "0");
        self.front = back;
        self.current = Some(index);
    }
}
