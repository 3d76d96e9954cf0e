//! A circular poster carousel with a synchronized background slideshow.
//!
//! The state machine, geometry and timing are plain Rust and run anywhere;
//! the `wasm32` build adds the browser binding that mounts the carousel on
//! a page and drives it from `requestAnimationFrame`.

pub mod config;
pub mod controller;
pub mod easing;
pub mod entrance;
pub mod error;
pub mod item;
pub mod layout;
pub mod ring;
pub mod stage;
pub mod tween;

pub use config::CarouselConfig;
pub use controller::{
    CarouselController, ControllerState, MoveOutcome, MoveRequest, ScrollOutcome, TickReport,
};
pub use error::{CarouselError, Result};
pub use item::{CarouselItem, CarouselItems};
pub use layout::{ItemTransform, LayoutParams};
pub use stage::{Backdrop, Stage};

// Only compile the browser binding when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::{CarouselConfig, CarouselController, CarouselError, CarouselItems};

    mod backdrop;
    mod dom;
    mod input;
    mod logger;
    mod render;

    /// The page element that hosts the posters and carries `data-config`.
    const CONTAINER_ID: &str = "carousel";

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        logger::init(log::LevelFilter::Info);

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let Some(container) = document.get_element_by_id(CONTAINER_ID) else {
            log::warn!("no #{CONTAINER_ID} element, carousel disabled");
            return Ok(());
        };
        let container = container.dyn_into::<web_sys::HtmlElement>()?;

        let config = match container.get_attribute("data-config") {
            Some(raw) => CarouselConfig::from_json(&raw)?,
            None => CarouselConfig::default(),
        };
        log::set_max_level(config.log_level.0);

        let items = load_items(&document, &config.mount.data_id)?;
        if items.is_empty() {
            log::warn!("carousel data is empty, nothing to render");
            return Ok(());
        }

        let stage = dom::DomStage::mount(&document, container, &items)?;
        let backdrop = backdrop::DomBackdrop::mount(&document, &config.background, &config.mount);
        let viewport_width = window.inner_width()?.as_f64().unwrap_or(0.0);
        log::info!("mounting carousel with {} posters", items.len());

        let controller = CarouselController::new(items, config, viewport_width, stage, backdrop);
        render::start(Rc::new(RefCell::new(controller)))?;
        Ok(())
    }

    fn load_items(document: &web_sys::Document, data_id: &str) -> Result<CarouselItems, CarouselError> {
        let raw = document
            .get_element_by_id(data_id)
            .ok_or_else(|| CarouselError::MissingElement(format!("#{data_id}")))?
            .text_content()
            .unwrap_or_default();
        CarouselItems::from_json(&raw)
    }
}
