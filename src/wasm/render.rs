use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::window;

use super::backdrop::DomBackdrop;
use super::dom::DomStage;
use super::input;
use crate::controller::CarouselController;

pub type Carousel = CarouselController<DomStage, Option<DomBackdrop>>;
pub type SharedCarousel = Rc<RefCell<Carousel>>;

/// Run the entrance sweep, then keep ticking the carousel every frame.
/// Input is attached once the entrance reports completion and detached
/// only with the page.
pub fn start(carousel: SharedCarousel) -> Result<(), JsValue> {
    let window = window().ok_or("no window")?;

    // Re-layout at the current center on resize
    let resize_closure = {
        let carousel = carousel.clone();
        Closure::wrap(Box::new(move || {
            let Some(window) = web_sys::window() else {
                return;
            };
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            carousel.borrow_mut().resize(w, h);
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    // Owned by the frame loop below, which lives as long as the page.
    let mut bindings = if carousel.borrow_mut().run_entrance_animation() {
        None
    } else {
        Some(input::attach(&carousel)?)
    };

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let report = carousel.borrow_mut().tick(now);
        if report.entrance_finished && bindings.is_none() {
            match input::attach(&carousel) {
                Ok(attached) => bindings = Some(attached),
                Err(err) => log::error!("failed to attach carousel input: {err:?}"),
            }
        }

        // schedule next
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(callback) = f.borrow().as_ref() {
            if let Err(err) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {err:?}");
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = g.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }

    Ok(())
}
