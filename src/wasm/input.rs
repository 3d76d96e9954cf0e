//! Gesture, keyboard and click bindings. Attached only after the entrance
//! sweep so early input cannot interleave with it.

use std::cell::Cell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventTarget, KeyboardEvent, PointerEvent, TouchEvent, WheelEvent};

use super::dom;
use super::render::SharedCarousel;
use crate::config::InputConfig;

/// Live input listeners. Dropping this detaches them.
pub struct InputBindings {
    _listeners: Vec<EventListener>,
}

pub fn attach(carousel: &SharedCarousel) -> Result<InputBindings, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let (container, input) = {
        let carousel = carousel.borrow();
        (carousel.stage().container().clone(), carousel.config().input.clone())
    };
    let clicks = Rc::new(ClickGuard::default());

    let mut listeners = Vec::new();
    listeners.push(wheel_listener(carousel, &container, &input));
    listeners.extend(pointer_drag_listeners(carousel, &container, &input, &clicks));
    listeners.extend(touch_swipe_listeners(carousel, &container, &input));
    listeners.push(poster_click_listener(carousel, &container, &clicks));
    listeners.extend(category_listeners(carousel, &document)?);
    if input.keyboard {
        listeners.push(keyboard_listener(carousel, &document));
    }
    log::info!("carousel input attached ({} listeners)", listeners.len());
    Ok(InputBindings {
        _listeners: listeners,
    })
}

/// Swallows the click that trails a mouse or pen drag. Touch swipes fire no
/// click at all, so every new press clears a stale flag.
#[derive(Debug, Default)]
struct ClickGuard {
    dragged: Cell<bool>,
}

impl ClickGuard {
    fn press(&self) {
        self.dragged.set(false);
    }

    fn drag_ended(&self) {
        self.dragged.set(true);
    }

    fn allows_click(&self) -> bool {
        !self.dragged.replace(false)
    }
}

/// Step one poster from wherever pending motion will leave the carousel,
/// so gestures during a fast scroll continue from its landing point.
fn step(carousel: &SharedCarousel, direction: i32) {
    let mut carousel = carousel.borrow_mut();
    let target = carousel.destination() as i64 + i64::from(direction);
    let outcome = carousel.move_to(target, Some(direction));
    log::debug!("step {direction:+} -> {outcome:?}");
}

fn swipe_direction(dx: f64, threshold: f64) -> Option<i32> {
    // Dragging left brings the next poster in from the right.
    (dx.abs() >= threshold).then_some(if dx < 0.0 { 1 } else { -1 })
}

fn listen(
    target: &EventTarget,
    name: &'static str,
    passive: bool,
    handler: impl FnMut(&Event) + 'static,
) -> EventListener {
    EventListener::new_with_options(
        target,
        name,
        EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive,
        },
        handler,
    )
}

fn wheel_listener(
    carousel: &SharedCarousel,
    container: &EventTarget,
    input: &InputConfig,
) -> EventListener {
    let carousel = carousel.clone();
    let cooldown = input.wheel_cooldown_ms;
    let last = Cell::new(f64::NEG_INFINITY);
    listen(container, "wheel", false, move |event| {
        let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
            return;
        };
        let delta = if wheel.delta_x().abs() > wheel.delta_y().abs() {
            wheel.delta_x()
        } else {
            wheel.delta_y()
        };
        if delta == 0.0 {
            return;
        }
        event.prevent_default();
        let now = js_sys::Date::now();
        if now - last.get() < cooldown {
            return;
        }
        last.set(now);
        step(&carousel, if delta > 0.0 { 1 } else { -1 });
    })
}

fn pointer_drag_listeners(
    carousel: &SharedCarousel,
    container: &EventTarget,
    input: &InputConfig,
    clicks: &Rc<ClickGuard>,
) -> Vec<EventListener> {
    // (pointer id, start x) of a mouse or pen drag in progress
    let drag: Rc<Cell<Option<(i32, f64)>>> = Rc::new(Cell::new(None));
    let mut listeners = Vec::new();

    {
        let drag = drag.clone();
        let clicks = clicks.clone();
        listeners.push(listen(container, "pointerdown", true, move |event| {
            let Some(pointer) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            clicks.press();
            // Touch is handled by the swipe listeners.
            if pointer.pointer_type() == "touch" {
                return;
            }
            drag.set(Some((pointer.pointer_id(), f64::from(pointer.client_x()))));
        }));
    }
    {
        let drag = drag.clone();
        let carousel = carousel.clone();
        let clicks = clicks.clone();
        let threshold = input.swipe_threshold_px;
        listeners.push(listen(container, "pointerup", true, move |event| {
            let Some(pointer) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let Some((id, start_x)) = drag.take() else {
                return;
            };
            if id != pointer.pointer_id() {
                return;
            }
            let dx = f64::from(pointer.client_x()) - start_x;
            if let Some(direction) = swipe_direction(dx, threshold) {
                clicks.drag_ended();
                step(&carousel, direction);
            }
        }));
    }
    for name in ["pointercancel", "pointerleave"] {
        let drag = drag.clone();
        listeners.push(listen(container, name, true, move |_| drag.set(None)));
    }
    listeners
}

fn touch_swipe_listeners(
    carousel: &SharedCarousel,
    container: &EventTarget,
    input: &InputConfig,
) -> [EventListener; 2] {
    let start: Rc<Cell<Option<f64>>> = Rc::new(Cell::new(None));

    let touchstart = {
        let start = start.clone();
        listen(container, "touchstart", true, move |event| {
            let x = event
                .dyn_ref::<TouchEvent>()
                .and_then(|touch| touch.touches().get(0))
                .map(|touch| f64::from(touch.client_x()));
            start.set(x);
        })
    };

    let carousel = carousel.clone();
    let threshold = input.swipe_threshold_px;
    let touchend = listen(container, "touchend", true, move |event| {
        let Some(start_x) = start.take() else {
            return;
        };
        let Some(end_x) = event
            .dyn_ref::<TouchEvent>()
            .and_then(|touch| touch.changed_touches().get(0))
            .map(|touch| f64::from(touch.client_x()))
        else {
            return;
        };
        if let Some(direction) = swipe_direction(end_x - start_x, threshold) {
            step(&carousel, direction);
        }
    });
    [touchstart, touchend]
}

fn poster_click_listener(
    carousel: &SharedCarousel,
    container: &EventTarget,
    clicks: &Rc<ClickGuard>,
) -> EventListener {
    let carousel = carousel.clone();
    let clicks = clicks.clone();
    listen(container, "click", true, move |event| {
        if !clicks.allows_click() {
            return;
        }
        let Some(index) = dom::poster_index(event.target()) else {
            return;
        };
        let mut carousel = carousel.borrow_mut();
        if index != carousel.center() {
            let outcome = carousel.fast_scroll(index);
            log::debug!("poster {index} clicked -> {outcome:?}");
        }
    })
}

fn category_listeners(
    carousel: &SharedCarousel,
    document: &web_sys::Document,
) -> Result<Vec<EventListener>, JsValue> {
    let controls = document.query_selector_all("[data-category-jump]")?;
    let mut listeners = Vec::new();
    for i in 0..controls.length() {
        let Some(node) = controls.item(i) else {
            continue;
        };
        let Some(label) = node
            .dyn_ref::<Element>()
            .and_then(|el| el.get_attribute("data-category-jump"))
        else {
            continue;
        };
        let carousel = carousel.clone();
        listeners.push(listen(&node, "click", true, move |_| {
            let outcome = carousel.borrow_mut().jump_to_category(&label);
            log::debug!("category {label:?} -> {outcome:?}");
        }));
    }
    Ok(listeners)
}

fn keyboard_listener(carousel: &SharedCarousel, document: &web_sys::Document) -> EventListener {
    let carousel = carousel.clone();
    listen(document, "keydown", true, move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        match key.as_str() {
            "ArrowRight" => step(&carousel, 1),
            "ArrowLeft" => step(&carousel, -1),
            _ => {}
        }
    })
}
