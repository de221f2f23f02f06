use crate::core::{Controller, SensorSample};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Convert a `deviceorientation` event; `None` when the device reports no angles.
pub fn sample_from_event(ev: &web::DeviceOrientationEvent) -> Option<SensorSample> {
    Some(SensorSample::from_degrees(ev.alpha()?, ev.beta()?, ev.gamma()?))
}

pub fn wire_orientation(controller: Rc<RefCell<Controller>>) {
    let Some(window) = web::window() else {
        return;
    };
    let mut logged_first = false;
    let ctl = controller.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::DeviceOrientationEvent| {
        if let Some(sample) = sample_from_event(&ev) {
            if !logged_first {
                logged_first = true;
                log::info!("[sensors] device orientation available");
            }
            ctl.borrow_mut().on_orientation(sample);
        }
    }) as Box<dyn FnMut(_)>);
    _ = window
        .add_event_listener_with_callback("deviceorientation", closure.as_ref().unchecked_ref());
    closure.forget();

    controller
        .borrow_mut()
        .on_screen_orientation(dom::screen_angle());
    let ctl = controller;
    let closure = Closure::wrap(Box::new(move || {
        ctl.borrow_mut().on_screen_orientation(dom::screen_angle());
    }) as Box<dyn FnMut()>);
    _ = window
        .add_event_listener_with_callback("orientationchange", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_fullscreen_change(document: &web::Document, controller: Rc<RefCell<Controller>>) {
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        let on = dom::is_fullscreen(&doc);
        controller.borrow_mut().set_fullscreen_active(on);
    }) as Box<dyn FnMut()>);
    _ = document
        .add_event_listener_with_callback("fullscreenchange", closure.as_ref().unchecked_ref());
    closure.forget();
}
