use crate::core::Controller;
use crate::dom;
use crate::keys::{action_for_key, KeyAction};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    controller: &Rc<RefCell<Controller>>,
    canvas: &web::HtmlCanvasElement,
) {
    // Typing into a panel field must not trigger shortcuts.
    if let Some(target) = ev.target() {
        if target.dyn_ref::<web::HtmlInputElement>().is_some() {
            return;
        }
    }
    let Some(action) = action_for_key(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::ToggleFullscreen => {
            dom::toggle_fullscreen(canvas);
            ev.prevent_default();
        }
        KeyAction::ExitFullscreen => dom::exit_fullscreen(),
        KeyAction::ToggleCamera => {
            let mut ctl = controller.borrow_mut();
            let on = !ctl.flags().camera_active;
            ctl.set_camera_active(on);
            log::info!("[keys] camera={}", on);
        }
        KeyAction::ToggleDeviceOrientation => {
            let mut ctl = controller.borrow_mut();
            let on = !ctl.flags().device_orientation;
            ctl.set_device_orientation(on);
            log::info!("[keys] device orientation={}", on);
        }
        KeyAction::ToggleUiZoom => controller.borrow_mut().toggle_ui_zoom(),
    }
}

pub fn wire_global_keydown(controller: Rc<RefCell<Controller>>, canvas: web::HtmlCanvasElement) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &controller, &canvas);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
