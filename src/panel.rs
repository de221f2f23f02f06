//! Parameter panel built from plain DOM inputs.
//!
//! The panel is rebuilt from scratch whenever the controller asks for it and
//! torn down in fullscreen. It owns its event closures, so dropping the panel
//! releases them; it is only ever dropped from the frame loop, never from one
//! of its own callbacks.

use crate::constants::{PANEL_ID, SOURCE_URL, UI_ZOOM_SCALE};
use crate::core::{Controller, DirtySet, ParamId, Parameter};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Listener = Closure<dyn FnMut(web::Event)>;

pub struct Panel {
    root: web::Element,
    inputs: Vec<(ParamId, web::HtmlInputElement)>,
    _listeners: Vec<Listener>,
}

struct Builder<'a> {
    document: &'a web::Document,
    controller: &'a Rc<RefCell<Controller>>,
    inputs: Vec<(ParamId, web::HtmlInputElement)>,
    listeners: Vec<Listener>,
}

impl Panel {
    pub fn build(
        document: &web::Document,
        controller: &Rc<RefCell<Controller>>,
        canvas: &web::HtmlCanvasElement,
    ) -> anyhow::Result<Self> {
        let err = |e: wasm_bindgen::JsValue| anyhow::anyhow!("{:?}", e);
        let body = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no document body"))?;
        let root = document.create_element("div").map_err(err)?;
        root.set_id(PANEL_ID);
        root.set_class_name("panel");

        let mut b = Builder {
            document,
            controller,
            inputs: Vec::new(),
            listeners: Vec::new(),
        };

        let ctl = controller.borrow();
        let variant = ctl.variant();
        let flags = ctl.flags().clone();

        b.button(&root, "Source code by @foolmoron", || dom::open_in_new_tab(SOURCE_URL))?;
        {
            let c = controller.clone();
            b.button(&root, "Toggle UI Zoom", move || c.borrow_mut().toggle_ui_zoom())?;
        }

        for folder in variant.folders() {
            let fieldset = document.create_element("fieldset").map_err(err)?;
            let legend = document.create_element("legend").map_err(err)?;
            legend.set_text_content(Some(folder.title));
            fieldset.append_child(&legend).map_err(err)?;
            if folder.has_mode_toggles {
                let c = controller.clone();
                b.checkbox(&fieldset, "Use Camera", flags.camera_active, move |on| {
                    c.borrow_mut().set_camera_active(on)
                })?;
                let c = controller.clone();
                b.checkbox(
                    &fieldset,
                    "Use Device Orientation",
                    flags.device_orientation,
                    move |on| c.borrow_mut().set_device_orientation(on),
                )?;
            }
            for &id in folder.params {
                b.slider(&fieldset, id.spec().label, ctl.params().parameter(id))?;
            }
            root.append_child(&fieldset).map_err(err)?;
        }
        drop(ctl);

        {
            let canvas = canvas.clone();
            b.button(
                &root,
                "GUI-less Fullscreen Mode! PROTIP: On a phone, lock the screen rotation and rotate it around",
                move || dom::toggle_fullscreen(&canvas),
            )?;
        }

        if flags.ui_zoomed {
            if let Some(el) = root.dyn_ref::<web::HtmlElement>() {
                _ = el.style().set_property(
                    "transform",
                    &format!("scale({UI_ZOOM_SCALE})"),
                );
                _ = el.style().set_property("transform-origin", "top right");
            }
        }

        body.append_child(&root).map_err(err)?;
        log::info!("[panel] built for {} ({} inputs)", variant, b.inputs.len());
        Ok(Self {
            root,
            inputs: b.inputs,
            _listeners: b.listeners,
        })
    }

    /// Reflect changed values back into the inputs.
    pub fn sync(&self, controller: &Controller, dirty: &DirtySet) {
        if dirty.is_empty() {
            return;
        }
        let focused = self
            .root
            .owner_document()
            .and_then(|d| d.active_element());
        for (id, input) in &self.inputs {
            if !id.follows_in_panel() || !dirty.contains(*id) {
                continue;
            }
            // Never overwrite the field the user is editing.
            if focused.as_ref().is_some_and(|el| input.is_same_node(Some(&**el))) {
                continue;
            }
            input.set_value_as_number(controller.params().get(*id) as f64);
        }
    }
}

impl Drop for Panel {
    fn drop(&mut self) {
        self.root.remove();
    }
}

impl<'a> Builder<'a> {
    fn listen(
        &mut self,
        target: &web::EventTarget,
        event: &str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<()> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        self.listeners.push(closure);
        Ok(())
    }

    fn button(
        &mut self,
        parent: &web::Element,
        label: &str,
        mut on_click: impl FnMut() + 'static,
    ) -> anyhow::Result<()> {
        let el = self
            .document
            .create_element("button")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        el.set_text_content(Some(label));
        self.listen(&el, "click", move |_| on_click())?;
        parent
            .append_child(&el)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(())
    }

    fn labelled_input(
        &mut self,
        parent: &web::Element,
        label: &str,
    ) -> anyhow::Result<web::HtmlInputElement> {
        let err = |e: wasm_bindgen::JsValue| anyhow::anyhow!("{:?}", e);
        let row = self.document.create_element("label").map_err(err)?;
        let span = self.document.create_element("span").map_err(err)?;
        span.set_text_content(Some(label));
        row.append_child(&span).map_err(err)?;
        let input: web::HtmlInputElement = self
            .document
            .create_element("input")
            .map_err(err)?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        row.append_child(&input).map_err(err)?;
        parent.append_child(&row).map_err(err)?;
        Ok(input)
    }

    fn checkbox(
        &mut self,
        parent: &web::Element,
        label: &str,
        checked: bool,
        mut on_change: impl FnMut(bool) + 'static,
    ) -> anyhow::Result<()> {
        let input = self.labelled_input(parent, label)?;
        input.set_type("checkbox");
        input.set_checked(checked);
        let read = input.clone();
        self.listen(&input, "change", move |_| on_change(read.checked()))
    }

    fn slider(&mut self, parent: &web::Element, label: &str, p: Parameter) -> anyhow::Result<()> {
        let input = self.labelled_input(parent, label)?;
        // Unbounded parameters get a free number field instead of a range.
        if p.max.is_finite() {
            input.set_type("range");
            input.set_max(&p.max.to_string());
        } else {
            input.set_type("number");
        }
        input.set_min(&p.min.to_string());
        input.set_step(&p.step.to_string());
        input.set_value_as_number(p.value as f64);
        _ = input.set_attribute("data-param", p.name);

        let read = input.clone();
        let controller = self.controller.clone();
        let name = p.name;
        self.listen(&input, "input", move |_| {
            let v = read.value_as_number() as f32;
            if let Err(e) = controller.borrow_mut().set_param_by_name(name, v) {
                log::warn!("[panel] {}", e);
            }
        })?;
        self.inputs.push((p.id, input));
        Ok(())
    }
}
