use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use donate::{error::Error, prelude::*};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{HtmlButtonElement, HtmlInputElement};

use crate::{async_task, js_error, DOCUMENT};

const SELECTED_CLASS: &str = "selected";

struct Listener {
    target: web_sys::EventTarget,
    ty: &'static str,
    cb: Closure<dyn Fn(web_sys::Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.ty, self.cb.as_ref().unchecked_ref());
    }
}

struct Elements {
    presets: Vec<(u32, HtmlButtonElement)>,
    input: HtmlInputElement,
    amount_text: web_sys::Element,
    confirm: HtmlButtonElement,
}

struct MountInner<B: Browser> {
    widget: RefCell<DonationWidget<Box<dyn Host>, B>>,
    root: web_sys::Element,
    elements: Elements,
    listeners: RefCell<Vec<Listener>>,
}

/// The widget rendered into a DOM element.
///
/// Event listeners are removed when the mount is dropped.
pub struct DonationMount<B: Browser + 'static> {
    inner: Rc<MountInner<B>>,
}

fn create<T: JsCast>(document: &web_sys::Document, tag: &str, class: &str) -> Result<T, Error> {
    let elem = document
        .create_element(tag)
        .map_err(js_error("Cannot create element"))?;
    elem.set_class_name(class);
    elem.dyn_into::<T>().map_err(|_| Error::BackendError {
        msg: format!("The <{}> element has an unexpected type", tag),
        err: None,
    })
}

fn render(root: &web_sys::Element, config: &DonationConfig) -> Result<Elements, Error> {
    DOCUMENT.with(|document| {
        root.set_inner_html("");
        let container: web_sys::Element = create(document, "div", "donation-widget")?;

        let preset_list: web_sys::Element = create(document, "div", "amount-buttons")?;
        let mut presets = Vec::with_capacity(config.presets.len());
        for amount in config.presets.iter().copied() {
            let button: HtmlButtonElement = create(document, "button", "amount-button")?;
            button.set_type("button");
            button
                .set_attribute("data-amount", &amount.to_string())
                .map_err(js_error("Cannot set attribute"))?;
            button.set_text_content(Some(&format!("{} {}", amount, config.currency)));
            preset_list
                .append_child(&button)
                .map_err(js_error("Cannot append child"))?;
            presets.push((amount, button));
        }

        let input: HtmlInputElement = create(document, "input", "custom-amount")?;
        input.set_type("number");
        input.set_min(&config.min_amount.to_string());
        input.set_max(&config.max_amount.to_string());
        input.set_placeholder("Other amount");

        let summary: web_sys::Element = create(document, "div", "selected-amount-line")?;
        summary.set_text_content(Some("Selected: "));
        let amount_text: web_sys::Element = create(document, "span", "selected-amount")?;
        let currency: web_sys::Element = create(document, "span", "currency")?;
        currency.set_text_content(Some(&format!(" {}", config.currency)));
        summary
            .append_child(&amount_text)
            .and_then(|_| summary.append_child(&currency))
            .map_err(js_error("Cannot append child"))?;

        let confirm: HtmlButtonElement = create(document, "button", "donate-button")?;
        confirm.set_type("button");
        confirm.set_text_content(Some("💝 Donate"));

        container
            .append_child(&preset_list)
            .and_then(|_| container.append_child(&input))
            .and_then(|_| container.append_child(&summary))
            .and_then(|_| container.append_child(&confirm))
            .and_then(|_| root.append_child(&container))
            .map_err(js_error("Cannot append child"))?;

        Ok(Elements {
            presets,
            input,
            amount_text,
            confirm,
        })
    })
}

impl<B: Browser + 'static> MountInner<B> {
    fn apply_view(&self) {
        let view = self.widget.borrow().view();
        let elements = &self.elements;
        elements.amount_text.set_text_content(Some(&view.amount_text));
        elements.confirm.set_disabled(!view.confirm_enabled);
        for (amount, button) in elements.presets.iter() {
            let _ = button
                .class_list()
                .toggle_with_force(SELECTED_CLASS, view.active_preset == Some(*amount));
        }
    }

    fn apply_input_change(&self, change: InputChange) {
        match change {
            InputChange::Keep => {}
            InputChange::Replace(x) => self.elements.input.set_value(&x),
            InputChange::Clear => self.elements.input.set_value(""),
        }
    }

    fn select_amount(&self, amount: u32) {
        self.widget.borrow_mut().select_amount(amount);
        self.apply_view();
    }

    fn choose_preset(&self, amount: u32) {
        let change = self.widget.borrow_mut().choose_preset(amount);
        self.apply_input_change(change);
        self.apply_view();
    }

    fn edit_custom(&self) {
        let text = self.elements.input.value();
        let change = self.widget.borrow_mut().edit_custom(&text);
        self.apply_input_change(change);
        self.apply_view();
    }

    fn blur_custom(&self) {
        let text = self.elements.input.value();
        let change = self.widget.borrow_mut().blur_custom(&text);
        self.apply_input_change(change);
        self.apply_view();
    }

    fn confirm(&self) {
        // the error has already been shown to the user
        let _ = self.widget.borrow().confirm();
    }
}

/// Run `f` later so that nested events fired by blocking alerts cannot re-enter the widget.
fn deferred<B: Browser + 'static>(
    weak: Weak<MountInner<B>>,
    f: impl 'static + Fn(&MountInner<B>),
) -> impl 'static + Fn() {
    let f = Rc::new(f);
    move || {
        let weak = weak.clone();
        let f = f.clone();
        async_task(async move {
            if let Some(inner) = weak.upgrade() {
                f(&inner);
            }
        });
    }
}

impl<B: Browser + 'static> DonationMount<B> {
    /// Render the widget under the specified DOM element
    pub fn new_with_element(
        root: web_sys::Element,
        config: DonationConfig,
        host: Box<dyn Host>,
        browser: B,
    ) -> Result<Self, Error> {
        config.validate()?;
        let elements = render(&root, &config)?;
        let widget = DonationWidget::new(config, host, browser);
        let inner = Rc::new(MountInner {
            widget: RefCell::new(widget),
            root,
            elements,
            listeners: RefCell::new(vec![]),
        });
        let this = Self { inner };
        this.bind_listeners()?;
        this.inner.apply_view();
        Ok(this)
    }

    /// Render the widget under the DOM element with the `id`
    pub fn new_with_element_id(
        id: &str,
        config: DonationConfig,
        host: Box<dyn Host>,
        browser: B,
    ) -> Result<Self, Error> {
        let root = DOCUMENT
            .with(|document| document.get_element_by_id(id))
            .ok_or_else(|| Error::BackendError {
                msg: format!("Cannot find the element {:?}", id),
                err: None,
            })?;
        Self::new_with_element(root, config, host, browser)
    }

    fn listen(
        &self,
        target: &web_sys::EventTarget,
        ty: &'static str,
        f: impl 'static + Fn(&MountInner<B>),
    ) -> Result<(), Error> {
        let run = deferred(Rc::downgrade(&self.inner), f);
        let cb = Closure::<dyn Fn(web_sys::Event)>::new(move |_: web_sys::Event| run());
        target
            .add_event_listener_with_callback(ty, cb.as_ref().unchecked_ref())
            .map_err(js_error("Cannot add event listener"))?;
        self.inner.listeners.borrow_mut().push(Listener {
            target: target.clone(),
            ty,
            cb,
        });
        Ok(())
    }

    fn bind_listeners(&self) -> Result<(), Error> {
        let elements = &self.inner.elements;
        for (amount, button) in elements.presets.iter() {
            let amount = *amount;
            self.listen(button, "click", move |inner| inner.choose_preset(amount))?;
        }
        self.listen(&elements.input, "input", |inner| inner.edit_custom())?;
        self.listen(&elements.input, "blur", |inner| inner.blur_custom())?;
        self.listen(&elements.confirm, "click", |inner| inner.confirm())?;
        let on_main_button = deferred(Rc::downgrade(&self.inner), |inner| inner.confirm());
        self.inner
            .widget
            .borrow()
            .host()
            .on_main_button_click(Box::new(on_main_button));
        Ok(())
    }

    /// The root element the widget is rendered in.
    pub fn root(&self) -> &web_sys::Element {
        &self.inner.root
    }

    /// The selected amount.
    #[inline]
    pub fn amount(&self) -> u32 {
        self.inner.widget.borrow().amount()
    }

    /// Set the amount without validation and refresh the display.
    pub fn select_amount(&self, amount: u32) {
        self.inner.select_amount(amount);
    }

    /// Start a donation of the current amount.
    pub fn confirm(&self) {
        self.inner.confirm();
    }

    /// Run `f` with the underlying widget.
    pub fn with_widget<R>(&self, f: impl FnOnce(&DonationWidget<Box<dyn Host>, B>) -> R) -> R {
        f(&self.inner.widget.borrow())
    }
}
