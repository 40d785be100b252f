use std::cell::RefCell;

use donate::host::{Host, MainButton};
use js_sys::Reflect;
use wasm_bindgen::{prelude::*, JsCast, JsValue};

use crate::{log_js_error, DOCUMENT, WINDOW};

const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
const INITIAL_MAIN_BUTTON_TEXT: &str = "💝 Support the project";

#[wasm_bindgen]
extern "C" {
    /// The `Telegram.WebApp` object injected by the client.
    #[derive(Debug, Clone)]
    pub type WebApp;

    #[wasm_bindgen(method, catch)]
    fn expand(this: &WebApp) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn ready(this: &WebApp) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = sendData)]
    fn send_data(this: &WebApp, data: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = showAlert)]
    fn show_alert(this: &WebApp, message: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, getter, js_name = backgroundColor)]
    fn background_color(this: &WebApp) -> Option<String>;

    #[wasm_bindgen(method, getter, js_name = MainButton)]
    fn main_button(this: &WebApp) -> BottomButton;

    #[wasm_bindgen(method, getter, js_name = initDataUnsafe)]
    fn init_data_unsafe(this: &WebApp) -> JsValue;

    /// The host primary action control.
    #[derive(Debug, Clone)]
    type BottomButton;

    #[wasm_bindgen(method, catch)]
    fn show(this: &BottomButton) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn hide(this: &BottomButton) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setText)]
    fn set_text(this: &BottomButton, text: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = onClick)]
    fn on_click(this: &BottomButton, cb: &js_sys::Function) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = offClick)]
    fn off_click(this: &BottomButton, cb: &js_sys::Function) -> Result<(), JsValue>;
}

fn report(ret: Result<(), JsValue>) {
    if let Err(err) = ret {
        log_js_error(&err);
    }
}

fn get_field(target: &JsValue, key: &str) -> Option<JsValue> {
    let ret = Reflect::get(target, &JsValue::from_str(key)).ok()?;
    if ret.is_undefined() || ret.is_null() {
        None
    } else {
        Some(ret)
    }
}

/// The Telegram mini app host.
///
/// The main button handler is unregistered and the button hidden when the host is dropped.
pub struct TelegramHost {
    web_app: WebApp,
    main_button: BottomButton,
    main_button_cb: RefCell<Option<Closure<dyn Fn()>>>,
}

impl TelegramHost {
    /// Find `window.Telegram.WebApp`.
    pub fn detect() -> Option<Self> {
        let web_app = WINDOW.with(|window| {
            let telegram = get_field(window, "Telegram")?;
            get_field(&telegram, "WebApp")
        })?;
        Some(Self::new(web_app.unchecked_into()))
    }

    /// Wrap a `Telegram.WebApp` object.
    pub fn new(web_app: WebApp) -> Self {
        let main_button = web_app.main_button();
        Self {
            web_app,
            main_button,
            main_button_cb: RefCell::new(None),
        }
    }

    fn unregister_main_button(&self) {
        if let Some(cb) = self.main_button_cb.borrow_mut().take() {
            report(self.main_button.off_click(cb.as_ref().unchecked_ref()));
        }
    }

    fn apply_background_color(&self) {
        let color = self
            .web_app
            .background_color()
            .unwrap_or_else(|| DEFAULT_BACKGROUND_COLOR.to_string());
        DOCUMENT.with(|document| {
            if let Some(body) = document.body() {
                report(body.style().set_property("background-color", &color));
            }
        })
    }
}

impl Host for TelegramHost {
    fn ready(&self) {
        report(self.web_app.expand());
        report(self.web_app.ready());
        self.apply_background_color();
        report(self.main_button.set_text(INITIAL_MAIN_BUTTON_TEXT));
    }

    fn user_id(&self) -> Option<String> {
        let init_data = self.web_app.init_data_unsafe();
        let id = get_field(&get_field(&init_data, "user")?, "id")?;
        match id.as_f64() {
            Some(x) => Some(format!("{}", x as i64)),
            None => id.as_string(),
        }
    }

    fn set_main_button(&self, state: MainButton) {
        match state {
            MainButton::Hidden => report(self.main_button.hide()),
            MainButton::Visible(label) => {
                report(self.main_button.show());
                report(self.main_button.set_text(&label));
            }
        }
    }

    fn on_main_button_click(&self, handler: Box<dyn Fn()>) {
        let cb = Closure::wrap(handler);
        report(self.main_button.on_click(cb.as_ref().unchecked_ref()));
        if let Some(old) = self.main_button_cb.borrow_mut().replace(cb) {
            report(self.main_button.off_click(old.as_ref().unchecked_ref()));
        }
    }

    fn send_data(&self, data: &str) {
        report(self.web_app.send_data(data));
    }

    fn show_alert(&self, message: &str) -> bool {
        match self.web_app.show_alert(message) {
            Ok(()) => true,
            Err(err) => {
                log_js_error(&err);
                false
            }
        }
    }

    fn defers_navigation(&self) -> bool {
        true
    }
}

impl Drop for TelegramHost {
    fn drop(&mut self) {
        self.unregister_main_button();
        report(self.main_button.hide());
    }
}
