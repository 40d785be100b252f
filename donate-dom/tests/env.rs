#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::Once;
use std::time::Duration;

use donate_dom::prelude::*;
use wasm_bindgen::{JsCast, JsValue};

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        // the module entry point may have installed a logger already
        let _ = console_log::init_with_level(log::Level::Trace);
    });
}

/// A browser with a fixed clock that records alerts and opened pages.
pub struct RecordingBrowser {
    pub now: u64,
    pub alerts: RefCell<Vec<String>>,
    pub opened: RefCell<Vec<(String, Duration)>>,
}

impl RecordingBrowser {
    pub fn at(now: u64) -> Self {
        Self {
            now,
            alerts: Default::default(),
            opened: Default::default(),
        }
    }
}

impl Browser for RecordingBrowser {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn open(&self, url: &str, delay: Duration) {
        self.opened.borrow_mut().push((url.to_string(), delay));
    }
}

pub fn mount_root() -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let elem = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&elem).unwrap();
    elem
}

pub fn query<T: JsCast>(root: &web_sys::Element, selector: &str) -> T {
    root.query_selector(selector)
        .unwrap()
        .unwrap()
        .dyn_into::<T>()
        .unwrap()
}

pub fn query_all(root: &web_sys::Element, selector: &str) -> Vec<web_sys::HtmlElement> {
    let list = root.query_selector_all(selector).unwrap();
    (0..list.length())
        .map(|i| list.get(i).unwrap().dyn_into().unwrap())
        .collect()
}

pub fn simulate_event(target: &web_sys::EventTarget, ty: &str) {
    let ev = web_sys::Event::new(ty).unwrap();
    target.dispatch_event(&ev).unwrap();
}

/// Wait for a timer of `ms` milliseconds.
pub async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

/// Wait until the deferred listeners have run.
pub async fn next_tick() {
    sleep(0).await;
}

/// Replace `window.open` with a function recording `[url, target]` pairs.
///
/// Returns the record array and the original function.
pub fn stub_window_open() -> (js_sys::Array, JsValue) {
    let window = web_sys::window().unwrap();
    let original = js_sys::Reflect::get(&window, &"open".into()).unwrap();
    let opened = js_sys::Array::new();
    let stub = js_sys::Function::new_with_args(
        "opened",
        "return function (url, target) { opened.push([url, target]); return null; };",
    )
    .call1(&JsValue::NULL, &opened)
    .unwrap();
    js_sys::Reflect::set(&window, &"open".into(), &stub).unwrap();
    (opened, original)
}

pub fn restore_window_open(original: &JsValue) {
    let window = web_sys::window().unwrap();
    js_sys::Reflect::set(&window, &"open".into(), original).unwrap();
}

pub fn opened_pages(opened: &js_sys::Array) -> Vec<(String, String)> {
    opened
        .iter()
        .map(|x| {
            let pair: js_sys::Array = x.dyn_into().unwrap();
            (
                pair.get(0).as_string().unwrap(),
                pair.get(1).as_string().unwrap(),
            )
        })
        .collect()
}

/// A fake `Telegram.WebApp` that records calls into its `calls` array.
pub fn fake_web_app(user_id: Option<u32>) -> JsValue {
    let user = match user_id {
        Some(id) => format!("{{ user: {{ id: {} }} }}", id),
        None => "{}".to_string(),
    };
    let body = format!(
        r#"
        const calls = [];
        const mainButton = {{
            show() {{ calls.push(['show']); }},
            hide() {{ calls.push(['hide']); }},
            setText(t) {{ calls.push(['setText', t]); }},
            onClick(cb) {{ this.cb = cb; }},
            offClick(cb) {{
                if (this.cb === cb) this.cb = undefined;
                calls.push(['offClick']);
            }},
        }};
        return {{
            calls,
            MainButton: mainButton,
            backgroundColor: '#123456',
            initDataUnsafe: {},
            expand() {{ calls.push(['expand']); }},
            ready() {{ calls.push(['ready']); }},
            sendData(d) {{ calls.push(['sendData', d]); }},
            showAlert(m) {{ calls.push(['showAlert', m]); }},
        }};
        "#,
        user
    );
    js_sys::Function::new_no_args(&body)
        .call0(&JsValue::NULL)
        .unwrap()
}

pub fn recorded_calls(web_app: &JsValue) -> Vec<Vec<String>> {
    let calls: js_sys::Array = js_sys::Reflect::get(web_app, &"calls".into())
        .unwrap()
        .dyn_into()
        .unwrap();
    calls
        .iter()
        .map(|call| {
            call.dyn_into::<js_sys::Array>()
                .unwrap()
                .iter()
                .map(|x| x.as_string().unwrap())
                .collect()
        })
        .collect()
}

/// Click the fake main button.
///
/// Returns `false` if no handler is registered.
pub fn click_main_button(web_app: &JsValue) -> bool {
    let main_button = js_sys::Reflect::get(web_app, &"MainButton".into()).unwrap();
    let cb = js_sys::Reflect::get(&main_button, &"cb".into()).unwrap();
    match cb.dyn_into::<js_sys::Function>() {
        Ok(cb) => {
            cb.call0(&JsValue::NULL).unwrap();
            true
        }
        Err(_) => false,
    }
}
