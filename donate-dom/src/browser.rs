use std::time::Duration;

use donate::host::Browser;
use wasm_bindgen::{prelude::*, JsCast};

use crate::{log_js_error, WINDOW};

const NEW_CONTEXT_TARGET: &str = "_blank";

/// The browser `window`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowBrowser;

fn open_now(window: &web_sys::Window, url: &str) {
    match window.open_with_url_and_target(url, NEW_CONTEXT_TARGET) {
        Ok(Some(_)) => {}
        Ok(None) => log::warn!("The browser blocked opening {}", url),
        Err(err) => log_js_error(&err),
    }
}

impl Browser for WindowBrowser {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn alert(&self, message: &str) {
        WINDOW.with(|window| {
            if let Err(err) = window.alert_with_message(message) {
                log_js_error(&err);
            }
        })
    }

    fn open(&self, url: &str, delay: Duration) {
        WINDOW.with(|window| {
            if delay.is_zero() {
                open_now(window, url);
                return;
            }
            let url = url.to_string();
            let cb = {
                let window = window.clone();
                Closure::once_into_js(move || open_now(&window, &url))
            };
            let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
            if let Err(err) = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), timeout)
            {
                log_js_error(&err);
            }
        })
    }
}
