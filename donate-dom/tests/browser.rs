use std::time::Duration;

use donate_dom::prelude::*;
use wasm_bindgen_test::*;

mod env;
use env::*;

wasm_bindgen_test_configure!(run_in_browser);

fn opened(url: &str) -> (String, String) {
    (url.to_string(), "_blank".to_string())
}

#[wasm_bindgen_test]
async fn window_browser_opens_immediately_without_delay() {
    init();
    let (pages, original) = stub_window_open();
    WindowBrowser.open("https://x/now", Duration::ZERO);
    let ret = opened_pages(&pages);
    restore_window_open(&original);
    assert_eq!(ret, vec![opened("https://x/now")]);
}

#[wasm_bindgen_test]
async fn window_browser_delays_open() {
    init();
    let (pages, original) = stub_window_open();
    WindowBrowser.open("https://x/later", Duration::from_millis(200));
    next_tick().await;
    let before = opened_pages(&pages);
    sleep(300).await;
    let after = opened_pages(&pages);
    restore_window_open(&original);
    assert!(before.is_empty());
    assert_eq!(after, vec![opened("https://x/later")]);
}

#[wasm_bindgen_test]
fn window_browser_clock() {
    let now = WindowBrowser.now_ms();
    assert!(now > 1_600_000_000_000);
}

#[wasm_bindgen_test]
async fn exported_api_drives_the_page_mount() {
    init();
    let document = web_sys::window().unwrap().document().unwrap();
    let elem = document.create_element("div").unwrap();
    elem.set_id("donation-widget");
    document.body().unwrap().append_child(&elem).unwrap();
    donate_dom::wasm_main();
    assert_eq!(elem.query_selector_all(".amount-button").unwrap().length(), 6);

    donate_dom::select_amount(25);
    assert_eq!(donate_dom::selected_amount(), 25);
    let text = elem
        .query_selector(".selected-amount")
        .unwrap()
        .unwrap()
        .text_content()
        .unwrap();
    assert_eq!(text, "25");

    let (pages, original) = stub_window_open();
    donate_dom::handle_donate();
    let ret = opened_pages(&pages);
    restore_window_open(&original);
    assert_eq!(
        ret,
        vec![opened("https://www.buymeacoffee.com/fwdr?amount=25")]
    );
}
