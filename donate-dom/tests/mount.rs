use std::time::Duration;

use donate_dom::prelude::*;
use wasm_bindgen_test::*;
use web_sys::{HtmlButtonElement, HtmlInputElement};

mod env;
use env::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount(config: DonationConfig) -> DonationMount<RecordingBrowser> {
    init();
    DonationMount::new_with_element(
        mount_root(),
        config,
        Box::new(NoHost),
        RecordingBrowser::at(1000),
    )
    .unwrap()
}

fn amount_text(mount: &DonationMount<RecordingBrowser>) -> String {
    query::<web_sys::Element>(mount.root(), ".selected-amount")
        .text_content()
        .unwrap()
}

fn confirm_button(mount: &DonationMount<RecordingBrowser>) -> HtmlButtonElement {
    query(mount.root(), ".donate-button")
}

fn custom_input(mount: &DonationMount<RecordingBrowser>) -> HtmlInputElement {
    query(mount.root(), ".custom-amount")
}

#[wasm_bindgen_test]
fn renders_initial_state() {
    let mount = mount(DonationConfig::default());
    let presets = query_all(mount.root(), ".amount-button");
    assert_eq!(presets.len(), 6);
    assert_eq!(presets[1].get_attribute("data-amount").unwrap(), "5");
    assert_eq!(presets[1].text_content().unwrap(), "5 USD");
    assert_eq!(amount_text(&mount), "0");
    assert!(confirm_button(&mount).disabled());
    assert_eq!(custom_input(&mount).max(), "1000");
}

#[wasm_bindgen_test]
async fn preset_click_selects_amount() {
    let mount = mount(DonationConfig::default());
    let input = custom_input(&mount);
    input.set_value("77");
    let presets = query_all(mount.root(), ".amount-button");
    presets[2].click();
    next_tick().await;
    assert_eq!(mount.amount(), 10);
    assert_eq!(amount_text(&mount), "10");
    assert_eq!(input.value(), "");
    assert!(presets[2].class_list().contains("selected"));
    assert!(!presets[1].class_list().contains("selected"));
    assert!(!confirm_button(&mount).disabled());

    presets[1].click();
    next_tick().await;
    assert!(presets[1].class_list().contains("selected"));
    assert!(!presets[2].class_list().contains("selected"));
}

#[wasm_bindgen_test]
async fn input_clamps_upper_bound() {
    let mount = mount(DonationConfig::default());
    let input = custom_input(&mount);
    input.set_value("5000");
    simulate_event(&input, "input");
    next_tick().await;
    assert_eq!(input.value(), "1000");
    assert_eq!(mount.amount(), 1000);
    assert_eq!(amount_text(&mount), "1000");
    assert!(!confirm_button(&mount).disabled());
}

#[wasm_bindgen_test]
async fn blur_raises_lower_bound() {
    let config = DonationConfig {
        min_amount: 5,
        ..Default::default()
    };
    let mount = mount(config);
    let input = custom_input(&mount);
    input.set_value("2");
    simulate_event(&input, "input");
    next_tick().await;
    assert_eq!(mount.amount(), 2);
    assert!(confirm_button(&mount).disabled());
    simulate_event(&input, "blur");
    next_tick().await;
    assert_eq!(input.value(), "5");
    assert_eq!(mount.amount(), 5);
    assert!(!confirm_button(&mount).disabled());

    input.set_value("");
    simulate_event(&input, "input");
    simulate_event(&input, "blur");
    next_tick().await;
    assert_eq!(input.value(), "");
    assert_eq!(mount.amount(), 0);
}

#[wasm_bindgen_test]
async fn confirm_without_host_opens_immediately() {
    let mount = mount(DonationConfig::default());
    mount.select_amount(7);
    confirm_button(&mount).click();
    next_tick().await;
    mount.with_widget(|widget| {
        assert_eq!(
            *widget.browser().opened.borrow(),
            vec![(
                "https://www.buymeacoffee.com/fwdr?amount=7".to_string(),
                Duration::ZERO
            )]
        );
        assert!(widget.browser().alerts.borrow().is_empty());
    });
}

#[wasm_bindgen_test]
fn confirm_out_of_range_alerts() {
    let mount = mount(DonationConfig::default());
    mount.select_amount(0);
    mount.confirm();
    mount.with_widget(|widget| {
        assert_eq!(
            *widget.browser().alerts.borrow(),
            vec!["Enter an amount from 1 to 1000 USD".to_string()]
        );
        assert!(widget.browser().opened.borrow().is_empty());
    });
}

#[wasm_bindgen_test]
fn missing_mount_element() {
    init();
    let ret = DonationMount::new_with_element_id(
        "no-such-element",
        DonationConfig::default(),
        Box::new(NoHost),
        RecordingBrowser::at(0),
    );
    assert!(ret.is_err());
}
