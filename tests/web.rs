//! Browser smoke tests, run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use electric_canvas::dom;
use electric_canvas::page::start_page_effects;
use electric_canvas::{ElectricBackground, LightningBorder};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn mount_canvas(id: &str) {
    let canvas = dom::create::<HtmlCanvasElement>("canvas").unwrap();
    canvas.set_id(id);
    dom::body().unwrap().append_child(&canvas).unwrap();
}

#[wasm_bindgen_test]
fn missing_canvas_disables_background() {
    assert!(ElectricBackground::attach("no-such-canvas").unwrap().is_none());
}

#[wasm_bindgen_test]
fn background_ticks_and_fades() {
    mount_canvas("electricCanvas");
    let bg = ElectricBackground::with_seed("electricCanvas", 7)
        .unwrap()
        .expect("canvas was mounted");
    assert_eq!(bg.particle_count(), 50);
    assert_eq!(bg.bolt_count(), 0);

    let spawned = bg.strike();
    assert!(spawned >= 1 && spawned <= 3);
    assert_eq!(bg.bolt_count(), spawned);
    for _ in 0..40 {
        bg.tick().unwrap();
    }
    assert_eq!(bg.bolt_count(), 0);
}

#[wasm_bindgen_test]
fn border_overlay_draws_three_to_five_bolts() {
    let button = dom::create::<HtmlElement>("button").unwrap();
    button.set_inner_text("Rent");
    dom::body().unwrap().append_child(&button).unwrap();

    let border = LightningBorder::attach(button.clone()).unwrap();
    border.tick().unwrap();
    let count = border.bolt_count();
    assert!(count >= 3 && count <= 5);

    let overlay = button
        .last_element_child()
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    let rect = button.get_bounding_client_rect();
    assert_eq!(overlay.width(), (rect.width() + 20.0) as u32);
}

#[wasm_bindgen_test]
fn stored_light_theme_reaches_the_header_on_load() {
    let storage = dom::window().unwrap().local_storage().unwrap().unwrap();
    storage.set_item("theme", "light").unwrap();

    let header = dom::create::<HtmlElement>("header").unwrap();
    header.set_class_name("header");
    let switch = dom::create::<HtmlElement>("div").unwrap();
    switch.set_id("themeSwitch");
    let body = dom::body().unwrap();
    body.append_child(&header).unwrap();
    body.append_child(&switch).unwrap();

    start_page_effects().unwrap();

    assert!(body.class_list().contains("light-theme"));
    assert!(switch.class_list().contains("active"));
    let background = header.style().get_property_value("background").unwrap();
    assert!(background.contains("255, 255, 255"), "header background {}", background);
    storage.remove_item("theme").unwrap();
}
