// Small page effects around the canvas: theme switch, header on scroll,
// reveal on scroll, hero parallax and a glow that follows the cursor.
// The decisions are plain functions, `start_page_effects` wires them up.

use crate::dom;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

pub const REVEAL_FRACTION: f64 = 0.85;
pub const PARALLAX_FACTOR: f64 = 0.5;
pub const HEADER_SCROLL_THRESHOLD: f64 = 100.0;

const REVEAL_SELECTOR: &str = ".generator-card, .step, .contact-card";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub const STORAGE_KEY: &'static str = "theme";
    pub const BODY_CLASS: &'static str = "light-theme";

    // Anything but an explicit "light" keeps the default dark look
    pub fn from_stored(value: Option<&str>) -> Theme {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderStyle {
    pub scrolled: bool,
    pub padding: &'static str,
    pub background: String,
}

pub fn header_style(scroll_y: f64, theme: Theme) -> HeaderStyle {
    let scrolled = scroll_y > HEADER_SCROLL_THRESHOLD;
    let alpha = if scrolled { 0.95 } else { 0.9 };
    let background = match theme {
        Theme::Light => format!("rgba(255, 255, 255, {})", alpha),
        Theme::Dark => format!("rgba(10, 10, 10, {})", alpha),
    };
    HeaderStyle {
        scrolled,
        padding: if scrolled { "1.5rem 0" } else { "1rem 0" },
        background,
    }
}

pub fn is_revealed(top: f64, viewport_height: f64) -> bool {
    top < viewport_height * REVEAL_FRACTION
}

pub fn parallax_offset(scroll_y: f64) -> f64 {
    scroll_y * PARALLAX_FACTOR
}

fn body_theme(body: &HtmlElement) -> Theme {
    if body.class_list().contains(Theme::BODY_CLASS) {
        Theme::Light
    } else {
        Theme::Dark
    }
}

fn refresh_header(header: &HtmlElement) -> Result<(), JsValue> {
    let body = dom::body()?;
    let style = header_style(dom::window()?.scroll_y()?, body_theme(&body));
    body.class_list().toggle_with_force("scrolled", style.scrolled)?;
    dom::set_styles(
        header,
        &[("padding", style.padding), ("background", style.background.as_str())],
    )
}

fn apply_theme(theme: Theme, switch: &HtmlElement) -> Result<(), JsValue> {
    let light = theme == Theme::Light;
    dom::body()?
        .class_list()
        .toggle_with_force(Theme::BODY_CLASS, light)?;
    switch.class_list().toggle_with_force("active", light)?;
    Ok(())
}

fn persist_theme(theme: Theme) -> Result<(), JsValue> {
    if let Some(storage) = dom::window()?.local_storage()? {
        storage.set_item(Theme::STORAGE_KEY, theme.as_str())?;
    }
    Ok(())
}

fn stored_theme() -> Result<Theme, JsValue> {
    let value = match dom::window()?.local_storage()? {
        Some(storage) => storage.get_item(Theme::STORAGE_KEY)?,
        None => None,
    };
    Ok(Theme::from_stored(value.as_deref()))
}

// Clearing and restoring the animation makes the spark play again
fn replay_spark(switch: &HtmlElement) -> Result<(), JsValue> {
    let spark = match switch.query_selector(".switch-spark")? {
        Some(spark) => spark.dyn_into::<HtmlElement>()?,
        None => return Ok(()),
    };
    dom::set_styles(&spark, &[("animation", "none")])?;
    dom::after(10, move || {
        dom::report(dom::set_styles(&spark, &[("animation", "")]));
    })
}

fn start_theme_switch(header: Option<HtmlElement>) -> Result<(), JsValue> {
    let switch = match dom::element_by_id::<HtmlElement>("themeSwitch")? {
        Some(switch) => switch,
        None => return Ok(()),
    };
    let theme = Rc::new(Cell::new(stored_theme()?));
    apply_theme(theme.get(), &switch)?;
    if let Some(header) = &header {
        refresh_header(header)?;
    }

    let target = switch.clone();
    dom::listen(&target, "click", move || {
        let next = theme.get().toggled();
        theme.set(next);
        dom::report((|| {
            apply_theme(next, &switch)?;
            persist_theme(next)?;
            if let Some(header) = &header {
                refresh_header(header)?;
            }
            replay_spark(&switch)
        })());
    })
}

fn start_header(header: HtmlElement) -> Result<(), JsValue> {
    refresh_header(&header)?;
    dom::listen(&dom::window()?.into(), "scroll", move || {
        dom::report(refresh_header(&header));
    })
}

fn reveal_visible(elements: &[HtmlElement]) -> Result<(), JsValue> {
    let (_, viewport_height) = dom::viewport_size()?;
    for element in elements {
        if is_revealed(element.get_bounding_client_rect().top(), viewport_height) {
            dom::set_styles(
                element,
                &[
                    ("transition", "opacity 0.6s ease, transform 0.6s ease"),
                    ("opacity", "1"),
                    ("transform", "translateY(0)"),
                ],
            )?;
        }
    }
    Ok(())
}

fn start_reveal() -> Result<(), JsValue> {
    let elements = dom::query_all::<HtmlElement>(REVEAL_SELECTOR)?;
    for element in &elements {
        dom::set_styles(
            element,
            &[("opacity", "0"), ("transform", "translateY(30px)")],
        )?;
    }
    reveal_visible(&elements)?;
    dom::listen(&dom::window()?.into(), "scroll", move || {
        dom::report(reveal_visible(&elements));
    })
}

fn start_parallax() -> Result<(), JsValue> {
    let hero = match dom::query::<HtmlElement>(".hero")? {
        Some(hero) => hero,
        None => return Ok(()),
    };
    dom::listen(&dom::window()?.into(), "scroll", move || {
        dom::report((|| {
            let offset = parallax_offset(dom::window()?.scroll_y()?);
            let transform = format!("translateY({}px)", offset);
            dom::set_styles(&hero, &[("transform", transform.as_str())])
        })());
    })
}

fn start_cursor_glow() -> Result<(), JsValue> {
    let glow = dom::create::<HtmlElement>("div")?;
    dom::set_styles(
        &glow,
        &[
            ("position", "fixed"),
            ("width", "300px"),
            ("height", "300px"),
            ("border-radius", "50%"),
            (
                "background",
                "radial-gradient(circle, rgba(252, 218, 0, 0.1) 0%, transparent 70%)",
            ),
            ("pointer-events", "none"),
            ("z-index", "999"),
            ("transform", "translate(-50%, -50%)"),
            ("transition", "opacity 0.3s ease"),
            ("opacity", "0"),
        ],
    )?;
    dom::body()?.append_child(&glow)?;

    let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
        let left = format!("{}px", event.client_x());
        let top = format!("{}px", event.client_y());
        dom::report(dom::set_styles(
            &glow,
            &[("left", left.as_str()), ("top", top.as_str()), ("opacity", "1")],
        ));
    }) as Box<dyn FnMut(MouseEvent)>);
    dom::document()?
        .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    on_move.forget();
    Ok(())
}

fn fade_in_body() -> Result<(), JsValue> {
    let body = dom::body()?;
    dom::set_styles(&body, &[("opacity", "0")])?;
    dom::after(100, move || {
        dom::report(dom::set_styles(
            &body,
            &[("transition", "opacity 0.5s ease"), ("opacity", "1")],
        ));
    })
}

/// Wires every page effect that has its elements present.
#[wasm_bindgen]
pub fn start_page_effects() -> Result<(), JsValue> {
    let header = dom::query::<HtmlElement>(".header")?;
    // The stored theme has to be on <body> before the header first reads it
    start_theme_switch(header.clone())?;
    if let Some(header) = header {
        start_header(header)?;
    }
    start_reveal()?;
    start_parallax()?;
    start_cursor_glow()?;
    fade_in_body()
}
