// Helper functions for dealing with the DOM: looking up the window and
// elements, grabbing 2d contexts, scheduling callbacks, and the canvas
// implementation of `Surface`.

use crate::lightning::Point;
use crate::renderer::{Stroke, Surface};
use std::f64::consts::PI;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, EventTarget, HtmlCanvasElement, HtmlElement, Window,
};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

pub fn body() -> Result<HtmlElement, JsValue> {
    document()?
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))
}

pub fn viewport_size() -> Result<(f64, f64), JsValue> {
    let window = window()?;
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerWidth is not a number"))?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerHeight is not a number"))?;
    Ok((width, height))
}

// Missing elements are not an error, the effect just stays off
pub fn element_by_id<T: JsCast>(id: &str) -> Result<Option<T>, JsValue> {
    Ok(document()?
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok()))
}

pub fn query<T: JsCast>(selector: &str) -> Result<Option<T>, JsValue> {
    Ok(document()?
        .query_selector(selector)?
        .and_then(|element| element.dyn_into::<T>().ok()))
}

pub fn query_all<T: JsCast>(selector: &str) -> Result<Vec<T>, JsValue> {
    let nodes = document()?.query_selector_all(selector)?;
    let mut found = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(element) = nodes.item(i).and_then(|node| node.dyn_into::<T>().ok()) {
            found.push(element);
        }
    }
    Ok(found)
}

pub fn create<T: JsCast>(tag: &str) -> Result<T, JsValue> {
    document()?
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("<{}> has an unexpected type", tag)))
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("2d context has an unexpected type"))
}

pub fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) -> Result<(), JsValue> {
    let style = element.style();
    for (property, value) in styles {
        style.set_property(property, value)?;
    }
    Ok(())
}

// Callbacks have no caller to hand an error to, so it goes to the console
pub fn report(result: Result<(), JsValue>) {
    if let Err(err) = result {
        web_sys::console::error_1(&err);
    }
}

/// Registers `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Runs `handler` every `interval_ms` for the lifetime of the page.
pub fn every<F>(interval_ms: i32, handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    window()?.set_interval_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        interval_ms,
    )?;
    callback.forget();
    Ok(())
}

pub fn after<F>(delay_ms: i32, handler: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    let callback = Closure::once_into_js(handler);
    window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay_ms)?;
    Ok(())
}

pub fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}

fn trace(ctx: &CanvasRenderingContext2d, points: &[Point]) {
    ctx.begin_path();
    if let Some((first, rest)) = points.split_first() {
        ctx.move_to(first[0], first[1]);
        for p in rest {
            ctx.line_to(p[0], p[1]);
        }
    }
}

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn fill_disc(&mut self, center: Point, radius: f64, fill: &str) -> Result<(), JsValue> {
        self.begin_path();
        self.arc(center[0], center[1], radius, 0.0, PI * 2.0)?;
        self.set_fill_style(&JsValue::from_str(fill));
        self.fill();
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: Point,
        to: Point,
        style: &str,
        width: f64,
    ) -> Result<(), JsValue> {
        trace(self, &[from, to]);
        self.set_stroke_style(&JsValue::from_str(style));
        self.set_line_width(width);
        self.stroke();
        Ok(())
    }

    fn stroke_path(&mut self, points: &[Point], stroke: &Stroke) -> Result<(), JsValue> {
        if points.len() < 2 {
            return Ok(());
        }
        trace(self, points);
        self.set_stroke_style(&JsValue::from_str(&stroke.style));
        self.set_line_width(stroke.width);
        self.set_shadow_blur(stroke.blur);
        self.set_shadow_color(&stroke.shadow);
        self.stroke();
        Ok(())
    }

    fn reset_shadow(&mut self) -> Result<(), JsValue> {
        self.set_shadow_blur(0.0);
        Ok(())
    }
}
