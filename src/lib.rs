#[macro_use]
mod utils;
pub mod background;
pub mod border;
pub mod color;
pub mod config;
pub mod dom;
pub mod lightning;
pub mod page;
pub mod particle;
pub mod renderer;

use background::Background;
use border::BorderStorm;
use config::{BorderConfig, EffectConfig, StrokePreset};
use lightning::Trigger;
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::Renderer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }

    // Only times when asked to, so production frames stay quiet
    pub fn when(enabled: bool, name: &'a str) -> Option<Timer<'a>> {
        if enabled {
            Some(Timer::new(name))
        } else {
            None
        }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

struct BackgroundView {
    canvas: HtmlCanvasElement,
    renderer: Renderer<CanvasRenderingContext2d>,
    effect: Background<StdRng>,
}

impl BackgroundView {
    fn tick(&mut self) -> Result<(), JsValue> {
        let profile = self.effect.config.profile;
        {
            let _timer = Timer::when(profile, "ElectricBackground::update");
            self.effect.update();
        }
        let _timer = Timer::when(profile, "ElectricBackground::render");
        let (width, height) = (self.effect.width(), self.effect.height());
        self.renderer.clear_screen(width, height)?;
        let (field, particles) = (&self.effect.field, &self.effect.config.particles);
        self.renderer.render_particles(field, particles)?;
        self.renderer.render_bolts(self.effect.storm.bolts())
    }

    fn resize(&mut self) -> Result<(), JsValue> {
        let (width, height) = dom::viewport_size()?;
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.effect.resize(width, height);
        self.renderer.strokes = StrokePreset::for_viewport(width);
        Ok(())
    }
}

/// Full-page background: drifting linked particles and lightning strikes
/// from the top of the viewport.
#[wasm_bindgen]
pub struct ElectricBackground {
    view: Rc<RefCell<BackgroundView>>,
}

#[wasm_bindgen]
impl ElectricBackground {
    /// Binds to the canvas with the given id. Returns `undefined` when the
    /// page has no such canvas.
    pub fn attach(canvas_id: &str) -> Result<Option<ElectricBackground>, JsValue> {
        ElectricBackground::attach_with_rng(canvas_id, StdRng::from_entropy())
    }

    /// Same as `attach`, but every random draw comes from `seed`.
    pub fn with_seed(canvas_id: &str, seed: u32) -> Result<Option<ElectricBackground>, JsValue> {
        ElectricBackground::attach_with_rng(canvas_id, StdRng::seed_from_u64(seed as u64))
    }

    pub fn set_profiling(&self, enabled: bool) {
        self.view.borrow_mut().effect.config.profile = enabled;
    }

    /// Starts the frame loop, the strike timer and the resize listener.
    pub fn start(&self) -> Result<(), JsValue> {
        let (trigger, initial_strikes, stagger_ms) = {
            let view = self.view.borrow();
            let lightning = &view.effect.config.lightning;
            (
                lightning.trigger,
                lightning.initial_strikes,
                lightning.initial_stagger_ms,
            )
        };

        for i in 0..initial_strikes {
            let view = self.view.clone();
            dom::after(i as i32 * stagger_ms, move || {
                view.borrow_mut().effect.strike();
            })?;
        }

        if let Trigger::Interval { interval_ms, .. } = trigger {
            let view = self.view.clone();
            dom::every(interval_ms, move || {
                view.borrow_mut().effect.on_interval();
            })?;
        }

        let view = self.view.clone();
        dom::listen(&dom::window()?.into(), "resize", move || {
            dom::report(view.borrow_mut().resize());
        })?;

        // The closure reschedules itself, so it has to be reachable from inside
        let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let next = frame.clone();
        let view = self.view.clone();
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Err(err) = view.borrow_mut().tick() {
                console::error_1(&err);
                return;
            }
            if let Some(callback) = next.borrow().as_ref() {
                dom::report(dom::request_animation_frame(callback).map(|_| ()));
            }
        }) as Box<dyn FnMut()>));
        if let Some(callback) = frame.borrow().as_ref() {
            dom::request_animation_frame(callback)?;
        }
        Ok(())
    }

    /// Advances and draws a single frame.
    pub fn tick(&self) -> Result<(), JsValue> {
        self.view.borrow_mut().tick()
    }

    pub fn resize(&self) -> Result<(), JsValue> {
        self.view.borrow_mut().resize()
    }

    pub fn strike(&self) -> usize {
        self.view.borrow_mut().effect.strike()
    }

    pub fn bolt_count(&self) -> usize {
        self.view.borrow().effect.storm.len()
    }

    pub fn particle_count(&self) -> usize {
        self.view.borrow().effect.field.particles().len()
    }
}

impl ElectricBackground {
    fn attach_with_rng(
        canvas_id: &str,
        rng: StdRng,
    ) -> Result<Option<ElectricBackground>, JsValue> {
        let canvas = match dom::element_by_id::<HtmlCanvasElement>(canvas_id)? {
            Some(canvas) => canvas,
            None => {
                console_warn!("no #{} canvas, background effect disabled", canvas_id);
                return Ok(None);
            }
        };
        let (width, height) = dom::viewport_size()?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let config = EffectConfig::for_viewport(width);
        if let Some(opacity) = config.canvas_opacity {
            dom::set_styles(&canvas, &[("opacity", opacity.to_string().as_str())])?;
        }
        let renderer = Renderer::new(dom::context_2d(&canvas)?, config.strokes.clone());
        let effect = Background::new(config, width, height, rng);
        Ok(Some(ElectricBackground {
            view: Rc::new(RefCell::new(BackgroundView {
                canvas,
                renderer,
                effect,
            })),
        }))
    }
}

struct BorderView {
    host: HtmlElement,
    canvas: HtmlCanvasElement,
    renderer: Renderer<CanvasRenderingContext2d>,
    effect: BorderStorm<StdRng>,
}

impl BorderView {
    fn resize(&mut self) {
        let rect = self.host.get_bounding_client_rect();
        self.effect.resize(rect.width(), rect.height());
        self.canvas.set_width(self.effect.width as u32);
        self.canvas.set_height(self.effect.height as u32);
    }

    fn tick(&mut self) -> Result<(), JsValue> {
        self.effect.regenerate();
        self.renderer.clear_screen(self.effect.width, self.effect.height)?;
        self.renderer.render_bolts(self.effect.storm.bolts())
    }
}

/// Lightning crackling around the edges of a button, redrawn on a short
/// fixed interval.
#[wasm_bindgen]
pub struct LightningBorder {
    view: Rc<RefCell<BorderView>>,
}

#[wasm_bindgen]
impl LightningBorder {
    /// Lays a canvas overlay over `host`.
    pub fn attach(host: HtmlElement) -> Result<LightningBorder, JsValue> {
        let config = BorderConfig::default();
        let canvas = dom::create::<HtmlCanvasElement>("canvas")?;
        let offset = format!("{}px", -config.padding);
        dom::set_styles(
            &canvas,
            &[
                ("position", "absolute"),
                ("top", offset.as_str()),
                ("left", offset.as_str()),
                ("pointer-events", "none"),
                ("z-index", "10"),
            ],
        )?;
        dom::set_styles(&host, &[("position", "relative")])?;
        host.append_child(&canvas)?;

        let renderer = Renderer::new(dom::context_2d(&canvas)?, StrokePreset::border());
        let effect = BorderStorm::new(config, 0.0, 0.0, StdRng::from_entropy());
        let mut view = BorderView {
            host,
            canvas,
            renderer,
            effect,
        };
        view.resize();
        Ok(LightningBorder {
            view: Rc::new(RefCell::new(view)),
        })
    }

    /// Attaches to and starts every element matching `selector`, returning
    /// how many were found.
    pub fn attach_all(selector: &str) -> Result<usize, JsValue> {
        let hosts = dom::query_all::<HtmlElement>(selector)?;
        for (i, host) in hosts.iter().enumerate() {
            LightningBorder::attach(host.clone())?.start()?;
            console_log!("lightning border initialized on button {}", i + 1);
        }
        Ok(hosts.len())
    }

    pub fn start(&self) -> Result<(), JsValue> {
        let interval_ms = self.view.borrow().effect.config.interval_ms;
        let view = self.view.clone();
        dom::every(interval_ms, move || {
            dom::report(view.borrow_mut().tick());
        })?;
        let view = self.view.clone();
        dom::listen(&dom::window()?.into(), "resize", move || {
            view.borrow_mut().resize();
        })
    }

    pub fn tick(&self) -> Result<(), JsValue> {
        self.view.borrow_mut().tick()
    }

    pub fn bolt_count(&self) -> usize {
        self.view.borrow().effect.storm.len()
    }
}
