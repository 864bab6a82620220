use crate::app::App;
use crate::constants::{MOTION_BUFFER_HEIGHT, MOTION_BUFFER_WIDTH};
use crate::core::factory::base_hue;
use crate::core::{AutoplayCursor, FrameClock, MotionDetector};
use crate::dom;
use crate::input;
use crate::render::{CanvasSurface, Renderer, Surface};
use instant::Instant;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Per-frame state owned by the render loop.
pub struct FrameContext {
    pub app: App,
    pub surface: CanvasSurface,
    pub renderer: Renderer,
    pub clock: FrameClock,
    pub motion: MotionDetector,
    pub autoplay: AutoplayCursor,
    pub rng: SmallRng,
    pub started: Instant,
}

impl FrameContext {
    pub fn new(app: App, surface: CanvasSurface) -> Self {
        let size = dom::canvas_size(&app.canvas);
        Self {
            app,
            surface,
            renderer: Renderer::new(),
            clock: FrameClock::new(),
            motion: MotionDetector::new(MOTION_BUFFER_WIDTH, MOTION_BUFFER_HEIGHT),
            autoplay: AutoplayCursor::new(size),
            rng: SmallRng::from_entropy(),
            started: Instant::now(),
        }
    }

    /// Emit from every input source, advance, then draw.
    pub fn frame(&mut self) {
        let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let dt_sec = self.clock.tick(now_ms);
        self.app.fps.set(self.clock.fps());

        let settings = self.app.settings.snapshot();
        let size = dom::canvas_size(&self.app.canvas);
        if size != self.surface.size() {
            self.surface.set_size(size);
        }
        let hue = base_hue(js_sys::Date::now());
        let effect = settings.effect;
        let intensity = settings.intensity;

        if self
            .app
            .camera
            .sync(settings.motion_control, &self.app.document)
        {
            self.motion.reset();
        }

        let mut system = self.app.system.borrow_mut();
        system.set_max_particles(settings.max_particles);

        if settings.motion_control {
            if let Some(pixels) = self.app.camera.grab_frame() {
                self.motion.sample(&pixels, size);
            }
            if let Some(p) = self.motion.point() {
                system.emit(p, input::motion_rate(intensity), effect, hue);
            }
        }

        let held = self.app.touches.borrow().positions();
        for p in held {
            system.emit(p, input::hold_rate(intensity), effect, hue);
        }

        if settings.autoplay_active() {
            let p = self.autoplay.step(size, &mut self.rng);
            system.emit(p, input::autoplay_rate(intensity), effect, hue);
        }

        system.advance(dt_sec, settings.physics(), size, now_ms);

        let reading = settings.show_clock.then(dom::wall_clock);
        self.renderer.draw(
            &mut self.surface,
            system.particles(),
            &settings,
            now_ms,
            reading.as_ref(),
        );
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
