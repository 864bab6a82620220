//! Interactive particle VFX canvas.
//!
//! The simulation, input bookkeeping, renderer and music scheduler live in
//! plain Rust modules that build and test on the host. The browser front-end
//! (canvas, WebAudio, camera, DOM events) is compiled for `wasm32` only.

pub mod constants;
pub mod core;
pub mod input;
pub mod render;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod audio;
#[cfg(target_arch = "wasm32")]
mod camera;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod overlay;

#[cfg(target_arch = "wasm32")]
pub use web_entry::*;

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use crate::app::App;
    use crate::render::CanvasSurface;
    use crate::{dom, events, frame};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys as web;

    thread_local! {
        static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    }

    fn with_app<T>(f: impl FnOnce(&App) -> T) -> Option<T> {
        APP.with(|slot| slot.borrow().as_ref().map(f))
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("vfx-studio starting");

        static STARTED: AtomicBool = AtomicBool::new(false);
        if STARTED.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        if let Err(e) = init() {
            log::error!("init error: {:?}", e);
        }
        Ok(())
    }

    fn init() -> anyhow::Result<()> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;

        let canvas: web::HtmlCanvasElement = document
            .get_element_by_id("app-canvas")
            .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        dom::wire_canvas_resize(&canvas);
        let ctx = dom::context_2d(&canvas)?;

        let app = App::new(document, canvas);
        events::wire_input_handlers(&app);
        events::wire_global_keydown(&app);

        let surface = CanvasSurface::new(ctx, dom::canvas_size(&app.canvas));
        let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(app.clone(), surface)));
        APP.with(|slot| *slot.borrow_mut() = Some(app));
        frame::start_loop(frame_ctx);
        Ok(())
    }

    /// Merge a JSON settings patch, e.g. `{"effect":"FIRE_TRAIL","bloom":2}`.
    #[wasm_bindgen]
    pub fn update_settings(json: &str) -> Result<(), JsValue> {
        match with_app(|app| app.apply_json(json)) {
            Some(Ok(_)) => Ok(()),
            Some(Err(e)) => {
                log::warn!("[settings] {}", e);
                Err(JsValue::from_str(&e.to_string()))
            }
            None => Err(JsValue::from_str("not started")),
        }
    }

    /// Current settings snapshot as JSON.
    #[wasm_bindgen]
    pub fn settings_json() -> String {
        with_app(|app| serde_json::to_string(&*app.settings.snapshot()).ok())
            .flatten()
            .unwrap_or_default()
    }

    /// Leave the landing state and start the music. Must be called from a
    /// user gesture for audio to play.
    #[wasm_bindgen]
    pub fn begin() {
        with_app(App::begin);
    }

    /// `{"fps":..,"particles":..,"maxParticles":..,"music":..}`
    #[wasm_bindgen]
    pub fn stats() -> String {
        with_app(App::stats_json).unwrap_or_default()
    }
}
