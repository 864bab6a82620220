use crate::audio::{self, AudioEngine, SharedAudio};
use crate::camera::CameraLink;
use crate::core::{AppSettings, ParticleSystem, SettingsError, SettingsStore};
use crate::input::TouchRegistry;
use crate::overlay;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

/// Handles shared by the frame loop, the event handlers and the exported
/// JS functions.
#[derive(Clone)]
pub struct App {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub settings: Rc<SettingsStore>,
    pub system: Rc<RefCell<ParticleSystem>>,
    pub touches: Rc<RefCell<TouchRegistry>>,
    pub audio: SharedAudio,
    pub camera: CameraLink,
    pub fps: Rc<Cell<f32>>,
    session_started: Rc<Cell<bool>>,
}

impl App {
    pub fn new(document: web::Document, canvas: web::HtmlCanvasElement) -> Self {
        let initial = AppSettings::default();
        let app = Self {
            document,
            canvas,
            system: Rc::new(RefCell::new(ParticleSystem::new(initial.max_particles))),
            audio: AudioEngine::shared(initial.effective_volume()),
            settings: Rc::new(SettingsStore::new(initial)),
            touches: Rc::new(RefCell::new(TouchRegistry::new())),
            camera: CameraLink::default(),
            fps: Rc::new(Cell::new(0.0)),
            session_started: Rc::new(Cell::new(false)),
        };
        overlay::apply_ui(&app.document, &app.settings.snapshot());
        app
    }

    /// Publish a modified snapshot and push its side effects to the page.
    pub fn update(&self, f: impl FnOnce(&mut AppSettings)) -> Rc<AppSettings> {
        let next = self.settings.update(f);
        self.after_publish(&next);
        next
    }

    /// Merge a JSON patch; the previous snapshot stays on error.
    pub fn apply_json(&self, json: &str) -> Result<Rc<AppSettings>, SettingsError> {
        let next = self.settings.apply_json(json)?;
        self.after_publish(&next);
        Ok(next)
    }

    fn after_publish(&self, next: &AppSettings) {
        self.audio.borrow_mut().set_volume(next.effective_volume());
        overlay::apply_ui(&self.document, next);
    }

    /// First interaction: leave the landing state and start the music.
    /// Later calls only make sure audio is running.
    pub fn begin(&self) {
        if !self.session_started.replace(true) {
            self.update(AppSettings::begin_session);
            log::info!("[app] session started");
        }
        audio::start_background_music(&self.audio);
    }

    pub fn stats_json(&self) -> String {
        let system = self.system.borrow();
        serde_json::json!({
            "fps": (self.fps.get() * 10.0).round() / 10.0,
            "particles": system.len(),
            "maxParticles": system.max_particles(),
            "music": self.audio.borrow().is_playing(),
        })
        .to_string()
    }
}
