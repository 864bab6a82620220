use crate::core::music::{
    reverb_tail, ToneLayer, ATTACK_SEC, DRY_LEVEL, ENVELOPE_FLOOR, RELEASE_PAD_SEC,
    REVERB_SECONDS, SCHEDULER_INTERVAL_MS, TONE_LAYERS,
};
use crate::core::{NoteScheduler, ScheduledNote, Waveform};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Master volume glides to its target with this time constant.
const VOLUME_TIME_CONSTANT: f64 = 0.2;

/// Nodes shared by every note: reverb into compressor into master, plus a
/// dry bus straight into master.
struct MusicGraph {
    master: web::GainNode,
    reverb: web::ConvolverNode,
    dry: web::GainNode,
}

/// Background music engine. The context is created lazily on the first
/// user gesture; until then volume changes are only remembered.
pub struct AudioEngine {
    ctx: Option<web::AudioContext>,
    graph: Option<MusicGraph>,
    scheduler: NoteScheduler,
    volume: f32,
    due: Vec<ScheduledNote>,
}

pub type SharedAudio = Rc<RefCell<AudioEngine>>;

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx)
        .map_err(|e| anyhow::anyhow!("{} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

fn build_graph(ctx: &web::AudioContext, volume: f32) -> anyhow::Result<MusicGraph> {
    let master = create_gain(ctx, volume, "Master")?;

    let compressor = ctx
        .create_dynamics_compressor()
        .map_err(|e| anyhow::anyhow!("DynamicsCompressorNode error: {:?}", e))?;
    compressor.threshold().set_value(-20.0);
    compressor.knee().set_value(30.0);
    compressor.ratio().set_value(12.0);
    compressor.attack().set_value(0.003);
    compressor.release().set_value(0.25);

    let reverb = ctx
        .create_convolver()
        .map_err(|e| anyhow::anyhow!("ConvolverNode error: {:?}", e))?;
    let sr = ctx.sample_rate();
    let len = (sr * REVERB_SECONDS) as u32;
    let ir = ctx
        .create_buffer(2, len, sr)
        .map_err(|e| anyhow::anyhow!("impulse buffer error: {:?}", e))?;
    let mut rng = SmallRng::from_entropy();
    for ch in 0..2 {
        let mut tail = reverb_tail(&mut rng, len as usize);
        _ = ir.copy_to_channel(&mut tail, ch);
    }
    reverb.set_buffer(Some(&ir));

    let dry = create_gain(ctx, DRY_LEVEL, "Dry")?;

    // reverb -> compressor -> master -> out; dry -> master
    _ = reverb.connect_with_audio_node(&compressor);
    _ = compressor.connect_with_audio_node(&master);
    _ = dry.connect_with_audio_node(&master);
    _ = master.connect_with_audio_node(&ctx.destination());

    Ok(MusicGraph {
        master,
        reverb,
        dry,
    })
}

impl AudioEngine {
    pub fn new(volume: f32) -> Self {
        Self {
            ctx: None,
            graph: None,
            scheduler: NoteScheduler::default(),
            volume,
            due: Vec::new(),
        }
    }

    pub fn shared(volume: f32) -> SharedAudio {
        Rc::new(RefCell::new(Self::new(volume)))
    }

    pub fn is_playing(&self) -> bool {
        self.scheduler.is_running()
    }

    fn ensure_context(&mut self) -> anyhow::Result<web::AudioContext> {
        if let Some(ctx) = &self.ctx {
            return Ok(ctx.clone());
        }
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        self.graph = Some(build_graph(&ctx, self.volume)?);
        self.ctx = Some(ctx.clone());
        log::info!("[audio] context ready at {} Hz", ctx.sample_rate());
        Ok(ctx)
    }

    /// Glide the master gain toward `volume` (0 when muted).
    pub fn set_volume(&mut self, volume: f32) {
        if (volume - self.volume).abs() < f32::EPSILON {
            return;
        }
        self.volume = volume;
        if let (Some(ctx), Some(graph)) = (&self.ctx, &self.graph) {
            _ = graph.master.gain().set_target_at_time(
                volume,
                ctx.current_time(),
                VOLUME_TIME_CONSTANT,
            );
        }
    }

    /// Schedule every note due within the lookahead window.
    fn pump(&mut self) {
        let (Some(ctx), Some(graph)) = (&self.ctx, &self.graph) else {
            return;
        };
        self.due.clear();
        self.scheduler.poll(ctx.current_time(), &mut self.due);
        for note in &self.due {
            for layer in &TONE_LAYERS {
                play_layer(ctx, graph, layer, note);
            }
        }
    }
}

fn play_layer(
    ctx: &web::AudioContext,
    graph: &MusicGraph,
    layer: &ToneLayer,
    note: &ScheduledNote,
) {
    let osc = match web::OscillatorNode::new(ctx) {
        Ok(o) => o,
        Err(e) => {
            log::warn!("[audio] OscillatorNode error: {:?}", e);
            return;
        }
    };
    osc.set_type(match layer.waveform {
        Waveform::Sine => web::OscillatorType::Sine,
        Waveform::Triangle => web::OscillatorType::Triangle,
    });
    osc.frequency()
        .set_value(note.frequency_hz * layer.frequency_ratio);

    let env = match web::GainNode::new(ctx) {
        Ok(g) => g,
        Err(_) => return,
    };
    let t0 = note.start_time_sec;
    let gain = env.gain();
    _ = gain.set_value_at_time(0.0, t0);
    _ = gain.linear_ramp_to_value_at_time(layer.peak_gain, t0 + ATTACK_SEC);
    _ = gain.exponential_ramp_to_value_at_time(ENVELOPE_FLOOR, t0 + layer.decay_sec);

    _ = osc.connect_with_audio_node(&env);
    _ = env.connect_with_audio_node(&graph.reverb);
    if layer.dry {
        _ = env.connect_with_audio_node(&graph.dry);
    }
    _ = osc.start_with_when(t0);
    _ = osc.stop_with_when(t0 + layer.decay_sec + RELEASE_PAD_SEC);
}

/// Start the background loop, or just resume a suspended context if it is
/// already running. Failures leave the session silent.
pub fn start_background_music(engine: &SharedAudio) {
    let newly_started = {
        let mut e = engine.borrow_mut();
        let ctx = match e.ensure_context() {
            Ok(ctx) => ctx,
            Err(err) => {
                log::warn!("[audio] unavailable: {:?}", err);
                return;
            }
        };
        if ctx.state() == web::AudioContextState::Suspended {
            _ = ctx.resume();
        }
        e.scheduler.start(ctx.current_time())
    };
    if newly_started {
        log::info!("[audio] background music started");
        start_timer(engine.clone());
    }
}

/// Self-rescheduling timer; each tick re-arms only after pumping.
fn start_timer(engine: SharedAudio) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        engine.borrow_mut().pump();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                SCHEDULER_INTERVAL_MS,
            );
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            SCHEDULER_INTERVAL_MS,
        );
    }
}
