//! Background music: a fixed cinematic arpeggio and its lookahead scheduler.
//!
//! The scheduler is a pure state machine over absolute audio-clock time;
//! the WebAudio side polls it from a coarse timer and turns every
//! [`ScheduledNote`] into oscillators started at `start_time_sec`.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// One step of the progression. `duration` is in half-beats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Note {
    pub frequency_hz: f32,
    pub duration: f32,
}

const fn n(frequency_hz: f32, duration: f32) -> Note {
    Note {
        frequency_hz,
        duration,
    }
}

/// Am → F → C → G, seven notes per chord, looping forever.
pub const ARPEGGIO: [Note; 28] = [
    // Am
    n(220.00, 0.5),
    n(261.63, 0.5),
    n(329.63, 0.5),
    n(440.00, 0.5),
    n(329.63, 0.5),
    n(261.63, 0.5),
    n(220.00, 1.0),
    // F
    n(174.61, 0.5),
    n(261.63, 0.5),
    n(349.23, 0.5),
    n(440.00, 0.5),
    n(349.23, 0.5),
    n(261.63, 0.5),
    n(174.61, 1.0),
    // C
    n(261.63, 0.5),
    n(329.63, 0.5),
    n(392.00, 0.5),
    n(523.25, 0.5),
    n(392.00, 0.5),
    n(329.63, 0.5),
    n(261.63, 1.0),
    // G
    n(196.00, 0.5),
    n(246.94, 0.5),
    n(293.66, 0.5),
    n(392.00, 0.5),
    n(293.66, 0.5),
    n(246.94, 0.5),
    n(196.00, 1.0),
];

/// One oscillator of the layered piano-like tone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneLayer {
    pub waveform: Waveform,
    /// Multiplier applied to the note frequency.
    pub frequency_ratio: f32,
    pub peak_gain: f32,
    /// Seconds from note start until the envelope reaches the floor.
    pub decay_sec: f64,
    /// Also routed to the dry path.
    pub dry: bool,
}

pub const ATTACK_SEC: f64 = 0.02;
pub const DECAY_SEC: f64 = 1.5;
/// Exponential ramps cannot reach zero.
pub const ENVELOPE_FLOOR: f32 = 0.001;
/// Oscillators stop this long after their decay ends.
pub const RELEASE_PAD_SEC: f64 = 0.1;
pub const DRY_LEVEL: f32 = 0.3;

pub const TONE_LAYERS: [ToneLayer; 3] = [
    // Fundamental
    ToneLayer {
        waveform: Waveform::Sine,
        frequency_ratio: 1.0,
        peak_gain: 0.4,
        decay_sec: DECAY_SEC,
        dry: true,
    },
    // Harmonic colour
    ToneLayer {
        waveform: Waveform::Triangle,
        frequency_ratio: 1.0,
        peak_gain: 0.1,
        decay_sec: DECAY_SEC * 0.8,
        dry: false,
    },
    // Slightly sharp layer for chorus width
    ToneLayer {
        waveform: Waveform::Sine,
        frequency_ratio: 1.001,
        peak_gain: 0.1,
        decay_sec: DECAY_SEC,
        dry: false,
    },
];

pub const DEFAULT_TEMPO_BPM: f32 = 60.0;
/// How far ahead of the audio clock notes are committed.
pub const LOOKAHEAD_SEC: f64 = 0.1;
/// Wall-clock period of the scheduling timer.
pub const SCHEDULER_INTERVAL_MS: i32 = 25;
/// Delay before the very first note.
pub const START_DELAY_SEC: f64 = 0.1;

#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledNote {
    pub index: usize,
    pub frequency_hz: f32,
    pub start_time_sec: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

#[derive(Clone, Debug)]
pub struct NoteScheduler {
    state: SchedulerState,
    next_note_time: f64,
    note_index: usize,
    tempo_bpm: f32,
}

impl Default for NoteScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPO_BPM)
    }
}

impl NoteScheduler {
    pub fn new(tempo_bpm: f32) -> Self {
        Self {
            state: SchedulerState::Stopped,
            next_note_time: 0.0,
            note_index: 0,
            tempo_bpm: tempo_bpm.max(1.0),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn note_index(&self) -> usize {
        self.note_index
    }

    pub fn next_note_time(&self) -> f64 {
        self.next_note_time
    }

    pub fn tempo_bpm(&self) -> f32 {
        self.tempo_bpm
    }

    /// Enter `Running` with the first note shortly after `now_sec`.
    /// Returns `false` (and changes nothing) when already running.
    pub fn start(&mut self, now_sec: f64) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = SchedulerState::Running;
        self.next_note_time = now_sec + START_DELAY_SEC;
        true
    }

    /// Seconds between the onsets of `note` and the one after it.
    pub fn note_spacing_sec(&self, note: &Note) -> f64 {
        let seconds_per_beat = 60.0 / self.tempo_bpm as f64;
        note.duration as f64 * seconds_per_beat * 0.5
    }

    /// Commit every note starting before `now_sec + LOOKAHEAD_SEC`.
    ///
    /// If the timer stalled so long that the next note is already in the
    /// past, the timeline is moved to `now_sec` instead of replaying the
    /// missed notes in a burst; the note order is unaffected.
    pub fn poll(&mut self, now_sec: f64, out: &mut Vec<ScheduledNote>) {
        if !self.is_running() {
            return;
        }
        if self.next_note_time < now_sec {
            log::debug!(
                "[music] scheduler fell behind by {:.3}s",
                now_sec - self.next_note_time
            );
            self.next_note_time = now_sec;
        }
        while self.next_note_time < now_sec + LOOKAHEAD_SEC {
            let note = ARPEGGIO[self.note_index];
            out.push(ScheduledNote {
                index: self.note_index,
                frequency_hz: note.frequency_hz,
                start_time_sec: self.next_note_time,
            });
            self.advance_note();
        }
    }

    fn advance_note(&mut self) {
        let note = ARPEGGIO[self.note_index];
        self.next_note_time += self.note_spacing_sec(&note);
        self.note_index = (self.note_index + 1) % ARPEGGIO.len();
    }
}

/// Length of one full pass through the progression at `tempo_bpm`.
pub fn loop_length_sec(tempo_bpm: f32) -> f64 {
    let s = NoteScheduler::new(tempo_bpm);
    ARPEGGIO.iter().map(|note| s.note_spacing_sec(note)).sum()
}

/// Length of the synthetic reverb tail.
pub const REVERB_SECONDS: f32 = 4.0;

/// One channel of the reverb impulse response: white noise under a cubic
/// decay, `len` samples long.
pub fn reverb_tail<R: rand::Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<f32> {
    let n = len.max(1) as f32;
    (0..len)
        .map(|i| {
            let decay = (1.0 - i as f32 / n).powi(3);
            rng.gen_range(-1.0..1.0) * decay
        })
        .collect()
}
