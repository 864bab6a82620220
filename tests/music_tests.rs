// Host-side tests for the background-music scheduler.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use vfx_studio::core::music::{
    loop_length_sec, reverb_tail, ARPEGGIO, LOOKAHEAD_SEC, SCHEDULER_INTERVAL_MS,
    START_DELAY_SEC, TONE_LAYERS,
};
use vfx_studio::core::{NoteScheduler, ScheduledNote, SchedulerState};

const TICK_SEC: f64 = SCHEDULER_INTERVAL_MS as f64 / 1000.0;

/// Drive the scheduler like the 25 ms timer would, from `from` to `to`.
fn run(s: &mut NoteScheduler, from: f64, to: f64) -> Vec<ScheduledNote> {
    let mut out = Vec::new();
    let mut now = from;
    while now < to {
        s.poll(now, &mut out);
        now += TICK_SEC;
    }
    out
}

#[test]
fn stopped_scheduler_emits_nothing() {
    let mut s = NoteScheduler::default();
    assert_eq!(s.state(), SchedulerState::Stopped);
    assert!(run(&mut s, 0.0, 5.0).is_empty());
}

#[test]
fn repeated_starts_transition_once() {
    let mut s = NoteScheduler::default();
    assert!(s.start(2.0));
    assert!(s.is_running());
    let first = s.next_note_time();
    assert!((first - (2.0 + START_DELAY_SEC)).abs() < 1e-9);

    assert!(!s.start(3.0));
    assert!(!s.start(10.0));
    assert_eq!(s.next_note_time(), first);
    assert_eq!(s.note_index(), 0);
}

#[test]
fn first_note_lands_after_the_start_delay() {
    let mut s = NoteScheduler::default();
    s.start(1.0);
    let notes = run(&mut s, 1.0, 1.3);
    assert_eq!(notes[0].index, 0);
    assert!((notes[0].start_time_sec - 1.1).abs() < 1e-9);
    assert_eq!(notes[0].frequency_hz, ARPEGGIO[0].frequency_hz);
}

#[test]
fn notes_are_only_committed_inside_the_lookahead() {
    let mut s = NoteScheduler::default();
    s.start(0.0);
    let mut out = Vec::new();
    let mut now = 0.0;
    while now < 20.0 {
        out.clear();
        s.poll(now, &mut out);
        for n in &out {
            assert!(n.start_time_sec >= now - 1e-9);
            assert!(n.start_time_sec < now + LOOKAHEAD_SEC);
        }
        // Nothing due inside the window is left behind.
        assert!(s.next_note_time() >= now + LOOKAHEAD_SEC);
        now += TICK_SEC;
    }
}

#[test]
fn index_cycles_through_all_notes_and_wraps() {
    let mut s = NoteScheduler::default();
    s.start(0.0);
    let loop_len = loop_length_sec(s.tempo_bpm());
    let notes = run(&mut s, 0.0, 2.5 * loop_len);
    assert!(notes.len() > 2 * ARPEGGIO.len());
    for (k, n) in notes.iter().enumerate() {
        assert_eq!(n.index, k % ARPEGGIO.len());
        assert_eq!(n.frequency_hz, ARPEGGIO[n.index].frequency_hz);
    }
}

#[test]
fn spacing_follows_duration_and_tempo() {
    let mut s = NoteScheduler::new(60.0);
    s.start(0.0);
    let notes = run(&mut s, 0.0, 10.0);
    for pair in notes.windows(2) {
        let gap = pair[1].start_time_sec - pair[0].start_time_sec;
        let expected = ARPEGGIO[pair[0].index].duration as f64 * 0.5;
        assert!((gap - expected).abs() < 1e-9, "gap {gap} vs {expected}");
    }
}

#[test]
fn one_loop_is_eight_seconds_at_sixty_bpm() {
    assert!((loop_length_sec(60.0) - 8.0).abs() < 1e-9);
    assert!((loop_length_sec(120.0) - 4.0).abs() < 1e-9);
}

#[test]
fn stalled_timer_does_not_burst() {
    let mut s = NoteScheduler::default();
    s.start(0.0);
    let mut out = Vec::new();
    s.poll(0.05, &mut out);
    assert_eq!(out.len(), 1);

    // Tab was in the background for five seconds.
    out.clear();
    s.poll(5.0, &mut out);
    assert!(out.len() <= 2, "{} notes replayed", out.len());
    assert!(out.iter().all(|n| n.start_time_sec >= 5.0));
    assert_eq!(out[0].index, 1);
}

#[test]
fn tone_layers_shape() {
    assert_eq!(TONE_LAYERS.len(), 3);
    assert_eq!(TONE_LAYERS.iter().filter(|l| l.dry).count(), 1);
    assert_eq!(TONE_LAYERS[0].peak_gain, 0.4);
    assert!(TONE_LAYERS.iter().all(|l| l.decay_sec > 0.0));
}

#[test]
fn reverb_tail_decays() {
    let mut rng = SmallRng::seed_from_u64(5);
    let tail = reverb_tail(&mut rng, 4000);
    assert_eq!(tail.len(), 4000);
    assert!(tail.iter().all(|v| v.abs() <= 1.0));
    let energy = |s: &[f32]| s.iter().map(|v| v * v).sum::<f32>();
    assert!(energy(&tail[..1000]) > 10.0 * energy(&tail[3000..]));
}
