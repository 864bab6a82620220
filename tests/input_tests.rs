// Host-side tests for pointer bookkeeping, emission rates, keyboard
// shortcuts and the autoplay cursor.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use vfx_studio::core::{AppSettings, AutoplayCursor, EffectType, SafeZone, SettingsStore};
use vfx_studio::input::*;

#[test]
fn registry_tracks_pointers_by_id() {
    let mut reg = TouchRegistry::new();
    reg.press(1, Vec2::new(10.0, 10.0));
    reg.press(7, Vec2::new(50.0, 60.0));
    assert_eq!(reg.len(), 2);

    assert!(reg.move_to(1, Vec2::new(12.0, 14.0)));
    let mut pos = reg.positions().to_vec();
    pos.sort_by(|a, b| a.x.total_cmp(&b.x));
    assert_eq!(pos, vec![Vec2::new(12.0, 14.0), Vec2::new(50.0, 60.0)]);

    assert_eq!(reg.release(1), Some(Vec2::new(12.0, 14.0)));
    assert_eq!(reg.release(1), None);
    assert_eq!(reg.len(), 1);
}

#[test]
fn hover_moves_are_not_drags() {
    let mut reg = TouchRegistry::new();
    assert!(!reg.move_to(3, Vec2::ZERO));
    assert!(reg.is_empty());
}

#[test]
fn emission_rates_match_intensity() {
    assert_eq!(press_burst(8), 16);
    assert_eq!(drag_burst(8), 4);
    assert_eq!(hold_rate(8), 2);
    assert_eq!(autoplay_rate(8), 3);
    assert_eq!(motion_rate(8), 4);

    assert_eq!(press_burst(1), 2);
    assert_eq!(drag_burst(1), 1);
    assert_eq!(hold_rate(1), 1);
    assert_eq!(autoplay_rate(1), 1);

    assert_eq!(press_burst(30), 60);
    assert_eq!(drag_burst(29), 15);
    assert_eq!(hold_rate(30), 6);
    assert_eq!(autoplay_rate(30), 10);
}

#[test]
fn every_effect_has_a_key() {
    let keys = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "q", "w", "e", "r", "t"];
    let picked: Vec<EffectType> = keys.iter().filter_map(|k| effect_for_key(k)).collect();
    assert_eq!(picked, EffectType::ALL.to_vec());
    assert_eq!(effect_for_key("Q"), effect_for_key("q"));
    assert_eq!(effect_for_key("z"), None);
}

#[test]
fn unmapped_keys_do_nothing() {
    for key in ["z", "Tab", "F5", "Shift"] {
        assert_eq!(key_action(key), None, "{key}");
    }
}

#[test]
fn shortcut_steps_are_clamped_on_publish() {
    let store = SettingsStore::new(AppSettings::default());
    let press = |key: &str| {
        let action = key_action(key).expect("mapped");
        store.update(|s| {
            action.apply(s);
        })
    };

    for _ in 0..40 {
        press("]");
    }
    assert_eq!(store.snapshot().bloom, 3.0);
    press("[");
    assert!((store.snapshot().bloom - 2.9).abs() < 1e-6);

    for _ in 0..40 {
        press("-");
    }
    assert_eq!(store.snapshot().intensity, 1);
    press("=");
    assert_eq!(store.snapshot().intensity, 2);

    for _ in 0..30 {
        press("ArrowUp");
    }
    assert_eq!(store.snapshot().volume, 1.0);
    press("ArrowDown");
    assert!((store.snapshot().volume - 0.95).abs() < 1e-6);
}

#[test]
fn toggles_flip_flags() {
    let mut s = AppSettings::default();
    for key in ["a", "m", "k", "h", " "] {
        assert!(key_action(key).expect("mapped").apply(&mut s));
    }
    assert!(!s.autoplay);
    assert!(s.motion_control);
    assert!(s.show_clock);
    assert!(s.show_ui);
    assert!(s.muted);
    assert_eq!(s.effective_volume(), 0.0);
}

#[test]
fn fullscreen_keys_leave_settings_alone() {
    let mut s = AppSettings::default();
    for key in ["Enter", "Escape"] {
        assert!(!key_action(key).expect("mapped").apply(&mut s));
    }
    assert_eq!(s, AppSettings::default());
}

#[test]
fn autoplay_cursor_stays_in_the_safe_zone() {
    let mut rng = SmallRng::seed_from_u64(21);
    let surface = Vec2::new(1920.0, 1080.0);
    let zone = SafeZone::for_surface(surface);
    let mut cursor = AutoplayCursor::new(surface);
    for _ in 0..100_000 {
        let p = cursor.step(surface, &mut rng);
        assert!(zone.contains(p), "{p} escaped");
    }
}

#[test]
fn autoplay_cursor_follows_a_resize() {
    let mut rng = SmallRng::seed_from_u64(22);
    let mut cursor = AutoplayCursor::new(Vec2::new(1920.0, 1080.0));
    for _ in 0..200 {
        cursor.step(Vec2::new(1920.0, 1080.0), &mut rng);
    }
    let small = Vec2::new(400.0, 300.0);
    let zone = SafeZone::for_surface(small);
    for _ in 0..1000 {
        assert!(zone.contains(cursor.step(small, &mut rng)));
    }
}
