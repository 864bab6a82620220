// Host-side tests for particle emission and the simulation step.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use vfx_studio::core::{AppSettings, EffectType, ParticleSystem, Physics};

const SURFACE: Vec2 = Vec2::new(1024.0, 768.0);
const FRAME_SEC: f32 = 1.0 / 60.0;
const FRAME_MS: f64 = 1000.0 / 60.0;

fn system(seed: u64) -> ParticleSystem<SmallRng> {
    ParticleSystem::with_rng(100_000, SmallRng::seed_from_u64(seed))
}

/// Effects whose velocity is touched only by gravity and friction.
const PLAIN_EFFECTS: [EffectType; 5] = [
    EffectType::PrismRays,
    EffectType::NeonSpark,
    EffectType::CyberGrid,
    EffectType::ParticleStorm,
    EffectType::PlasmaWave,
];

#[test]
fn emit_adds_exactly_count_particles() {
    let mut sys = system(1);
    let mut expected = 0;
    for (i, effect) in EffectType::ALL.into_iter().enumerate() {
        let n = i * 3 + 1;
        sys.emit(Vec2::new(100.0, 100.0), n, effect, 42.0);
        expected += n;
        assert_eq!(sys.len(), expected, "{effect}");
    }
    for p in sys.particles() {
        assert!(p.life > 0.0);
        assert!(p.size > 0.0);
        assert_eq!(p.pos, Vec2::new(100.0, 100.0));
    }
}

#[test]
fn emit_keeps_the_requested_effect() {
    let mut sys = system(2);
    for effect in EffectType::ALL {
        sys.clear();
        sys.emit(Vec2::ZERO, 25, effect, 0.0);
        assert!(sys.particles().iter().all(|p| p.effect() == effect));
    }
}

#[test]
fn zero_count_is_a_no_op() {
    let mut sys = system(3);
    sys.emit(Vec2::ZERO, 0, EffectType::FireTrail, 0.0);
    assert!(sys.is_empty());
}

#[test]
fn life_never_increases_and_dead_particles_are_removed() {
    let settings = AppSettings::default();
    for effect in EffectType::ALL {
        let mut sys = system(4);
        sys.emit(SURFACE * 0.5, 1, effect, 120.0);
        let mut last_life = sys.particles()[0].life;
        let mut t = 0.0;
        for _ in 0..400 {
            t += FRAME_MS;
            sys.advance(FRAME_SEC, settings.physics(), SURFACE, t);
            let Some(p) = sys.particles().first() else {
                break;
            };
            assert!(p.life <= last_life, "{effect}: life went up");
            assert!(p.life > 0.0, "{effect}: dead particle kept");
            assert!(p.size >= 0.2, "{effect}: shrunk particle kept");
            last_life = p.life;
        }
        assert!(sys.is_empty(), "{effect}: still alive after 6.6s");
    }
}

#[test]
fn neutral_physics_leaves_plain_velocities_alone() {
    for effect in PLAIN_EFFECTS {
        let mut sys = system(5);
        sys.emit(SURFACE * 0.5, 20, effect, 0.0);
        let before: Vec<Vec2> = sys.particles().iter().map(|p| p.vel).collect();
        sys.advance(FRAME_SEC, Physics::NEUTRAL, SURFACE, 0.0);
        let after: Vec<Vec2> = sys.particles().iter().map(|p| p.vel).collect();
        assert_eq!(before, after, "{effect}");
    }
}

#[test]
fn positions_follow_velocity() {
    let mut sys = system(6);
    sys.emit(Vec2::new(300.0, 300.0), 10, EffectType::CyberGrid, 0.0);
    let expected: Vec<Vec2> = sys.particles().iter().map(|p| p.pos + p.vel).collect();
    sys.advance(FRAME_SEC, Physics::NEUTRAL, SURFACE, 0.0);
    let got: Vec<Vec2> = sys.particles().iter().map(|p| p.pos).collect();
    assert_eq!(expected, got);
}

#[test]
fn gravity_pulls_full_types_and_half_pulls_data_stream() {
    let physics = Physics {
        gravity: 1.0,
        friction: 1.0,
        wind: 0.0,
        turbulence: 0.0,
    };

    let mut grid = system(7);
    grid.emit(Vec2::ZERO, 5, EffectType::CyberGrid, 0.0);
    let before: Vec<f32> = grid.particles().iter().map(|p| p.vel.y).collect();
    grid.advance(FRAME_SEC, physics, SURFACE, 0.0);
    for (p, vy) in grid.particles().iter().zip(before) {
        assert!((p.vel.y - (vy + 1.0)).abs() < 1e-5);
    }

    let mut data = system(8);
    data.emit(Vec2::ZERO, 5, EffectType::DataStream, 0.0);
    let before: Vec<f32> = data.particles().iter().map(|p| p.vel.y).collect();
    data.advance(FRAME_SEC, physics, SURFACE, 0.0);
    for (p, vy) in data.particles().iter().zip(before) {
        assert!((p.vel.y - (vy + 0.5)).abs() < 1e-5);
    }
}

#[test]
fn galaxy_ignores_gravity_and_friction() {
    let heavy = Physics {
        gravity: 1.0,
        friction: 0.85,
        wind: 0.0,
        turbulence: 0.0,
    };
    let mut a = system(9);
    let mut b = system(9);
    a.emit(Vec2::new(200.0, 200.0), 10, EffectType::GalaxySwirl, 0.0);
    b.emit(Vec2::new(200.0, 200.0), 10, EffectType::GalaxySwirl, 0.0);
    a.advance(FRAME_SEC, heavy, SURFACE, 0.0);
    b.advance(FRAME_SEC, Physics::NEUTRAL, SURFACE, 0.0);
    for (pa, pb) in a.particles().iter().zip(b.particles()) {
        assert_eq!(pa.vel, pb.vel);
    }
}

#[test]
fn wind_pushes_sideways() {
    let windy = Physics {
        gravity: 0.0,
        friction: 1.0,
        wind: 2.0,
        turbulence: 0.0,
    };
    let mut sys = system(10);
    sys.emit(Vec2::ZERO, 10, EffectType::PlasmaWave, 0.0);
    let before: Vec<f32> = sys.particles().iter().map(|p| p.vel.x).collect();
    sys.advance(FRAME_SEC, windy, SURFACE, 0.0);
    for (p, vx) in sys.particles().iter().zip(before) {
        assert!((p.vel.x - (vx + 0.2)).abs() < 1e-5);
    }
}

#[test]
fn trail_history_is_capped_and_fifo() {
    for effect in EffectType::ALL {
        let cap = effect.trail_len();
        let mut sys = system(11);
        sys.emit(SURFACE * 0.5, 3, effect, 0.0);
        let mut positions: Vec<Vec<Vec2>> = vec![Vec::new(); sys.len()];
        for frame in 0..40 {
            sys.advance(0.001, Physics::NEUTRAL, SURFACE, frame as f64);
            if sys.len() != positions.len() {
                break;
            }
            for (log, p) in positions.iter_mut().zip(sys.particles()) {
                log.push(p.pos);
                assert!(p.history.len() <= cap, "{effect}");
                let expected = &log[log.len().saturating_sub(cap)..];
                let got: Vec<Vec2> = p.history.iter().collect();
                assert_eq!(got.as_slice(), if cap == 0 { &[][..] } else { expected });
            }
        }
    }
}

#[test]
fn fire_trail_burns_out_within_two_seconds() {
    let settings = AppSettings::default();
    let mut sys = system(12);
    sys.emit(Vec2::new(100.0, 100.0), 10, EffectType::FireTrail, 0.0);
    let mut t = 0.0;
    for _ in 0..120 {
        t += FRAME_MS;
        sys.advance(FRAME_SEC, settings.physics(), SURFACE, t);
        for p in sys.particles() {
            assert!(p.pos.y < 100.0, "fire should rise, y = {}", p.pos.y);
        }
    }
    assert!(sys.is_empty());
}

#[test]
fn cap_holds_under_continuous_emission() {
    let mut sys = ParticleSystem::with_rng(500, SmallRng::seed_from_u64(13));
    let settings = AppSettings::default();
    let mut t = 0.0;
    for frame in 0..300 {
        let effect = EffectType::ALL[frame % EffectType::ALL.len()];
        sys.emit(Vec2::new(10.0 * frame as f32, 50.0), 60, effect, 0.0);
        assert!(sys.len() <= 500);
        t += FRAME_MS;
        sys.advance(FRAME_SEC, settings.physics(), SURFACE, t);
        assert!(sys.len() <= 500);
    }
}

#[test]
fn eviction_drops_the_oldest_first() {
    let mut sys = ParticleSystem::with_rng(10, SmallRng::seed_from_u64(14));
    sys.emit(Vec2::new(1.0, 1.0), 8, EffectType::CyberGrid, 0.0);
    sys.emit(Vec2::new(2.0, 2.0), 8, EffectType::CyberGrid, 0.0);
    assert_eq!(sys.len(), 10);
    let old = sys
        .particles()
        .iter()
        .filter(|p| p.pos == Vec2::new(1.0, 1.0))
        .count();
    assert_eq!(old, 2);
    assert_eq!(sys.particles()[0].pos, Vec2::new(1.0, 1.0));
    assert_eq!(sys.particles()[9].pos, Vec2::new(2.0, 2.0));
}

#[test]
fn shrinking_the_cap_evicts_immediately() {
    let mut sys = system(15);
    sys.emit(Vec2::ZERO, 100, EffectType::NeonSpark, 0.0);
    sys.set_max_particles(30);
    assert_eq!(sys.len(), 30);
    assert_eq!(sys.max_particles(), 30);
}

#[test]
fn resize_does_not_move_particles() {
    let mut sys = system(16);
    sys.emit(Vec2::new(400.0, 300.0), 20, EffectType::NeonSpark, 0.0);
    let before: Vec<Vec2> = sys.particles().iter().map(|p| p.pos).collect();
    // Zero-length frame on a different surface size.
    let expected: Vec<Vec2> = sys
        .particles()
        .iter()
        .map(|p| p.pos + p.vel)
        .collect();
    sys.advance(0.0, Physics::NEUTRAL, Vec2::new(320.0, 240.0), 0.0);
    let after: Vec<Vec2> = sys.particles().iter().map(|p| p.pos).collect();
    assert_eq!(after, expected);
    assert_ne!(before, after);
}
