//! Property tests for the lightning generator, bolt fading and particle
//! wrapping.

#![cfg(not(target_arch = "wasm32"))]

use electric_canvas::config::ParticleConfig;
use electric_canvas::lightning::{
    generate_path, AnchorStrategy, Bolt, BoltSpawner, BranchRule, DecayPolicy, Storm,
};
use electric_canvas::particle::{Particle, ParticleField};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn coord() -> impl Strategy<Value = f64> {
    -2000.0f64..2000.0
}

proptest! {
    #[test]
    fn path_keeps_endpoints_and_length(
        seed in any::<u64>(),
        x1 in coord(), y1 in coord(), x2 in coord(), y2 in coord(),
        segments in 2usize..64,
        displacement in 0.0f64..200.0,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let points = generate_path(&mut rng, [x1, y1], [x2, y2], segments, displacement);
        prop_assert_eq!(points.len(), segments + 1);
        prop_assert_eq!(points[0], [x1, y1]);
        prop_assert_eq!(points[segments], [x2, y2]);
    }

    #[test]
    fn interior_points_stay_within_half_displacement(
        seed in any::<u64>(),
        x1 in coord(), y1 in coord(), x2 in coord(), y2 in coord(),
        segments in 2usize..64,
        displacement in 0.0f64..200.0,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let points = generate_path(&mut rng, [x1, y1], [x2, y2], segments, displacement);
        let half = displacement / 2.0 + 1e-9;
        for (i, p) in points.iter().enumerate().take(segments).skip(1) {
            let t = i as f64 / segments as f64;
            let ideal = [x1 + (x2 - x1) * t, y1 + (y2 - y1) * t];
            prop_assert!((p[0] - ideal[0]).abs() <= half);
            prop_assert!((p[1] - ideal[1]).abs() <= half);
        }
    }

    #[test]
    fn seeded_generation_is_reproducible(seed in any::<u64>(), segments in 0usize..32) {
        let (start, end) = ([0.0, 0.0], [640.0, 480.0]);
        let a = generate_path(&mut StdRng::seed_from_u64(seed), start, end, segments, 50.0);
        let b = generate_path(&mut StdRng::seed_from_u64(seed), start, end, segments, 50.0);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn opacity_never_rises_and_bolt_leaves_once(
        opacity in 0.01f64..=1.0,
        decay in 0.001f64..0.5,
    ) {
        let mut storm = Storm::new();
        storm.extend(vec![Bolt::new(vec![[0.0, 0.0], [1.0, 1.0]], opacity, decay)]);
        let mut last = opacity;
        let mut frames = 0u32;
        while !storm.is_empty() {
            storm.update();
            frames += 1;
            if let Some(bolt) = storm.bolts().first() {
                prop_assert!(bolt.opacity() <= last);
                prop_assert!(bolt.opacity() > 0.0);
                last = bolt.opacity();
            }
            prop_assert!(frames <= 1001);
        }
        let expected = (opacity / decay).ceil() as u32;
        prop_assert!(frames == expected || frames + 1 == expected || frames == expected + 1);
    }

    #[test]
    fn particles_stay_on_the_surface(
        seed in any::<u64>(),
        width in 1.0f64..3000.0,
        height in 1.0f64..3000.0,
        ticks in 0usize..500,
    ) {
        let mut field = ParticleField::new(width, height);
        let mut config = ParticleConfig::default();
        config.max_speed = 40.0;
        field.populate(&mut StdRng::seed_from_u64(seed), &config);
        field.push(Particle::new(0.0, 0.0, -0.0001, -0.0001, 1.0));
        for _ in 0..ticks {
            field.update();
        }
        for p in field.particles() {
            prop_assert!(p.pos[0] >= 0.0 && p.pos[0] < width);
            prop_assert!(p.pos[1] >= 0.0 && p.pos[1] < height);
        }
    }

    #[test]
    fn branches_start_dimmer_than_the_main_bolt(seed in any::<u64>()) {
        let spawner = BoltSpawner {
            anchor: AnchorStrategy::SkyDrop { reach: 300.0 },
            segments: 15,
            displacement: 50.0,
            decay: DecayPolicy::Fade { rate: 0.03 },
            branches: BranchRule::default_table(),
        };
        let bolts = spawner.strike(&mut StdRng::seed_from_u64(seed), 1920.0, 1080.0);
        prop_assert!(!bolts.is_empty() && bolts.len() <= 3);
        for pair in bolts.windows(2) {
            prop_assert!(pair[1].opacity() < pair[0].opacity());
        }
    }
}

#[test]
fn straight_line_scenario() {
    let points = generate_path(&mut StdRng::seed_from_u64(0), [0.0, 0.0], [100.0, 0.0], 4, 0.0);
    assert_eq!(
        points,
        vec![[0.0, 0.0], [25.0, 0.0], [50.0, 0.0], [75.0, 0.0], [100.0, 0.0]]
    );
}

#[test]
fn tenth_decay_removed_after_ten_ticks() {
    let mut storm = Storm::new();
    storm.extend(vec![Bolt::new(vec![[0.0, 0.0], [0.0, 10.0]], 1.0, 0.1)]);
    for _ in 0..9 {
        storm.update();
    }
    assert_eq!(storm.len(), 1);
    storm.update();
    assert!(storm.is_empty());
}
