// Drifting particles for the background. Positions wrap at the surface
// edges instead of bouncing, so the field looks endless.

use crate::config::ParticleConfig;
use rand::Rng;
use vecmath::{vec2_add, vec2_len, vec2_sub, Vector2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, radius: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
        }
    }
}

/// A pair of particles close enough to be joined by a line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Link {
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
    pub distance: f64,
}

pub struct ParticleField {
    pub width: f64,
    pub height: f64,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(width: f64, height: f64) -> Self {
        ParticleField {
            width,
            height,
            particles: Vec::new(),
        }
    }

    pub fn populate<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &ParticleConfig) {
        self.particles.reserve(config.count);
        let radius_span = (config.max_radius - config.min_radius).max(0.0);
        for _ in 0..config.count {
            let pos_x = rng.gen::<f64>() * self.width;
            let pos_y = rng.gen::<f64>() * self.height;
            let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
            let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
            let radius = config.min_radius + rng.gen::<f64>() * radius_span;
            let particle = Particle::new(pos_x, pos_y, vel_x, vel_y, radius);
            self.particles.push(particle);
        }
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    // Only the bounds change, particles outside get wrapped back in on the next update
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn update(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            let moved = vec2_add(particle.pos, particle.vel);
            particle.pos = [wrap(moved[0], width), wrap(moved[1], height)];
        }
    }

    /// Every unordered pair closer than `max_distance`.
    pub fn links(&self, max_distance: f64) -> Vec<Link> {
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = vec2_len(vec2_sub(a.pos, b.pos));
                if distance < max_distance {
                    links.push(Link {
                        from: a.pos,
                        to: b.pos,
                        distance,
                    });
                }
            }
        }
        links
    }
}

// Folds `value` into [0, extent). A zero-sized surface pins everything to 0.
fn wrap(value: f64, extent: f64) -> f64 {
    if !(extent > 0.0) || !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid of a tiny negative can round up to exactly `extent`
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}
