// State of the full-page effect: the particle field plus a storm of fading
// bolts dropping from the top edge. No DOM access here.

use crate::config::EffectConfig;
use crate::lightning::{AnchorStrategy, BoltSpawner, Storm, Trigger};
use crate::particle::ParticleField;
use rand::Rng;

pub struct Background<R: Rng> {
    pub config: EffectConfig,
    pub field: ParticleField,
    pub storm: Storm,
    spawner: BoltSpawner,
    rng: R,
}

impl<R: Rng> Background<R> {
    pub fn new(config: EffectConfig, width: f64, height: f64, mut rng: R) -> Self {
        let mut field = ParticleField::new(width, height);
        field.populate(&mut rng, &config.particles);
        let lightning = &config.lightning;
        let spawner = BoltSpawner {
            anchor: AnchorStrategy::SkyDrop {
                reach: lightning.reach,
            },
            segments: lightning.segments,
            displacement: lightning.displacement,
            decay: lightning.decay,
            branches: lightning.branches.clone(),
        };
        Background {
            config,
            field,
            storm: Storm::new(),
            spawner,
            rng,
        }
    }

    pub fn width(&self) -> f64 {
        self.field.width
    }

    pub fn height(&self) -> f64 {
        self.field.height
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.field.resize(width, height);
    }

    // Unconditional strike: the main bolt and whatever branches the table yields
    pub fn strike(&mut self) -> usize {
        let bolts = self
            .spawner
            .strike(&mut self.rng, self.field.width, self.field.height);
        let spawned = bolts.len();
        self.spawner.deliver(&mut self.storm, bolts);
        spawned
    }

    /// Called by the host timer. Strikes if the chance draw passes; returns
    /// whether it did. A per-frame trigger ignores timer ticks.
    pub fn on_interval(&mut self) -> bool {
        match self.config.lightning.trigger {
            trigger @ Trigger::Interval { .. } => self.maybe_strike(trigger),
            Trigger::PerFrame { .. } => false,
        }
    }

    /// One frame of simulation: particles drift, bolts fade.
    pub fn update(&mut self) {
        if let trigger @ Trigger::PerFrame { .. } = self.config.lightning.trigger {
            self.maybe_strike(trigger);
        }
        self.field.update();
        self.storm.update();
    }

    fn maybe_strike(&mut self, trigger: Trigger) -> bool {
        let draw = self.rng.gen::<f64>();
        if trigger.fires(draw) {
            self.strike();
            true
        } else {
            false
        }
    }
}
