// Crackling bolts around a button. The overlay is larger than the button by
// `padding` on each side; every timer tick throws away the old set.

use crate::config::BorderConfig;
use crate::lightning::{AnchorStrategy, BoltSpawner, DecayPolicy, Storm};
use rand::Rng;

pub struct BorderStorm<R: Rng> {
    pub config: BorderConfig,
    pub storm: Storm,
    pub width: f64,
    pub height: f64,
    spawner: BoltSpawner,
    rng: R,
}

impl<R: Rng> BorderStorm<R> {
    pub fn new(config: BorderConfig, host_width: f64, host_height: f64, rng: R) -> Self {
        let spawner = BoltSpawner {
            anchor: AnchorStrategy::Border {
                padding: config.padding,
            },
            segments: config.segments,
            displacement: config.displacement,
            decay: DecayPolicy::Replace,
            branches: Vec::new(),
        };
        let mut border = BorderStorm {
            config,
            storm: Storm::new(),
            width: 0.0,
            height: 0.0,
            spawner,
            rng,
        };
        border.resize(host_width, host_height);
        border
    }

    // Overlay size for a host element of the given size
    pub fn resize(&mut self, host_width: f64, host_height: f64) {
        self.width = host_width + self.config.padding * 2.0;
        self.height = host_height + self.config.padding * 2.0;
    }

    pub fn regenerate(&mut self) {
        let span = self.config.max_bolts.saturating_sub(self.config.min_bolts) + 1;
        let extra = (self.rng.gen::<f64>() * span as f64) as usize;
        let count = self.config.min_bolts + extra.min(span - 1);
        let mut bolts = Vec::with_capacity(count);
        for _ in 0..count {
            bolts.extend(self.spawner.strike(&mut self.rng, self.width, self.height));
        }
        self.spawner.deliver(&mut self.storm, bolts);
    }
}
