// Tunables for every effect. Values mirror the look of the landing page;
// the compact/wide split follows the viewport breakpoint.

use crate::color::Color;
use crate::lightning::{BranchRule, DecayPolicy, Trigger};

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    // velocity per axis is uniform in [-max_speed, max_speed)
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub link_distance: f64,
    pub link_alpha: f64,
    pub link_width: f64,
    pub color: Color,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        ParticleConfig {
            count: 50,
            max_speed: 0.25,
            min_radius: 1.0,
            max_radius: 3.0,
            link_distance: 150.0,
            link_alpha: 0.2,
            link_width: 0.5,
            color: Color::VOLT_YELLOW,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightningConfig {
    pub segments: usize,
    pub displacement: f64,
    pub decay: DecayPolicy,
    pub trigger: Trigger,
    pub initial_strikes: usize,
    pub initial_stagger_ms: i32,
    // horizontal reach of a strike, end x is start x + uniform [-reach/2, reach/2)
    pub reach: f64,
    pub branches: Vec<BranchRule>,
}

impl LightningConfig {
    pub const DECAY_PER_FRAME: f64 = 0.03;

    pub fn for_viewport(viewport_width: f64) -> Self {
        let compact = is_compact(viewport_width);
        LightningConfig {
            segments: 15,
            displacement: 50.0,
            decay: DecayPolicy::Fade {
                rate: LightningConfig::DECAY_PER_FRAME,
            },
            trigger: Trigger::Interval {
                interval_ms: if compact { 800 } else { 1200 },
                chance: if compact { 0.8 } else { 0.6 },
            },
            initial_strikes: if compact { 4 } else { 3 },
            initial_stagger_ms: 300,
            reach: 300.0,
            branches: BranchRule::default_table(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StrokeLayer {
    pub color: Color,
    pub alpha: f64,
    pub width: f64,
    pub blur: f64,
    pub shadow: Color,
}

// Layer widths and blur for bolts, picked from the viewport width
#[derive(Clone, Debug, PartialEq)]
pub struct StrokePreset {
    pub layers: Vec<StrokeLayer>,
}

impl StrokePreset {
    pub fn compact() -> Self {
        StrokePreset::three_layer([6.0, 4.0, 2.0], 25.0)
    }

    pub fn wide() -> Self {
        StrokePreset::three_layer([4.0, 2.5, 1.5], 15.0)
    }

    pub fn for_viewport(viewport_width: f64) -> Self {
        if is_compact(viewport_width) {
            StrokePreset::compact()
        } else {
            StrokePreset::wide()
        }
    }

    // Glow and core only, used around buttons
    pub fn border() -> Self {
        StrokePreset {
            layers: vec![
                StrokeLayer {
                    color: Color::VOLT_YELLOW,
                    alpha: 1.0,
                    width: 4.0,
                    blur: 25.0,
                    shadow: Color::VOLT_YELLOW,
                },
                StrokeLayer {
                    color: Color::WHITE,
                    alpha: 1.0,
                    width: 2.0,
                    blur: 15.0,
                    shadow: Color::WHITE,
                },
            ],
        }
    }

    fn three_layer(widths: [f64; 3], blur: f64) -> Self {
        StrokePreset {
            layers: vec![
                StrokeLayer {
                    color: Color::VOLT_YELLOW,
                    alpha: 0.6,
                    width: widths[0],
                    blur,
                    shadow: Color::VOLT_YELLOW,
                },
                StrokeLayer {
                    color: Color::VOLT_YELLOW,
                    alpha: 1.0,
                    width: widths[1],
                    blur: blur / 2.0,
                    shadow: Color::VOLT_YELLOW,
                },
                StrokeLayer {
                    color: Color::WHITE,
                    alpha: 0.9,
                    width: widths[2],
                    blur: blur / 3.0,
                    shadow: Color::WHITE,
                },
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BorderConfig {
    pub interval_ms: i32,
    pub min_bolts: usize,
    pub max_bolts: usize,
    pub segments: usize,
    pub displacement: f64,
    // distance between the overlay edge and the bolt lines
    pub padding: f64,
}

impl Default for BorderConfig {
    fn default() -> Self {
        BorderConfig {
            interval_ms: 150,
            min_bolts: 3,
            max_bolts: 5,
            segments: 8,
            displacement: 15.0,
            padding: 10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EffectConfig {
    pub particles: ParticleConfig,
    pub lightning: LightningConfig,
    pub strokes: StrokePreset,
    // css opacity for the background canvas, None leaves the stylesheet alone
    pub canvas_opacity: Option<f64>,
    // wrap update and draw in console timers
    pub profile: bool,
}

impl EffectConfig {
    pub const COMPACT_BREAKPOINT: f64 = 768.0;

    pub fn for_viewport(viewport_width: f64) -> Self {
        EffectConfig {
            particles: ParticleConfig::default(),
            lightning: LightningConfig::for_viewport(viewport_width),
            strokes: StrokePreset::for_viewport(viewport_width),
            canvas_opacity: if is_compact(viewport_width) {
                Some(0.3)
            } else {
                None
            },
            profile: false,
        }
    }
}

pub fn is_compact(viewport_width: f64) -> bool {
    viewport_width < EffectConfig::COMPACT_BREAKPOINT
}
