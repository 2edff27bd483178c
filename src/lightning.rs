// Procedural lightning: zig-zag paths by midpoint displacement, bolts that
// fade out frame by frame, and a spawner shared by the full-page storm and
// the button border variant.

use rand::Rng;
use vecmath::{vec2_add, vec2_scale, vec2_sub, Vector2};

pub type Point = Vector2<f64>;

/// Builds a jagged path from `start` to `end`.
///
/// The result always holds `segments + 1` points (at least two). Interior
/// point `i` sits at `t = i / segments` on the straight line and is pushed
/// independently in x and y by a uniform value in
/// `[-displacement / 2, displacement / 2]`. The endpoints are never moved.
pub fn generate_path<R: Rng + ?Sized>(
    rng: &mut R,
    start: Point,
    end: Point,
    segments: usize,
    displacement: f64,
) -> Vec<Point> {
    let segments = segments.max(1);
    let span = vec2_sub(end, start);
    let mut points = Vec::with_capacity(segments + 1);
    points.push(start);
    for i in 1..segments {
        let t = i as f64 / segments as f64;
        let ideal = vec2_add(start, vec2_scale(span, t));
        let jitter = [
            (rng.gen::<f64>() - 0.5) * displacement,
            (rng.gen::<f64>() - 0.5) * displacement,
        ];
        points.push(vec2_add(ideal, jitter));
    }
    points.push(end);
    points
}

/// A single strike. Opacity only ever goes down; once it reaches zero the
/// owning [`Storm`] drops the bolt.
#[derive(Clone, Debug, PartialEq)]
pub struct Bolt {
    pub points: Vec<Point>,
    initial_opacity: f64,
    decay: f64,
    age: u32,
}

impl Bolt {
    // Slack for float error, so 1.0 with decay 0.1 is gone after exactly 10 frames
    const SPENT_EPSILON: f64 = 1e-9;

    pub fn new(points: Vec<Point>, opacity: f64, decay: f64) -> Bolt {
        Bolt {
            points,
            initial_opacity: opacity.max(0.0).min(1.0),
            decay: decay.max(0.0),
            age: 0,
        }
    }

    // Computed from the age rather than repeated subtraction to keep rounding
    // from stretching a bolt's life by a frame.
    pub fn opacity(&self) -> f64 {
        (self.initial_opacity - self.decay * self.age as f64).max(0.0)
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn fade(&mut self) {
        if self.decay > 0.0 {
            self.age = self.age.saturating_add(1);
        }
    }

    pub fn is_spent(&self) -> bool {
        self.initial_opacity - self.decay * self.age as f64 <= Bolt::SPENT_EPSILON
    }
}

/// One row of the branching table: when the strike's draw exceeds
/// `threshold`, an extra bolt starts at `opacity`, shifted sideways by a
/// uniform amount in `[-spread / 2, spread / 2)`.
#[derive(Clone, Debug, PartialEq)]
pub struct BranchRule {
    pub threshold: f64,
    pub opacity: f64,
    pub spread: f64,
}

impl BranchRule {
    pub fn default_table() -> Vec<BranchRule> {
        vec![
            BranchRule {
                threshold: 0.4,
                opacity: 0.8,
                spread: 100.0,
            },
            BranchRule {
                threshold: 0.7,
                opacity: 0.6,
                spread: 150.0,
            },
        ]
    }

    pub fn matching(table: &[BranchRule], draw: f64) -> impl Iterator<Item = &BranchRule> {
        table.iter().filter(move |rule| draw > rule.threshold)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DecayPolicy {
    // each frame lowers opacity by `rate`
    Fade { rate: f64 },
    // bolts hold full opacity until the next strike swaps the whole set
    Replace,
}

impl DecayPolicy {
    pub fn rate(&self) -> f64 {
        match *self {
            DecayPolicy::Fade { rate } => rate,
            DecayPolicy::Replace => 0.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Trigger {
    // host timer, each tick strikes with probability `chance`
    Interval { interval_ms: i32, chance: f64 },
    // checked once per animation frame
    PerFrame { probability: f64 },
}

impl Trigger {
    pub fn fires(&self, draw: f64) -> bool {
        match *self {
            Trigger::Interval { chance, .. } => draw < chance,
            Trigger::PerFrame { probability } => draw < probability,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];
}

/// Where a strike starts and ends on a surface of the given size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnchorStrategy {
    // from the top edge down into the page, drifting up to reach/2 sideways
    SkyDrop { reach: f64 },
    // both ends on one side of the rectangle inset by `padding`
    Border { padding: f64 },
}

impl AnchorStrategy {
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R, width: f64, height: f64) -> (Point, Point) {
        match *self {
            AnchorStrategy::SkyDrop { reach } => {
                let start_x = rng.gen::<f64>() * width;
                let end_x = start_x + (rng.gen::<f64>() - 0.5) * reach;
                let end_y = rng.gen::<f64>() * height;
                ([start_x, 0.0], [end_x, end_y])
            }
            AnchorStrategy::Border { padding } => {
                let side_idx = ((rng.gen::<f64>() * 4.0) as usize).min(3);
                let side = Side::ALL[side_idx];
                let inner_w = (width - padding * 2.0).max(0.0);
                let inner_h = (height - padding * 2.0).max(0.0);
                let (r1, r2) = (rng.gen::<f64>(), rng.gen::<f64>());
                let x_at = |r: f64| padding + r * inner_w;
                let y_at = |r: f64| padding + r * inner_h;
                match side {
                    Side::Top => ([x_at(r1), padding], [x_at(r2), padding]),
                    Side::Right => ([width - padding, y_at(r1)], [width - padding, y_at(r2)]),
                    Side::Bottom => ([x_at(r1), height - padding], [x_at(r2), height - padding]),
                    Side::Left => ([padding, y_at(r1)], [padding, y_at(r2)]),
                }
            }
        }
    }
}

/// Turns a trigger into bolts: picks the anchor line, generates the main
/// path and any branches from the table.
#[derive(Clone, Debug, PartialEq)]
pub struct BoltSpawner {
    pub anchor: AnchorStrategy,
    pub segments: usize,
    pub displacement: f64,
    pub decay: DecayPolicy,
    pub branches: Vec<BranchRule>,
}

impl BoltSpawner {
    pub fn strike<R: Rng + ?Sized>(&self, rng: &mut R, width: f64, height: f64) -> Vec<Bolt> {
        let (start, end) = self.anchor.pick(rng, width, height);
        let rate = self.decay.rate();
        let mut bolts = vec![Bolt::new(
            generate_path(rng, start, end, self.segments, self.displacement),
            1.0,
            rate,
        )];
        if self.branches.is_empty() {
            return bolts;
        }

        let draw = rng.gen::<f64>();
        for rule in BranchRule::matching(&self.branches, draw) {
            let shift = [(rng.gen::<f64>() - 0.5) * rule.spread, 0.0];
            let path = generate_path(
                rng,
                vec2_add(start, shift),
                vec2_add(end, shift),
                self.segments,
                self.displacement,
            );
            bolts.push(Bolt::new(path, rule.opacity, rate));
        }
        bolts
    }

    // Hands fresh bolts to the storm according to the decay policy
    pub fn deliver(&self, storm: &mut Storm, bolts: Vec<Bolt>) {
        match self.decay {
            DecayPolicy::Fade { .. } => storm.extend(bolts),
            DecayPolicy::Replace => storm.replace(bolts),
        }
    }
}

/// The live bolts of one effect.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Storm {
    bolts: Vec<Bolt>,
}

impl Storm {
    pub fn new() -> Self {
        Storm { bolts: Vec::new() }
    }

    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    pub fn len(&self) -> usize {
        self.bolts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bolts.is_empty()
    }

    pub fn extend<I: IntoIterator<Item = Bolt>>(&mut self, bolts: I) {
        self.bolts.extend(bolts);
    }

    pub fn replace(&mut self, bolts: Vec<Bolt>) {
        self.bolts = bolts;
    }

    // Fade every bolt one frame and drop the spent ones
    pub fn update(&mut self) {
        for bolt in &mut self.bolts {
            bolt.fade();
        }
        self.bolts.retain(|bolt| !bolt.is_spent());
    }
}
