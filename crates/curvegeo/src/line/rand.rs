//! Random polylines (radial jitter rings, random walks) with replay tokens.
//!
//! Purpose
//! - Deterministic inputs for property tests and benches. A draw is fully
//!   determined by its configuration and `(seed, index)` token.
//!
//! Model
//! - Rings: `n` equally spaced angles with bounded angular and radial jitter.
//!   Jitter stays below half the spacing, so angles remain increasing and the
//!   ring is simple, star-shaped about its center and counter-clockwise.
//! - Walks: open polylines with unit-ish steps and bounded turning.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{Point, Polyline};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R, floor: usize) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(floor),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(floor);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter ring configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing 2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are `base_radius * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    pub base_radius: f64,
    pub center: Point,
    pub random_phase: bool,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 1.0,
            center: Point::zeros(),
            random_phase: true,
        }
    }
}

/// Random-walk configuration for open polylines.
#[derive(Clone, Copy, Debug)]
pub struct WalkCfg {
    pub vertex_count: VertexCount,
    pub step: f64,
    /// Maximum heading change per step, radians.
    pub max_turn: f64,
    pub origin: Point,
}

impl Default for WalkCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(32),
            step: 1.0,
            max_turn: 0.6,
            origin: Point::zeros(),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finaliser.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

/// Closed, simple, counter-clockwise ring around `cfg.center`.
pub fn draw_ring_radial(cfg: RadialCfg, tok: ReplayToken) -> Polyline {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng, 3);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.99);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = 2.0 * PI / n as f64;
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * 2.0 * PI
    } else {
        0.0
    };
    let points = (0..n)
        .map(|k| {
            let th = phase + k as f64 * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let r = r0 * (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj);
            cfg.center + Point::new(th.cos() * r, th.sin() * r)
        })
        .collect();
    Polyline::ring(points)
}

/// Open polyline from a bounded-turn random walk.
pub fn draw_walk(cfg: WalkCfg, tok: ReplayToken) -> Polyline {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng, 2);
    let step = cfg.step.max(1e-9);
    let mut heading = rng.gen::<f64>() * 2.0 * PI;
    let mut p = cfg.origin;
    let mut points = Vec::with_capacity(n);
    points.push(p);
    for _ in 1..n {
        heading += (rng.gen::<f64>() * 2.0 - 1.0) * cfg.max_turn;
        let len = step * (0.5 + rng.gen::<f64>());
        p += Point::new(heading.cos(), heading.sin()) * len;
        points.push(p);
    }
    Polyline::open(points)
}
