//! Draw random walks against a random star ring and print where they cross.
//!
//! Usage:
//!   cargo run -p curvegeo --example random_crossings -- [count]
//!
//! Per walk prints the crossing count, the first crossing and whether the
//! walk ends inside the ring.

use curvegeo::api::*;

fn main() {
    let count: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);
    let ring = draw_ring_radial(
        RadialCfg {
            vertex_count: VertexCount::Fixed(24),
            base_radius: 3.0,
            ..RadialCfg::default()
        },
        LineReplay { seed: 2025, index: 0 },
    );
    println!(
        "ring: {} vertices, area {:.3}, length {:.3}",
        ring.len(),
        ring.signed_area(),
        ring.length()
    );
    let cfg = WalkCfg {
        vertex_count: VertexCount::Uniform { min: 10, max: 60 },
        step: 0.5,
        ..WalkCfg::default()
    };
    for index in 0..count {
        let walk = draw_walk(cfg, LineReplay { seed: 2025, index });
        let crossings = all_crossings(&walk, &ring);
        let end_inside = walk
            .point(walk.len().saturating_sub(1))
            .and_then(|p| classify(&ring, p))
            .is_some_and(|c| c.inside);
        match crossings.first() {
            Some(c) => println!(
                "walk {index}: {} crossings, first at ({:.3}, {:.3}) span {}, ends inside: {end_inside}",
                crossings.len(),
                c.point.x,
                c.point.y,
                c.span_a
            ),
            None => println!("walk {index}: no crossings, ends inside: {end_inside}"),
        }
    }
}
