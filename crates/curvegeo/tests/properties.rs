//! Property tests over seeded random lines.

use curvegeo::api::*;
use nalgebra::vector;
use proptest::prelude::*;

fn ring(seed: u64, n: usize, center: Point) -> Polyline {
    draw_ring_radial(
        RadialCfg {
            vertex_count: VertexCount::Fixed(n),
            center,
            ..RadialCfg::default()
        },
        LineReplay { seed, index: 0 },
    )
}

fn walk(seed: u64, n: usize) -> Polyline {
    draw_walk(
        WalkCfg {
            vertex_count: VertexCount::Fixed(n),
            ..WalkCfg::default()
        },
        LineReplay { seed, index: 1 },
    )
}

fn distance_to_span(line: &Polyline, span: usize, p: Point) -> f64 {
    let info = line.span_info(span).expect("span in range");
    let t = if info.length > 0.0 {
        ((p - info.start).dot(&info.delta) / (info.length * info.length)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (info.start + info.delta * t - p).norm()
}

proptest! {
    #[test]
    fn projection_lies_on_its_span(seed in any::<u64>(), n in 2usize..40, x in -20.0f64..20.0, y in -20.0f64..20.0) {
        let line = walk(seed, n);
        let p = vector![x, y];
        let proj = closest_point_on_polyline(&line, p).unwrap();
        prop_assert!(proj.distance >= 0.0);
        prop_assert!(distance_to_span(&line, proj.span, proj.point) < 1e-9);
        prop_assert!(((proj.point - p).norm() - proj.distance).abs() < 1e-9);
        for (i, _, _) in line.spans() {
            prop_assert!(distance_to_span(&line, i, p) >= proj.distance - 1e-9);
        }
    }

    #[test]
    fn star_ring_contains_center_not_far_point(seed in any::<u64>(), n in 5usize..60, cx in -5.0f64..5.0, cy in -5.0f64..5.0) {
        let center = vector![cx, cy];
        let line = ring(seed, n, center);
        let inside = classify(&line, center).unwrap();
        prop_assert!(inside.inside);
        let far = classify(&line, center + vector![100.0, 0.0]).unwrap();
        prop_assert!(!far.inside);
    }

    #[test]
    fn reversal_keeps_inside_and_flips_sides(seed in any::<u64>(), n in 5usize..30, x in -2.0f64..2.0, y in -2.0f64..2.0) {
        let line = ring(seed, n, Point::zeros());
        let mut rev = line.clone();
        rev.reverse();
        let p = vector![x, y];
        let a = classify(&line, p).unwrap();
        let b = classify(&rev, p).unwrap();
        prop_assume!(a.projection.distance > 1e-9);
        prop_assert_eq!(a.inside, b.inside);
        prop_assert_eq!(a.clockwise, !b.clockwise);
        prop_assert_eq!(a.right, !b.right);
        // Simple ring: side and containment agree.
        prop_assert_eq!(a.inside, a.right == a.clockwise);
    }

    #[test]
    fn bisection_resolves_x_crossing(
        ax in -10.0f64..10.0, ay in -10.0f64..10.0,
        len in 0.5f64..10.0, heading in 0.0f64..std::f64::consts::TAU,
        t in 0.1f64..0.9, tilt in 0.3f64..2.8, half in 0.5f64..10.0,
    ) {
        let a0 = vector![ax, ay];
        let dir = vector![heading.cos(), heading.sin()];
        let a1 = a0 + dir * len;
        let c = a0 + dir * (len * t);
        let th = heading + tilt;
        let bdir = vector![th.cos(), th.sin()];
        let a = Polyline::open(vec![a0, a1]);
        let b = Polyline::open(vec![c - bdir * half, c + bdir * half]);
        match find_single_crossing(&a, &b) {
            Bisection::Crossing(x) => prop_assert!((x.point - c).norm() < 1e-6),
            other => prop_assert!(false, "expected crossing, got {:?}", other),
        }
    }

    #[test]
    fn sawtooth_yields_one_crossing_per_tooth(teeth in 1usize..50, amp in 0.1f64..5.0) {
        let pts: Vec<Point> = (0..=teeth)
            .map(|i| vector![i as f64, if i % 2 == 0 { amp } else { -amp }])
            .collect();
        let a = Polyline::open(pts);
        let b = Polyline::open(vec![vector![-1.0, 0.0], vector![teeth as f64 + 1.0, 0.0]]);
        let all = all_crossings(&a, &b);
        prop_assert_eq!(all.len(), teeth);
        prop_assert!(next_crossing(&a, &b, all[teeth - 1].resume_from()).is_none());
    }

    #[test]
    fn scanned_crossings_lie_on_both_lines(seed_a in any::<u64>(), seed_b in any::<u64>()) {
        // Closed target: a side change always means a real crossing.
        let a = walk(seed_a, 30);
        let b = ring(seed_b, 20, vector![0.5, 0.0]);
        let mut last_span = None;
        for x in all_crossings(&a, &b) {
            prop_assert!(distance_to_span(&a, x.span_a, x.point) < 1e-6);
            prop_assert!(distance_to_span(&b, x.span_b, x.point) < 1e-6);
            prop_assert!(last_span.is_none_or(|s| x.span_a > s));
            last_span = Some(x.span_a);
        }
    }

    #[test]
    fn open_target_crossings_lie_on_the_hop(seed_a in any::<u64>(), seed_b in any::<u64>()) {
        // Open target: sides also flip around its free ends without a crossing.
        let a = walk(seed_a, 30);
        let mut b = walk(seed_b, 20);
        b.translate(vector![0.5, 0.25]);
        for x in all_crossings(&a, &b) {
            prop_assert!(distance_to_span(&a, x.span_a, x.point) < 1e-9);
            prop_assert!(distance_to_span(&b, x.span_b, x.point) < 1e-9);
        }
        if let Bisection::Crossing(x) = find_single_crossing(&a, &b) {
            prop_assert!(distance_to_span(&a, x.span_a, x.point) < 1e-9);
        }
    }

    #[test]
    fn nested_rings_rank_by_area(k in 1usize..8, x in -0.5f64..0.5, y in -0.5f64..0.5, rot in 0usize..8) {
        let mut curves: Vec<Curve> = (1..=k)
            .map(|h| {
                let h = h as f64;
                Curve::new(
                    Polyline::ring(vec![vector![-h, -h], vector![h, -h], vector![h, h], vector![-h, h]]),
                    Hand::Right,
                )
            })
            .collect();
        curves.rotate_left(rot % k);
        let set: CurveSet = curves.into_iter().collect();
        let p = vector![x, y];
        let inner = set.enclosing_curve(p).unwrap();
        prop_assert!((inner.size - 4.0).abs() < 1e-9);
        let ranked = set.rank_enclosing_curves(p);
        prop_assert_eq!(ranked.len(), k);
        prop_assert!(ranked.windows(2).all(|w| w[0].size <= w[1].size));
    }

    #[test]
    fn degenerate_inputs_never_panic(
        pts in prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 0..4),
        closed in any::<bool>(), dup in any::<bool>(),
    ) {
        let mut coords = pts.clone();
        if dup {
            if let Some(&first) = pts.first() {
                coords.push(first);
                coords.push(first);
            }
        }
        let line = Polyline::from_xy(&coords, closed);
        let other = Polyline::from_xy(&[(-2.0, 0.0), (2.0, 0.0)], false);
        let p = vector![0.25, 0.5];
        let _ = closest_point_on_polyline(&line, p);
        if let Some(c) = classify(&line, p) {
            prop_assert!(c.projection.distance.is_finite());
        }
        let _ = line_sight(&line, p, vector![0.0, 0.0], true);
        let _ = find_single_crossing(&line, &other);
        let _ = all_crossings(&line, &other);
        let _ = all_crossings(&other, &line);
        let _ = self_crossing(&line);
        let _ = approach(&line, &other);
        let _ = line.walk(0.3, 5.0);
        let _ = line.position(-3.0);
        let set: CurveSet = [Curve::new(line.clone(), Hand::Ambiguous)].into_iter().collect();
        let _ = set.closest_curve(p);
        let _ = set.rank_enclosing_curves(p);
        if let Some(f) = Fragment::whole(&line, Direction::Backward) {
            let _ = next_fragment_list_crossing(&[f], &other, FragmentCursor::default(), true);
        }
    }
}
