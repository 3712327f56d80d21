use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use curvegeo::api::*;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;
mod sample;

#[derive(Parser)]
#[command(name = "curvegeo")]
#[command(about = "Distance, containment and crossing queries over curve documents")]
struct Cmd {
    /// Optional run tag; propagated to logs and provenance sidecars
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Nearest curve to a point
    Closest {
        #[arg(long)]
        curves: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Innermost closed curve containing a point
    Enclose {
        #[arg(long)]
        curves: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// List every enclosing curve, innermost first
        #[arg(long)]
        rank: bool,
    },
    /// Crossings of curve `a` over curve `b`
    Crossings {
        #[arg(long)]
        curves: PathBuf,
        #[arg(long)]
        a: usize,
        #[arg(long)]
        b: usize,
        /// Bisection search; assumes the curves cross at most once
        #[arg(long)]
        single: bool,
    },
    /// Classify a table of points (CSV or Parquet with x,y columns)
    Sample {
        #[arg(long)]
        curves: PathBuf,
        #[arg(long)]
        points: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print provenance and per-curve measurements
    Report {
        #[arg(long)]
        curves: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let tag = cmd.tag.as_deref();
    let out = match cmd.action {
        Action::Closest { curves, x, y } => {
            let set = input::load_curves(&curves)?;
            tracing::info!(curves = set.len(), x, y, tag, "closest");
            closest(&set, Point::new(x, y))
        }
        Action::Enclose {
            curves,
            x,
            y,
            rank,
        } => {
            let set = input::load_curves(&curves)?;
            tracing::info!(curves = set.len(), x, y, rank, tag, "enclose");
            enclose(&set, Point::new(x, y), rank)
        }
        Action::Crossings {
            curves,
            a,
            b,
            single,
        } => {
            let set = input::load_curves(&curves)?;
            tracing::info!(curves = set.len(), a, b, single, tag, "crossings");
            crossings(&set, a, b, single)?
        }
        Action::Sample {
            curves,
            points,
            out,
        } => run_sample(&curves, &points, &out, tag)?,
        Action::Report { curves } => {
            let set = curves.as_deref().map(input::load_curves).transpose()?;
            report(set.as_ref(), tag)
        }
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn point_json(p: Point) -> Value {
    json!([p.x, p.y])
}

fn closest(set: &CurveSet, p: Point) -> Value {
    match set.closest_curve(p) {
        Some(c) => json!({
            "index": c.index,
            "distance": c.projection.distance,
            "point": point_json(c.projection.point),
            "span": c.projection.span,
        }),
        None => Value::Null,
    }
}

fn enclosing_json(e: &EnclosingCurve<'_>) -> Value {
    json!({ "index": e.index, "size": e.size, "clockwise": e.clockwise })
}

fn enclose(set: &CurveSet, p: Point, rank: bool) -> Value {
    if rank {
        Value::Array(
            set.rank_enclosing_curves(p)
                .iter()
                .map(enclosing_json)
                .collect(),
        )
    } else {
        set.enclosing_curve(p)
            .map_or(Value::Null, |e| enclosing_json(&e))
    }
}

fn crossing_json(c: &Crossing) -> Value {
    json!({
        "point": point_json(c.point),
        "span_a": c.span_a,
        "span_b": c.span_b,
        "right_after": c.right_after,
    })
}

fn crossings(set: &CurveSet, a: usize, b: usize, single: bool) -> Result<Value> {
    let line_a = &set
        .get(a)
        .ok_or_else(|| anyhow!("no curve at index {a}"))?
        .line;
    let line_b = &set
        .get(b)
        .ok_or_else(|| anyhow!("no curve at index {b}"))?
        .line;
    if !single {
        let all = all_crossings(line_a, line_b);
        tracing::info!(found = all.len(), "scan done");
        return Ok(Value::Array(all.iter().map(crossing_json).collect()));
    }
    Ok(match find_single_crossing(line_a, line_b) {
        Bisection::Crossing(c) => json!({ "crossing": crossing_json(&c) }),
        Bisection::NearMiss(m) => json!({
            "near_miss": {
                "point": point_json(m.point),
                "approach": m.approach,
                "span_a": m.span_a,
                "span_b": m.span_b,
            }
        }),
        Bisection::NotFound => Value::Null,
    })
}

fn run_sample(curves: &Path, points: &Path, out: &Path, tag: Option<&str>) -> Result<Value> {
    let set = input::load_curves(curves)?;
    let pts = sample::read_points(points)?;
    tracing::info!(curves = set.len(), points = pts.len(), tag, "sample");
    let mut df = sample::sample(&set, &pts)?;
    sample::write_frame(&mut df, out)?;
    let payload = provenance::Payload::new(json!({
        "command": "sample",
        "rows": df.height(),
        "curves": set.len(),
    }))
    .with_inputs([curves, points])
    .with_tag(tag);
    let sidecar = provenance::write_sidecar(out, payload)?;
    Ok(json!({
        "rows": df.height(),
        "output": out.to_string_lossy(),
        "provenance": sidecar.to_string_lossy(),
    }))
}

fn report(set: Option<&CurveSet>, tag: Option<&str>) -> Value {
    let mut doc = provenance::header();
    doc["tags"] = json!(tag.into_iter().collect::<Vec<_>>());
    if let Some(set) = set {
        let curves: Vec<Value> = set
            .curves()
            .iter()
            .enumerate()
            .map(|(index, c)| {
                let props = c.line.properties();
                json!({
                    "index": index,
                    "points": c.line.len(),
                    "closed": props.closed,
                    "sense": input::Sense::from(c.hand),
                    "area": props.area,
                    "length": props.length,
                    "clockwise": props.clockwise,
                    "self_crossing": self_crossing(&c.line).map(|x| point_json(x.point)),
                })
            })
            .collect();
        doc["curves"] = Value::Array(curves);
    }
    doc
}
