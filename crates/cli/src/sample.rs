//! Batch sampling: classify a table of points against a curve set.
//!
//! Input is a CSV or Parquet table with numeric `x` and `y` columns. Output
//! adds, per point, the nearest curve (`closest`, `distance`) and the
//! innermost enclosing curve (`enclosing`); missing matches are null.

use anyhow::{anyhow, bail, Context, Result};
use curvegeo::{CurveSet, Point};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

fn is_parquet(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("parquet"))
}

pub fn read_points(path: &Path) -> Result<Vec<Point>> {
    let lf = if is_parquet(path) {
        LazyFrame::scan_parquet(path, ScanArgsParquet::default())
    } else {
        LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .finish()
    }
    .with_context(|| format!("opening {}", path.display()))?;
    let df = lf
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    let xs = df.column("x")?.cast(&DataType::Float64)?;
    let ys = df.column("y")?.cast(&DataType::Float64)?;
    xs.f64()?
        .into_iter()
        .zip(ys.f64()?)
        .enumerate()
        .map(|(row, (x, y))| match (x, y) {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => Err(anyhow!("row {row}: missing x or y")),
        })
        .collect()
}

pub fn sample(set: &CurveSet, points: &[Point]) -> Result<DataFrame> {
    let mut closest: Vec<Option<u32>> = Vec::with_capacity(points.len());
    let mut distance: Vec<Option<f64>> = Vec::with_capacity(points.len());
    let mut enclosing: Vec<Option<u32>> = Vec::with_capacity(points.len());
    for &p in points {
        let near = set.closest_curve(p);
        closest.push(near.map(|c| c.index as u32));
        distance.push(near.map(|c| c.projection.distance));
        enclosing.push(set.enclosing_curve(p).map(|e| e.index as u32));
    }
    let df = DataFrame::new(vec![
        Series::new("x".into(), points.iter().map(|p| p.x).collect::<Vec<_>>()).into(),
        Series::new("y".into(), points.iter().map(|p| p.y).collect::<Vec<_>>()).into(),
        Series::new("closest".into(), closest).into(),
        Series::new("distance".into(), distance).into(),
        Series::new("enclosing".into(), enclosing).into(),
    ])?;
    tracing::info!(rows = df.height(), "sampled");
    Ok(df)
}

pub fn write_frame(df: &mut DataFrame, out: &Path) -> Result<()> {
    let parquet = is_parquet(out);
    if !parquet && !out.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv")) {
        bail!("unsupported output format: {}", out.display());
    }
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    if parquet {
        ParquetWriter::new(&mut file).finish(df)?;
    } else {
        CsvWriter::new(&mut file).finish(df)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_curves;
    use tempfile::tempdir;

    const NESTED: &str = r#"{ "curves": [
        { "points": [[-2,-2],[2,-2],[2,2],[-2,2]], "closed": true },
        { "points": [[-1,-1],[1,-1],[1,1],[-1,1]], "closed": true },
        { "points": [[10,0],[10,5]] }
    ] }"#;

    #[test]
    fn csv_round_trip_through_sampling() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("points.csv");
        std::fs::write(&input, "x,y\n0,0\n1.4,0\n9,1\n").unwrap();
        let points = read_points(&input).unwrap();
        assert_eq!(points.len(), 3);

        let set = parse_curves(NESTED).unwrap();
        let mut df = sample(&set, &points).unwrap();
        let enclosing: Vec<Option<u32>> =
            df.column("enclosing").unwrap().u32().unwrap().into_iter().collect();
        assert_eq!(enclosing, vec![Some(1), Some(0), None]);
        let closest: Vec<Option<u32>> =
            df.column("closest").unwrap().u32().unwrap().into_iter().collect();
        assert_eq!(closest, vec![Some(1), Some(1), Some(2)]);

        let out = dir.path().join("nested/out.csv");
        write_frame(&mut df, &out).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("x,y,closest,distance,enclosing"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn parquet_output_reads_back() {
        let dir = tempdir().unwrap();
        let set = parse_curves(NESTED).unwrap();
        let mut df = sample(&set, &[Point::new(0.5, 0.5)]).unwrap();
        let out = dir.path().join("s.parquet");
        write_frame(&mut df, &out).unwrap();
        let back = read_points(&out).unwrap();
        assert_eq!(back, vec![Point::new(0.5, 0.5)]);
    }

    #[test]
    fn missing_columns_and_formats_are_errors() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.csv");
        std::fs::write(&input, "a,b\n1,2\n").unwrap();
        assert!(read_points(&input).is_err());

        let set = parse_curves(NESTED).unwrap();
        let mut df = sample(&set, &[]).unwrap();
        assert!(write_frame(&mut df, &dir.path().join("out.txt")).is_err());
    }
}
