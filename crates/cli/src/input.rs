//! JSON curve documents.
//!
//! ```json
//! { "curves": [ { "points": [[0,0],[1,0],[1,1]], "closed": true, "sense": "left" } ] }
//! ```
//! `closed` defaults to `false`, `sense` to `"right"`.

use anyhow::{Context, Result};
use curvegeo::{Curve, CurveSet, Hand, Point, Polyline};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize)]
pub struct CurveDoc {
    pub curves: Vec<CurveDto>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CurveDto {
    pub points: Vec<[f64; 2]>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub sense: Sense,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    Left,
    #[default]
    Right,
    Ambiguous,
}

impl From<Sense> for Hand {
    fn from(s: Sense) -> Self {
        match s {
            Sense::Left => Hand::Left,
            Sense::Right => Hand::Right,
            Sense::Ambiguous => Hand::Ambiguous,
        }
    }
}

impl From<Hand> for Sense {
    fn from(h: Hand) -> Self {
        match h {
            Hand::Left => Sense::Left,
            Hand::Right => Sense::Right,
            Hand::Ambiguous => Sense::Ambiguous,
        }
    }
}

impl From<CurveDto> for Curve {
    fn from(dto: CurveDto) -> Self {
        let points = dto.points.iter().map(|&[x, y]| Point::new(x, y)).collect();
        Curve::new(Polyline::new(points, dto.closed), dto.sense.into())
    }
}

pub fn parse_curves(text: &str) -> Result<CurveSet> {
    let doc: CurveDoc = serde_json::from_str(text).context("parsing curve document")?;
    Ok(doc.curves.into_iter().map(Curve::from).collect())
}

pub fn load_curves(path: &Path) -> Result<CurveSet> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_curves(&text).with_context(|| format!("in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_senses() {
        let set = parse_curves(
            r#"{ "curves": [
                { "points": [[0,0],[1,0],[1,1],[0,0]], "closed": true, "sense": "left" },
                { "points": [[0,0],[2,0]] }
            ] }"#,
        )
        .unwrap();
        assert_eq!(set.len(), 2);
        let ring = set.get(0).unwrap();
        assert!(ring.is_closed());
        assert_eq!(ring.line.len(), 3);
        assert_eq!(ring.hand, Hand::Left);
        let open = set.get(1).unwrap();
        assert!(!open.is_closed());
        assert_eq!(open.hand, Hand::Right);
    }

    #[test]
    fn rejects_unknown_sense() {
        let err = parse_curves(r#"{ "curves": [ { "points": [], "sense": "up" } ] }"#);
        assert!(err.is_err());
    }

    #[test]
    fn missing_file_mentions_path() {
        let err = load_curves(Path::new("/nonexistent/curves.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/curves.json"));
    }
}
