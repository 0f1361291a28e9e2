//! Structured-point (.json) format support.
//!
//! A structured record holds a flat `RGBPoints` array in groups of four
//! (position, R, G, B with channels already in [0, 1]), an optional
//! `type` field selecting the output variant (`"listed"` or
//! `"segmented"`, default segmented), and an optional `name`. The input
//! may be a single record or an array of records; only the first record
//! of an array is used.
//!
//! # Format
//!
//! ```text
//! [{
//!   "name": "ramp",
//!   "type": "segmented",
//!   "RGBPoints": [0.0, 0.0, 0.0, 0.0,  1.0, 1.0, 1.0, 1.0]
//! }]
//! ```

use crate::cpt::stem;
use crate::store::{Store, load_source};
use crate::{FormatError, FormatResult};
use cmap_core::{ColorMap, ControlPoint, ListedMap, Rgba, SegmentedMap};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Record {
    #[serde(rename = "RGBPoints")]
    rgb_points: Option<Vec<f32>>,
    #[serde(rename = "type")]
    kind: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Document {
    Many(Vec<Record>),
    One(Record),
}

/// Reads a structured-point record from a storage provider.
///
/// The map is named after the record's `name` field, falling back to the
/// identifier's file stem.
pub fn read(store: &dyn Store, id: &str) -> FormatResult<ColorMap> {
    let bytes = load_source(store, id)?;
    parse(&bytes, stem(id))
}

/// Parses a structured-point record from raw JSON bytes.
pub fn parse(bytes: &[u8], fallback_name: &str) -> FormatResult<ColorMap> {
    let doc: Document = serde_json::from_slice(bytes).map_err(|e| {
        FormatError::MalformedRecord {
            line: e.line(),
            reason: e.to_string(),
        }
    })?;
    let record = match doc {
        Document::One(r) => r,
        Document::Many(records) => records.into_iter().next().ok_or_else(|| {
            FormatError::InvalidStructuredRecord("record array is empty".into())
        })?,
    };

    let Some(points) = record.rgb_points else {
        return Err(FormatError::InvalidStructuredRecord(
            "missing required field RGBPoints".into(),
        ));
    };
    if points.is_empty() {
        return Err(FormatError::InvalidStructuredRecord(
            "RGBPoints is empty".into(),
        ));
    }
    if points.len() % 4 != 0 {
        return Err(FormatError::InvalidStructuredRecord(format!(
            "RGBPoints length {} is not a multiple of 4",
            points.len()
        )));
    }

    let name = record.name.unwrap_or_else(|| fallback_name.to_string());
    let kind = record.kind.as_deref().unwrap_or("segmented");
    debug!(%name, kind, points = points.len() / 4, "parsed structured record");

    match kind {
        // Listed output drops the positions and keeps only the colors.
        "listed" => {
            let colors = points
                .chunks_exact(4)
                .map(|c| Rgba::opaque(c[1], c[2], c[3]))
                .collect();
            Ok(ColorMap::Listed(ListedMap::new(name, colors)?))
        }
        "segmented" => segmented_from_points(name, &points),
        other => Err(FormatError::InvalidStructuredRecord(format!(
            "unknown colormap type: {other}"
        ))),
    }
}

fn segmented_from_points(name: String, points: &[f32]) -> FormatResult<ColorMap> {
    let chunks: Vec<&[f32]> = points.chunks_exact(4).collect();
    let pos_min = chunks[0][0];
    let pos_max = chunks[chunks.len() - 1][0];
    let span = pos_max - pos_min;
    if span <= 0.0 {
        return Err(FormatError::InvalidStructuredRecord(format!(
            "point positions [{pos_min}, {pos_max}] have no width"
        )));
    }

    let channel = |i: usize| {
        chunks
            .iter()
            .map(|c| ControlPoint::flat(((c[0] - pos_min) / span).clamp(0.0, 1.0), c[i]))
            .collect::<Vec<_>>()
    };
    let map = SegmentedMap::new(name, channel(1), channel(2), channel(3))?;
    Ok(ColorMap::Segmented(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_type_is_segmented() {
        let text = br#"[{"RGBPoints": [0, 1, 0, 0, 1, 0, 0, 1]}]"#;
        let map = parse(text, "fade").unwrap();
        let seg = map.to_segmented().unwrap();
        assert_eq!(map.name(), "fade");
        // Red fades 1 -> 0, blue 0 -> 1, linearly.
        assert_abs_diff_eq!(seg.evaluate(0.0).r, 1.0);
        assert_abs_diff_eq!(seg.evaluate(0.5).r, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(seg.evaluate(1.0).r, 0.0);
        assert_abs_diff_eq!(seg.evaluate(0.5).b, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(seg.evaluate(1.0).b, 1.0);
    }

    #[test]
    fn listed_type_drops_positions() {
        let text = br#"{"type": "listed", "name": "pal",
                        "RGBPoints": [0.0, 1, 0, 0, 0.25, 0, 1, 0, 1.0, 0, 0, 1]}"#;
        let map = parse(text, "fallback").unwrap();
        let ColorMap::Listed(m) = &map else {
            panic!("expected a listed map");
        };
        assert_eq!(m.name, "pal");
        assert_eq!(m.colors.len(), 3);
        assert_eq!(m.colors[1], Rgba::opaque(0.0, 1.0, 0.0));
    }

    #[test]
    fn missing_rgb_points_is_a_typed_failure() {
        let err = parse(br#"[{"name": "empty"}]"#, "m").unwrap_err();
        assert!(matches!(err, FormatError::InvalidStructuredRecord(_)));
    }

    #[test]
    fn ragged_point_array_is_rejected() {
        let err = parse(br#"{"RGBPoints": [0, 1, 0]}"#, "m").unwrap_err();
        assert!(matches!(err, FormatError::InvalidStructuredRecord(_)));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = parse(br#"{"type": "banded", "RGBPoints": [0,0,0,0,1,1,1,1]}"#, "m")
            .unwrap_err();
        let FormatError::InvalidStructuredRecord(reason) = err else {
            panic!("wrong error");
        };
        assert!(reason.contains("banded"));
    }

    #[test]
    fn invalid_json_reports_parse_location() {
        let err = parse(b"{\n  \"RGBPoints\": [0, 1,,]\n}", "m").unwrap_err();
        assert!(matches!(err, FormatError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn positions_outside_unit_range_are_renormalized() {
        let text = br#"{"RGBPoints": [10, 0, 0, 0, 30, 1, 1, 1]}"#;
        let map = parse(text, "m").unwrap();
        let seg = map.to_segmented().unwrap();
        assert_abs_diff_eq!(seg.evaluate(0.5).g, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn read_goes_through_the_store() {
        let store = crate::MemStore::new();
        store.insert("fade.json", &br#"[{"RGBPoints": [0,1,0,0,1,0,0,1]}]"#[..]);
        let map = read(&store, "fade.json").unwrap();
        assert_eq!(map.name(), "fade");
    }
}
