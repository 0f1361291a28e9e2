//! Positional color-table (.cpt) format support.
//!
//! The cpt format is a line-oriented text format describing a continuous
//! color map as a list of segments, with optional boundary colors for
//! out-of-range and no-data values.
//!
//! # Format
//!
//! ```text
//! # COLOR_MODEL = RGB
//! 0.000000   0   0   0 0.500000 128 128 128
//! 0.500000 128 128 128 1.000000 255 255 255
//! B   0   0   0
//! F 255 255 255
//! N   0   0   0
//! ```
//!
//! Each data row has eight numeric fields: a start position with its
//! channel triple, then an end position with its triple. A comment line
//! whose last token is `HSV` switches the whole file to HSV triples (hue
//! in degrees, saturation and value in [0, 1]); otherwise triples are RGB
//! in 0-255. `B`, `F` and `N` rows carry the below-range, above-range and
//! no-data colors and are recorded separately from the map itself.
//!
//! Positions may span any range; they are re-normalized to [0, 1] after
//! reading. A mismatch between one segment's end color and the next
//! segment's start color becomes a discontinuity in the parsed map.
//!
//! # Example
//!
//! ```rust,ignore
//! use cmap_io::cpt;
//!
//! let doc = cpt::read(&store, "relief.cpt")?;
//! let lut = doc.map.sample(256)?;
//! ```

use crate::store::{Store, load_source};
use crate::{FormatError, FormatResult};
use cmap_core::{ColorMap, ControlPoint, Rgba, SegmentedMap, hsv_to_rgb};
use std::io::{BufRead, Cursor, Write};
use tracing::debug;

/// Below-range, above-range and no-data colors from `B`/`F`/`N` rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Boundaries {
    /// Color for values below the mapped range (`B` row).
    pub below: Option<[f32; 3]>,
    /// Color for values above the mapped range (`F` row).
    pub above: Option<[f32; 3]>,
    /// Color for missing data (`N` row).
    pub nodata: Option<[f32; 3]>,
}

/// A parsed cpt file: the map plus its boundary colors.
#[derive(Debug, Clone)]
pub struct CptDocument {
    /// The segmented color map built from the data rows.
    pub map: ColorMap,
    /// Boundary colors, where present in the file.
    pub boundaries: Boundaries,
}

/// Options controlling [`write`].
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Number of LUT samples the map is discretized into (rows = samples - 1).
    pub samples: usize,
    /// `B` row color; defaults to the map's color at position 0.
    pub below: Option<Rgba>,
    /// `F` row color; defaults to the map's color at position 1.
    pub above: Option<Rgba>,
    /// `N` row color; defaults to opaque black.
    pub nodata: Option<Rgba>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            samples: 255,
            below: None,
            above: None,
            nodata: None,
        }
    }
}

/// One 8-field data row, kept in raw (unnormalized) form while reading.
struct Segment {
    line: usize,
    pos: [f32; 2],
    start: [f32; 3],
    end: [f32; 3],
}

/// Reads a cpt table from a storage provider.
///
/// The map is named after the identifier's file stem.
pub fn read(store: &dyn Store, id: &str) -> FormatResult<CptDocument> {
    let bytes = load_source(store, id)?;
    parse(Cursor::new(bytes), stem(id))
}

/// Parses a cpt table from a reader.
pub fn parse<R: BufRead>(reader: R, name: &str) -> FormatResult<CptDocument> {
    let mut hsv = false;
    let mut segments: Vec<Segment> = Vec::new();
    let mut boundaries = Boundaries::default();
    let mut last_line = 0;

    for (lineno, line) in reader.lines().enumerate() {
        let lineno = lineno + 1;
        last_line = lineno;
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            // The HSV marker is file-global once seen.
            if line.split_whitespace().next_back() == Some("HSV") {
                hsv = true;
            }
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields[0] {
            "B" => boundaries.below = Some(parse_boundary(&fields, lineno)?),
            "F" => boundaries.above = Some(parse_boundary(&fields, lineno)?),
            "N" => boundaries.nodata = Some(parse_boundary(&fields, lineno)?),
            _ => segments.push(parse_segment(&fields, lineno)?),
        }
    }

    if segments.is_empty() {
        return Err(FormatError::MalformedRecord {
            line: last_line,
            reason: "no data rows found".into(),
        });
    }
    debug!(
        name,
        segments = segments.len(),
        color_model = if hsv { "HSV" } else { "RGB" },
        "parsed cpt table"
    );

    // Convert raw triples to normalized RGB before assembling channels.
    let convert = |c: [f32; 3]| -> [f32; 3] {
        if hsv {
            hsv_to_rgb(c[0], c[1], c[2])
        } else {
            [c[0] / 255.0, c[1] / 255.0, c[2] / 255.0]
        }
    };

    let pos_min = segments[0].pos[0];
    let pos_max = segments[segments.len() - 1].pos[1];
    let span = pos_max - pos_min;
    if span <= 0.0 {
        return Err(FormatError::MalformedRecord {
            line: segments[0].line,
            reason: format!("position range [{pos_min}, {pos_max}] has no width"),
        });
    }
    let norm = |p: f32| ((p - pos_min) / span).clamp(0.0, 1.0);

    // One control point per segment boundary. Interior points join the
    // previous segment's end color with the next segment's start color;
    // when those differ the point becomes a discontinuity.
    let mut points: Vec<(f32, [f32; 3], [f32; 3])> = Vec::with_capacity(segments.len() + 1);
    let first = convert(segments[0].start);
    points.push((norm(segments[0].pos[0]), first, first));
    for pair in segments.windows(2) {
        if pair[0].pos[1] != pair[1].pos[0] {
            return Err(FormatError::MalformedRecord {
                line: pair[1].line,
                reason: format!(
                    "segment starts at {} but previous one ended at {}",
                    pair[1].pos[0], pair[0].pos[1]
                ),
            });
        }
        points.push((
            norm(pair[0].pos[1]),
            convert(pair[0].end),
            convert(pair[1].start),
        ));
    }
    let last = convert(segments[segments.len() - 1].end);
    points.push((norm(pos_max), last, last));

    let channel = |i: usize| {
        points
            .iter()
            .map(|(p, before, after)| ControlPoint::jump(*p, before[i], after[i]))
            .collect::<Vec<_>>()
    };
    let map = SegmentedMap::new(name, channel(0), channel(1), channel(2))?;
    Ok(CptDocument {
        map: ColorMap::Segmented(map),
        boundaries,
    })
}

/// Writes a map as a cpt table.
///
/// The map is discretized into `opts.samples` RGBA samples; each adjacent
/// pair becomes one data row with channels scaled to 0-255 integers. The
/// footer carries the `B`/`F`/`N` colors, defaulting to the endpoint
/// colors and opaque black.
pub fn write<W: Write>(writer: &mut W, map: &ColorMap, opts: &ExportOptions) -> FormatResult<()> {
    let n = opts.samples;
    let lut = map.sample(n)?;
    debug!(name = %map.name(), samples = n, "writing cpt table");

    writeln!(writer, "# COLOR_MODEL = RGB")?;
    for i in 0..n - 1 {
        let p0 = i as f32 / (n - 1) as f32;
        let p1 = (i + 1) as f32 / (n - 1) as f32;
        let [r0, g0, b0] = lut[i].to_rgb8();
        let [r1, g1, b1] = lut[i + 1].to_rgb8();
        writeln!(
            writer,
            "{p0:.6} {r0:3} {g0:3} {b0:3} {p1:.6} {r1:3} {g1:3} {b1:3}"
        )?;
    }

    let below = opts.below.unwrap_or(lut[0]).to_rgb8();
    let above = opts.above.unwrap_or(lut[n - 1]).to_rgb8();
    let nodata = opts.nodata.unwrap_or(Rgba::BLACK).to_rgb8();
    writeln!(writer, "B {:3} {:3} {:3}", below[0], below[1], below[2])?;
    writeln!(writer, "F {:3} {:3} {:3}", above[0], above[1], above[2])?;
    writeln!(writer, "N {:3} {:3} {:3}", nodata[0], nodata[1], nodata[2])?;
    Ok(())
}

/// Serializes a map to cpt text.
pub fn to_string(map: &ColorMap, opts: &ExportOptions) -> FormatResult<String> {
    let mut out = Vec::new();
    write(&mut out, map, opts)?;
    // writeln! only ever emits UTF-8.
    Ok(String::from_utf8(out).expect("cpt output is UTF-8"))
}

/// Saves a map as a cpt table through a storage provider.
pub fn save(
    store: &dyn Store,
    id: &str,
    map: &ColorMap,
    opts: &ExportOptions,
) -> FormatResult<()> {
    let text = to_string(map, opts)?;
    store.save(id, text.as_bytes())?;
    Ok(())
}

fn parse_segment(fields: &[&str], line: usize) -> FormatResult<Segment> {
    if fields.len() != 8 {
        return Err(FormatError::MalformedRecord {
            line,
            reason: format!("expected 8 fields, found {}", fields.len()),
        });
    }
    let mut v = [0.0_f32; 8];
    for (i, field) in fields.iter().enumerate() {
        v[i] = parse_field(field, line)?;
    }
    Ok(Segment {
        line,
        pos: [v[0], v[4]],
        start: [v[1], v[2], v[3]],
        end: [v[5], v[6], v[7]],
    })
}

fn parse_boundary(fields: &[&str], line: usize) -> FormatResult<[f32; 3]> {
    if fields.len() != 4 {
        return Err(FormatError::MalformedRecord {
            line,
            reason: format!(
                "boundary row expects 3 color fields, found {}",
                fields.len() - 1
            ),
        });
    }
    Ok([
        parse_field(fields[1], line)? / 255.0,
        parse_field(fields[2], line)? / 255.0,
        parse_field(fields[3], line)? / 255.0,
    ])
}

fn parse_field(field: &str, line: usize) -> FormatResult<f32> {
    field.parse().map_err(|_| FormatError::MalformedRecord {
        line,
        reason: format!("invalid numeric field: {field}"),
    })
}

pub(crate) fn stem(id: &str) -> &str {
    let base = id.rsplit(['/', '\\']).next().unwrap_or(id);
    base.rsplit_once('.').map_or(base, |(s, _)| s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::io::Cursor;

    fn seg(doc: &CptDocument) -> SegmentedMap {
        doc.map.to_segmented().unwrap()
    }

    #[test]
    fn parse_rgb_table() {
        let text = "\
# COLOR_MODEL = RGB
0 0 0 0 50 128 128 128
50 128 128 128 100 255 255 255
";
        let doc = parse(Cursor::new(text), "ramp").unwrap();
        let m = seg(&doc);
        assert_eq!(doc.map.name(), "ramp");
        assert_abs_diff_eq!(m.evaluate(0.0).r, 0.0);
        assert_abs_diff_eq!(m.evaluate(0.5).r, 128.0 / 255.0, epsilon = 1e-6);
        assert_abs_diff_eq!(m.evaluate(1.0).g, 1.0);
    }

    #[test]
    fn positions_are_renormalized() {
        let text = "100 0 0 0 300 255 0 0\n";
        let doc = parse(Cursor::new(text), "m").unwrap();
        let m = seg(&doc);
        assert_abs_diff_eq!(m.evaluate(0.5).r, 0.5, epsilon = 1e-2);
        assert_eq!(m.red.first().unwrap().pos, 0.0);
        assert_eq!(m.red.last().unwrap().pos, 1.0);
    }

    #[test]
    fn hsv_header_switches_color_model() {
        let text = "\
# COLOR_MODEL = HSV
0 0 1 1 1 360 1 1
";
        let doc = parse(Cursor::new(text), "hue").unwrap();
        let m = seg(&doc);
        // Hue 0 and hue 360 are both red.
        let start = m.evaluate(0.0);
        let end = m.evaluate(1.0);
        assert_abs_diff_eq!(start.r, 1.0);
        assert_abs_diff_eq!(start.g, 0.0);
        assert_abs_diff_eq!(start.b, 0.0);
        assert_abs_diff_eq!(end.r, 1.0);
        assert_abs_diff_eq!(end.g, 0.0);
        assert_abs_diff_eq!(end.b, 0.0);
    }

    #[test]
    fn boundary_rows_are_recorded_separately() {
        let text = "\
0 0 0 0 1 255 255 255
B 0 0 0
F 255 255 255
N 128 0 0
";
        let doc = parse(Cursor::new(text), "m").unwrap();
        assert_eq!(doc.boundaries.below, Some([0.0, 0.0, 0.0]));
        assert_eq!(doc.boundaries.above, Some([1.0, 1.0, 1.0]));
        let nodata = doc.boundaries.nodata.unwrap();
        assert_abs_diff_eq!(nodata[0], 128.0 / 255.0, epsilon = 1e-6);
        // Only the data row contributes control points.
        assert_eq!(seg(&doc).red.len(), 2);
    }

    #[test]
    fn mismatched_junction_colors_become_a_discontinuity() {
        let text = "\
0 0 0 0 0.5 100 100 100
0.5 200 200 200 1 255 255 255
";
        let doc = parse(Cursor::new(text), "step").unwrap();
        let m = seg(&doc);
        let p = &m.red[1];
        assert_abs_diff_eq!(p.before, 100.0 / 255.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.after, 200.0 / 255.0, epsilon = 1e-6);
    }

    #[test]
    fn malformed_field_reports_line_number() {
        let text = "\
0 0 0 0 0.5 10 10 10
0.5 10 10 xx 1 20 20 20
";
        let err = parse(Cursor::new(text), "m").unwrap_err();
        let FormatError::MalformedRecord { line, reason } = err else {
            panic!("wrong error: {err}");
        };
        assert_eq!(line, 2);
        assert!(reason.contains("xx"));
    }

    #[test]
    fn short_row_is_malformed() {
        let err = parse(Cursor::new("0 0 0 0 1 255 255\n"), "m").unwrap_err();
        assert!(matches!(
            err,
            FormatError::MalformedRecord { line: 1, .. }
        ));
    }

    #[test]
    fn empty_input_is_not_an_empty_map() {
        let err = parse(Cursor::new("# COLOR_MODEL = RGB\n"), "m").unwrap_err();
        assert!(matches!(err, FormatError::MalformedRecord { .. }));
    }

    #[test]
    fn write_emits_header_rows_and_footer() {
        let map = ColorMap::from_name("gray").unwrap();
        let text = to_string(
            &map,
            &ExportOptions {
                samples: 3,
                ..Default::default()
            },
        )
        .unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# COLOR_MODEL = RGB");
        // 2 data rows + B/F/N.
        assert_eq!(lines.len(), 6);
        assert!(lines[4].starts_with('F'));
        assert_eq!(lines[5].split_whitespace().collect::<Vec<_>>(), ["N", "0", "0", "0"]);
    }

    #[test]
    fn export_parse_round_trip() {
        let map = ColorMap::from_name("jet").unwrap();
        let text = to_string(&map, &ExportOptions::default()).unwrap();
        let doc = parse(Cursor::new(text), "jet").unwrap();
        let a = map.sample(255).unwrap();
        let b = doc.map.sample(255).unwrap();
        for (x, y) in a.iter().zip(&b) {
            // Channels pass through 0-255 integer quantization once.
            assert_abs_diff_eq!(x.r, y.r, epsilon = 2.0 / 255.0);
            assert_abs_diff_eq!(x.g, y.g, epsilon = 2.0 / 255.0);
            assert_abs_diff_eq!(x.b, y.b, epsilon = 2.0 / 255.0);
        }
    }

    #[test]
    fn read_and_save_go_through_the_store() {
        let store = crate::MemStore::new();
        let map = ColorMap::from_name("cool").unwrap();
        save(&store, "cool.cpt", &map, &ExportOptions::default()).unwrap();
        let doc = read(&store, "cool.cpt").unwrap();
        assert_eq!(doc.map.name(), "cool");
        assert!(matches!(
            read(&store, "warm.cpt"),
            Err(FormatError::SourceNotFound(_))
        ));
    }

    #[test]
    fn stem_strips_directories_and_extension() {
        assert_eq!(stem("maps/relief.cpt"), "relief");
        assert_eq!(stem("plain"), "plain");
    }
}
