//! Plain-triplet color-table (.ct) format support.
//!
//! Each non-blank line carries exactly three numeric fields: R, G and B in
//! 0-255. There is no position column; positions are implicit and evenly
//! spaced, `i / (count - 1)` for row `i`. The result is a listed
//! (discrete) map.
//!
//! # Format
//!
//! ```text
//! 0 0 0
//! 128 128 128
//! 255 255 255
//! ```

use crate::cpt::stem;
use crate::store::{Store, load_source};
use crate::{FormatError, FormatResult};
use cmap_core::{ColorMap, ListedMap, Rgba};
use std::io::{BufRead, Cursor};
use tracing::debug;

/// Reads a plain-triplet table from a storage provider.
///
/// The map is named after the identifier's file stem.
pub fn read(store: &dyn Store, id: &str) -> FormatResult<ColorMap> {
    let bytes = load_source(store, id)?;
    parse(Cursor::new(bytes), stem(id))
}

/// Parses a plain-triplet table from a reader.
pub fn parse<R: BufRead>(reader: R, name: &str) -> FormatResult<ColorMap> {
    let mut colors: Vec<Rgba> = Vec::new();
    let mut last_line = 0;

    for (lineno, line) in reader.lines().enumerate() {
        let lineno = lineno + 1;
        last_line = lineno;
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(FormatError::MalformedRecord {
                line: lineno,
                reason: format!("expected 3 fields, found {}", fields.len()),
            });
        }
        let mut rgb = [0.0_f32; 3];
        for (i, field) in fields.iter().enumerate() {
            let raw: f32 = field.parse().map_err(|_| FormatError::MalformedRecord {
                line: lineno,
                reason: format!("invalid numeric field: {field}"),
            })?;
            rgb[i] = raw / 255.0;
        }
        colors.push(Rgba::opaque(rgb[0], rgb[1], rgb[2]));
    }

    if colors.is_empty() {
        return Err(FormatError::MalformedRecord {
            line: last_line,
            reason: "no color rows found".into(),
        });
    }
    debug!(name, rows = colors.len(), "parsed plain-triplet table");
    Ok(ColorMap::Listed(ListedMap::new(name, colors)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_black_to_white() {
        let map = parse(Cursor::new("0 0 0\n255 255 255\n"), "bw").unwrap();
        let ColorMap::Listed(m) = &map else {
            panic!("expected a listed map");
        };
        assert_eq!(m.colors, vec![Rgba::opaque(0.0, 0.0, 0.0), Rgba::opaque(1.0, 1.0, 1.0)]);
        assert_eq!(m.name, "bw");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let map = parse(Cursor::new("0 0 0\n\n255 0 0\n"), "m").unwrap();
        let ColorMap::Listed(m) = &map else {
            panic!("expected a listed map");
        };
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn short_row_is_malformed() {
        let err = parse(Cursor::new("0 0 0\n12 34\n"), "m").unwrap_err();
        assert!(matches!(err, FormatError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn non_numeric_field_is_malformed() {
        let err = parse(Cursor::new("0 zero 0\n"), "m").unwrap_err();
        let FormatError::MalformedRecord { line, reason } = err else {
            panic!("wrong error");
        };
        assert_eq!(line, 1);
        assert!(reason.contains("zero"));
    }

    #[test]
    fn empty_input_is_not_an_empty_map() {
        assert!(matches!(
            parse(Cursor::new(""), "m"),
            Err(FormatError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn read_goes_through_the_store() {
        let store = crate::MemStore::new();
        store.insert("pal.ct", &b"10 20 30\n40 50 60\n"[..]);
        let map = read(&store, "pal.ct").unwrap();
        assert_eq!(map.name(), "pal");
        assert!(matches!(
            read(&store, "missing.ct"),
            Err(FormatError::SourceNotFound(_))
        ));
    }
}
