//! Built-in named colormaps.
//!
//! A small registry of commonly used maps, each defined by a constant stop
//! table and materialized as a [`SegmentedMap`] on lookup.

use crate::colormap::{ColorMap, SegmentedMap};
use crate::{CmapError, CmapResult};

type Stops = &'static [(f32, [f32; 3])];

const GRAY: Stops = &[(0.0, [0.0, 0.0, 0.0]), (1.0, [1.0, 1.0, 1.0])];

const HOT: Stops = &[
    (0.0, [0.0416, 0.0, 0.0]),
    (0.365, [1.0, 0.0, 0.0]),
    (0.746, [1.0, 1.0, 0.0]),
    (1.0, [1.0, 1.0, 1.0]),
];

const COOL: Stops = &[(0.0, [0.0, 1.0, 1.0]), (1.0, [1.0, 0.0, 1.0])];

const JET: Stops = &[
    (0.0, [0.0, 0.0, 0.5]),
    (0.11, [0.0, 0.0, 1.0]),
    (0.34, [0.0, 1.0, 1.0]),
    (0.65, [1.0, 1.0, 0.0]),
    (0.89, [1.0, 0.0, 0.0]),
    (1.0, [0.5, 0.0, 0.0]),
];

const TERRAIN: Stops = &[
    (0.0, [0.2, 0.2, 0.6]),
    (0.15, [0.0, 0.6, 1.0]),
    (0.25, [0.0, 0.8, 0.4]),
    (0.5, [1.0, 1.0, 0.6]),
    (0.75, [0.5, 0.36, 0.33]),
    (1.0, [1.0, 1.0, 1.0]),
];

/// Names of all registered built-in colormaps.
pub fn names() -> &'static [&'static str] {
    &["gray", "hot", "cool", "jet", "terrain"]
}

/// Looks up a built-in colormap by name.
///
/// Fails with [`CmapError::UnknownName`] if the name is not registered.
pub fn from_name(name: &str) -> CmapResult<ColorMap> {
    let stops = match name {
        "gray" => GRAY,
        "hot" => HOT,
        "cool" => COOL,
        "jet" => JET,
        "terrain" => TERRAIN,
        _ => return Err(CmapError::UnknownName(name.to_string())),
    };
    Ok(ColorMap::Segmented(SegmentedMap::from_stops(name, stops)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn every_registered_name_resolves() {
        for name in names() {
            let map = from_name(name).unwrap();
            assert_eq!(map.name(), *name);
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert!(matches!(
            from_name("viridis"),
            Err(CmapError::UnknownName(_))
        ));
    }

    #[test]
    fn gray_is_an_identity_ramp() {
        let map = from_name("gray").unwrap().to_segmented().unwrap();
        assert_abs_diff_eq!(map.evaluate(0.25).r, 0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(map.evaluate(0.25).g, 0.25, epsilon = 1e-6);
    }
}
