//! Discrete-to-continuous conversion.

use cmap_core::{CmapResult, ColorMap};

/// Converts a map to its segmented (continuous) form.
///
/// A listed map of `N` colors gains one continuous control point per entry
/// at position `i / (N - 1)`. Segmented maps pass through unchanged. This
/// is the sanctioned path for evaluating a discrete palette at arbitrary
/// positions.
pub fn to_segmented(map: &ColorMap) -> CmapResult<ColorMap> {
    Ok(ColorMap::Segmented(map.to_segmented()?))
}
