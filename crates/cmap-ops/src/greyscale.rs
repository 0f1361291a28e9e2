//! Luminance (greyscale) conversion.

use cmap_core::{CmapResult, ColorMap, ListedMap, Luminance, Rgba};
use tracing::debug;

/// Converts a map to greyscale under the given luminance profile.
///
/// The map is sampled at its native resolution (a listed map at its own
/// length, a segmented map at `resolution`), each sample's channels are
/// replaced by its luminance, and the result is rebuilt as a segmented map
/// through discrete-to-continuous conversion. Alpha is preserved.
pub fn greyscale(map: &ColorMap, profile: Luminance, resolution: usize) -> CmapResult<ColorMap> {
    let n = match map {
        ColorMap::Listed(m) => m.len(),
        ColorMap::Segmented(_) => resolution,
    };
    let samples = map.sample(n)?;
    debug!(name = %map.name(), samples = samples.len(), ?profile, "greyscale conversion");

    let grey: Vec<Rgba> = samples
        .iter()
        .map(|c| {
            let l = c.luminance(profile).clamp(0.0, 1.0);
            Rgba::new(l, l, l, c.a)
        })
        .collect();
    let listed = ListedMap::new(format!("{}_grey", map.name()), grey)?;
    Ok(ColorMap::Segmented(listed.to_segmented()?))
}
