//! Value and position remapping.
//!
//! Both operations are defined for segmented maps only; convert a listed
//! map through [`crate::to_segmented`] first.

use cmap_core::{CmapError, CmapResult, ColorMap, ControlPoint, SegmentedMap};
use tracing::debug;

/// Applies `f: RGB -> RGB` to the colors of a segmented map.
///
/// The map is evaluated at the union of all channel breakpoints, `f` is
/// applied to each sampled color, and a minimal segment list is rebuilt
/// per channel: a breakpoint survives only if it was an original
/// breakpoint for that channel or if `f` changed the channel's value
/// there. Discontinuities collapse to their right-hand value.
pub fn remap_values<F>(map: &ColorMap, f: F) -> CmapResult<ColorMap>
where
    F: Fn([f32; 3]) -> [f32; 3],
{
    let ColorMap::Segmented(seg) = map else {
        return Err(CmapError::SegmentedRequired { op: "value remap" });
    };

    let steps = seg.breakpoints();
    debug!(name = %seg.name, breakpoints = steps.len(), "value remap");
    let old: Vec<[f32; 3]> = steps.iter().map(|&t| seg.evaluate(t).rgb()).collect();
    let new: Vec<[f32; 3]> = old.iter().map(|&c| f(c)).collect();

    let rebuild = |points: &[ControlPoint], ch: usize| -> Vec<ControlPoint> {
        steps
            .iter()
            .enumerate()
            .filter(|&(j, t)| {
                points.iter().any(|p| p.pos == *t) || new[j][ch] != old[j][ch]
            })
            .map(|(j, &t)| ControlPoint::flat(t, new[j][ch]))
            .collect()
    };

    let mut out = SegmentedMap::new(
        seg.name.clone(),
        rebuild(&seg.red, 0),
        rebuild(&seg.green, 1),
        rebuild(&seg.blue, 2),
    )?;
    if let Some(alpha) = &seg.alpha {
        out = out.with_alpha(alpha.clone())?;
    }
    Ok(ColorMap::Segmented(out))
}

/// Applies a monotonic `g: [0, 1] -> [0, 1]` to every control-point
/// position, leaving values unchanged.
///
/// Fails with [`CmapError::DomainViolation`] if any remapped position
/// falls outside [0, 1]. Channels are re-sorted after mapping.
pub fn remap_positions<G>(map: &ColorMap, g: G) -> CmapResult<ColorMap>
where
    G: Fn(f32) -> f32,
{
    let ColorMap::Segmented(seg) = map else {
        return Err(CmapError::SegmentedRequired { op: "position remap" });
    };

    let remap_channel = |points: &[ControlPoint]| -> CmapResult<Vec<ControlPoint>> {
        let mut out = points
            .iter()
            .map(|p| {
                let pos = g(p.pos);
                if !(0.0..=1.0).contains(&pos) {
                    return Err(CmapError::DomainViolation { pos });
                }
                Ok(ControlPoint {
                    pos,
                    before: p.before,
                    after: p.after,
                })
            })
            .collect::<CmapResult<Vec<_>>>()?;
        out.sort_by(|a, b| a.pos.total_cmp(&b.pos));
        Ok(out)
    };

    let mut out = SegmentedMap::new(
        seg.name.clone(),
        remap_channel(&seg.red)?,
        remap_channel(&seg.green)?,
        remap_channel(&seg.blue)?,
    )?;
    if let Some(alpha) = &seg.alpha {
        out = out.with_alpha(remap_channel(alpha)?)?;
    }
    Ok(ColorMap::Segmented(out))
}
