//! Piecewise color functions.
//!
//! A color map is a function from a normalized scalar in [0, 1] to an RGBA
//! color. Two representations exist:
//!
//! - [`ListedMap`] - a discrete ordered palette, evaluated by index only
//! - [`SegmentedMap`] - per-channel piecewise-linear control points,
//!   evaluated continuously
//!
//! Both are carried by the [`ColorMap`] tagged union. Transforms never
//! mutate a map in place; they build and return a new value.
//!
//! # Example
//!
//! ```rust
//! use cmap_core::{ColorMap, Rgba};
//!
//! let map = ColorMap::from_name("gray").unwrap();
//! let lut = map.sample(256).unwrap();
//! assert_eq!(lut.len(), 256);
//! ```

use crate::color::{Rgba, lerp};
use crate::{CmapError, CmapResult, builtin};

/// One control point of a segmented channel.
///
/// `before` and `after` are the channel values approaching `pos` from the
/// left and right. They differ only at a discontinuity (a hard color jump
/// at that position).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Position in [0, 1].
    pub pos: f32,
    /// Channel value approaching `pos` from the left.
    pub before: f32,
    /// Channel value approaching `pos` from the right.
    pub after: f32,
}

impl ControlPoint {
    /// Creates a continuous control point (`before == after`).
    pub const fn flat(pos: f32, value: f32) -> Self {
        Self {
            pos,
            before: value,
            after: value,
        }
    }

    /// Creates a control point with a jump at `pos`.
    pub const fn jump(pos: f32, before: f32, after: f32) -> Self {
        Self { pos, before, after }
    }
}

/// A discrete ordered palette with no interpolation contract.
///
/// Evaluation at index `i` returns the `i`-th color exactly. Continuous
/// evaluation requires conversion through [`ListedMap::to_segmented`].
#[derive(Debug, Clone, PartialEq)]
pub struct ListedMap {
    /// Map name (file stem, registry name, or caller-supplied).
    pub name: String,
    /// The palette colors, in order.
    pub colors: Vec<Rgba>,
}

impl ListedMap {
    /// Creates a listed map from a palette.
    pub fn new(name: impl Into<String>, colors: Vec<Rgba>) -> CmapResult<Self> {
        if colors.is_empty() {
            return Err(CmapError::InvalidControlPoints(
                "palette must contain at least one color".into(),
            ));
        }
        Ok(Self {
            name: name.into(),
            colors,
        })
    }

    /// Number of palette entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the palette is empty (never for validated maps).
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the color at palette index `i`, if in range.
    pub fn get(&self, i: usize) -> Option<Rgba> {
        self.colors.get(i).copied()
    }

    /// Converts the palette to a segmented map.
    ///
    /// Entry `i` becomes one continuous control point per channel at
    /// position `i / (N - 1)`. This is the only sanctioned way to evaluate
    /// a listed map at arbitrary positions.
    pub fn to_segmented(&self) -> CmapResult<SegmentedMap> {
        let n = self.colors.len();
        if n < 2 {
            return Err(CmapError::InvalidControlPoints(
                "need at least two colors for a continuous map".into(),
            ));
        }
        let pos = |i: usize| i as f32 / (n - 1) as f32;
        let channel = |get: fn(&Rgba) -> f32| {
            self.colors
                .iter()
                .enumerate()
                .map(|(i, c)| ControlPoint::flat(pos(i), get(c)))
                .collect::<Vec<_>>()
        };
        let mut seg = SegmentedMap::new(
            self.name.clone(),
            channel(|c| c.r),
            channel(|c| c.g),
            channel(|c| c.b),
        )?;
        if self.colors.iter().any(|c| c.a != 1.0) {
            seg = seg.with_alpha(channel(|c| c.a))?;
        }
        Ok(seg)
    }
}

/// A continuous piecewise-linear color map with explicit control points.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedMap {
    /// Map name (file stem, registry name, or caller-supplied).
    pub name: String,
    /// Red channel control points.
    pub red: Vec<ControlPoint>,
    /// Green channel control points.
    pub green: Vec<ControlPoint>,
    /// Blue channel control points.
    pub blue: Vec<ControlPoint>,
    /// Alpha channel control points (None = fully opaque).
    pub alpha: Option<Vec<ControlPoint>>,
}

impl SegmentedMap {
    /// Creates a segmented map from three validated channel lists.
    ///
    /// Each list must be ordered by non-decreasing position, span exactly
    /// [0, 1], and keep every value in [0, 1].
    pub fn new(
        name: impl Into<String>,
        red: Vec<ControlPoint>,
        green: Vec<ControlPoint>,
        blue: Vec<ControlPoint>,
    ) -> CmapResult<Self> {
        validate_channel("red", &red)?;
        validate_channel("green", &green)?;
        validate_channel("blue", &blue)?;
        Ok(Self {
            name: name.into(),
            red,
            green,
            blue,
            alpha: None,
        })
    }

    /// Attaches an alpha channel.
    pub fn with_alpha(mut self, alpha: Vec<ControlPoint>) -> CmapResult<Self> {
        validate_channel("alpha", &alpha)?;
        self.alpha = Some(alpha);
        Ok(self)
    }

    /// Builds a segmented map from flat `(position, [r, g, b])` stops.
    pub fn from_stops(name: impl Into<String>, stops: &[(f32, [f32; 3])]) -> CmapResult<Self> {
        let channel = |i: usize| {
            stops
                .iter()
                .map(|(p, rgb)| ControlPoint::flat(*p, rgb[i]))
                .collect::<Vec<_>>()
        };
        Self::new(name, channel(0), channel(1), channel(2))
    }

    /// Evaluates the map at position `t` (clamped to [0, 1]).
    ///
    /// Each channel interpolates linearly between its bracketing control
    /// points, using the left point's `after` and the right point's
    /// `before` value. An exact hit on an interior breakpoint yields that
    /// point's `after` value; position 1.0 yields the last point's
    /// `before`.
    pub fn evaluate(&self, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        Rgba::new(
            eval_channel(&self.red, t),
            eval_channel(&self.green, t),
            eval_channel(&self.blue, t),
            self.alpha.as_deref().map_or(1.0, |a| eval_channel(a, t)),
        )
    }

    /// Returns the sorted union of breakpoints across all channels.
    pub fn breakpoints(&self) -> Vec<f32> {
        let mut out: Vec<f32> = self
            .red
            .iter()
            .chain(self.green.iter())
            .chain(self.blue.iter())
            .chain(self.alpha.iter().flatten())
            .map(|p| p.pos)
            .collect();
        out.sort_by(f32::total_cmp);
        out.dedup();
        out
    }
}

fn validate_channel(which: &str, points: &[ControlPoint]) -> CmapResult<()> {
    let err = |msg: String| Err(CmapError::InvalidControlPoints(format!("{which}: {msg}")));
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return err("empty control-point list".into());
    };
    if first.pos != 0.0 {
        return err(format!("first position must be 0, got {}", first.pos));
    }
    if last.pos != 1.0 {
        return err(format!("last position must be 1, got {}", last.pos));
    }
    for w in points.windows(2) {
        if w[1].pos < w[0].pos {
            return err(format!(
                "positions must be non-decreasing ({} after {})",
                w[1].pos, w[0].pos
            ));
        }
    }
    for p in points {
        if !(0.0..=1.0).contains(&p.before) || !(0.0..=1.0).contains(&p.after) {
            return err(format!("value outside [0, 1] at position {}", p.pos));
        }
    }
    Ok(())
}

fn eval_channel(points: &[ControlPoint], t: f32) -> f32 {
    // Channels are validated non-empty at construction.
    let first = points[0];
    let last = points[points.len() - 1];
    if t <= first.pos {
        return first.after;
    }
    if t >= last.pos {
        return last.before;
    }
    for w in points.windows(2) {
        if t < w[1].pos {
            let span = w[1].pos - w[0].pos;
            if span <= 0.0 {
                return w[1].before;
            }
            return lerp(w[0].after, w[1].before, (t - w[0].pos) / span);
        }
    }
    last.before
}

/// A piecewise color function: discrete palette or continuous segments.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorMap {
    /// Discrete ordered palette.
    Listed(ListedMap),
    /// Continuous piecewise-linear map.
    Segmented(SegmentedMap),
}

impl ColorMap {
    /// Looks up a built-in colormap by registry name.
    pub fn from_name(name: &str) -> CmapResult<Self> {
        builtin::from_name(name)
    }

    /// Creates a listed map from a literal palette.
    pub fn from_colors(name: impl Into<String>, colors: Vec<Rgba>) -> CmapResult<Self> {
        Ok(Self::Listed(ListedMap::new(name, colors)?))
    }

    /// The map's name.
    pub fn name(&self) -> &str {
        match self {
            Self::Listed(m) => &m.name,
            Self::Segmented(m) => &m.name,
        }
    }

    /// Returns true for the listed (discrete) variant.
    pub fn is_listed(&self) -> bool {
        matches!(self, Self::Listed(_))
    }

    /// Returns a segmented view of this map.
    ///
    /// Listed maps go through [`ListedMap::to_segmented`]; segmented maps
    /// are cloned.
    pub fn to_segmented(&self) -> CmapResult<SegmentedMap> {
        match self {
            Self::Listed(m) => m.to_segmented(),
            Self::Segmented(m) => Ok(m.clone()),
        }
    }

    /// Discretizes the map into `n` evenly spaced RGBA samples.
    ///
    /// Samples are taken at positions `i / (n - 1)`. A listed map whose
    /// length equals `n` is returned directly; any other listed map is
    /// converted to segmented first (see crate docs for the resampling
    /// policy).
    pub fn sample(&self, n: usize) -> CmapResult<Vec<Rgba>> {
        if n < 2 {
            return Err(CmapError::InvalidSampleCount(n));
        }
        match self {
            Self::Listed(m) if m.len() == n => Ok(m.colors.clone()),
            Self::Listed(m) => Ok(sample_segmented(&m.to_segmented()?, n)),
            Self::Segmented(m) => Ok(sample_segmented(m, n)),
        }
    }
}

/// Below this many samples the rayon fan-out costs more than it saves.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 4096;

fn sample_segmented(map: &SegmentedMap, n: usize) -> Vec<Rgba> {
    let at = |i: usize| map.evaluate(i as f32 / (n - 1) as f32);
    // Sample positions are independent, so parallel evaluation is a pure
    // optimization with identical results.
    #[cfg(feature = "parallel")]
    if n >= PARALLEL_THRESHOLD {
        use rayon::prelude::*;
        return (0..n).into_par_iter().map(at).collect();
    }
    (0..n).map(at).collect()
}
