//! # cmap-core
//!
//! Core color-map types for scalar-data visualization.
//!
//! A color map is a piecewise function from a normalized scalar in [0, 1]
//! to an RGBA color. This crate provides the data model and everything
//! that operates on it without touching storage:
//!
//! - [`ColorMap`] - tagged union of the two representations
//! - [`ListedMap`] - discrete ordered palette (index evaluation only)
//! - [`SegmentedMap`] - per-channel piecewise-linear control points
//! - [`Rgba`], [`hsv_to_rgb`], [`Luminance`] - color values and conversions
//! - [`builtin`] - registry of named built-in maps
//!
//! # Sampling policy
//!
//! [`ColorMap::sample`] discretizes any map into `n` evenly spaced RGBA
//! samples. A listed map whose length differs from `n` is first converted
//! to its segmented form via [`ListedMap::to_segmented`]; there is no
//! nearest-neighbor resampling of raw palettes.
//!
//! # Example
//!
//! ```rust
//! use cmap_core::{ColorMap, Rgba};
//!
//! let map = ColorMap::from_colors(
//!     "bw",
//!     vec![Rgba::BLACK, Rgba::opaque(1.0, 1.0, 1.0)],
//! )?;
//! let lut = map.sample(256)?;
//! assert_eq!(lut.len(), 256);
//! # Ok::<(), cmap_core::CmapError>(())
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - rayon-parallel sampling at large sample counts

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod builtin;
mod color;
mod colormap;
mod error;

pub use color::{Luminance, Rgba, hsv_to_rgb};
pub use colormap::{ColorMap, ControlPoint, ListedMap, SegmentedMap};
pub use error::{CmapError, CmapResult};
