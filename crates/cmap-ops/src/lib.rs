//! # cmap-ops
//!
//! Pure transforms over color maps.
//!
//! Every operation takes a map by reference and returns a new value; the
//! input is never mutated and no state is shared between calls.
//!
//! # Operations
//!
//! - [`reverse`] - mirror a map around position 0.5 (involutive)
//! - [`to_segmented`] - discrete-to-continuous conversion
//! - [`greyscale`] - luminance conversion under a [`Luminance`] profile
//! - [`remap_values`] - apply an RGB function at every breakpoint, with
//!   minimal segment reconstruction
//! - [`remap_positions`] - apply a monotonic position function
//!
//! # Example
//!
//! ```rust
//! use cmap_core::{ColorMap, Luminance};
//! use cmap_ops::{greyscale, reverse};
//!
//! let map = ColorMap::from_name("hot")?;
//! let mirrored = reverse(&map);
//! let grey = greyscale(&mirrored, Luminance::Rec709, 256)?;
//! # Ok::<(), cmap_core::CmapError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod convert;
mod greyscale;
mod remap;
mod reverse;

pub use cmap_core::Luminance;
pub use convert::to_segmented;
pub use greyscale::greyscale;
pub use remap::{remap_positions, remap_values};
pub use reverse::reverse;
