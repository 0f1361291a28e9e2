//! # cmap-io
//!
//! Color-table format codecs and storage abstraction.
//!
//! Three text formats are supported:
//!
//! - [`cpt`] - positional table (read & write), RGB or HSV triples,
//!   `B`/`F`/`N` boundary rows
//! - [`ct`] - plain RGB triplets with implicit positions (read only)
//! - [`json`] - structured point records (read only)
//!
//! All I/O goes through a caller-supplied [`Store`]; the codecs never
//! open files themselves. [`open`] resolves a source string against the
//! built-in registry first and then by file extension.
//!
//! # Quick Start
//!
//! ```rust
//! use cmap_io::{MemStore, open};
//!
//! let store = MemStore::new();
//! store.insert("bw.ct", &b"0 0 0\n255 255 255\n"[..]);
//!
//! let named = open(&store, "gray")?;
//! let from_file = open(&store, "bw.ct")?;
//! # Ok::<(), cmap_io::FormatError>(())
//! ```
//!
//! # Errors
//!
//! Failures are typed ([`FormatError`]): missing sources, unsupported
//! extensions, malformed records with line context, and invalid
//! structured records are all distinguishable. An empty map is never used
//! to signal a failure.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cpt;
pub mod ct;
mod error;
mod format;
pub mod json;
mod store;

pub use cpt::{Boundaries, CptDocument, ExportOptions};
pub use error::{FormatError, FormatResult};
pub use format::{Format, open};
pub use store::{DirStore, MemStore, Store};
