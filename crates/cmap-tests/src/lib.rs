//! Integration tests for cmap-rs crates.
//!
//! End-to-end checks of the properties the library guarantees across
//! crate boundaries: parser -> transform -> sampler -> exporter.
