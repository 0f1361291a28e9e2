//! Format detection and high-level map loading.

use crate::store::Store;
use crate::{FormatError, FormatResult, cpt, ct, json};
use cmap_core::ColorMap;

/// Supported color-table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Positional table (.cpt).
    Cpt,
    /// Plain RGB triplets (.ct).
    Ct,
    /// Structured point list (.json).
    Json,
    /// Extension present but not supported.
    Unknown,
}

impl Format {
    /// Detects the format from an identifier's extension, if it has one.
    pub fn from_identifier(id: &str) -> Option<Self> {
        let base = id.rsplit(['/', '\\']).next().unwrap_or(id);
        let (_, ext) = base.rsplit_once('.')?;
        Some(match ext.to_lowercase().as_str() {
            "cpt" => Format::Cpt,
            "ct" => Format::Ct,
            "json" => Format::Json,
            _ => Format::Unknown,
        })
    }
}

/// Opens a color map from a registered name or a stored file.
///
/// The source is tried as a built-in registry name first; otherwise it
/// must carry one of the supported file extensions and is loaded through
/// the store. An unrecognized extension fails with
/// [`FormatError::UnsupportedExtension`]; a source that is neither a
/// known name nor a file fails with [`FormatError::SourceNotFound`].
pub fn open(store: &dyn Store, source: &str) -> FormatResult<ColorMap> {
    if let Ok(map) = ColorMap::from_name(source) {
        return Ok(map);
    }
    match Format::from_identifier(source) {
        Some(Format::Cpt) => Ok(cpt::read(store, source)?.map),
        Some(Format::Ct) => ct::read(store, source),
        Some(Format::Json) => json::read(store, source),
        Some(Format::Unknown) => Err(FormatError::UnsupportedExtension(source.to_string())),
        None => Err(FormatError::SourceNotFound(source.to_string())),
    }
}
