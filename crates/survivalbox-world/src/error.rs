//! Error types for the `survivalbox-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`].

use survivalbox_types::TileType;

/// Errors that can occur while generating, placing on, or restoring a map.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// No free position was found within the attempt budget.
    #[error(
        "no free position for a {footprint}x{footprint} footprint after {attempts} attempts \
         (forbidden: {forbidden:?})"
    )]
    PlacementExhausted {
        /// Number of candidates drawn.
        attempts: u32,
        /// Side length of the square footprint that was searched for.
        footprint: u32,
        /// Tile types the footprint was not allowed to touch.
        forbidden: Vec<TileType>,
    },

    /// The map has no candidate range for the requested footprint.
    #[error("map {width}x{height} is too small for a {min_space}x{min_space} footprint")]
    MapTooSmall {
        /// Map width in cells.
        width: u32,
        /// Map height in cells.
        height: u32,
        /// Side length of the square footprint.
        min_space: u32,
    },

    /// A map needs at least one interior cell on each axis.
    #[error("invalid map dimensions {width}x{height}, both axes must be at least 3")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The classified interior does not add up to the interior cell count.
    #[error("terrain check failed: classified {total} interior cells, expected {check}")]
    TerrainCheckMismatch {
        /// Cells counted as land or water.
        total: u64,
        /// Interior cell count `(width - 2) * (height - 2)`.
        check: u64,
    },

    /// A snapshot is internally inconsistent.
    #[error("map snapshot is inconsistent: {reason}")]
    SnapshotMismatch {
        /// What did not line up.
        reason: String,
    },

    /// A snapshot could not be encoded or decoded.
    #[error("map snapshot format error: {source}")]
    SnapshotFormat {
        /// Underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
