//! The tiled-address stride engine
//!
//! Everything needed to turn "worker `w` strides through blocks 0..=`b` of
//! one chunk" into flat tile addresses: coordinate advance with carry
//! propagation, the closed-form remaining-tile count, projection to
//! slice-local and ring-global indices, and the batched readers that
//! partition a run between traversal directions and workers.

pub mod coordinate;
pub mod projection;
pub mod reader;

pub use coordinate::{ChunkGeometry, TileCoordinate};
pub use projection::{SliceCoordinate, SliceLayout, TileAddress};
pub use reader::{
    read_tiles_for_worker, read_tiles_granular, read_tiles_granular_with_direction, Direction,
    ReadRequest, TileBatches,
};

/// Errors raised by the stride engine before any output is produced.
///
/// Every variant is an input-validation failure; a call either validates
/// and fully completes or fails here. A worker whose first coordinate lands
/// beyond the last block is not an error, it is an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrideError {
    /// The advance stride between reads was zero
    ZeroStride,
    /// The batch-size cap was zero
    ZeroGranularity,
    /// The worker count was zero
    ZeroWorkers,
    /// The last-block boundary lies before the starting block
    BoundaryBehindStart {
        start_block: usize,
        last_block: usize,
    },
}

impl std::fmt::Display for StrideError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrideError::ZeroStride => write!(f, "advance stride must be greater than 0"),
            StrideError::ZeroGranularity => write!(f, "tile granularity must be greater than 0"),
            StrideError::ZeroWorkers => write!(f, "worker count must be greater than 0"),
            StrideError::BoundaryBehindStart {
                start_block,
                last_block,
            } => write!(
                f,
                "last block {} lies before starting block {}",
                last_block, start_block
            ),
        }
    }
}

impl std::error::Error for StrideError {}
