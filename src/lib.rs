//! # Ringstride: tile addressing for bidirectional ring exchanges
//!
//! Ringstride computes which memory tiles a worker thread touches, and in
//! what order, when striding through a multi-level block hierarchy
//! (tile → chunk → block → slice → ring) spread across a ring of compute
//! nodes. It answers two linked questions:
//!
//! 1. Given a tile position and an advance stride, what is the next
//!    position after carrying through nested block boundaries?
//! 2. How does that local position map to two flat addresses - one within
//!    the node's slice of the matrix, one within the full ring?
//!
//! ## Components
//!
//! - **Coordinate advance** ([`TileCoordinate::advanced_by`]): carry
//!   propagation across columns, rows and blocks, in a single flattened
//!   computation.
//! - **Remaining-tile count** ([`TileCoordinate::tiles_remaining`]): a
//!   closed form replacing per-tile enumeration.
//! - **Granular batch readers** ([`read_tiles_granular`] and friends):
//!   drive repeated advances and emit slice/global address pairs in
//!   capped-size batches, optionally restricted to one traversal direction
//!   or one worker's interleaved share.
//! - **Schedule driver** ([`schedule::iteration_history`]): nests
//!   batch/M-block/chunk/ring loops to produce the full addressing schedule
//!   of a simulated bidirectional ring exchange.
//! - **Parallel partitioning** ([`parallel::read_all_partitions`]): the
//!   (worker, direction) classes are disjoint by construction, so all of
//!   them are computed concurrently with Rayon.
//!
//! The engine holds no state: callers take an immutable [`GridConfig`]
//! snapshot and every computation is a pure function of it.
//!
//! ## Usage
//!
//! ```
//! use ringstride::{read_tiles_granular, GridConfig, ReadRequest};
//!
//! let config = GridConfig::default();
//! let request = ReadRequest {
//!     stride: 2,
//!     last_block: 3,
//!     granularity: 4,
//!     ..ReadRequest::default()
//! };
//!
//! let batches = read_tiles_granular(
//!     &request,
//!     &config.chunk_geometry(),
//!     &config.slice_layout(),
//! ).unwrap();
//!
//! assert_eq!(batches.len(), 4);
//! let first: Vec<usize> = batches[0].iter().map(|a| a.slice_index).collect();
//! assert_eq!(first, vec![0, 2, 16, 18]);
//! ```

pub mod grid;
pub mod parallel;
pub mod schedule;
pub mod stride;

// Re-export primary components
pub use grid::GridConfig;
pub use parallel::{default_worker_count, read_all_partitions, WorkerPartition};
pub use schedule::{iteration_history, IterationRecord, SchedulePlan};
pub use stride::{
    read_tiles_for_worker, read_tiles_granular, read_tiles_granular_with_direction, ChunkGeometry,
    Direction, ReadRequest, SliceCoordinate, SliceLayout, StrideError, TileAddress, TileBatches,
    TileCoordinate,
};
