//! Parallel computation of worker partitions
//!
//! The `2 * num_workers` (worker, direction) classes of a run are disjoint
//! and jointly exhaustive, so each class can be computed by a separate
//! execution unit with zero coordination. This module materializes every
//! class in parallel using Rayon.

use rayon::prelude::*;

use crate::stride::{
    read_tiles_for_worker, ChunkGeometry, Direction, SliceLayout, StrideError, TileBatches,
    TileCoordinate,
};

/// One worker's share of a run in one traversal direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerPartition {
    pub worker_id: usize,
    pub direction: Direction,
    pub tiles: TileBatches,
}

/// Number of workers to use when the caller has no preference.
pub fn default_worker_count() -> usize {
    num_cpus::get()
}

/// Compute every (worker, direction) class of a run in parallel.
///
/// Partitions are returned in deterministic order: all forward classes by
/// ascending worker id, then all backward classes. Concatenating the
/// classes' addresses covers every tile of the run exactly once.
///
/// # Arguments
///
/// * `num_workers` - Workers sharing the run; must be positive
/// * `start` - Coordinate the run is measured from
/// * `last_block` - Inclusive index of the final block
/// * `granularity` - Maximum addresses per emitted batch
/// * `geometry` - Effective chunk dimensions
/// * `layout` - Placement snapshot for address projection
pub fn read_all_partitions(
    num_workers: usize,
    start: TileCoordinate,
    last_block: usize,
    granularity: usize,
    geometry: &ChunkGeometry,
    layout: &SliceLayout,
) -> Result<Vec<WorkerPartition>, StrideError> {
    if num_workers == 0 {
        return Err(StrideError::ZeroWorkers);
    }

    (0..2 * num_workers)
        .into_par_iter()
        .map(|class| {
            let direction = if class < num_workers {
                Direction::Forward
            } else {
                Direction::Backward
            };
            let worker_id = class % num_workers;
            let tiles = read_tiles_for_worker(
                worker_id,
                num_workers,
                direction,
                start,
                last_block,
                granularity,
                geometry,
                layout,
            )?;
            Ok(WorkerPartition {
                worker_id,
                direction,
                tiles,
            })
        })
        .collect()
}
