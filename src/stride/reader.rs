//! Granular batch readers over strided tile walks
//!
//! Three entry points layered on the same walk:
//!
//! 1. [`read_tiles_granular`] - one worker offset, one stride, addresses
//!    emitted in capped-size batches.
//! 2. [`read_tiles_granular_with_direction`] - the same walk split into two
//!    interleaved halves by visit-rank parity, emitting only the half
//!    assigned to one traversal direction.
//! 3. [`read_tiles_for_worker`] - direction splitting composed with
//!    round-robin striding over `num_workers` workers, so that the
//!    `2 * num_workers` (worker, direction) classes tile the whole run.
//!
//! Batch boundaries are an artifact of the granularity cap, not a semantic
//! boundary; consumers may concatenate batches freely.

use super::coordinate::{ChunkGeometry, TileCoordinate, TileWalk};
use super::projection::{SliceLayout, TileAddress};
use super::StrideError;

/// Traversal orientation around the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Even visit ranks; ring slots walked in ascending order
    Forward,
    /// Odd visit ranks; ring slots walked in descending order
    Backward,
}

impl Direction {
    /// Numeric rank of the direction: 0 for forward, 1 for backward.
    pub fn index(&self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 1,
        }
    }
}

/// Addresses produced by one read, grouped into capped-size batches.
pub type TileBatches = Vec<Vec<TileAddress>>;

/// Parameters for one granular read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRequest {
    /// One-time advance applied before the first read; assigns this call
    /// its worker's starting position within the run
    pub worker_offset: usize,
    /// Coordinate the run is measured from, before the worker offset
    pub start: TileCoordinate,
    /// Advance between consecutive reads
    pub stride: usize,
    /// Inclusive index of the final block of the run
    pub last_block: usize,
    /// Maximum number of addresses emitted per batch
    pub granularity: usize,
}

impl Default for ReadRequest {
    fn default() -> Self {
        Self {
            worker_offset: 0,
            start: TileCoordinate::origin(),
            stride: 2,
            last_block: 3,
            granularity: 8,
        }
    }
}

impl ReadRequest {
    fn validate(&self) -> Result<(), StrideError> {
        if self.granularity == 0 {
            return Err(StrideError::ZeroGranularity);
        }
        if self.stride == 0 {
            return Err(StrideError::ZeroStride);
        }
        if self.last_block < self.start.block {
            return Err(StrideError::BoundaryBehindStart {
                start_block: self.start.block,
                last_block: self.last_block,
            });
        }
        Ok(())
    }
}

/// Group an address stream into batches of at most `granularity` entries.
fn collect_batches(
    addresses: impl Iterator<Item = TileAddress>,
    granularity: usize,
) -> TileBatches {
    let mut batches = TileBatches::new();
    let mut current = Vec::new();
    for address in addresses {
        current.push(address);
        if current.len() == granularity {
            batches.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }
    batches
}

/// Build the walk for a request: offset once, then stride to exhaustion.
///
/// Returns `None` when the worker's first coordinate already lies beyond
/// the last block (the worker has no work).
fn walk_for_request(req: &ReadRequest, geometry: &ChunkGeometry) -> Option<TileWalk> {
    let first = req.start.advanced_by(req.worker_offset, geometry);
    if first.block > req.last_block {
        return None;
    }
    let count = first.tiles_remaining(req.stride, req.last_block, geometry);
    Some(TileWalk::new(first, req.stride, count, *geometry))
}

/// Read every tile of a strided run, emitting slice/global address pairs in
/// batches of at most `req.granularity`.
///
/// The run starts at `req.start` advanced once by `req.worker_offset` and
/// visits every `req.stride`-th tile up to and including block
/// `req.last_block`. Batches partition the run exactly; only the final
/// batch may be short.
///
/// # Arguments
///
/// * `req` - Walk parameters (offset, start, stride, boundary, cap)
/// * `geometry` - Effective dimensions of the chunk being walked
/// * `layout` - Placement snapshot used to project coordinates to addresses
///
/// # Returns
///
/// The batched addresses, empty when the worker has no work, or a
/// [`StrideError`] when a parameter fails validation.
pub fn read_tiles_granular(
    req: &ReadRequest,
    geometry: &ChunkGeometry,
    layout: &SliceLayout,
) -> Result<TileBatches, StrideError> {
    req.validate()?;
    if geometry.is_empty() {
        return Ok(TileBatches::new());
    }

    let Some(walk) = walk_for_request(req, geometry) else {
        return Ok(TileBatches::new());
    };

    Ok(collect_batches(
        walk.map(|coord| layout.tile_address(&coord)),
        req.granularity,
    ))
}

/// Read the half of a strided run assigned to one traversal direction.
///
/// The full run is visited in address order and split by strict
/// alternation: tiles at even visit rank belong to [`Direction::Forward`],
/// odd ranks to [`Direction::Backward`]. Only the matching half is emitted;
/// the granularity cap groups the emitted addresses, not the raw visits.
pub fn read_tiles_granular_with_direction(
    req: &ReadRequest,
    direction: Direction,
    geometry: &ChunkGeometry,
    layout: &SliceLayout,
) -> Result<TileBatches, StrideError> {
    req.validate()?;
    if geometry.is_empty() {
        return Ok(TileBatches::new());
    }

    let Some(walk) = walk_for_request(req, geometry) else {
        return Ok(TileBatches::new());
    };

    let wanted = direction.index();
    let addresses = walk
        .enumerate()
        .filter(move |(rank, _)| rank % 2 == wanted)
        .map(|(_, coord)| layout.tile_address(&coord));

    Ok(collect_batches(addresses, req.granularity))
}

/// Read the (worker, direction) class of a run shared by `num_workers`
/// workers striding in both directions.
///
/// The class is selected purely by arithmetic: a one-time starting offset
/// of `worker_id + direction * num_workers` and a fixed stride of
/// `2 * num_workers`. Across all workers and both directions the classes
/// are disjoint and cover every tile of the run exactly once, so each class
/// can be computed independently with no coordination.
///
/// # Arguments
///
/// * `worker_id` - This worker's rank, expected in `[0, num_workers)`
/// * `num_workers` - Number of workers sharing the run; must be positive
/// * `direction` - Which traversal direction this worker serves
/// * `start` - Coordinate the run is measured from
/// * `last_block` - Inclusive index of the final block
/// * `granularity` - Maximum addresses per emitted batch
/// * `geometry` - Effective chunk dimensions
/// * `layout` - Placement snapshot for address projection
#[allow(clippy::too_many_arguments)]
pub fn read_tiles_for_worker(
    worker_id: usize,
    num_workers: usize,
    direction: Direction,
    start: TileCoordinate,
    last_block: usize,
    granularity: usize,
    geometry: &ChunkGeometry,
    layout: &SliceLayout,
) -> Result<TileBatches, StrideError> {
    if num_workers == 0 {
        return Err(StrideError::ZeroWorkers);
    }

    let req = ReadRequest {
        worker_offset: worker_id + direction.index() * num_workers,
        start,
        stride: 2 * num_workers,
        last_block,
        granularity,
    };
    read_tiles_granular(&req, geometry, layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_layout() -> SliceLayout {
        SliceLayout {
            block_height: 2,
            core_tile_height: 8,
            n_block_width: 8,
            chunk_width_in_tiles: 4,
            slice_width: 16,
            global_width: 32,
            n_block_idx: 0,
            m_block_idx: 0,
            chunk_idx: 0,
            ring_slot: 0,
        }
    }

    fn geometry() -> ChunkGeometry {
        ChunkGeometry::new(2, 4)
    }

    fn slice_ids(batches: &TileBatches) -> Vec<Vec<usize>> {
        batches
            .iter()
            .map(|b| b.iter().map(|a| a.slice_index).collect())
            .collect()
    }

    #[test]
    fn rejects_zero_stride_and_granularity() {
        let layout = reference_layout();
        let bad_stride = ReadRequest {
            stride: 0,
            ..ReadRequest::default()
        };
        assert_eq!(
            read_tiles_granular(&bad_stride, &geometry(), &layout),
            Err(StrideError::ZeroStride)
        );

        let bad_cap = ReadRequest {
            granularity: 0,
            ..ReadRequest::default()
        };
        assert_eq!(
            read_tiles_granular(&bad_cap, &geometry(), &layout),
            Err(StrideError::ZeroGranularity)
        );
    }

    #[test]
    fn rejects_boundary_behind_start() {
        let layout = reference_layout();
        let req = ReadRequest {
            start: TileCoordinate::new(0, 0, 2),
            last_block: 1,
            ..ReadRequest::default()
        };
        assert_eq!(
            read_tiles_granular(&req, &geometry(), &layout),
            Err(StrideError::BoundaryBehindStart {
                start_block: 2,
                last_block: 1,
            })
        );
    }

    #[test]
    fn worker_beyond_run_gets_empty_result() {
        let layout = reference_layout();
        let req = ReadRequest {
            worker_offset: 100,
            ..ReadRequest::default()
        };
        assert_eq!(
            read_tiles_granular(&req, &geometry(), &layout),
            Ok(TileBatches::new())
        );
    }

    #[test]
    fn empty_geometry_yields_no_batches() {
        let layout = reference_layout();
        let empty = ChunkGeometry::clamped(2, 6, 2, 8);
        assert_eq!(
            read_tiles_granular(&ReadRequest::default(), &empty, &layout),
            Ok(TileBatches::new())
        );
    }

    #[test]
    fn batches_partition_the_run() {
        let layout = reference_layout();
        let req = ReadRequest {
            granularity: 3,
            ..ReadRequest::default()
        };
        let batches = read_tiles_granular(&req, &geometry(), &layout).unwrap();
        let sizes: Vec<_> = batches.iter().map(Vec::len).collect();
        // 16 tiles at cap 3: five full batches and a short tail.
        assert_eq!(sizes, vec![3, 3, 3, 3, 3, 1]);
    }

    #[test]
    fn directions_split_the_run_by_rank_parity() {
        let layout = reference_layout();
        let req = ReadRequest {
            stride: 2,
            granularity: 16,
            ..ReadRequest::default()
        };
        let full = read_tiles_granular(&req, &geometry(), &layout).unwrap();
        let forward =
            read_tiles_granular_with_direction(&req, Direction::Forward, &geometry(), &layout)
                .unwrap();
        let backward =
            read_tiles_granular_with_direction(&req, Direction::Backward, &geometry(), &layout)
                .unwrap();

        let all: Vec<_> = full.concat();
        let fwd: Vec<_> = forward.concat();
        let bwd: Vec<_> = backward.concat();
        assert_eq!(fwd.len() + bwd.len(), all.len());

        let mut merged = Vec::new();
        for (f, b) in fwd.iter().zip(bwd.iter()) {
            merged.push(*f);
            merged.push(*b);
        }
        merged.extend_from_slice(&fwd[bwd.len()..]);
        assert_eq!(merged, all);
    }

    #[test]
    fn worker_partition_matches_direct_stride() {
        let layout = reference_layout();
        let batches = read_tiles_for_worker(
            0,
            2,
            Direction::Forward,
            TileCoordinate::origin(),
            3,
            4,
            &geometry(),
            &layout,
        )
        .unwrap();
        assert_eq!(
            slice_ids(&batches),
            vec![vec![0, 16, 128, 144], vec![256, 272, 384, 400]]
        );
    }

    #[test]
    fn zero_workers_is_rejected() {
        let layout = reference_layout();
        assert_eq!(
            read_tiles_for_worker(
                0,
                0,
                Direction::Forward,
                TileCoordinate::origin(),
                3,
                4,
                &geometry(),
                &layout,
            ),
            Err(StrideError::ZeroWorkers)
        );
    }
}
