//! Iteration-history driver for a simulated bidirectional ring exchange
//!
//! Composes repeated worker-partitioned reads across the nested loops a
//! ring exchange walks: batches, M-blocks, chunks, ring steps, and slice
//! pieces. Each ring step addresses the next slot around the ring; forward
//! traversal walks slots upward from the chip's successor, backward walks
//! downward from its predecessor, both wrapping into `[0, ring_size)`. The
//! driver only computes the addressing schedule; it moves no data.

use crate::stride::{
    read_tiles_for_worker, ChunkGeometry, Direction, SliceLayout, StrideError, TileBatches,
    TileCoordinate,
};

/// Parameters for one full schedule computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulePlan {
    /// Number of outer batch iterations
    pub batches: usize,
    /// M-blocks processed per core
    pub m_blocks_per_core: usize,
    /// Chunks per N-block
    pub chunks_per_n_block: usize,
    /// This node's position on the ring
    pub chip_id: usize,
    /// Traversal orientation around the ring
    pub direction: Direction,
    /// Number of nodes on the ring
    pub ring_size: usize,
    /// N-blocks (slice pieces) per slice
    pub n_blocks_per_slice: usize,
    /// This worker's rank
    pub worker_id: usize,
    /// Workers sharing each read
    pub num_workers: usize,
    /// Inclusive final block index of each read
    pub last_block: usize,
    /// Maximum addresses per emitted batch
    pub granularity: usize,
    /// Width of one atomic block in tiles
    pub block_width: usize,
    /// Height of one atomic block in tiles
    pub block_height: usize,
    /// Width of one chunk in block-width units
    pub chunk_width: usize,
    /// Width of one N-block in tiles
    pub n_block_width: usize,
    /// Tile rows contributed by one core
    pub core_tile_height: usize,
    /// Width of one slice in tiles
    pub slice_width: usize,
}

/// The addresses produced by one slice-piece read, tagged with the loop
/// indices that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationRecord {
    pub batch: usize,
    pub m_block: usize,
    pub chunk: usize,
    pub piece: usize,
    pub tiles: TileBatches,
}

/// Compute the full addressing schedule for a bidirectional ring exchange.
///
/// Iterates batches, M-blocks, chunks, ring steps and slice pieces, issuing
/// one worker-partitioned read per slice piece. Records appear in loop
/// nesting order; each ring step re-reads the same local coordinates
/// against the next ring slot's slice.
///
/// # Arguments
///
/// * `plan` - Loop bounds, worker assignment and grid dimensions
///
/// # Returns
///
/// One [`IterationRecord`] per (batch, M-block, chunk, ring step, piece)
/// combination, or the first validation error.
pub fn iteration_history(plan: &SchedulePlan) -> Result<Vec<IterationRecord>, StrideError> {
    let chunk_width_in_tiles = plan.chunk_width * plan.block_width;
    let global_width = plan.ring_size * plan.slice_width;
    let ring = plan.ring_size as i64;

    let mut history = Vec::new();

    for batch in 0..plan.batches {
        for m_block in 0..plan.m_blocks_per_core {
            for chunk in 0..plan.chunks_per_n_block {
                let geometry = ChunkGeometry::clamped(
                    plan.block_height,
                    chunk_width_in_tiles,
                    chunk,
                    plan.n_block_width,
                );

                // Forward receives from the next chip first, backward from
                // the previous one; one slot per ring step thereafter.
                let mut slot = match plan.direction {
                    Direction::Forward => plan.chip_id as i64 + 1,
                    Direction::Backward => plan.chip_id as i64 - 1,
                };

                for _ in 0..plan.ring_size {
                    let ring_slot = slot.rem_euclid(ring) as usize;

                    for piece in 0..plan.n_blocks_per_slice {
                        let layout = SliceLayout {
                            block_height: plan.block_height,
                            core_tile_height: plan.core_tile_height,
                            n_block_width: plan.n_block_width,
                            chunk_width_in_tiles,
                            slice_width: plan.slice_width,
                            global_width,
                            n_block_idx: piece,
                            m_block_idx: m_block,
                            chunk_idx: chunk,
                            ring_slot,
                        };
                        let tiles = read_tiles_for_worker(
                            plan.worker_id,
                            plan.num_workers,
                            plan.direction,
                            TileCoordinate::origin(),
                            plan.last_block,
                            plan.granularity,
                            &geometry,
                            &layout,
                        )?;
                        history.push(IterationRecord {
                            batch,
                            m_block,
                            chunk,
                            piece,
                            tiles,
                        });
                    }

                    slot += match plan.direction {
                        Direction::Forward => 1,
                        Direction::Backward => -1,
                    };
                }
            }
        }
    }

    Ok(history)
}
