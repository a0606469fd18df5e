//! Configuration of the tiled grid and its derived dimensions
//!
//! [`GridConfig`] is a plain value: primary dimensions plus placement
//! indices, with every derived width recomputed from the primaries by
//! [`GridConfig::recompute_derived`]. The engine never reads ambient
//! state; callers take a config snapshot, extract a
//! [`ChunkGeometry`](crate::stride::ChunkGeometry) and
//! [`SliceLayout`](crate::stride::SliceLayout) from it, and must not mutate
//! the snapshot while computations reading it are in flight.

use crate::stride::{ChunkGeometry, SliceLayout};

/// Grid dimensions and placement for one addressing computation.
///
/// Derived fields are deterministic products of primary fields; after
/// changing any primary field call [`recompute_derived`] before handing the
/// config to the engine.
///
/// [`recompute_derived`]: GridConfig::recompute_derived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    // Primary dimensions
    /// Width of one atomic block in tiles
    pub block_width: usize,
    /// Height of one atomic block in tiles
    pub block_height: usize,
    /// Number of blocks making up one N-block
    pub blocks_per_n_block: usize,
    /// Width of one chunk in block-width units
    pub chunk_width: usize,
    /// Number of M-unit blocks assigned to one core
    pub m_blocks_per_core: usize,
    /// Number of N-blocks making up one slice
    pub n_blocks_per_slice: usize,
    /// Number of nodes in the ring
    pub ring_size: usize,

    // Placement indices
    /// Which N-block within the slice is addressed
    pub n_block_idx: usize,
    /// Which M-block within the core is addressed
    pub m_block_idx: usize,
    /// Which chunk within the N-block is addressed
    pub chunk_idx: usize,
    /// Which ring slot the addressed slice occupies
    pub ring_slot: usize,

    // Derived dimensions, valid only after recompute_derived()
    /// Width of one N-block in tiles
    pub n_block_width: usize,
    /// Width of one slice in tiles
    pub slice_width: usize,
    /// Tile rows contributed by one core
    pub core_tile_height: usize,
    /// Full width of one chunk in tiles
    pub chunk_width_in_tiles: usize,
    /// Tiles in one block-row of a chunk
    pub chunk_piece_size: usize,
    /// Width of the whole ring's tile space
    pub global_width: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        let mut config = Self {
            block_width: 2,
            block_height: 2,
            blocks_per_n_block: 4,
            chunk_width: 2,
            m_blocks_per_core: 4,
            n_blocks_per_slice: 2,
            ring_size: 2,
            n_block_idx: 0,
            m_block_idx: 0,
            chunk_idx: 0,
            ring_slot: 0,
            n_block_width: 0,
            slice_width: 0,
            core_tile_height: 0,
            chunk_width_in_tiles: 0,
            chunk_piece_size: 0,
            global_width: 0,
        };
        config.recompute_derived();
        config
    }
}

impl GridConfig {
    /// Recompute every derived dimension from the primary fields.
    pub fn recompute_derived(&mut self) {
        self.n_block_width = self.block_width * self.blocks_per_n_block;
        self.slice_width = self.n_block_width * self.n_blocks_per_slice;
        self.core_tile_height = self.block_height * self.m_blocks_per_core;
        self.chunk_width_in_tiles = self.chunk_width * self.block_width;
        self.chunk_piece_size = self.block_height * self.chunk_width_in_tiles;
        self.global_width = self.slice_width * self.ring_size;
    }

    /// Effective width in tiles of the addressed chunk.
    ///
    /// A chunk at the trailing edge of an N-block is narrowed to the
    /// columns that actually remain; a chunk placed past the edge has
    /// width 0.
    pub fn effective_chunk_width(&self) -> usize {
        let remaining = self
            .n_block_width
            .saturating_sub(self.chunk_idx * self.chunk_width_in_tiles);
        self.chunk_width_in_tiles.min(remaining)
    }

    /// Walk geometry for the addressed chunk, clamped at the N-block edge.
    pub fn chunk_geometry(&self) -> ChunkGeometry {
        ChunkGeometry::clamped(
            self.block_height,
            self.chunk_width_in_tiles,
            self.chunk_idx,
            self.n_block_width,
        )
    }

    /// Placement snapshot for projecting coordinates to flat addresses.
    pub fn slice_layout(&self) -> SliceLayout {
        SliceLayout {
            block_height: self.block_height,
            core_tile_height: self.core_tile_height,
            n_block_width: self.n_block_width,
            chunk_width_in_tiles: self.chunk_width_in_tiles,
            slice_width: self.slice_width,
            global_width: self.global_width,
            n_block_idx: self.n_block_idx,
            m_block_idx: self.m_block_idx,
            chunk_idx: self.chunk_idx,
            ring_slot: self.ring_slot,
        }
    }
}
