//! Projection of tile coordinates onto slice-local and ring-global addresses
//!
//! A [`TileCoordinate`] only pins a tile inside one chunk of one block. To
//! name the tile inside a node's slice of the matrix (and across the whole
//! ring) the coordinate is combined with placement metadata: which N-block,
//! which M-block, which chunk, and which ring slot the call addresses. All
//! projections here are pure integer arithmetic with no stored state.

use super::coordinate::TileCoordinate;

/// A 2D tile position inside one node's slice of the global matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceCoordinate {
    pub row: usize,
    pub col: usize,
}

/// The two flat addresses of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileAddress {
    /// Row-major index within the node's slice
    pub slice_index: usize,
    /// Row-major index within the full multi-node tile space
    pub global_index: usize,
}

/// Immutable placement snapshot used to project coordinates to addresses.
///
/// `chunk_width_in_tiles` is the full, unclamped chunk width: column
/// placement of a trailing partial chunk still starts where a full chunk
/// would have started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceLayout {
    /// Height of one block in tiles
    pub block_height: usize,
    /// Tile rows contributed by one core (all its blocks stacked)
    pub core_tile_height: usize,
    /// Width of one N-block in tiles
    pub n_block_width: usize,
    /// Full width of one chunk in tiles
    pub chunk_width_in_tiles: usize,
    /// Width of one slice in tiles
    pub slice_width: usize,
    /// Width of the whole ring's tile space
    pub global_width: usize,
    /// Which N-block within the slice
    pub n_block_idx: usize,
    /// Which M-block within the core
    pub m_block_idx: usize,
    /// Which chunk within the N-block
    pub chunk_idx: usize,
    /// Which ring slot the slice occupies
    pub ring_slot: usize,
}

impl SliceLayout {
    /// Map a local tile coordinate to its 2D position within the slice.
    ///
    /// # Arguments
    ///
    /// * `coord` - Tile position inside the chunk/block structure
    ///
    /// # Returns
    ///
    /// The slice-relative (row, column) of the tile.
    pub fn slice_coordinate(&self, coord: &TileCoordinate) -> SliceCoordinate {
        let rows_before_block = coord.block * self.core_tile_height;
        let rows_before_m_block = self.m_block_idx * self.block_height;
        let cols_before_chunk =
            self.n_block_idx * self.n_block_width + self.chunk_idx * self.chunk_width_in_tiles;

        SliceCoordinate {
            row: rows_before_block + rows_before_m_block + coord.row,
            col: cols_before_chunk + coord.col,
        }
    }

    /// Flat index of a slice coordinate within the node's slice.
    pub fn slice_index(&self, sc: &SliceCoordinate) -> usize {
        sc.row * self.slice_width + sc.col
    }

    /// Flat index of a slice coordinate within the full ring's tile space,
    /// accounting for which ring slot this slice occupies.
    pub fn global_index(&self, sc: &SliceCoordinate) -> usize {
        let global_col = sc.col + self.ring_slot * self.slice_width;
        sc.row * self.global_width + global_col
    }

    /// Both flat addresses of one tile coordinate.
    pub fn tile_address(&self, coord: &TileCoordinate) -> TileAddress {
        let sc = self.slice_coordinate(coord);
        TileAddress {
            slice_index: self.slice_index(&sc),
            global_index: self.global_index(&sc),
        }
    }
}
