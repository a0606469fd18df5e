//! Tile coordinates and the stride-advance arithmetic
//!
//! A tile position inside the repeating chunk/block structure is a triple
//! (row-within-block, column-within-chunk, block-index). Advancing a
//! coordinate by a tile count carries through three nested dimensions:
//! columns overflow into rows, rows overflow into blocks. The canonical
//! implementation flattens the coordinate to a linear offset, adds the
//! advance, and splits the result back; the step-wise carry form survives
//! only as a cross-check oracle in the test module.

/// Dimensions of one chunk of the tile grid.
///
/// A chunk is `block_height` rows of `chunk_width_in_tiles` columns; one
/// full block-row of a chunk (a "piece") therefore holds
/// `block_height * chunk_width_in_tiles` tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkGeometry {
    /// Height of one block in tiles
    pub block_height: usize,
    /// Width of the chunk in tiles
    pub chunk_width_in_tiles: usize,
}

impl ChunkGeometry {
    /// Create a chunk geometry from its two dimensions.
    pub fn new(block_height: usize, chunk_width_in_tiles: usize) -> Self {
        Self {
            block_height,
            chunk_width_in_tiles,
        }
    }

    /// Create the geometry for the chunk at `chunk_idx` within an N-block,
    /// clamping the width at the N-block's trailing edge.
    ///
    /// A chunk that starts inside the N-block but would extend past its
    /// right edge is narrowed to the remaining columns; a chunk that starts
    /// at or past the edge comes out empty.
    pub fn clamped(
        block_height: usize,
        chunk_width_in_tiles: usize,
        chunk_idx: usize,
        n_block_width: usize,
    ) -> Self {
        let remaining = n_block_width.saturating_sub(chunk_idx * chunk_width_in_tiles);
        Self {
            block_height,
            chunk_width_in_tiles: chunk_width_in_tiles.min(remaining),
        }
    }

    /// Number of tiles in one full block-row of this chunk.
    pub fn chunk_piece_size(&self) -> usize {
        self.block_height * self.chunk_width_in_tiles
    }

    /// True if the chunk holds no tiles at all.
    pub fn is_empty(&self) -> bool {
        self.block_height == 0 || self.chunk_width_in_tiles == 0
    }
}

/// Position of a single tile inside the repeating block/chunk structure.
///
/// Invariants: `row < block_height`, `col < chunk_width_in_tiles`; `block`
/// is unbounded (the walk decides where it stops).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoordinate {
    /// Row within the current block
    pub row: usize,
    /// Column within the chunk
    pub col: usize,
    /// Index of the block along the traversal
    pub block: usize,
}

impl TileCoordinate {
    /// Create a coordinate from its three components.
    pub fn new(row: usize, col: usize, block: usize) -> Self {
        Self { row, col, block }
    }

    /// The coordinate at the start of block 0.
    pub fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// Flatten to a linear tile offset from the start of block 0.
    pub fn linear_offset(&self, geometry: &ChunkGeometry) -> usize {
        self.block * geometry.chunk_piece_size()
            + self.row * geometry.chunk_width_in_tiles
            + self.col
    }

    /// Return the coordinate `by_tiles` positions further along the
    /// traversal, carrying column overflow into rows and row overflow into
    /// blocks.
    ///
    /// # Arguments
    ///
    /// * `by_tiles` - Number of tiles to advance by
    /// * `geometry` - Chunk dimensions governing the carries
    ///
    /// # Returns
    ///
    /// The advanced coordinate; the input is never mutated.
    pub fn advanced_by(&self, by_tiles: usize, geometry: &ChunkGeometry) -> TileCoordinate {
        // Fast path: no divisions when there is nothing to advance.
        if by_tiles == 0 {
            return *self;
        }

        let piece = geometry.chunk_piece_size();
        let width = geometry.chunk_width_in_tiles;
        let target = self.linear_offset(geometry) + by_tiles;
        let in_block = target % piece;

        TileCoordinate {
            row: in_block / width,
            col: in_block % width,
            block: target / piece,
        }
    }

    /// Closed-form count of strided reads starting at this coordinate
    /// before the walk leaves `last_block` (inclusive), without iterating.
    ///
    /// Counts the current tile as the first read, then one more read per
    /// `stride` tiles left up to the end of `last_block`.
    ///
    /// Preconditions (caller-checked): `stride > 0`,
    /// `self.block <= last_block`, non-empty geometry.
    pub fn tiles_remaining(
        &self,
        stride: usize,
        last_block: usize,
        geometry: &ChunkGeometry,
    ) -> usize {
        let piece = geometry.chunk_piece_size();
        let offset_in_block = self.row * geometry.chunk_width_in_tiles + self.col;
        let left_in_block = piece - offset_in_block - 1;
        let in_future_blocks = (last_block - self.block) * piece;

        1 + (left_in_block + in_future_blocks) / stride
    }
}

/// Iterator yielding a fixed number of coordinates along a strided walk.
///
/// Produces the starting coordinate first, then advances by `stride`
/// between yields. Both the batch reader and the direction filter are
/// expressed over this one sequence so they can never disagree about the
/// underlying address order.
#[derive(Debug, Clone)]
pub(crate) struct TileWalk {
    next: TileCoordinate,
    stride: usize,
    remaining: usize,
    geometry: ChunkGeometry,
}

impl TileWalk {
    pub(crate) fn new(
        start: TileCoordinate,
        stride: usize,
        count: usize,
        geometry: ChunkGeometry,
    ) -> Self {
        Self {
            next: start,
            stride,
            remaining: count,
            geometry,
        }
    }
}

impl Iterator for TileWalk {
    type Item = TileCoordinate;

    fn next(&mut self) -> Option<TileCoordinate> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        self.next = current.advanced_by(self.stride, &self.geometry);
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for TileWalk {}
