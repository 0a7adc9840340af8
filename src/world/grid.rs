//! Square tile grid shared by terrain synthesis, zoning and metrics.

use std::ops::Index;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;

use super::tile::Tile;

/// Grid coordinate as `(row, col)`.
pub type Cell = (usize, usize);

/// 4-directional offsets: north, south, west, east.
const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Row-major N×N matrix of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    size: usize,
    cells: Vec<Tile>,
}

impl TileGrid {
    /// A grid filled with [`Tile::Empty`].
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Tile::Empty; size * size],
        }
    }

    /// Build from explicit rows. Returns `None` unless the rows form a square.
    pub fn from_rows(rows: &[Vec<Tile>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (N²).
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    fn offset(&self, (row, col): Cell) -> usize {
        row * self.size + col
    }

    pub fn in_bounds(&self, (row, col): Cell) -> bool {
        row < self.size && col < self.size
    }

    pub fn get(&self, cell: Cell) -> Option<Tile> {
        self.in_bounds(cell).then(|| self.cells[self.offset(cell)])
    }

    /// Overwrite a cell. Returns `false`, leaving the grid unchanged, if the
    /// cell lies outside it; debug builds treat that as a caller bug.
    pub fn set(&mut self, cell: Cell, tile: Tile) -> bool {
        debug_assert!(self.in_bounds(cell), "write outside {0}x{0} grid at {cell:?}", self.size);
        if !self.in_bounds(cell) {
            return false;
        }
        let idx = self.offset(cell);
        self.cells[idx] = tile;
        true
    }

    /// True if the cell lies off the outer border.
    pub fn is_interior(&self, (row, col): Cell) -> bool {
        row > 0 && col > 0 && row + 1 < self.size && col + 1 < self.size
    }

    /// In-bounds 4-connected neighbours.
    pub fn neighbors(&self, (row, col): Cell) -> SmallVec<[Cell; 4]> {
        let mut result = SmallVec::new();
        for (dr, dc) in NEIGHBOR_OFFSETS {
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
                continue;
            };
            if self.in_bounds((r, c)) {
                result.push((r, c));
            }
        }
        result
    }

    /// True if any 4-neighbour currently holds one of `kinds`.
    pub fn is_adjacent_to(&self, cell: Cell, kinds: &[Tile]) -> bool {
        self.neighbors(cell)
            .into_iter()
            .any(|n| kinds.contains(&self[n]))
    }

    /// Every coordinate in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Cell> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
    }

    /// Coordinates currently holding `tile`, row-major.
    pub fn cells_of(&self, tile: Tile) -> impl Iterator<Item = Cell> + '_ {
        self.positions().filter(move |&cell| self[cell] == tile)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.cells.chunks(self.size.max(1))
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }

    pub fn counts(&self) -> TileCounts {
        let mut counts = TileCounts::default();
        for &tile in &self.cells {
            counts.0[tile.code() as usize] += 1;
        }
        counts
    }

    /// Rows of raw tile codes.
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|t| t.code()).collect())
            .collect()
    }
}

impl Index<Cell> for TileGrid {
    type Output = Tile;

    fn index(&self, cell: Cell) -> &Tile {
        &self.cells[self.offset(cell)]
    }
}

/// Serialized as a list of rows of tile codes.
impl Serialize for TileGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.size))?;
        for row in self.rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

/// Per-kind cell counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileCounts([usize; Tile::COUNT]);

impl TileCounts {
    pub fn iter(&self) -> impl Iterator<Item = (Tile, usize)> + '_ {
        Tile::ALL.into_iter().zip(self.0.iter().copied())
    }
}

impl Index<Tile> for TileCounts {
    type Output = usize;

    fn index(&self, tile: Tile) -> &usize {
        &self.0[tile.code() as usize]
    }
}
