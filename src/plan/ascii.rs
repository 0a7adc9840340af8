//! Text preview of a grid, one glyph per cell.

use crate::world::{Tile, TileGrid};

pub fn glyph(tile: Tile) -> char {
    match tile {
        Tile::Empty => '.',
        Tile::Water => '~',
        Tile::Mountain => '^',
        Tile::Farm => 'f',
        Tile::Park => 'p',
        Tile::Home => 'h',
        Tile::Office => 'o',
        Tile::Hospital => '+',
        Tile::School => 's',
        Tile::Metro => 'M',
        Tile::Station => 'S',
        Tile::Walk => ',',
        Tile::Road => '#',
    }
}

/// Rows joined by newlines, no trailing newline.
pub fn render_ascii(grid: &TileGrid) -> String {
    grid.rows()
        .map(|row| row.iter().map(|&t| glyph(t)).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
