//! Static tile grid
//!
//! Parsed once from level text. Floor cells become fixed colliders; block
//! spawn cells are handed to [`super::GameState`] to instantiate reactive
//! blocks and never collide on their own.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::error::ConfigError;

/// What occupies one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Floor,
    BlockSpawn,
}

impl CellKind {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' | ' ' => Some(CellKind::Empty),
            '#' => Some(CellKind::Floor),
            '?' => Some(CellKind::BlockSpawn),
            _ => None,
        }
    }
}

/// Fixed-size grid of cells with cached floor colliders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    cols: usize,
    rows: usize,
    tile_size: i32,
    /// Row-major cells
    cells: Vec<CellKind>,
    /// One rect per floor cell, row-major
    floors: Vec<Rect>,
}

impl TileGrid {
    /// Parse level rows (top to bottom); every row must have the same width
    pub fn parse<S: AsRef<str>>(rows: &[S], tile_size: i32) -> Result<Self, ConfigError> {
        if tile_size <= 0 {
            return Err(ConfigError::NonPositive {
                field: "world.tile_size",
                value: tile_size as f32,
            });
        }

        let cols = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(cols * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != cols {
                return Err(ConfigError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let kind =
                    CellKind::from_char(ch).ok_or(ConfigError::UnknownCell { ch, row, col })?;
                cells.push(kind);
            }
        }

        let mut grid = Self {
            cols,
            rows: rows.len(),
            tile_size,
            cells,
            floors: Vec::new(),
        };
        let floors: Vec<Rect> = grid
            .cells_of(CellKind::Floor)
            .map(|(col, row)| grid.cell_rect(col, row))
            .collect();
        grid.floors = floors;
        Ok(grid)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// World width in pixels
    pub fn pixel_width(&self) -> i32 {
        self.cols as i32 * self.tile_size
    }

    /// World height in pixels
    pub fn pixel_height(&self) -> i32 {
        self.rows as i32 * self.tile_size
    }

    /// Cell kind at (col, row); out-of-range cells are empty
    pub fn cell(&self, col: usize, row: usize) -> CellKind {
        if col >= self.cols || row >= self.rows {
            return CellKind::Empty;
        }
        self.cells
            .get(row * self.cols + col)
            .copied()
            .unwrap_or(CellKind::Empty)
    }

    /// Whether the cell holds static floor
    pub fn is_solid(&self, col: usize, row: usize) -> bool {
        self.cell(col, row) == CellKind::Floor
    }

    /// Pixel rect covered by a cell
    pub fn cell_rect(&self, col: usize, row: usize) -> Rect {
        Rect::new(
            col as i32 * self.tile_size,
            row as i32 * self.tile_size,
            self.tile_size,
            self.tile_size,
        )
    }

    /// All (col, row) coordinates holding `kind`, row-major
    pub fn cells_of(&self, kind: CellKind) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == kind)
            .map(move |(i, _)| (i % cols, i / cols))
    }

    /// One cell-sized rect per floor cell; stable for the grid's lifetime
    pub fn floor_colliders(&self) -> &[Rect] {
        &self.floors
    }
}
