//! Grid module - the 4x4 tile matrix and the slide/merge algorithm
//!
//! Cells hold `0` (empty) or a power of two. Coordinates are `(row, col)` with
//! row 0 at the top and column 0 at the left.
//!
//! All four slide directions share one lane routine: a lane (row or column) is
//! read in traversal order starting at the wall the tiles move towards, merged
//! with [`merge_line`], and written back in the same order. Everything here is
//! stack-only.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{Direction, Position, Tile, CELL_COUNT, GRID_SIZE, MAX_MERGES};

/// Result of collapsing one lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMerge {
    /// Lane contents after the slide, in traversal order
    pub tiles: [Tile; GRID_SIZE],
    /// Traversal indices that received a merged tile
    pub merged_at: ArrayVec<usize, { GRID_SIZE / 2 }>,
    /// Sum of merged tile values
    pub gained: u32,
}

/// Two tiles merge when they are equal and their sum still fits in a [`Tile`].
#[inline(always)]
pub fn can_merge(a: Tile, b: Tile) -> bool {
    a == b && a != 0 && a.checked_mul(2).is_some()
}

/// Collapse one lane towards index 0.
///
/// Empties are dropped, then the compacted run is scanned once: two mergeable
/// neighbours become one doubled tile and the scan skips past both, so a tile
/// produced by a merge is never merged again. The result is padded with empties.
pub fn merge_line(line: [Tile; GRID_SIZE]) -> LineMerge {
    let mut run: ArrayVec<Tile, GRID_SIZE> = ArrayVec::new();
    for &v in line.iter().filter(|&&v| v != 0) {
        run.push(v);
    }

    let mut tiles = [0; GRID_SIZE];
    let mut merged_at = ArrayVec::new();
    let mut gained = 0u32;
    let mut out = 0usize;
    let mut i = 0usize;

    while i < run.len() {
        if i + 1 < run.len() && can_merge(run[i], run[i + 1]) {
            let doubled = run[i] << 1;
            tiles[out] = doubled;
            gained = gained.saturating_add(doubled);
            merged_at.push(out);
            i += 2;
        } else {
            tiles[out] = run[i];
            i += 1;
        }
        out += 1;
    }

    LineMerge {
        tiles,
        merged_at,
        gained,
    }
}

/// What a slide did to the grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlideOutcome {
    /// True if any cell changed value
    pub moved: bool,
    /// Points produced by merges
    pub gained: u32,
    /// Merge destinations, lane by lane
    pub merged: ArrayVec<Position, MAX_MERGES>,
}

/// The 4x4 grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    cells: [[Tile; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self {
            cells: [[0; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Build a grid from row-major values
    pub fn from_rows(rows: [[Tile; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells: rows }
    }

    /// Row-major view of the cells
    pub fn rows(&self) -> &[[Tile; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// Get cell value, or `None` if out of bounds
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.cells
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .copied()
    }

    /// Set cell value. Returns false if out of bounds
    pub fn set(&mut self, pos: Position, value: Tile) -> bool {
        match self
            .cells
            .get_mut(pos.row as usize)
            .and_then(|row| row.get_mut(pos.col as usize))
        {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.cells = [[0; GRID_SIZE]; GRID_SIZE];
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> ArrayVec<Position, CELL_COUNT> {
        let mut out = ArrayVec::new();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                if v == 0 {
                    out.push(Position::new(r as u8, c as u8));
                }
            }
        }
        out
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v == 0).count()
    }

    pub fn count_tiles(&self) -> usize {
        CELL_COUNT - self.count_empty()
    }

    /// Largest tile on the grid, 0 if empty
    pub fn max_tile(&self) -> Tile {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// True if some cell can merge with its right or bottom neighbour.
    ///
    /// Each adjacent pair is visited exactly once, from its top/left member.
    pub fn has_adjacent_match(&self) -> bool {
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                let current = self.cells[r][c];
                if c + 1 < GRID_SIZE && can_merge(current, self.cells[r][c + 1]) {
                    return true;
                }
                if r + 1 < GRID_SIZE && can_merge(current, self.cells[r + 1][c]) {
                    return true;
                }
            }
        }
        false
    }

    /// Full and without any mergeable neighbours
    pub fn is_stuck(&self) -> bool {
        self.count_empty() == 0 && !self.has_adjacent_match()
    }

    /// Every non-empty cell is a power of two >= 2
    pub fn is_well_formed(&self) -> bool {
        self.cells
            .iter()
            .flatten()
            .all(|&v| v == 0 || (v >= 2 && v.is_power_of_two()))
    }

    /// Position of the `step`-th cell of `lane` when traversing towards `dir`'s wall.
    #[inline(always)]
    fn lane_position(dir: Direction, lane: usize, step: usize) -> Position {
        let along = if dir.towards_end() {
            GRID_SIZE - 1 - step
        } else {
            step
        };
        if dir.is_vertical() {
            Position::new(along as u8, lane as u8)
        } else {
            Position::new(lane as u8, along as u8)
        }
    }

    /// Slide in place, returning what changed.
    pub fn slide(&mut self, dir: Direction) -> SlideOutcome {
        let mut outcome = SlideOutcome::default();

        for lane in 0..GRID_SIZE {
            let mut line = [0; GRID_SIZE];
            for (step, slot) in line.iter_mut().enumerate() {
                let p = Self::lane_position(dir, lane, step);
                *slot = self.cells[p.row as usize][p.col as usize];
            }

            let merged = merge_line(line);
            if merged.tiles != line {
                outcome.moved = true;
            }
            outcome.gained = outcome.gained.saturating_add(merged.gained);
            for &step in &merged.merged_at {
                outcome.merged.push(Self::lane_position(dir, lane, step));
            }

            for (step, &v) in merged.tiles.iter().enumerate() {
                let p = Self::lane_position(dir, lane, step);
                self.cells[p.row as usize][p.col as usize] = v;
            }
        }

        outcome
    }

    /// Slide a copy, leaving `self` untouched.
    pub fn slid(&self, dir: Direction) -> (Grid, SlideOutcome) {
        let mut copy = *self;
        let outcome = copy.slide(dir);
        (copy, outcome)
    }

    /// Would sliding towards `dir` change anything?
    pub fn can_slide(&self, dir: Direction) -> bool {
        self.slid(dir).1.moved
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                if v == 0 {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{:>5}", v)?;
                }
            }
            if r + 1 < GRID_SIZE {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_line_pairs_once() {
        let m = merge_line([2, 2, 2, 2]);
        assert_eq!(m.tiles, [4, 4, 0, 0]);
        assert_eq!(m.gained, 8);
        assert_eq!(m.merged_at.as_slice(), &[0, 1]);
    }

    #[test]
    fn test_merge_line_skips_gaps() {
        let m = merge_line([2, 0, 2, 4]);
        assert_eq!(m.tiles, [4, 4, 0, 0]);
        assert_eq!(m.gained, 4);
        assert_eq!(m.merged_at.as_slice(), &[0]);
    }

    #[test]
    fn test_merge_line_three_equal_merges_leading_pair() {
        let m = merge_line([2, 2, 2, 0]);
        assert_eq!(m.tiles, [4, 2, 0, 0]);
        assert_eq!(m.gained, 4);
    }

    #[test]
    fn test_merge_line_does_not_chain() {
        // 4 produced by 2+2 must not merge with the existing 4.
        let m = merge_line([2, 2, 4, 0]);
        assert_eq!(m.tiles, [4, 4, 0, 0]);
        assert_eq!(m.gained, 4);
    }

    #[test]
    fn test_merge_line_empty_and_blocked() {
        assert_eq!(merge_line([0; 4]).tiles, [0; 4]);
        let m = merge_line([2, 4, 8, 16]);
        assert_eq!(m.tiles, [2, 4, 8, 16]);
        assert!(m.merged_at.is_empty());
    }

    #[test]
    fn test_merge_line_leaves_tiles_that_would_overflow() {
        let top = 1u32 << 31;
        let m = merge_line([top, top, 0, 0]);
        assert_eq!(m.tiles, [top, top, 0, 0]);
        assert_eq!(m.gained, 0);

        let m = merge_line([1 << 30, 1 << 30, 0, 0]);
        assert_eq!(m.tiles, [top, 0, 0, 0]);
    }

    #[test]
    fn test_unmergeable_top_tiles_count_as_stuck() {
        let top = 1u32 << 31;
        let g = Grid::from_rows([[top, top, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(!g.has_adjacent_match());
        assert!(g.is_stuck());
        assert!(Direction::ALL.iter().all(|&d| !g.can_slide(d)));
    }

    #[test]
    fn test_lane_positions_cover_grid_once() {
        for dir in Direction::ALL {
            let mut seen = [[false; GRID_SIZE]; GRID_SIZE];
            for lane in 0..GRID_SIZE {
                for step in 0..GRID_SIZE {
                    let p = Grid::lane_position(dir, lane, step);
                    assert!(!seen[p.row as usize][p.col as usize]);
                    seen[p.row as usize][p.col as usize] = true;
                }
            }
        }
    }

    #[test]
    fn test_adjacent_match_detects_vertical_pair() {
        let g = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 4]]);
        assert!(g.has_adjacent_match());
        assert!(!g.is_stuck());

        let g = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [2, 8, 16, 32]]);
        assert!(g.has_adjacent_match());
    }

    #[test]
    fn test_display_marks_empty_cells() {
        let mut g = Grid::new();
        g.set(Position::new(0, 0), 2048);
        let text = g.to_string();
        assert!(text.starts_with(" 2048"));
        assert_eq!(text.lines().count(), GRID_SIZE);
        assert!(text.contains('.'));
    }

    #[test]
    fn test_set_out_of_bounds_is_rejected() {
        let mut g = Grid::new();
        assert!(!g.set(Position::new(4, 0), 2));
        assert_eq!(g.get(Position::new(0, 4)), None);
    }
}
