//!
//! Occupancy grid of a single plate.
//!
use crate::address::{Well, N_COLS, N_ROWS};
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::ops::Index;

/// Which wells of one 8x12 plate are selected.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PlateGrid {
    cells: [[bool; N_COLS]; N_ROWS],
}

impl PlateGrid {
    /// An empty plate.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, well: Well) -> bool {
        self.cells[well.row][well.col]
    }

    pub fn set(&mut self, well: Well, selected: bool) {
        self.cells[well.row][well.col] = selected;
    }

    /// Number of selected wells.
    pub fn count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|&c| !c)
    }

    /// Selected wells in row-major order.
    pub fn selected(&self) -> impl Iterator<Item = Well> + '_ {
        (0..N_ROWS)
            .cartesian_product(0..N_COLS)
            .filter(|&(row, col)| self.cells[row][col])
            .map(|(row, col)| Well { row, col })
    }

    /// Mark every well selected in `other` as selected here too.
    pub fn union_with(&mut self, other: &PlateGrid) {
        for (mine, theirs) in self.cells.iter_mut().flatten().zip(other.cells.iter().flatten()) {
            *mine |= *theirs;
        }
    }

    /// True if a well is selected in both grids.
    pub fn intersects(&self, other: &PlateGrid) -> bool {
        self.cells
            .iter()
            .flatten()
            .zip(other.cells.iter().flatten())
            .any(|(&a, &b)| a && b)
    }

    /// True if this grid selects at least one well that `base` does not.
    pub fn adds_to(&self, base: &PlateGrid) -> bool {
        self.cells
            .iter()
            .flatten()
            .zip(base.cells.iter().flatten())
            .any(|(&a, &b)| a && !b)
    }
}

impl Index<(usize, usize)> for PlateGrid {
    type Output = bool;

    /// Index by `(row, col)`.
    fn index(&self, (row, col): (usize, usize)) -> &bool {
        &self.cells[row][col]
    }
}

/// Plate map with row letters and column numbers, `x` for selected wells.
impl Display for PlateGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let header = (1..=N_COLS).map(|col| format!(" {col:02}")).join("");
        write!(f, " {header}")?;
        for (row, cells) in self.cells.iter().enumerate() {
            let label = Well { row, col: 0 }.row_label();
            let line = cells
                .iter()
                .map(|&c| if c { "  x" } else { "  ." })
                .join("");
            write!(f, "\n{label}{line}")?;
        }
        Ok(())
    }
}
