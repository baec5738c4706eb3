//! Coarse boolean raster marking walkable and blocked space.

use wayfield_core::{Building, CellCoord, Tree};

/// Side length of a single occupancy cell in world units.
pub const CELL_SIZE: u32 = 20;

/// Dense row-major grid of blocked flags.
///
/// Building rectangles block every cell they touch, including cells their
/// right and bottom edges only graze. Trees block the single cell holding
/// their center.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    columns: u32,
    rows: u32,
    blocked: Vec<bool>,
}

impl OccupancyGrid {
    /// Creates a grid with every cell walkable.
    #[must_use]
    pub fn open(columns: u32, rows: u32) -> Self {
        let cell_count = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);
        Self {
            columns,
            rows,
            blocked: vec![false; cell_count],
        }
    }

    /// Rasterizes obstacles onto a grid covering a `width` by `height` world.
    #[must_use]
    pub fn rasterize(width: u32, height: u32, buildings: &[Building], trees: &[Tree]) -> Self {
        let mut grid = Self::open(width.div_ceil(CELL_SIZE), height.div_ceil(CELL_SIZE));

        for building in buildings {
            grid.block_building(building);
        }

        for tree in trees {
            grid.block(CellCoord::new(tree.x / CELL_SIZE, tree.y / CELL_SIZE));
        }

        grid
    }

    /// Number of cell columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Marks the cell as blocked. Cells outside the grid are ignored.
    pub fn block(&mut self, cell: CellCoord) {
        if let Some(blocked) = self.index(cell).and_then(|index| self.blocked.get_mut(index)) {
            *blocked = true;
        }
    }

    /// Reports whether the cell lies inside the grid and is not blocked.
    #[must_use]
    pub fn is_walkable(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .and_then(|index| self.blocked.get(index))
            .is_some_and(|blocked| !blocked)
    }

    /// Number of blocked cells.
    #[must_use]
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|blocked| **blocked).count()
    }

    fn block_building(&mut self, building: &Building) {
        if self.columns == 0 || self.rows == 0 {
            return;
        }

        let first_column = building.x / CELL_SIZE;
        let first_row = building.y / CELL_SIZE;
        let last_column =
            (building.x.saturating_add(building.width) / CELL_SIZE).min(self.columns - 1);
        let last_row = (building.y.saturating_add(building.height) / CELL_SIZE).min(self.rows - 1);

        for row in first_row..=last_row {
            for column in first_column..=last_column {
                self.block(CellCoord::new(column, row));
            }
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }

        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}
