//! Scans fixed rows and columns of the occupancy grid for walkable runs.
//!
//! Runs stop at the first blocked cell; nothing routes around obstacles. Each
//! run long enough to keep becomes a single segment joining the centers of its
//! first and last cells.

use wayfield_core::{CellCoord, PathLine};

use crate::grid::{OccupancyGrid, CELL_SIZE};

/// Index of the first scanned row and column.
pub const SCAN_OFFSET: u32 = 2;
/// Distance in cells between scanned rows and between scanned columns.
pub const SCAN_STRIDE: usize = 4;
/// Runs must contain more than this many cells to be kept.
pub const MIN_RUN_CELLS: usize = 3;

/// Extracts horizontal runs first, then vertical runs.
#[must_use]
pub fn extract_lines(grid: &OccupancyGrid) -> Vec<PathLine> {
    let mut lines = Vec::new();

    for row in scan_indices(grid.rows()) {
        let cells = (0..grid.columns()).map(|column| CellCoord::new(column, row));
        collect_runs(cells, grid, &mut lines);
    }

    for column in scan_indices(grid.columns()) {
        let cells = (0..grid.rows()).map(|row| CellCoord::new(column, row));
        collect_runs(cells, grid, &mut lines);
    }

    lines
}

/// Scanned indices along an axis of `extent` cells, stopping two short of the far edge.
fn scan_indices(extent: u32) -> impl Iterator<Item = u32> {
    (SCAN_OFFSET..extent.saturating_sub(SCAN_OFFSET)).step_by(SCAN_STRIDE)
}

fn collect_runs<I>(cells: I, grid: &OccupancyGrid, out: &mut Vec<PathLine>)
where
    I: Iterator<Item = CellCoord>,
{
    let mut run: Option<Run> = None;

    for cell in cells {
        if grid.is_walkable(cell) {
            match run.as_mut() {
                Some(open) => open.extend(cell),
                None => run = Some(Run::starting_at(cell)),
            }
        } else if let Some(closed) = run.take() {
            closed.emit(out);
        }
    }

    if let Some(closed) = run {
        closed.emit(out);
    }
}

#[derive(Debug)]
struct Run {
    first: CellCoord,
    last: CellCoord,
    length: usize,
}

impl Run {
    fn starting_at(cell: CellCoord) -> Self {
        Self {
            first: cell,
            last: cell,
            length: 1,
        }
    }

    fn extend(&mut self, cell: CellCoord) {
        self.last = cell;
        self.length += 1;
    }

    fn emit(self, out: &mut Vec<PathLine>) {
        if self.length <= MIN_RUN_CELLS {
            return;
        }

        let (x1, y1) = cell_center(self.first);
        let (x2, y2) = cell_center(self.last);
        out.push(PathLine::new(x1, y1, x2, y2));
    }
}

fn cell_center(cell: CellCoord) -> (u32, u32) {
    let half = CELL_SIZE / 2;
    (
        cell.column() * CELL_SIZE + half,
        cell.row() * CELL_SIZE + half,
    )
}
