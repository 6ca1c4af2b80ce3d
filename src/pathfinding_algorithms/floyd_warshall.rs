use crate::pathfinding_algorithms::{Grid, WALL_COST};

/// All-pairs relaxation over the grid read as an SxS adjacency matrix.
/// Exactly one relaxation per call; the (k, i, j) loop nest is flattened
/// into three rolling cursors so the matrix fills in visibly, entry by entry.
pub struct FloydWarshall {
    i: usize,
    j: usize,
    k: usize,
    started: bool,
    finished: bool,
}

impl FloydWarshall {
    pub fn new() -> Self {
        FloydWarshall {
            i: 0,
            j: 0,
            k: 0,
            started: false,
            finished: false,
        }
    }

    pub fn reset(&mut self) {
        self.i = 0;
        self.j = 0;
        self.k = 0;
        self.started = false;
        self.finished = false;
    }

    /// Seeds the matrix (diagonal zero, totals from the raw costs, sentinel
    /// meaning unconnected) and arms the cursors.
    pub fn begin(&mut self, grid: &mut Grid) {
        if self.started {
            return;
        }
        let size = grid.size();
        for x in 0..size {
            grid.cell_mut(x, x).cost = 0;
            for y in 0..size {
                let cost = grid.cell(x, y).cost;
                grid.cell_mut(x, y).total_cost = cost;
            }
        }
        self.i = 0;
        self.j = 0;
        self.k = 0;
        self.started = true;
        self.finished = false;
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn is_done(&self) -> bool {
        self.finished
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.i, self.j)
    }

    pub fn intermediate(&self) -> usize {
        self.k
    }

    pub fn advance(&mut self, grid: &mut Grid) {
        if !self.started || self.finished {
            return;
        }
        let size = grid.size();
        let through = grid
            .cell(self.i, self.k)
            .total_cost
            .saturating_add(grid.cell(self.k, self.j).total_cost);
        let direct = grid.cell(self.i, self.j).total_cost;
        grid.cell_mut(self.i, self.j).total_cost = direct.min(through);

        self.j += 1;
        if self.j == size {
            self.j = 0;
            self.i += 1;
        }
        if self.i == size {
            self.i = 0;
            self.k += 1;
        }
        if self.k == size {
            self.finished = true;
        }
    }
}

impl Default for FloydWarshall {
    fn default() -> Self {
        Self::new()
    }
}
