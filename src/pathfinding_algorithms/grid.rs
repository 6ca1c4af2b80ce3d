use colored::Colorize;
use rand::Rng;

#[derive(Debug)]
pub enum GridError {
    TooSmall(usize),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooSmall(n) => write!(f, "a grid needs at least 2 cells per side, got {}", n),
        }
    }
}

impl std::error::Error for GridError {}

/// Cost treated as impassable / unreachable everywhere the grid is read as an
/// adjacency matrix.
pub const WALL_COST: u32 = 1000;

/// Per-cell cost assignment scheme, cycled by the weight-mode toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightMode {
    Uniform,
    Random,
    Obstacles,
}

impl WeightMode {
    pub fn next(self) -> Self {
        match self {
            WeightMode::Uniform => WeightMode::Random,
            WeightMode::Random => WeightMode::Obstacles,
            WeightMode::Obstacles => WeightMode::Uniform,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub cost: u32,
    pub total_cost: u32,
    pub visited: bool,
    pub wall: bool,
    pub frontier: bool,
    pub on_path: bool,
    pub predecessor: Option<(usize, usize)>,
}

impl Cell {
    fn fresh(cost: u32) -> Self {
        Cell {
            cost,
            total_cost: u32::MAX,
            visited: false,
            wall: false,
            frontier: false,
            on_path: false,
            predecessor: None,
        }
    }
}

/// What one cell currently *is*, for rendering. Priority resolves overlaps:
/// endpoints over path, path over wall, wall over search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Plain,
    Frontier,
    Visited,
    Wall,
    OnPath,
    Start,
    End,
}

/// The SxS grid both searches run over. The layered search reads it as a
/// 4-neighbor lattice; Floyd-Warshall reads the same cells as an SxS
/// adjacency matrix (cell (i, j) = edge cost i to j).
pub struct Grid {
    size: usize,
    cells: Vec<Vec<Cell>>,
    pub weight_mode: WeightMode,
    pub start: Option<(usize, usize)>,
    pub end: Option<(usize, usize)>,
}

impl Grid {
    pub fn new(size: usize, weight_mode: WeightMode) -> Result<Self, GridError> {
        if size < 2 {
            return Err(GridError::TooSmall(size));
        }
        let mut grid = Grid {
            size,
            cells: vec![vec![Cell::fresh(1); size]; size],
            weight_mode,
            start: None,
            end: None,
        };
        grid.assign_cost();
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[x][y]
    }

    pub fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        &mut self.cells[x][y]
    }

    pub fn neighbors(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(4);
        if y > 0 {
            out.push((x, y - 1));
        }
        if y + 1 < self.size {
            out.push((x, y + 1));
        }
        if x > 0 {
            out.push((x - 1, y));
        }
        if x + 1 < self.size {
            out.push((x + 1, y));
        }
        out
    }

    /// Full reset: every cell gets a fresh cost for the active weight mode,
    /// all search state is discarded, endpoint designations are cleared.
    pub fn assign_cost(&mut self) {
        let mut rng = rand::thread_rng();
        for column in &mut self.cells {
            for cell in column.iter_mut() {
                let cost = match self.weight_mode {
                    WeightMode::Uniform => 1,
                    WeightMode::Random => rng.gen_range(1..=10),
                    WeightMode::Obstacles => {
                        let c = rng.gen_range(0..9);
                        if c % 2 == 0 {
                            WALL_COST
                        } else {
                            c
                        }
                    }
                };
                *cell = Cell::fresh(cost);
            }
        }
        self.start = None;
        self.end = None;
    }

    pub fn toggle_weight(&mut self) {
        self.weight_mode = self.weight_mode.next();
    }

    /// Designates the start cell. Rejects walls, out-of-range coordinates and
    /// re-designation silently; the caller observes the state, not an error.
    pub fn set_start(&mut self, x: usize, y: usize) {
        if self.start.is_some() || x >= self.size || y >= self.size {
            return;
        }
        if self.cells[x][y].wall || self.end == Some((x, y)) {
            return;
        }
        self.cells[x][y].total_cost = 0;
        self.start = Some((x, y));
    }

    pub fn set_end(&mut self, x: usize, y: usize) {
        if self.end.is_some() || x >= self.size || y >= self.size {
            return;
        }
        if self.cells[x][y].wall || self.start == Some((x, y)) {
            return;
        }
        self.end = Some((x, y));
    }

    /// Turns a cell into a wall, permanent until the next cost assignment.
    /// Endpoints cannot be painted over.
    pub fn paint_wall(&mut self, x: usize, y: usize) {
        if x >= self.size || y >= self.size {
            return;
        }
        if self.start == Some((x, y)) || self.end == Some((x, y)) {
            return;
        }
        let cell = &mut self.cells[x][y];
        cell.wall = true;
        cell.cost = WALL_COST;
    }

    pub fn cell_state(&self, x: usize, y: usize) -> CellState {
        if self.start == Some((x, y)) {
            return CellState::Start;
        }
        if self.end == Some((x, y)) {
            return CellState::End;
        }
        let cell = &self.cells[x][y];
        if cell.on_path {
            CellState::OnPath
        } else if cell.wall {
            CellState::Wall
        } else if cell.frontier {
            CellState::Frontier
        } else if cell.visited {
            CellState::Visited
        } else {
            CellState::Plain
        }
    }

    /// Renders the lattice view. `cursor` is the harness's designation cursor.
    pub fn render(&self, title: &str, cursor: (usize, usize), show_costs: bool) -> String {
        let mut buffer = String::new();
        buffer.push_str("\x1B[?25l");
        buffer.push_str("\x1B[H");
        buffer.push_str("\x1B[J");
        buffer.push_str(&format!("{}\n", title));
        for y in 0..self.size {
            for x in 0..self.size {
                let cell = &self.cells[x][y];
                let glyph = match self.cell_state(x, y) {
                    CellState::Start => "S ".bright_white().on_blue(),
                    CellState::End => "E ".bright_white().on_red(),
                    CellState::OnPath => "[]".green(),
                    CellState::Wall => "##".bright_black(),
                    CellState::Frontier => "::".cyan(),
                    CellState::Visited => "..".yellow(),
                    CellState::Plain => {
                        if cell.cost >= WALL_COST {
                            "##".bright_black()
                        } else if show_costs {
                            // Two-character cell: 10 renders as its last digit.
                            cost_glyph(cell.cost)
                        } else {
                            ". ".magenta()
                        }
                    }
                };
                if (x, y) == cursor {
                    buffer += &format!("{}", glyph.on_truecolor(90, 90, 90));
                } else {
                    buffer += &format!("{}", glyph);
                }
            }
            buffer.push('\n');
        }
        buffer.push_str("\x1B[?25h");
        buffer
    }

    /// Renders the matrix view used while all-pairs relaxation runs:
    /// total costs with the sentinel shown as infinity, the active (i, j)
    /// entry highlighted, and the current intermediate row announced.
    pub fn render_matrix(&self, title: &str, active: (usize, usize), k: usize) -> String {
        let mut buffer = String::new();
        buffer.push_str("\x1B[?25l");
        buffer.push_str("\x1B[H");
        buffer.push_str("\x1B[J");
        buffer.push_str(&format!("{}   {}\n", title, format!("D{} :", k).red()));
        for j in 0..self.size {
            for i in 0..self.size {
                let total = self.cells[i][j].total_cost;
                let text = if total >= WALL_COST {
                    "inf ".to_string()
                } else {
                    format!("{:>3} ", total)
                };
                if (i, j) == active {
                    buffer += &format!("{}", text.bright_yellow());
                } else {
                    buffer += &format!("{}", text.white());
                }
            }
            buffer.push('\n');
        }
        buffer.push_str("\x1B[?25h");
        buffer
    }
}

fn cost_glyph(cost: u32) -> colored::ColoredString {
    format!("{} ", cost % 10).magenta()
}
