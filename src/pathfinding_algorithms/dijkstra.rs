use crate::audio::Signal;
use crate::pathfinding_algorithms::Grid;
use std::sync::mpsc::Sender;

/// Where the search currently is in its life cycle. Everything that can go
/// wrong (no path, repeated designations, empty frontier) is held as state;
/// nothing here is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    AwaitingEndpoints,
    Running,
    Finished,
}

/// Layered shortest-path relaxation. Each advance consumes the *entire*
/// current frontier: every member relaxes its non-wall neighbors, every
/// unvisited non-wall neighbor joins the next frontier (deduplicated), and
/// the processed cells are frozen as visited. Frontiers expand in breadth
/// layers, not in cost order, so on strongly skewed weights a cell can be
/// frozen before its true minimum cost is known. That layering is the
/// documented behavior of this search, not an accident.
pub struct Dijkstra {
    state: SearchState,
    current: Vec<(usize, usize)>,
    next: Vec<(usize, usize)>,
    layers: usize,
    no_path: bool,
    backtrack_at: Option<(usize, usize)>,
    audio: Option<Sender<Signal>>,
}

impl Dijkstra {
    pub fn new(audio: Option<Sender<Signal>>) -> Self {
        Dijkstra {
            state: SearchState::Idle,
            current: Vec::new(),
            next: Vec::new(),
            layers: 0,
            no_path: false,
            backtrack_at: None,
            audio,
        }
    }

    /// Called alongside the grid's cost assignment.
    pub fn reset(&mut self) {
        self.state = SearchState::AwaitingEndpoints;
        self.current.clear();
        self.next.clear();
        self.layers = 0;
        self.no_path = false;
        self.backtrack_at = None;
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Steady, queryable failure signal; cleared only by reset.
    pub fn no_path(&self) -> bool {
        self.no_path
    }

    /// Arms the search once the harness has designated both endpoints. The
    /// start cell becomes the sole member of the first frontier.
    pub fn endpoints_ready(&mut self, grid: &mut Grid) {
        if self.state != SearchState::AwaitingEndpoints {
            return;
        }
        if let (Some(start), Some(end)) = (grid.start, grid.end) {
            let cell = grid.cell_mut(start.0, start.1);
            cell.total_cost = 0;
            self.current.push(start);
            self.backtrack_at = Some(end);
            self.state = SearchState::Running;
        }
    }

    pub fn advance(&mut self, grid: &mut Grid) {
        match self.state {
            SearchState::Running => self.advance_layer(grid),
            SearchState::Finished => self.backtrack(grid),
            SearchState::Idle | SearchState::AwaitingEndpoints => {}
        }
    }

    fn advance_layer(&mut self, grid: &mut Grid) {
        if self.current.is_empty() {
            // Frontier exhausted with the end still unreached: hold the
            // condition until reset, stay advanceable.
            self.no_path = true;
            return;
        }

        for idx in 0..self.current.len() {
            let (cx, cy) = self.current[idx];
            self.relax_neighbors(grid, cx, cy);
            let cell = grid.cell_mut(cx, cy);
            cell.visited = true;
            cell.frontier = false;
        }
        self.current.clear();
        std::mem::swap(&mut self.current, &mut self.next);
        self.layers += 1;

        if let Some(sender) = &self.audio {
            let span = (2 * grid.size()) as f32;
            let freq = 440.0 + 440.0 * (1.0 - self.layers as f32 / span).max(0.0);
            sender
                .send(Signal::Chord(vec![freq, freq * 1.25]))
                .unwrap_or_default();
        }

        if let Some((ex, ey)) = grid.end {
            if grid.cell(ex, ey).visited {
                self.state = SearchState::Finished;
                if let Some(sender) = &self.audio {
                    sender.send(Signal::Tone(0.0)).unwrap_or_default();
                }
            }
        }
    }

    fn relax_neighbors(&mut self, grid: &mut Grid, cx: usize, cy: usize) {
        let current_total = grid.cell(cx, cy).total_cost;
        for (nx, ny) in grid.neighbors(cx, cy) {
            let neighbor = grid.cell(nx, ny);
            if neighbor.wall || neighbor.visited {
                continue;
            }
            let candidate = current_total.saturating_add(neighbor.cost);
            let neighbor = grid.cell_mut(nx, ny);
            if candidate < neighbor.total_cost {
                neighbor.total_cost = candidate;
                neighbor.predecessor = Some((cx, cy));
            }
            if !self.next.contains(&(nx, ny)) {
                neighbor.frontier = true;
                self.next.push((nx, ny));
            }
        }
    }

    /// One step back along the predecessor chain per call; the walk ends at
    /// the start cell, which has no predecessor.
    fn backtrack(&mut self, grid: &mut Grid) {
        if let Some((x, y)) = self.backtrack_at {
            grid.cell_mut(x, y).on_path = true;
            self.backtrack_at = grid.cell(x, y).predecessor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding_algorithms::WeightMode;

    fn uniform_grid(size: usize) -> Grid {
        Grid::new(size, WeightMode::Uniform).unwrap()
    }

    fn arm(grid: &mut Grid, search: &mut Dijkstra, start: (usize, usize), end: (usize, usize)) {
        search.reset();
        grid.set_start(start.0, start.1);
        grid.set_end(end.0, end.1);
        search.endpoints_ready(grid);
    }

    #[test]
    fn three_by_three_uniform_scenario() {
        let mut grid = uniform_grid(3);
        let mut search = Dijkstra::new(None);
        arm(&mut grid, &mut search, (0, 0), (2, 2));
        assert_eq!(search.state(), SearchState::Running);

        while search.state() == SearchState::Running {
            search.advance(&mut grid);
        }
        assert_eq!(grid.cell(2, 2).total_cost, 4);

        // Backtrack one cell per call until the start is marked.
        for _ in 0..grid.size() * grid.size() {
            search.advance(&mut grid);
        }
        let path_len = (0..3)
            .flat_map(|x| (0..3).map(move |y| (x, y)))
            .filter(|&(x, y)| grid.cell(x, y).on_path)
            .count();
        assert_eq!(path_len, 5);
        assert!(grid.cell(0, 0).on_path);
        assert!(grid.cell(2, 2).on_path);
        assert!(path_len <= search.layers());
    }

    #[test]
    fn visited_totals_never_change() {
        let mut grid = Grid::new(6, WeightMode::Random).unwrap();
        let mut search = Dijkstra::new(None);
        arm(&mut grid, &mut search, (0, 0), (5, 5));

        let mut frozen: Vec<((usize, usize), u32)> = Vec::new();
        while search.state() == SearchState::Running && !search.no_path() {
            search.advance(&mut grid);
            for &((x, y), total) in &frozen {
                assert_eq!(grid.cell(x, y).total_cost, total);
            }
            for x in 0..6 {
                for y in 0..6 {
                    let cell = grid.cell(x, y);
                    if cell.visited && !frozen.iter().any(|&(p, _)| p == (x, y)) {
                        frozen.push(((x, y), cell.total_cost));
                    }
                }
            }
        }
    }

    #[test]
    fn walled_off_end_reports_no_path_steadily() {
        let mut grid = uniform_grid(4);
        // Box in the end cell before designating anything.
        grid.paint_wall(2, 3);
        grid.paint_wall(3, 2);
        let mut search = Dijkstra::new(None);
        arm(&mut grid, &mut search, (0, 0), (3, 3));

        for _ in 0..64 {
            search.advance(&mut grid);
        }
        assert!(search.no_path());
        assert_eq!(search.state(), SearchState::Running);
        // Still resettable and advanceable.
        search.reset();
        assert!(!search.no_path());
        assert_eq!(search.state(), SearchState::AwaitingEndpoints);
    }

    #[test]
    fn frontier_is_deduplicated() {
        let mut grid = uniform_grid(5);
        let mut search = Dijkstra::new(None);
        arm(&mut grid, &mut search, (2, 2), (4, 4));

        // Process one layer; the four neighbors of the start appear once each.
        search.advance(&mut grid);
        let mut seen = search.current.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), search.current.len());
        assert_eq!(search.current.len(), 4);
    }

    #[test]
    fn idle_until_both_endpoints() {
        let mut grid = uniform_grid(3);
        let mut search = Dijkstra::new(None);
        search.reset();
        grid.set_start(0, 0);
        search.endpoints_ready(&mut grid);
        assert_eq!(search.state(), SearchState::AwaitingEndpoints);
        search.advance(&mut grid);
        assert!(!grid.cell(0, 0).visited);
        grid.set_end(2, 2);
        search.endpoints_ready(&mut grid);
        assert_eq!(search.state(), SearchState::Running);
    }
}
