use std::error::Error;
use std::sync::mpsc::Sender;

use colored::Colorize;
use crossterm::event::KeyCode;

use crate::audio::Signal;
use crate::graph_algorithms::{Kruskal, NodeGraph, Prim};
use crate::pathfinding_algorithms::{Dijkstra, FloydWarshall, Grid, SearchState, WeightMode};
use crate::sorting_algorithms::{InsertionSort, MergeSort, QuickSort, SelectionSort, SortChart};

const CHART_LEN: usize = 48;
const CHART_HEIGHT: i32 = 24;
const NODE_COUNT: usize = 40;
const FIELD_WIDTH: usize = 90;
const FIELD_HEIGHT: usize = 30;
const GRID_SIZE: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortAlgo {
    Insertion,
    Selection,
    Quick,
    Merge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeAlgo {
    Prim,
    Kruskal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAlgo {
    Layered,
    AllPairs,
}

/// The one discrete mode selector. Every frame exactly one arm of this enum
/// decides which engine steps and which view renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Sort(SortAlgo),
    Tree(TreeAlgo),
    Path(PathAlgo),
}

/// Frame-scoped input snapshot handed down by the frame loop.
#[derive(Debug, Default)]
pub struct FrameInput {
    pub key: Option<KeyCode>,
}

/// Owns the mode selector and every engine; replaces any notion of ambient
/// globals. The frame loop calls `tick` once per frame and prints whatever
/// `render` returns.
pub struct App {
    pub mode: Mode,
    chart: SortChart,
    insertion: InsertionSort,
    selection: SelectionSort,
    quick: QuickSort,
    merge: MergeSort,
    graph: NodeGraph,
    prim: Prim,
    kruskal: Kruskal,
    candidate: usize,
    grid: Grid,
    dijkstra: Dijkstra,
    floyd: FloydWarshall,
    cursor: (usize, usize),
}

impl App {
    pub fn new(audio: Option<Sender<Signal>>) -> Result<Self, Box<dyn Error>> {
        let chart = SortChart::new(CHART_LEN, CHART_HEIGHT, audio.clone())?;
        let graph = NodeGraph::new(NODE_COUNT, FIELD_WIDTH, FIELD_HEIGHT)?;
        let grid = Grid::new(GRID_SIZE, WeightMode::Uniform)?;
        let prim = Prim::new(&graph);
        let kruskal = Kruskal::new(&graph);
        let mut dijkstra = Dijkstra::new(audio);
        dijkstra.reset();
        Ok(App {
            mode: Mode::Menu,
            chart,
            insertion: InsertionSort::new(),
            selection: SelectionSort::new(),
            quick: QuickSort::new(),
            merge: MergeSort::new(),
            graph,
            prim,
            kruskal,
            candidate: 0,
            grid,
            dijkstra,
            floyd: FloydWarshall::new(),
            cursor: (0, 0),
        })
    }

    /// One frame: apply the input snapshot, then advance the active engine
    /// by exactly one bounded step.
    pub fn tick(&mut self, input: &FrameInput) {
        if let Some(key) = input.key {
            self.handle_key(key);
        }
        self.advance();
    }

    /// Quicksort does a whole partition per step, so it gets a slower frame
    /// rate than the per-comparison sorts.
    pub fn frame_millis(&self) -> u64 {
        match self.mode {
            Mode::Sort(SortAlgo::Quick) => 100,
            Mode::Sort(_) => 16,
            _ => 33,
        }
    }

    fn advance(&mut self) {
        match self.mode {
            Mode::Menu => {}
            Mode::Sort(SortAlgo::Insertion) => self.insertion.advance(&mut self.chart),
            Mode::Sort(SortAlgo::Selection) => self.selection.advance(&mut self.chart),
            Mode::Sort(SortAlgo::Quick) => self.quick.advance(&mut self.chart),
            Mode::Sort(SortAlgo::Merge) => self.merge.advance(&mut self.chart),
            Mode::Tree(TreeAlgo::Prim) => self.prim.advance(&mut self.graph),
            Mode::Tree(TreeAlgo::Kruskal) => self.kruskal.advance(&mut self.graph),
            Mode::Path(PathAlgo::Layered) => self.dijkstra.advance(&mut self.grid),
            Mode::Path(PathAlgo::AllPairs) => self.floyd.advance(&mut self.grid),
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if key == KeyCode::Backspace {
            self.reset_all();
            self.mode = Mode::Menu;
            return;
        }
        match self.mode {
            Mode::Menu => self.select_mode(key),
            Mode::Sort(algo) => self.sort_key(algo, key),
            Mode::Tree(algo) => self.tree_key(algo, key),
            Mode::Path(algo) => self.path_key(algo, key),
        }
    }

    fn select_mode(&mut self, key: KeyCode) {
        self.mode = match key {
            KeyCode::Char('1') => Mode::Sort(SortAlgo::Insertion),
            KeyCode::Char('2') => Mode::Sort(SortAlgo::Selection),
            KeyCode::Char('3') => Mode::Sort(SortAlgo::Quick),
            KeyCode::Char('4') => Mode::Sort(SortAlgo::Merge),
            KeyCode::Char('5') => Mode::Tree(TreeAlgo::Prim),
            KeyCode::Char('6') => Mode::Tree(TreeAlgo::Kruskal),
            KeyCode::Char('7') => Mode::Path(PathAlgo::Layered),
            KeyCode::Char('8') => Mode::Path(PathAlgo::AllPairs),
            _ => Mode::Menu,
        };
    }

    fn sort_key(&mut self, algo: SortAlgo, key: KeyCode) {
        match key {
            KeyCode::Char('r') => self.reset_sorts(),
            KeyCode::Enter | KeyCode::Char(' ') => match algo {
                SortAlgo::Insertion => self.insertion.begin(),
                SortAlgo::Selection => self.selection.begin(),
                SortAlgo::Quick => self.quick.begin(&self.chart),
                SortAlgo::Merge => self.merge.begin(),
            },
            _ => {}
        }
    }

    fn tree_key(&mut self, algo: TreeAlgo, key: KeyCode) {
        match key {
            KeyCode::Char('r') => self.reset_trees(),
            KeyCode::Left => {
                self.candidate = (self.candidate + self.graph.len() - 1) % self.graph.len();
            }
            KeyCode::Right => {
                self.candidate = (self.candidate + 1) % self.graph.len();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if algo == TreeAlgo::Prim {
                    self.prim.choose_start(self.candidate);
                }
            }
            _ => {}
        }
    }

    fn path_key(&mut self, algo: PathAlgo, key: KeyCode) {
        let size = self.grid.size();
        match key {
            KeyCode::Char('r') => self.reset_paths(),
            KeyCode::Char('t') => {
                self.grid.toggle_weight();
                self.reset_paths();
            }
            KeyCode::Left => self.cursor.0 = (self.cursor.0 + size - 1) % size,
            KeyCode::Right => self.cursor.0 = (self.cursor.0 + 1) % size,
            KeyCode::Up => self.cursor.1 = (self.cursor.1 + size - 1) % size,
            KeyCode::Down => self.cursor.1 = (self.cursor.1 + 1) % size,
            KeyCode::Char('z') => {
                self.grid.set_start(self.cursor.0, self.cursor.1);
                self.dijkstra.endpoints_ready(&mut self.grid);
            }
            KeyCode::Char('x') => {
                self.grid.set_end(self.cursor.0, self.cursor.1);
                self.dijkstra.endpoints_ready(&mut self.grid);
            }
            KeyCode::Char('w') => self.grid.paint_wall(self.cursor.0, self.cursor.1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if algo == PathAlgo::AllPairs {
                    self.floyd.begin(&mut self.grid);
                }
            }
            _ => {}
        }
    }

    fn reset_sorts(&mut self) {
        self.chart.randomize();
        self.insertion.reset();
        self.selection.reset();
        self.quick.reset();
        self.merge.reset();
    }

    fn reset_trees(&mut self) {
        self.graph.shuffle();
        self.prim.reset(&self.graph);
        self.kruskal.reset(&self.graph);
        self.candidate = 0;
    }

    fn reset_paths(&mut self) {
        self.grid.assign_cost();
        self.dijkstra.reset();
        self.floyd.reset();
        self.cursor = (0, 0);
    }

    fn reset_all(&mut self) {
        self.reset_sorts();
        self.reset_trees();
        self.reset_paths();
    }

    pub fn render(&self) -> String {
        match self.mode {
            Mode::Menu => self.render_menu(),
            Mode::Sort(algo) => self.render_sort(algo),
            Mode::Tree(algo) => self.render_tree(algo),
            Mode::Path(algo) => self.render_path(algo),
        }
    }

    fn render_menu(&self) -> String {
        let mut buffer = String::new();
        buffer.push_str("\x1B[?25l\x1B[H\x1B[J");
        buffer += &format!("{}\n\n", "STEPVIZ".bold());
        buffer += &format!("{}\n", "SORT".underline());
        buffer.push_str("  1  insertion sort\n");
        buffer.push_str("  2  selection sort\n");
        buffer.push_str("  3  quick sort\n");
        buffer.push_str("  4  merge sort\n\n");
        buffer += &format!("{}\n", "SPANNING TREE".underline());
        buffer.push_str("  5  prim's algorithm\n");
        buffer.push_str("  6  kruskal's algorithm\n\n");
        buffer += &format!("{}\n", "SHORTEST PATH".underline());
        buffer.push_str("  7  dijkstra's algorithm\n");
        buffer.push_str("  8  floyd-warshall\n\n");
        buffer.push_str("backspace: menu   r: reset   enter: begin   esc: quit\n");
        buffer.push_str("\x1B[?25h");
        buffer
    }

    fn render_sort(&self, algo: SortAlgo) -> String {
        let (title, done) = match algo {
            SortAlgo::Insertion => ("Insertion Sort", self.insertion.is_done(&self.chart)),
            SortAlgo::Selection => ("Selection Sort", self.selection.is_done(&self.chart)),
            SortAlgo::Quick => ("Quick Sort", self.quick.is_done()),
            SortAlgo::Merge => ("Merge Sort", self.merge.is_done(&self.chart)),
        };
        let mut buffer = self.chart.render(title);
        if done {
            buffer += &format!("{}\n", "sorted".green());
        } else {
            buffer.push_str("enter: begin   r: reshuffle\n");
        }
        buffer
    }

    fn render_tree(&self, algo: TreeAlgo) -> String {
        let (title, states, done) = match algo {
            TreeAlgo::Prim => (
                "Prim's Algorithm",
                self.prim.node_states(&self.graph, Some(self.candidate)),
                self.prim.is_done(),
            ),
            TreeAlgo::Kruskal => (
                "Kruskal's Algorithm",
                self.kruskal.node_states(&self.graph),
                self.kruskal.is_done(&self.graph),
            ),
        };
        let mut buffer = self.graph.render(title, &states);
        if done {
            buffer += &format!("{}\n", "tree complete".green());
        } else if algo == TreeAlgo::Prim && !self.prim.has_started() {
            buffer.push_str("left/right: pick start node   enter: confirm\n");
        } else {
            buffer += &format!("edges: {}\n", self.graph.edges.len());
        }
        buffer
    }

    fn render_path(&self, algo: PathAlgo) -> String {
        match algo {
            PathAlgo::Layered => {
                let show_costs = self.grid.weight_mode != WeightMode::Uniform;
                let mut buffer =
                    self.grid
                        .render("Dijkstra's Algorithm", self.cursor, show_costs);
                match self.dijkstra.state() {
                    SearchState::Idle | SearchState::AwaitingEndpoints => {
                        buffer.push_str("arrows: move   z: start   x: end   w: wall   t: weights\n");
                    }
                    SearchState::Running if self.dijkstra.no_path() => {
                        buffer += &format!("{}\n", "CANNOT FIND PATH".red().bold());
                    }
                    SearchState::Running => {
                        buffer += &format!("layer: {}\n", self.dijkstra.layers());
                    }
                    SearchState::Finished => {
                        buffer += &format!("{}\n", "path found".green());
                    }
                }
                buffer
            }
            PathAlgo::AllPairs => {
                if self.floyd.has_started() {
                    let mut buffer = self.grid.render_matrix(
                        "Floyd-Warshall",
                        self.floyd.cursor(),
                        self.floyd.intermediate(),
                    );
                    if self.floyd.is_done() {
                        buffer += &format!("{}\n", "all pairs relaxed".green());
                    }
                    buffer
                } else {
                    let mut buffer =
                        self.grid.render("Floyd-Warshall", self.cursor, true);
                    buffer.push_str("enter: begin   t: weights   r: reassign costs\n");
                    buffer
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> FrameInput {
        FrameInput {
            key: Some(KeyCode::Char(c)),
        }
    }

    #[test]
    fn menu_selects_and_backspace_returns() {
        let mut app = App::new(None).unwrap();
        app.tick(&key('3'));
        assert_eq!(app.mode, Mode::Sort(SortAlgo::Quick));
        app.tick(&FrameInput {
            key: Some(KeyCode::Backspace),
        });
        assert_eq!(app.mode, Mode::Menu);
    }

    #[test]
    fn sort_runs_to_completion_through_ticks() {
        let mut app = App::new(None).unwrap();
        app.tick(&key('1'));
        app.tick(&FrameInput {
            key: Some(KeyCode::Enter),
        });
        for _ in 0..CHART_LEN * CHART_LEN {
            app.tick(&FrameInput::default());
        }
        assert!(app.insertion.is_done(&app.chart));
        assert!(app.chart.is_sorted());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut app = App::new(None).unwrap();
        app.tick(&key('9'));
        assert_eq!(app.mode, Mode::Menu);
        app.tick(&key('?'));
        assert_eq!(app.mode, Mode::Menu);
    }

    #[test]
    fn grid_designations_arm_the_search() {
        let mut app = App::new(None).unwrap();
        app.tick(&key('7'));
        app.tick(&key('z'));
        assert_eq!(app.dijkstra.state(), SearchState::AwaitingEndpoints);
        app.tick(&FrameInput {
            key: Some(KeyCode::Right),
        });
        app.tick(&FrameInput {
            key: Some(KeyCode::Down),
        });
        app.tick(&key('x'));
        assert_eq!(app.dijkstra.state(), SearchState::Running);
    }
}
