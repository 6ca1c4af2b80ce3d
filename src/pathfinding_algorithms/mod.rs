// Automatically generated mod.rs
pub mod dijkstra;
pub mod floyd_warshall;
pub mod grid;

pub use dijkstra::{Dijkstra, SearchState};
pub use floyd_warshall::FloydWarshall;
pub use grid::{Cell, CellState, Grid, GridError, WeightMode, WALL_COST};
