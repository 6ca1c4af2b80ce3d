pub mod kruskal;
pub mod node_graph;
pub mod prim;

pub use kruskal::Kruskal;
pub use node_graph::{LayoutError, NodeGraph, NodeState};
pub use prim::Prim;
