use colored::Colorize;
use rand::Rng;

#[derive(Debug)]
pub enum LayoutError {
    NoNodes,
    FieldTooSmall(usize, usize),
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoNodes => write!(f, "a node graph needs at least one node"),
            Self::FieldTooSmall(w, h) => {
                write!(f, "the point field must be at least 2x2, got {}x{}", w, h)
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Semantic state of one node, produced by the running algorithm and consumed
/// by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Plain,
    InTree,
    Start,
    Candidate,
}

/// N randomly placed points in a width x height space plus the list of edges
/// selected so far. The spanning-tree step machines mutate the edge list;
/// the points are fixed between shuffles.
pub struct NodeGraph {
    pub points: Vec<(f32, f32)>,
    pub edges: Vec<(usize, usize)>,
    width: f32,
    height: f32,
}

impl NodeGraph {
    pub fn new(count: usize, width: usize, height: usize) -> Result<Self, LayoutError> {
        if count < 1 {
            return Err(LayoutError::NoNodes);
        }
        if width < 2 || height < 2 {
            return Err(LayoutError::FieldTooSmall(width, height));
        }
        let mut graph = NodeGraph {
            points: vec![(0.0, 0.0); count],
            edges: Vec::with_capacity(count.saturating_sub(1)),
            width: width as f32,
            height: height as f32,
        };
        graph.shuffle();
        Ok(graph)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Repositions every node at random and forgets all selected edges.
    pub fn shuffle(&mut self) {
        let mut rng = rand::thread_rng();
        for point in &mut self.points {
            *point = (
                rng.gen_range(0.0..self.width),
                rng.gen_range(0.0..self.height),
            );
        }
        self.edges.clear();
    }

    pub fn distance(&self, a: usize, b: usize) -> f32 {
        let (ax, ay) = self.points[a];
        let (bx, by) = self.points[b];
        ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
    }

    pub fn record_edge(&mut self, a: usize, b: usize) {
        self.edges.push((a, b));
    }

    /// Draws edges as dotted segments, then nodes on top, into one buffer.
    pub fn render(&self, title: &str, states: &[NodeState]) -> String {
        let cols = self.width as usize;
        let rows = self.height as usize;
        let mut cells: Vec<Vec<Option<NodeState>>> = vec![vec![None; cols]; rows];
        let mut edge_cells: Vec<Vec<bool>> = vec![vec![false; cols]; rows];

        for &(a, b) in &self.edges {
            let (ax, ay) = self.points[a];
            let (bx, by) = self.points[b];
            let steps = (ax - bx).abs().max((ay - by).abs()).ceil() as usize + 1;
            for s in 0..=steps {
                let t = s as f32 / steps as f32;
                let x = (ax + (bx - ax) * t) as usize;
                let y = (ay + (by - ay) * t) as usize;
                if y < rows && x < cols {
                    edge_cells[y][x] = true;
                }
            }
        }
        for (i, &(x, y)) in self.points.iter().enumerate() {
            let (cx, cy) = (x as usize, y as usize);
            if cy < rows && cx < cols {
                cells[cy][cx] = Some(states.get(i).copied().unwrap_or(NodeState::Plain));
            }
        }

        let mut buffer = String::new();
        buffer.push_str("\x1B[?25l");
        buffer.push_str("\x1B[H");
        buffer.push_str("\x1B[J");
        buffer.push_str(&format!("{}\n", title));
        for y in 0..rows {
            for x in 0..cols {
                match cells[y][x] {
                    Some(NodeState::Plain) => buffer += &format!("{}", "o".truecolor(244, 44, 36)),
                    Some(NodeState::InTree) => buffer += &format!("{}", "o".yellow()),
                    Some(NodeState::Start) => buffer += &format!("{}", "O".bright_yellow()),
                    Some(NodeState::Candidate) => buffer += &format!("{}", "o".white()),
                    None if edge_cells[y][x] => buffer += &format!("{}", ".".white()),
                    None => buffer.push(' '),
                }
            }
            buffer.push('\n');
        }
        buffer.push_str("\x1B[?25h");
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_clears_edges_and_keeps_count() {
        let mut graph = NodeGraph::new(12, 40, 20).unwrap();
        graph.record_edge(0, 1);
        graph.shuffle();
        assert!(graph.edges.is_empty());
        assert_eq!(graph.len(), 12);
        for &(x, y) in &graph.points {
            assert!(x >= 0.0 && x < 40.0);
            assert!(y >= 0.0 && y < 20.0);
        }
    }

    #[test]
    fn rejects_empty_graph() {
        assert!(NodeGraph::new(0, 40, 20).is_err());
    }

    #[test]
    fn distance_is_symmetric() {
        let graph = NodeGraph::new(4, 40, 20).unwrap();
        assert_eq!(graph.distance(0, 3), graph.distance(3, 0));
        assert_eq!(graph.distance(2, 2), 0.0);
    }
}
