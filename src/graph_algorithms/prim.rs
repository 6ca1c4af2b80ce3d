use crate::graph_algorithms::{NodeGraph, NodeState};
use crate::sequence::Sequence;

/// Prim's construction, one edge per call. The two node sets are scanned in
/// full every advance; the globally cheapest (in-tree, remaining) pair wins,
/// first found on ties. Intentionally naive, bounded by the node count.
pub struct Prim {
    in_tree: Sequence<usize>,
    remaining: Sequence<usize>,
    start: Option<usize>,
}

impl Prim {
    pub fn new(graph: &NodeGraph) -> Self {
        let mut prim = Prim {
            in_tree: Sequence::new(),
            remaining: Sequence::new(),
            start: None,
        };
        prim.reset(graph);
        prim
    }

    pub fn reset(&mut self, graph: &NodeGraph) {
        self.in_tree.clear();
        self.remaining.clear();
        for i in 0..graph.len() {
            self.remaining.insert_at_end(i);
        }
        self.start = None;
    }

    /// Accepts the user-chosen start node. Ignored once growth has begun.
    pub fn choose_start(&mut self, index: usize) {
        if self.start.is_none() && self.remaining.contains(&index) {
            self.remaining.delete_item(&index);
            self.in_tree.insert_at_end(index);
            self.start = Some(index);
        }
    }

    pub fn has_started(&self) -> bool {
        self.start.is_some()
    }

    pub fn is_done(&self) -> bool {
        self.start.is_some() && self.remaining.is_empty()
    }

    pub fn advance(&mut self, graph: &mut NodeGraph) {
        if self.in_tree.is_empty() || self.remaining.is_empty() {
            return;
        }
        let mut min_cost = f32::INFINITY;
        let mut new_node = None;
        let mut last_node = 0;

        for j in 0..self.in_tree.len() {
            let x = match self.in_tree.item_at(j) {
                Some(&x) => x,
                None => continue,
            };
            for k in 0..self.remaining.len() {
                let y = match self.remaining.item_at(k) {
                    Some(&y) => y,
                    None => continue,
                };
                let cost = graph.distance(x, y);
                if cost < min_cost {
                    min_cost = cost;
                    new_node = Some(y);
                    last_node = x;
                }
            }
        }

        if let Some(node) = new_node {
            self.in_tree.insert_at_start(node);
            self.remaining.delete_item(&node);
            graph.record_edge(last_node, node);
        }
    }

    pub fn node_states(&self, graph: &NodeGraph, candidate: Option<usize>) -> Vec<NodeState> {
        let mut states = vec![NodeState::Plain; graph.len()];
        for &i in self.in_tree.iter() {
            states[i] = NodeState::InTree;
        }
        if let Some(start) = self.start {
            states[start] = NodeState::Start;
        }
        if let Some(c) = candidate {
            if self.start.is_none() && c < states.len() {
                states[c] = NodeState::Candidate;
            }
        }
        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_spanning_tree(edge_count: usize, n: usize, edges: &[(usize, usize)]) {
        assert_eq!(edge_count, n - 1);
        // Union-find over the recorded edges: no cycles, one component.
        let mut parent: Vec<usize> = (0..n).collect();
        fn find(parent: &mut Vec<usize>, mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }
        for &(a, b) in edges {
            let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
            assert_ne!(ra, rb, "selected edges formed a cycle");
            parent[ra] = rb;
        }
        let root = find(&mut parent, 0);
        for i in 1..n {
            assert_eq!(find(&mut parent, i), root, "tree is not connected");
        }
    }

    #[test]
    fn builds_a_spanning_tree() {
        let mut graph = NodeGraph::new(16, 60, 30).unwrap();
        let mut prim = Prim::new(&graph);
        prim.choose_start(3);
        while !prim.is_done() {
            prim.advance(&mut graph);
        }
        assert_spanning_tree(graph.edges.len(), 16, &graph.edges);
    }

    #[test]
    fn idle_before_start_chosen() {
        let mut graph = NodeGraph::new(8, 40, 20).unwrap();
        let mut prim = Prim::new(&graph);
        prim.advance(&mut graph);
        assert!(graph.edges.is_empty());
        assert!(!prim.has_started());
    }

    #[test]
    fn single_node_finishes_without_edges() {
        let mut graph = NodeGraph::new(1, 40, 20).unwrap();
        let mut prim = Prim::new(&graph);
        prim.choose_start(0);
        assert!(prim.is_done());
        prim.advance(&mut graph);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn completion_is_idempotent() {
        let mut graph = NodeGraph::new(5, 40, 20).unwrap();
        let mut prim = Prim::new(&graph);
        prim.choose_start(0);
        for _ in 0..20 {
            prim.advance(&mut graph);
        }
        assert_eq!(graph.edges.len(), 4);
    }
}
