use crate::graph_algorithms::{NodeGraph, NodeState};

/// Kruskal-style construction via component labels: every node starts in its
/// own (negative) component; each call re-scans all pairs, takes the cheapest
/// one spanning two components, and relabels both to a fresh id. No sorted
/// edge list is kept, so already-rejected pairs are rescanned every call.
pub struct Kruskal {
    labels: Vec<i32>,
    next_label: i32,
}

impl Kruskal {
    pub fn new(graph: &NodeGraph) -> Self {
        let mut kruskal = Kruskal {
            labels: Vec::new(),
            next_label: 0,
        };
        kruskal.reset(graph);
        kruskal
    }

    pub fn reset(&mut self, graph: &NodeGraph) {
        self.labels = (0..graph.len()).map(|i| -(i as i32 + 1)).collect();
        self.next_label = 0;
    }

    pub fn is_done(&self, graph: &NodeGraph) -> bool {
        graph.edges.len() + 1 >= graph.len()
    }

    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    pub fn advance(&mut self, graph: &mut NodeGraph) {
        if self.is_done(graph) {
            return;
        }
        let mut min_cost = f32::INFINITY;
        let mut found: Option<(usize, usize)> = None;

        for j in 0..graph.len() {
            for k in j + 1..graph.len() {
                if self.labels[j] == self.labels[k] {
                    continue;
                }
                let cost = graph.distance(j, k);
                if cost < min_cost {
                    min_cost = cost;
                    found = Some((j, k));
                }
            }
        }

        if let Some((a, b)) = found {
            let (la, lb) = (self.labels[a], self.labels[b]);
            for label in &mut self.labels {
                if *label == la || *label == lb {
                    *label = self.next_label;
                }
            }
            self.next_label += 1;
            graph.record_edge(a, b);
        }
    }

    pub fn node_states(&self, graph: &NodeGraph) -> Vec<NodeState> {
        // A node is "in tree" once it has been merged at least once,
        // which its non-negative label records.
        self.labels
            .iter()
            .take(graph.len())
            .map(|&l| if l >= 0 { NodeState::InTree } else { NodeState::Plain })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(n: usize, edges: &[(usize, usize)]) -> Vec<usize> {
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
        (0..n).map(|i| find(&mut parent, i)).collect()
    }

    #[test]
    fn builds_a_spanning_tree() {
        let mut graph = NodeGraph::new(14, 60, 30).unwrap();
        let mut kruskal = Kruskal::new(&graph);
        while !kruskal.is_done(&graph) {
            kruskal.advance(&mut graph);
        }
        assert_eq!(graph.edges.len(), 13);
        let roots = components(14, &graph.edges);
        assert!(roots.iter().all(|&r| r == roots[0]));
    }

    #[test]
    fn equal_labels_mean_mutually_reachable() {
        let mut graph = NodeGraph::new(10, 60, 30).unwrap();
        let mut kruskal = Kruskal::new(&graph);
        for _ in 0..4 {
            kruskal.advance(&mut graph);
            let roots = components(10, &graph.edges);
            for a in 0..10 {
                for b in a + 1..10 {
                    if kruskal.labels()[a] == kruskal.labels()[b] {
                        assert_eq!(roots[a], roots[b]);
                    }
                }
            }
        }
    }

    #[test]
    fn completion_is_idempotent() {
        let mut graph = NodeGraph::new(6, 40, 20).unwrap();
        let mut kruskal = Kruskal::new(&graph);
        for _ in 0..30 {
            kruskal.advance(&mut graph);
        }
        assert_eq!(graph.edges.len(), 5);
    }
}
