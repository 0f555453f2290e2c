//! Helpers over weighted trees stored as `UnGraph<_, f64>`.
//!
//! Edges can be logically removed through a mask indexed by `EdgeIndex`, which
//! is how both cut trees query components without mutating the tree.

use std::collections::VecDeque;

use itertools::Itertools;
use petgraph::algo::astar;
use petgraph::graph::{EdgeIndex, EdgeReference, NodeIndex, UnGraph};
use petgraph::visit::{Bfs, EdgeFiltered, EdgeRef};

/// Marks every vertex connected to `start` once the edges flagged in
/// `removed` are taken out of the tree.
pub(crate) fn component_without<N>(
    tree: &UnGraph<N, f64>,
    removed: &[bool],
    start: NodeIndex,
) -> Vec<bool> {
    let filtered = EdgeFiltered::from_fn(tree, |edge: EdgeReference<'_, f64>| {
        !removed[edge.id().index()]
    });
    let mut component = vec![false; tree.node_count()];
    let mut bfs = Bfs::new(&filtered, start);
    while let Some(node) = bfs.next(&filtered) {
        component[node.index()] = true;
    }
    component
}

/// The lightest edge on the path from `from` to `to`, ignoring removed edges.
///
/// Ties go to the edge closest to `from`. `None` when the two vertices are not
/// connected or coincide.
pub(crate) fn cheapest_edge_on_path<N>(
    tree: &UnGraph<N, f64>,
    removed: &[bool],
    from: NodeIndex,
    to: NodeIndex,
) -> Option<EdgeIndex> {
    let filtered = EdgeFiltered::from_fn(tree, |edge: EdgeReference<'_, f64>| {
        !removed[edge.id().index()]
    });
    let (_, path) = astar(&filtered, from, |node| node == to, |_| 1usize, |_| 0usize)?;

    path.iter()
        .tuple_windows()
        .filter_map(|(&a, &b)| tree.find_edge(a, b))
        .min_by(|&a, &b| tree[a].total_cmp(&tree[b]))
}

/// Weight of the lightest edge on the path from `root` to every vertex.
///
/// `root` itself and unreachable vertices get `f64::INFINITY`.
pub(crate) fn cheapest_edges_from<N>(tree: &UnGraph<N, f64>, root: NodeIndex) -> Vec<f64> {
    let mut cheapest = vec![f64::INFINITY; tree.node_count()];
    let mut visited = vec![false; tree.node_count()];
    let mut queue = VecDeque::new();
    visited[root.index()] = true;
    queue.push_back(root);

    while let Some(node) = queue.pop_front() {
        for edge in tree.edges(node) {
            let next = edge.target();
            if !visited[next.index()] {
                visited[next.index()] = true;
                cheapest[next.index()] = cheapest[node.index()].min(*edge.weight());
                queue.push_back(next);
            }
        }
    }

    cheapest
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 - 1 - 2 - 3 with a branch 1 - 4
    fn small_tree() -> UnGraph<(), f64> {
        UnGraph::from_edges(&[(0, 1, 5.0), (1, 2, 2.0), (2, 3, 4.0), (1, 4, 1.0)])
    }

    #[test]
    fn component_after_removal() {
        let tree = small_tree();
        let mut removed = vec![false; tree.edge_count()];

        let all = component_without(&tree, &removed, NodeIndex::new(3));
        assert!(all.iter().all(|&v| v));

        removed[1] = true;
        let side = component_without(&tree, &removed, NodeIndex::new(0));
        assert_eq!(side, vec![true, true, false, false, true]);
    }

    #[test]
    fn cheapest_edge_between_vertices() {
        let tree = small_tree();
        let mut removed = vec![false; tree.edge_count()];

        assert_eq!(
            cheapest_edge_on_path(&tree, &removed, NodeIndex::new(0), NodeIndex::new(3)),
            Some(EdgeIndex::new(1))
        );
        assert_eq!(
            cheapest_edge_on_path(&tree, &removed, NodeIndex::new(3), NodeIndex::new(4)),
            Some(EdgeIndex::new(3))
        );
        assert_eq!(
            cheapest_edge_on_path(&tree, &removed, NodeIndex::new(2), NodeIndex::new(2)),
            None
        );

        removed[1] = true;
        assert_eq!(
            cheapest_edge_on_path(&tree, &removed, NodeIndex::new(0), NodeIndex::new(3)),
            None
        );
    }

    #[test]
    fn ties_prefer_the_first_edge() {
        let tree = UnGraph::<(), f64>::from_edges(&[(0, 1, 3.0), (1, 2, 3.0)]);
        let removed = vec![false; 2];
        assert_eq!(
            cheapest_edge_on_path(&tree, &removed, NodeIndex::new(0), NodeIndex::new(2)),
            Some(EdgeIndex::new(0))
        );
        assert_eq!(
            cheapest_edge_on_path(&tree, &removed, NodeIndex::new(2), NodeIndex::new(0)),
            Some(EdgeIndex::new(1))
        );
    }

    #[test]
    fn cheapest_edges_from_root() {
        let tree = small_tree();
        let cheapest = cheapest_edges_from(&tree, NodeIndex::new(0));
        assert_eq!(cheapest, vec![f64::INFINITY, 5.0, 2.0, 2.0, 1.0]);
    }
}
