//! Padberg-Rao odd minimum cut-sets.
//!
//! Given an undirected graph and an even set `T` of "odd" vertices, find the
//! cheapest cut whose source side holds an odd number of `T`-vertices. Some
//! Gomory-Hu tree edge always induces such a cut, so it is enough to scan the
//! tree: either all of it, or a tree compressed to one cluster per odd vertex.

use std::cmp::Ordering;

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use tracing::debug;

use crate::config::FlowConfig;
use crate::error::{FlowError, Result};
use crate::flow::cut::Cut;
use crate::flow::gomory_hu::GomoryHuTree;
use crate::flow::graph::FlowGraph;
use crate::flow::network::FlowNetwork;
use crate::flow::tree::{cheapest_edge_on_path, component_without};

/// Solver for odd minimum cut-sets of one graph.
///
/// The Gomory-Hu tree is built on the first [`solve`](Self::solve) and reused
/// for every later call.
pub struct PadbergRaoOddMinimumCutset<G: FlowGraph> {
    network: FlowNetwork<G>,
    config: FlowConfig,
    tree: Option<GomoryHuTree<G>>,
}

impl<G: FlowGraph> PadbergRaoOddMinimumCutset<G> {
    pub fn new(graph: G) -> Result<Self> {
        Self::with_config(graph, FlowConfig::default())
    }

    pub fn with_config(graph: G, config: FlowConfig) -> Result<Self> {
        config.validate()?;
        let network = FlowNetwork::build(graph)?;
        if network.is_directed() {
            return Err(FlowError::DirectedGraph);
        }
        Ok(Self {
            network,
            config,
            tree: None,
        })
    }

    /// The cached Gomory-Hu tree, once a solve has built it.
    pub fn gomory_hu_tree(&self) -> Option<&GomoryHuTree<G>> {
        self.tree.as_ref()
    }

    /// Finds a minimum weight cut with an odd number of `odd_vertices` on its
    /// source side.
    ///
    /// Duplicates in `odd_vertices` are ignored. The set must be non-empty, of
    /// even size and contained in the graph; all of that is checked before any
    /// flow is computed.
    pub fn solve(
        &mut self,
        odd_vertices: &[G::NodeId],
        use_compression: bool,
    ) -> Result<Cut<G::NodeId, G::EdgeId>> {
        if odd_vertices.is_empty() {
            return Err(FlowError::EmptyOddSet);
        }
        let mut odd = odd_vertices
            .iter()
            .map(|&v| self.network.index_of(v))
            .collect::<Result<Vec<usize>>>()?;
        odd.sort_unstable();
        odd.dedup();
        if odd.len() % 2 == 1 {
            return Err(FlowError::OddCardinality(odd.len()));
        }

        let tree = match self.tree.take() {
            Some(tree) => tree,
            None => GomoryHuTree::from_network(self.network.clone(), self.config)?,
        };
        let tree = self.tree.insert(tree);

        let mut is_odd = vec![false; self.network.vertex_count()];
        for &v in &odd {
            is_odd[v] = true;
        }

        let (weight, source_side) = if use_compression {
            compressed_minimum(tree.tree(), &odd, &self.config)?
        } else {
            full_minimum(tree.tree(), &is_odd, &self.config)
        }
        .ok_or_else(|| {
            FlowError::InternalError("no tree edge separates the odd vertices".into())
        })?;

        debug!(odd = odd.len(), use_compression, weight, "odd minimum cut-set");
        Ok(tree.cut_from_mask(&source_side, weight))
    }
}

type Candidate = Option<(f64, Vec<bool>)>;

fn improves(candidate: &Candidate, weight: f64, config: &FlowConfig) -> bool {
    match candidate {
        Some((best, _)) => config.compare(weight, *best) == Ordering::Less,
        None => true,
    }
}

/// Scans every tree edge.
fn full_minimum<N>(tree: &UnGraph<N, f64>, is_odd: &[bool], config: &FlowConfig) -> Candidate {
    let mut removed = vec![false; tree.edge_count()];
    let mut best = None;

    for edge in tree.edge_indices() {
        let weight = tree[edge];
        if !improves(&best, weight, config) {
            continue;
        }
        let Some((endpoint, _)) = tree.edge_endpoints(edge) else {
            continue;
        };
        removed[edge.index()] = true;
        let side = component_without(tree, &removed, endpoint);
        removed[edge.index()] = false;

        let odd_count = side.iter().zip(is_odd).filter(|&(&s, &o)| s && o).count();
        if odd_count % 2 == 1 {
            best = Some((weight, side));
        }
    }

    best
}

/// Splits the tree into one cluster per odd vertex and scans only the edges
/// between clusters.
fn compressed_minimum<N>(
    tree: &UnGraph<N, f64>,
    odd: &[usize],
    config: &FlowConfig,
) -> Result<Candidate> {
    let mut removed = vec![false; tree.edge_count()];
    let mut cuts: Vec<EdgeIndex> = Vec::with_capacity(odd.len().saturating_sub(1));

    // every pending cluster is the odd vertex list of one component
    let mut pending = vec![odd.to_vec()];
    while let Some(cluster) = pending.pop() {
        if cluster.len() < 2 {
            continue;
        }
        let (a, b) = (NodeIndex::new(cluster[0]), NodeIndex::new(cluster[1]));
        let edge = cheapest_edge_on_path(tree, &removed, a, b).ok_or_else(|| {
            FlowError::InternalError(format!("odd vertices {a:?} and {b:?} are not connected"))
        })?;
        removed[edge.index()] = true;
        cuts.push(edge);

        let side = component_without(tree, &removed, a);
        let (head, rest): (Vec<usize>, Vec<usize>) = cluster.into_iter().partition(|&v| side[v]);
        pending.push(head);
        pending.push(rest);
    }

    // contract every cluster to a single composite vertex
    let n = tree.node_count();
    let mut cluster_of = vec![usize::MAX; n];
    let mut clusters = 0;
    for v in 0..n {
        if cluster_of[v] != usize::MAX {
            continue;
        }
        let component = component_without(tree, &removed, NodeIndex::new(v));
        for (u, _) in component.iter().enumerate().filter(|&(_, &inside)| inside) {
            cluster_of[u] = clusters;
        }
        clusters += 1;
    }
    debug!(clusters, composite_edges = cuts.len(), "compressed gomory-hu tree");

    let mut composite = UnGraph::<(), f64>::with_capacity(clusters, cuts.len());
    for _ in 0..clusters {
        composite.add_node(());
    }
    for &edge in &cuts {
        let (a, b) = tree
            .edge_endpoints(edge)
            .ok_or_else(|| FlowError::InternalError(format!("missing tree edge {edge:?}")))?;
        composite.add_edge(
            NodeIndex::new(cluster_of[a.index()]),
            NodeIndex::new(cluster_of[b.index()]),
            tree[edge],
        );
    }

    // each cluster holds exactly one odd vertex
    let is_odd_cluster = vec![true; clusters];
    Ok(full_minimum(&composite, &is_odd_cluster, config).map(|(weight, side)| {
        let source_side = cluster_of.iter().map(|&c| side[c]).collect();
        (weight, source_side)
    }))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;
    use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
    use petgraph::visit::EdgeRef;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use crate::error::FlowError;
    use crate::flow::odd_cut::PadbergRaoOddMinimumCutset;

    fn cycle() -> UnGraph<(), u32> {
        UnGraph::from_edges(&[(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 0, 1)])
    }

    fn brute_force(graph: &UnGraph<(), f64>, odd: &[usize]) -> f64 {
        let n = graph.node_count();
        (1..(1u32 << n) - 1)
            .filter(|mask| odd.iter().filter(|&&v| mask & (1 << v) != 0).count() % 2 == 1)
            .map(|mask| {
                graph
                    .edge_references()
                    .filter(|e| {
                        let a = mask & (1 << e.source().index()) != 0;
                        let b = mask & (1 << e.target().index()) != 0;
                        a != b
                    })
                    .map(|e| *e.weight())
                    .sum::<f64>()
            })
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn four_cycle() {
        let graph = cycle();
        let odd: Vec<NodeIndex> = (0..4).map(NodeIndex::new).collect();
        let mut solver = PadbergRaoOddMinimumCutset::new(&graph).unwrap();

        for use_compression in [false, true] {
            let cut = solver.solve(&odd, use_compression).unwrap();
            assert_abs_diff_eq!(cut.weight, 2.0);
            assert_eq!(cut.cut_set.len(), 2);
            assert_eq!(cut.source_set.len() % 2, 1);
        }
    }

    #[test]
    fn tree_is_built_once() {
        let graph = cycle();
        let mut solver = PadbergRaoOddMinimumCutset::new(&graph).unwrap();
        assert!(solver.gomory_hu_tree().is_none());

        let pair = [NodeIndex::new(0), NodeIndex::new(2)];
        let first = solver.solve(&pair, false).unwrap();
        assert!(solver.gomory_hu_tree().is_some());
        let second = solver.solve(&pair, true).unwrap();
        assert_eq!(first.weight, second.weight);
    }

    #[test]
    fn duplicates_are_ignored() {
        let graph = cycle();
        let mut solver = PadbergRaoOddMinimumCutset::new(&graph).unwrap();
        let cut = solver
            .solve(&[NodeIndex::new(1), NodeIndex::new(1), NodeIndex::new(3)], true)
            .unwrap();
        assert_abs_diff_eq!(cut.weight, 2.0);
    }

    #[test]
    fn preconditions_fail_before_tree_work() {
        let graph = cycle();
        let mut solver = PadbergRaoOddMinimumCutset::new(&graph).unwrap();

        assert_eq!(solver.solve(&[], false), Err(FlowError::EmptyOddSet));
        assert_eq!(
            solver.solve(&[NodeIndex::new(0), NodeIndex::new(1), NodeIndex::new(2)], true),
            Err(FlowError::OddCardinality(3))
        );
        assert_eq!(
            solver.solve(&[NodeIndex::new(0), NodeIndex::new(42)], false),
            Err(FlowError::VertexNotFound(42))
        );
        assert!(solver.gomory_hu_tree().is_none());

        let directed = DiGraph::<(), u32>::from_edges(&[(0, 1, 1)]);
        assert!(matches!(
            PadbergRaoOddMinimumCutset::new(&directed),
            Err(FlowError::DirectedGraph)
        ));
    }

    #[test]
    fn random_graphs_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..80 {
            let n = rng.gen_range(2..=8);
            let mut graph = UnGraph::<(), f64>::new_undirected();
            let nodes: Vec<NodeIndex> = (0..n).map(|_| graph.add_node(())).collect();
            for (&u, &v) in nodes.iter().tuple_combinations() {
                if rng.gen_bool(0.5) {
                    graph.add_edge(u, v, rng.gen_range(1..8) as f64);
                }
            }

            let mut indices: Vec<usize> = (0..n).collect();
            indices.shuffle(&mut rng);
            let size = 2 * rng.gen_range(1..=n / 2);
            let odd: Vec<usize> = indices[..size].to_vec();
            let odd_nodes: Vec<NodeIndex> = odd.iter().map(|&v| NodeIndex::new(v)).collect();
            let expected = brute_force(&graph, &odd);

            let mut solver = PadbergRaoOddMinimumCutset::new(&graph).unwrap();
            for use_compression in [false, true] {
                let cut = solver.solve(&odd_nodes, use_compression).unwrap();
                assert_abs_diff_eq!(cut.weight, expected, epsilon = 1e-6);

                let crossing: f64 = cut.cut_set.iter().map(|&e| graph[e]).sum();
                assert_abs_diff_eq!(crossing, expected, epsilon = 1e-6);
                let odd_inside = odd_nodes.iter().filter(|v| cut.is_source_side(v)).count();
                assert_eq!(odd_inside % 2, 1);
            }
        }
    }
}
