//! Gusfield's equivalent flow tree.
//!
//! Like the Gomory-Hu tree it takes |V| - 1 cut computations, but only flow
//! values are preserved: tree edges do not correspond to minimum cuts. All
//! pairwise values are kept in a matrix filled in during construction.

use petgraph::graph::{NodeIndex, UnGraph};
use tracing::debug;

use crate::config::FlowConfig;
use crate::error::{FlowError, Result};
use crate::flow::graph::FlowGraph;
use crate::flow::maximum_flow::{MaximumFlow, MaximumFlowAlgorithm};
use crate::flow::network::FlowNetwork;
use crate::flow::push_relabel::PushRelabel;

pub struct EquivalentFlowTree<G: FlowGraph> {
    network: FlowNetwork<G>,
    tree: UnGraph<G::NodeId, f64>,
    flows: Vec<Vec<f64>>,
}

impl<G: FlowGraph> EquivalentFlowTree<G> {
    pub fn build(graph: G) -> Result<Self> {
        Self::with_config(graph, FlowConfig::default())
    }

    pub fn with_config(graph: G, config: FlowConfig) -> Result<Self> {
        config.validate()?;
        let network = FlowNetwork::build(graph)?;
        if network.is_directed() {
            return Err(FlowError::DirectedGraph);
        }
        let mut push_relabel = PushRelabel::from_network(network, config)?;
        let n = push_relabel.network().vertex_count();

        let mut parent = vec![0; n];
        let mut weight = vec![0.0; n];
        let mut flows = vec![vec![f64::INFINITY; n]; n];
        for s in 1..n {
            let t = parent[s];
            let value = push_relabel.run(s, t)?;
            let source_side = push_relabel.residual_reachable(s);
            weight[s] = value;

            // only vertices not yet processed are relinked
            for i in s + 1..n {
                if source_side[i] && parent[i] == t {
                    parent[i] = s;
                }
            }

            flows[s][t] = value;
            flows[t][s] = value;
            for i in (0..s).filter(|&i| i != t) {
                let through = value.min(flows[t][i]);
                flows[s][i] = through;
                flows[i][s] = through;
            }
            debug!(step = s, partner = t, value, "equivalent flow step");
        }

        let network = push_relabel.into_network();
        let mut tree = UnGraph::with_capacity(n, n.saturating_sub(1));
        for i in 0..n {
            tree.add_node(network.node_id(i));
        }
        for s in 1..n {
            tree.add_edge(NodeIndex::new(s), NodeIndex::new(parent[s]), weight[s]);
        }

        Ok(Self {
            network,
            tree,
            flows,
        })
    }

    pub fn tree(&self) -> &UnGraph<G::NodeId, f64> {
        &self.tree
    }

    pub fn max_flow(&self, source: G::NodeId, sink: G::NodeId) -> Result<f64> {
        let source = self.network.index_of(source)?;
        let sink = self.network.index_of(sink)?;
        if source == sink {
            return Err(FlowError::SameTerminals);
        }
        Ok(self.flows[source][sink])
    }
}

impl<G: FlowGraph> MaximumFlowAlgorithm<G> for EquivalentFlowTree<G> {
    fn maximum_flow(
        &mut self,
        source: G::NodeId,
        sink: G::NodeId,
    ) -> Result<MaximumFlow<G::EdgeId>> {
        Ok(MaximumFlow::value_only(
            self.max_flow(source, sink)?,
            "an equivalent flow tree",
        ))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;
    use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
    use petgraph::visit::EdgeRef;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::error::FlowError;
    use crate::flow::equivalent_flow::EquivalentFlowTree;
    use crate::flow::maximum_flow::MaximumFlowAlgorithm;
    use crate::flow::push_relabel::PushRelabel;

    #[test]
    fn wikipedia_equivalent_tree() {
        let graph = UnGraph::<(), u32>::from_edges(&[
            (0, 1, 1),
            (0, 2, 7),
            (1, 2, 1),
            (1, 3, 3),
            (1, 4, 2),
            (2, 4, 4),
            (3, 4, 1),
            (3, 5, 6),
            (4, 5, 2),
        ]);
        let mut tree = EquivalentFlowTree::build(&graph).unwrap();

        let parents: Vec<usize> = tree
            .tree()
            .edge_references()
            .map(|edge| edge.target().index())
            .collect();
        assert_eq!(parents, vec![0, 0, 1, 1, 3]);

        let value = tree.max_flow(NodeIndex::new(0), NodeIndex::new(2)).unwrap();
        assert_abs_diff_eq!(value, 8.0);
        let value = tree.max_flow(NodeIndex::new(4), NodeIndex::new(1)).unwrap();
        assert_abs_diff_eq!(value, 7.0);
        let value = tree.max_flow(NodeIndex::new(5), NodeIndex::new(0)).unwrap();
        assert_abs_diff_eq!(value, 6.0);

        let flow = tree
            .maximum_flow(NodeIndex::new(3), NodeIndex::new(5))
            .unwrap();
        assert_abs_diff_eq!(flow.value, 8.0);
        assert_eq!(
            flow.edge_flows(),
            Err(FlowError::FlowMapUnavailable("an equivalent flow tree"))
        );
    }

    #[test]
    fn random_values_agree_with_push_relabel() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..40 {
            let n = rng.gen_range(2..=8);
            let mut graph = UnGraph::<(), f64>::new_undirected();
            let nodes: Vec<NodeIndex> = (0..n).map(|_| graph.add_node(())).collect();
            for (&u, &v) in nodes.iter().tuple_combinations() {
                if rng.gen_bool(0.5) {
                    graph.add_edge(u, v, rng.gen_range(0.0..6.0));
                }
            }

            let tree = EquivalentFlowTree::build(&graph).unwrap();
            let mut push_relabel = PushRelabel::new(&graph).unwrap();
            for (&u, &v) in nodes.iter().tuple_combinations() {
                let direct = push_relabel.max_flow_value(u, v).unwrap();
                assert_abs_diff_eq!(tree.max_flow(u, v).unwrap(), direct, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn rejects_directed_graphs_and_same_terminals() {
        let graph = DiGraph::<(), u32>::from_edges(&[(0, 1, 1)]);
        assert!(matches!(
            EquivalentFlowTree::build(&graph),
            Err(FlowError::DirectedGraph)
        ));

        let graph = UnGraph::<(), u32>::from_edges(&[(0, 1, 1)]);
        let tree = EquivalentFlowTree::build(&graph).unwrap();
        assert_eq!(
            tree.max_flow(NodeIndex::new(1), NodeIndex::new(1)),
            Err(FlowError::SameTerminals)
        );
    }
}
