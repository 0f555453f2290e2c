//! Gomory-Hu cut trees built with Gusfield's algorithm.
//!
//! `build` runs all |V| - 1 minimum cut computations up front; every pairwise
//! query afterwards is answered from the tree without touching the flow
//! engine again.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::config::FlowConfig;
use crate::error::{FlowError, Result};
use crate::flow::cut::{cut_from_partition, Cut};
use crate::flow::graph::FlowGraph;
use crate::flow::maximum_flow::{MaximumFlow, MaximumFlowAlgorithm, MinimumStCutAlgorithm};
use crate::flow::network::FlowNetwork;
use crate::flow::push_relabel::PushRelabel;
use crate::flow::tree::{cheapest_edge_on_path, cheapest_edges_from, component_without};

/// A Gomory-Hu tree over the vertices of an undirected graph.
///
/// Tree vertex `i` stands for the graph vertex with dense index `i`; its
/// weight is that vertex's `NodeId`. For any two vertices the lightest edge on
/// their tree path carries their maximum flow value, and removing it splits
/// the tree into the two sides of a minimum cut.
pub struct GomoryHuTree<G: FlowGraph> {
    network: FlowNetwork<G>,
    tree: UnGraph<G::NodeId, f64>,
    /// `cheapest[u][v]`: lightest edge weight on the tree path from u to v.
    cheapest: Vec<Vec<f64>>,
}

impl<G: FlowGraph> GomoryHuTree<G> {
    pub fn build(graph: G) -> Result<Self> {
        Self::with_config(graph, FlowConfig::default())
    }

    pub fn with_config(graph: G, config: FlowConfig) -> Result<Self> {
        config.validate()?;
        Self::from_network(FlowNetwork::build(graph)?, config)
    }

    pub fn from_network(network: FlowNetwork<G>, config: FlowConfig) -> Result<Self> {
        if network.is_directed() {
            return Err(FlowError::DirectedGraph);
        }
        let mut push_relabel = PushRelabel::from_network(network, config)?;
        let n = push_relabel.network().vertex_count();

        let mut parent = vec![0; n];
        let mut weight = vec![0.0; n];
        for s in 1..n {
            let t = parent[s];
            let value = push_relabel.run(s, t)?;
            let source_side = push_relabel.residual_reachable(s);
            weight[s] = value;

            for i in 0..n {
                if i != s && source_side[i] && parent[i] == t {
                    parent[i] = s;
                }
            }
            if source_side[parent[t]] {
                parent[s] = parent[t];
                parent[t] = s;
                weight[s] = weight[t];
                weight[t] = value;
            }
            debug!(step = s, partner = t, value, "gomory-hu cut step");
        }

        let network = push_relabel.into_network();
        let mut tree = UnGraph::with_capacity(n, n.saturating_sub(1));
        for i in 0..n {
            tree.add_node(network.node_id(i));
        }
        for s in 1..n {
            tree.add_edge(NodeIndex::new(s), NodeIndex::new(parent[s]), weight[s]);
        }
        let cheapest = (0..n)
            .map(|root| cheapest_edges_from(&tree, NodeIndex::new(root)))
            .collect();

        Ok(Self {
            network,
            tree,
            cheapest,
        })
    }

    pub fn network(&self) -> &FlowNetwork<G> {
        &self.network
    }

    pub fn tree(&self) -> &UnGraph<G::NodeId, f64> {
        &self.tree
    }

    /// Tree edges as `(vertex, parent, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (G::NodeId, G::NodeId, f64)> + '_ {
        self.tree
            .edge_references()
            .map(|edge| (self.tree[edge.source()], self.tree[edge.target()], *edge.weight()))
    }

    pub fn max_flow(&self, source: G::NodeId, sink: G::NodeId) -> Result<f64> {
        let (source, sink) = self.terminals(source, sink)?;
        Ok(self.cheapest[source][sink])
    }

    /// Minimum cut between `source` and `sink`, read off the tree.
    pub fn min_cut(
        &self,
        source: G::NodeId,
        sink: G::NodeId,
    ) -> Result<Cut<G::NodeId, G::EdgeId>> {
        let (source, sink) = self.terminals(source, sink)?;
        let mut removed = vec![false; self.tree.edge_count()];
        let edge = cheapest_edge_on_path(
            &self.tree,
            &removed,
            NodeIndex::new(source),
            NodeIndex::new(sink),
        )
        .ok_or_else(|| {
            FlowError::InternalError(format!("no tree path from {source} to {sink}"))
        })?;

        removed[edge.index()] = true;
        let source_side = component_without(&self.tree, &removed, NodeIndex::new(source));
        Ok(self.cut_from_mask(&source_side, self.tree[edge]))
    }

    pub(crate) fn cut_from_mask(
        &self,
        source_side: &[bool],
        weight: f64,
    ) -> Cut<G::NodeId, G::EdgeId> {
        cut_from_partition(&self.network, source_side, weight)
    }

    fn terminals(&self, source: G::NodeId, sink: G::NodeId) -> Result<(usize, usize)> {
        let source = self.network.index_of(source)?;
        let sink = self.network.index_of(sink)?;
        if source == sink {
            return Err(FlowError::SameTerminals);
        }
        Ok((source, sink))
    }
}

impl<G: FlowGraph> MaximumFlowAlgorithm<G> for GomoryHuTree<G> {
    fn maximum_flow(
        &mut self,
        source: G::NodeId,
        sink: G::NodeId,
    ) -> Result<MaximumFlow<G::EdgeId>> {
        Ok(MaximumFlow::value_only(
            self.max_flow(source, sink)?,
            "a Gomory-Hu tree",
        ))
    }
}

impl<G: FlowGraph> MinimumStCutAlgorithm<G> for GomoryHuTree<G> {
    fn minimum_cut(
        &mut self,
        source: G::NodeId,
        sink: G::NodeId,
    ) -> Result<Cut<G::NodeId, G::EdgeId>> {
        self.min_cut(source, sink)
    }
}
