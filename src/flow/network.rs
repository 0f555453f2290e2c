//! Flow network builder.
//!
//! Every vertex of the input graph gets a [`VertexRecord`], every edge a pair
//! of [`AnnotatedEdge`]s pointing at each other through their arena indices.
//! Directed edges pair with a zero-capacity residual arc (or with the
//! antiparallel input edge, if there is one); undirected edges get two arcs
//! with the full weight.

use std::collections::HashMap;

use petgraph::visit::{
    EdgeIndexable, EdgeRef, GraphProp, IntoEdgeReferences, IntoNodeIdentifiers, NodeIndexable,
};

use crate::error::{FlowError, Result};
use crate::flow::graph::FlowGraph;

/// Per-vertex state of one flow computation.
#[derive(Clone, Debug, Default)]
pub struct VertexRecord {
    pub(crate) excess: f64,
    pub(crate) height: usize,
    pub(crate) active: bool,
    pub(crate) outgoing: Vec<usize>,
}

impl VertexRecord {
    pub fn excess(&self) -> f64 {
        self.excess
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Arena indices of the arcs leaving this vertex, in insertion order.
    pub fn outgoing(&self) -> &[usize] {
        &self.outgoing
    }

    fn reset(&mut self) {
        self.excess = 0.0;
        self.height = 0;
        self.active = false;
    }
}

/// One directed arc of the augmented network.
#[derive(Clone, Debug)]
pub struct AnnotatedEdge {
    pub(crate) source: usize,
    pub(crate) target: usize,
    pub(crate) capacity: f64,
    pub(crate) flow: f64,
    pub(crate) inverse: usize,
    /// Dense index of the input edge, `None` for pure residual arcs.
    pub(crate) edge: Option<usize>,
}

impl AnnotatedEdge {
    pub fn source(&self) -> usize {
        self.source
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn flow(&self) -> f64 {
        self.flow
    }

    /// Arena index of the paired arc.
    pub fn inverse(&self) -> usize {
        self.inverse
    }

    pub fn edge(&self) -> Option<usize> {
        self.edge
    }
}

/// Augmented representation of one graph snapshot.
///
/// Vertices and edges are addressed by dense indices in node/edge iteration
/// order of the input graph; `index_of` and `node_id` translate.
#[derive(Clone)]
pub struct FlowNetwork<G: FlowGraph> {
    graph: G,
    directed: bool,
    vertices: Vec<VertexRecord>,
    arcs: Vec<AnnotatedEdge>,
    node_ids: Vec<G::NodeId>,
    node_slots: Vec<Option<usize>>,
    edge_ids: Vec<G::EdgeId>,
    edge_ends: Vec<(usize, usize)>,
    edge_arcs: Vec<Option<usize>>,
    edge_slots: Vec<Option<usize>>,
}

impl<G: FlowGraph> FlowNetwork<G> {
    pub fn build(graph: G) -> Result<Self> {
        let directed = graph.is_directed();

        let mut node_slots = vec![None; NodeIndexable::node_bound(&graph)];
        let mut node_ids = Vec::new();
        for node in graph.node_identifiers() {
            node_slots[NodeIndexable::to_index(&graph, node)] = Some(node_ids.len());
            node_ids.push(node);
        }

        let mut edge_slots = vec![None; EdgeIndexable::edge_bound(&graph)];
        let mut edge_ids = Vec::new();
        let mut edge_ends = Vec::new();
        let mut capacities = Vec::new();
        let mut endpoint_pairs: HashMap<(usize, usize), usize> = HashMap::new();
        for edge in graph.edge_references() {
            let raw = EdgeIndexable::to_index(&graph, edge.id());
            let u = node_slots[NodeIndexable::to_index(&graph, edge.source())]
                .ok_or_else(|| FlowError::InternalError(format!("edge {raw} has no source")))?;
            let v = node_slots[NodeIndexable::to_index(&graph, edge.target())]
                .ok_or_else(|| FlowError::InternalError(format!("edge {raw} has no target")))?;

            let capacity = G::capacity(edge);
            if !capacity.is_finite() || capacity < 0.0 {
                return Err(FlowError::InvalidCapacity {
                    edge: raw,
                    capacity,
                });
            }

            let key = if directed { (u, v) } else { (u.min(v), u.max(v)) };
            if endpoint_pairs.insert(key, edge_ids.len()).is_some() {
                return Err(FlowError::UnsupportedStructure(format!(
                    "parallel edges between vertices {} and {}",
                    NodeIndexable::to_index(&graph, edge.source()),
                    NodeIndexable::to_index(&graph, edge.target())
                )));
            }

            edge_slots[raw] = Some(edge_ids.len());
            edge_ids.push(edge.id());
            edge_ends.push((u, v));
            capacities.push(capacity);
        }

        let mut network = Self {
            graph,
            directed,
            vertices: vec![VertexRecord::default(); node_ids.len()],
            arcs: Vec::with_capacity(2 * edge_ids.len()),
            node_ids,
            node_slots,
            edge_arcs: vec![None; edge_ids.len()],
            edge_ids,
            edge_ends,
            edge_slots,
        };

        for e in 0..network.edge_ids.len() {
            let (u, v) = network.edge_ends[e];
            // self-loops never carry net flow
            if u == v || network.edge_arcs[e].is_some() {
                continue;
            }
            if !directed {
                let forward =
                    network.add_arc_pair((u, v, capacities[e], Some(e)), capacities[e], Some(e));
                network.edge_arcs[e] = Some(forward);
                continue;
            }
            match endpoint_pairs.get(&(v, u)) {
                Some(&reverse) if network.edge_arcs[reverse].is_none() => {
                    let forward = network.add_arc_pair(
                        (u, v, capacities[e], Some(e)),
                        capacities[reverse],
                        Some(reverse),
                    );
                    network.edge_arcs[e] = Some(forward);
                    network.edge_arcs[reverse] = Some(network.arcs[forward].inverse);
                }
                _ => {
                    let forward =
                        network.add_arc_pair((u, v, capacities[e], Some(e)), 0.0, None);
                    network.edge_arcs[e] = Some(forward);
                }
            }
        }

        Ok(network)
    }

    /// Pushes an arc and its inverse, returns the arena index of the first.
    fn add_arc_pair(
        &mut self,
        (source, target, capacity, edge): (usize, usize, f64, Option<usize>),
        inverse_capacity: f64,
        inverse_edge: Option<usize>,
    ) -> usize {
        let forward = self.arcs.len();
        let backward = forward + 1;
        self.arcs.push(AnnotatedEdge {
            source,
            target,
            capacity,
            flow: 0.0,
            inverse: backward,
            edge,
        });
        self.arcs.push(AnnotatedEdge {
            source: target,
            target: source,
            capacity: inverse_capacity,
            flow: 0.0,
            inverse: forward,
            edge: inverse_edge,
        });
        self.vertices[source].outgoing.push(forward);
        self.vertices[target].outgoing.push(backward);
        forward
    }

    pub fn graph(&self) -> G {
        self.graph
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of input edges, self-loops included.
    pub fn edge_count(&self) -> usize {
        self.edge_ids.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Dense index of `node`.
    pub fn index_of(&self, node: G::NodeId) -> Result<usize> {
        let raw = NodeIndexable::to_index(&self.graph, node);
        self.node_slots
            .get(raw)
            .copied()
            .flatten()
            .ok_or(FlowError::VertexNotFound(raw))
    }

    pub fn node_id(&self, index: usize) -> G::NodeId {
        self.node_ids[index]
    }

    /// Dense index of `edge`.
    pub fn edge_index_of(&self, edge: G::EdgeId) -> Result<usize> {
        let raw = EdgeIndexable::to_index(&self.graph, edge);
        self.edge_slots
            .get(raw)
            .copied()
            .flatten()
            .ok_or(FlowError::EdgeNotFound(raw))
    }

    pub fn edge_id(&self, index: usize) -> G::EdgeId {
        self.edge_ids[index]
    }

    /// Dense `(source, target)` of input edge `index`.
    pub fn endpoints(&self, index: usize) -> (usize, usize) {
        self.edge_ends[index]
    }

    pub fn vertex(&self, index: usize) -> &VertexRecord {
        &self.vertices[index]
    }

    pub fn arc(&self, index: usize) -> &AnnotatedEdge {
        &self.arcs[index]
    }

    pub fn arcs(&self) -> &[AnnotatedEdge] {
        &self.arcs
    }

    pub(crate) fn vertex_mut(&mut self, index: usize) -> &mut VertexRecord {
        &mut self.vertices[index]
    }

    /// Additional flow that can still be routed along `arc`, including flow
    /// that would cancel the inverse arc.
    pub fn residual(&self, arc: usize) -> f64 {
        let a = &self.arcs[arc];
        a.capacity - a.flow + self.arcs[a.inverse].flow
    }

    /// Moves `delta` units along `arc`, cancelling inverse flow first, and
    /// moves the same amount of excess from the tail to the head.
    pub(crate) fn push(&mut self, arc: usize, delta: f64) {
        let inverse = self.arcs[arc].inverse;
        let cancelled = delta.min(self.arcs[inverse].flow);
        self.arcs[inverse].flow -= cancelled;

        let a = &mut self.arcs[arc];
        a.flow = (a.flow + delta - cancelled).min(a.capacity);
        let (source, target) = (a.source, a.target);
        self.vertices[source].excess -= delta;
        self.vertices[target].excess += delta;
    }

    /// Clears flow, excess, heights and activity so a new terminal pair can
    /// be processed on the same arena.
    pub fn reset(&mut self) {
        for vertex in self.vertices.iter_mut() {
            vertex.reset();
        }
        for arc in self.arcs.iter_mut() {
            arc.flow = 0.0;
        }
    }

    /// Flow on input edge `index`.
    pub fn edge_flow(&self, index: usize) -> f64 {
        match self.edge_arcs[index] {
            None => 0.0,
            Some(arc) if self.directed => self.arcs[arc].flow,
            Some(arc) => {
                let a = &self.arcs[arc];
                a.flow.max(self.arcs[a.inverse].flow)
            }
        }
    }

    /// Dense index of the vertex the flow on input edge `index` points to.
    pub fn flow_direction(&self, index: usize) -> usize {
        match self.edge_arcs[index] {
            Some(arc) if !self.directed => {
                let a = &self.arcs[arc];
                if a.flow >= self.arcs[a.inverse].flow {
                    a.target
                } else {
                    a.source
                }
            }
            _ => self.edge_ends[index].1,
        }
    }

    /// Flow entering `vertex` minus flow leaving it.
    pub fn net_inflow(&self, vertex: usize) -> f64 {
        self.vertices[vertex]
            .outgoing
            .iter()
            .map(|&arc| self.arcs[self.arcs[arc].inverse].flow - self.arcs[arc].flow)
            .sum()
    }
}
