//! This module implements the preflow push-relabel algorithm for maximum
//! flow problems.
//!
//! Active vertices are processed in FIFO order; the gap heuristic lifts every
//! vertex above an emptied height straight to `|V| + 1`. The same engine
//! extracts minimum cuts by a reachability walk over residual arcs.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::config::FlowConfig;
use crate::error::{FlowError, Result};
use crate::flow::cut::{cut_from_partition, Cut};
use crate::flow::graph::FlowGraph;
use crate::flow::maximum_flow::{MaximumFlow, MaximumFlowAlgorithm, MinimumStCutAlgorithm};
use crate::flow::network::FlowNetwork;

/// Operation counters of the last computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PushRelabelStats {
    pub discharges: usize,
    pub relabels: usize,
    pub gap_jumps: usize,
}

/// The push-relabel algorithm.
///
/// Holds the flow network plus all per-run scratch data. Each computation
/// resets that state first, so one instance can answer any number of
/// source/sink queries in sequence.
pub struct PushRelabel<G: FlowGraph> {
    network: FlowNetwork<G>,
    config: FlowConfig,
    /// Number of vertices at each height, `0..=2|V|`.
    count_height: Vec<usize>,
    active: VecDeque<usize>,
    terminals: Option<(usize, usize)>,
    value: f64,
    stats: PushRelabelStats,
}

impl<G: FlowGraph> PushRelabel<G> {
    pub fn new(graph: G) -> Result<Self> {
        Self::with_config(graph, FlowConfig::default())
    }

    pub fn with_config(graph: G, config: FlowConfig) -> Result<Self> {
        config.validate()?;
        Self::from_network(FlowNetwork::build(graph)?, config)
    }

    pub fn from_network(network: FlowNetwork<G>, config: FlowConfig) -> Result<Self> {
        config.validate()?;
        let vertices = network.vertex_count();
        Ok(Self {
            network,
            config,
            count_height: Vec::with_capacity(2 * vertices + 1),
            active: VecDeque::with_capacity(vertices),
            terminals: None,
            value: 0.0,
            stats: PushRelabelStats::default(),
        })
    }

    pub fn network(&self) -> &FlowNetwork<G> {
        &self.network
    }

    pub fn into_network(self) -> FlowNetwork<G> {
        self.network
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn stats(&self) -> PushRelabelStats {
        self.stats
    }

    /// Value of the last computed flow, if any.
    pub fn flow_value(&self) -> Option<f64> {
        self.terminals.map(|_| self.value)
    }

    pub fn max_flow_value(&mut self, source: G::NodeId, sink: G::NodeId) -> Result<f64> {
        let source = self.network.index_of(source)?;
        let sink = self.network.index_of(sink)?;
        self.run(source, sink)
    }

    /// Flow on `edge` in the last computed flow.
    pub fn edge_flow(&self, edge: G::EdgeId) -> Result<f64> {
        let index = self.network.edge_index_of(edge)?;
        Ok(self.network.edge_flow(index))
    }

    /// The endpoint of `edge` its flow points to.
    pub fn flow_direction(&self, edge: G::EdgeId) -> Result<G::NodeId> {
        let index = self.network.edge_index_of(edge)?;
        Ok(self.network.node_id(self.network.flow_direction(index)))
    }

    /// Runs push-relabel between two dense vertex indices.
    pub(crate) fn run(&mut self, source: usize, sink: usize) -> Result<f64> {
        if source == sink {
            return Err(FlowError::SameTerminals);
        }
        let n = self.network.vertex_count();

        self.network.reset();
        // a half-finished preflow is not a result
        self.terminals = None;
        self.value = 0.0;
        self.stats = PushRelabelStats::default();
        self.active.clear();
        self.count_height.clear();
        self.count_height.resize(2 * n + 1, 0);
        self.count_height[0] = n - 1;
        self.count_height[n] = 1;

        let record = self.network.vertex_mut(source);
        record.height = n;
        record.active = true;
        // terminals are never queued
        self.network.vertex_mut(sink).active = true;

        // saturate everything leaving the source
        for i in 0..self.network.vertex(source).outgoing().len() {
            let arc = self.network.vertex(source).outgoing()[i];
            let residual = self.network.residual(arc);
            if self.config.is_positive(residual) {
                self.network.push(arc, residual);
                let target = self.network.arc(arc).target;
                self.enqueue(target);
            }
        }

        let limit = self.config.discharge_limit(n, self.network.arc_count());
        while let Some(vertex) = self.active.pop_front() {
            if self.stats.discharges >= limit {
                self.network.reset();
                return Err(FlowError::NonConvergence(self.stats.discharges));
            }
            self.stats.discharges += 1;
            self.network.vertex_mut(vertex).active = false;
            self.discharge(source, sink, vertex);
        }

        self.terminals = Some((source, sink));
        self.value = self.network.net_inflow(sink);
        debug!(
            source,
            sink,
            value = self.value,
            discharges = self.stats.discharges,
            relabels = self.stats.relabels,
            gap_jumps = self.stats.gap_jumps,
            "maximum flow computed"
        );
        Ok(self.value)
    }

    fn enqueue(&mut self, vertex: usize) {
        let record = self.network.vertex_mut(vertex);
        if !record.active && record.excess > self.config.epsilon {
            record.active = true;
            self.active.push_back(vertex);
        }
    }

    fn discharge(&mut self, source: usize, sink: usize, vertex: usize) {
        for i in 0..self.network.vertex(vertex).outgoing().len() {
            let excess = self.network.vertex(vertex).excess;
            if !self.config.is_positive(excess) {
                break;
            }
            let arc = self.network.vertex(vertex).outgoing()[i];
            let target = self.network.arc(arc).target;
            let residual = self.network.residual(arc);
            // admissible: residual capacity and exactly one level downhill
            if self.config.is_positive(residual)
                && self.network.vertex(vertex).height == self.network.vertex(target).height + 1
            {
                self.network.push(arc, excess.min(residual));
                self.enqueue(target);
            }
        }

        if self.config.is_positive(self.network.vertex(vertex).excess) {
            let height = self.network.vertex(vertex).height;
            if height < self.network.vertex_count() && self.count_height[height] == 1 {
                self.gap(source, sink, height);
            } else {
                self.relabel(vertex);
            }
        }
    }

    /// Lifts every non-terminal vertex with height in `gap..=|V|` to `|V| + 1`.
    ///
    /// Called when `gap` is about to become empty; nothing at or above it can
    /// reach the sink any more.
    fn gap(&mut self, source: usize, sink: usize, gap: usize) {
        let n = self.network.vertex_count();
        self.stats.gap_jumps += 1;
        trace!(gap, "gap heuristic");

        for vertex in 0..n {
            if vertex == source || vertex == sink {
                continue;
            }
            let height = self.network.vertex(vertex).height;
            if height >= gap && height <= n {
                self.count_height[height] -= 1;
                self.network.vertex_mut(vertex).height = n + 1;
                self.count_height[n + 1] += 1;
                self.enqueue(vertex);
            }
        }
    }

    fn relabel(&mut self, vertex: usize) {
        let n = self.network.vertex_count();
        let old = self.network.vertex(vertex).height;
        let mut height = 2 * n;
        for &arc in self.network.vertex(vertex).outgoing() {
            if self.config.is_positive(self.network.residual(arc)) {
                let target = self.network.arc(arc).target;
                height = height.min(self.network.vertex(target).height + 1);
            }
        }

        self.count_height[old] -= 1;
        self.network.vertex_mut(vertex).height = height;
        self.count_height[height] += 1;
        self.stats.relabels += 1;
        trace!(vertex, from = old, to = height, "relabel");

        self.enqueue(vertex);
    }

    /// Vertices reachable from `source` over arcs with residual capacity.
    ///
    /// After a completed run this is the source side of a minimum cut.
    pub(crate) fn residual_reachable(&self, source: usize) -> Vec<bool> {
        let mut visited = vec![false; self.network.vertex_count()];
        let mut queue = VecDeque::new();
        visited[source] = true;
        queue.push_back(source);

        // do a BFS through the residual network
        while let Some(vertex) = queue.pop_front() {
            for &arc in self.network.vertex(vertex).outgoing() {
                let next = self.network.arc(arc).target;
                if !visited[next] && self.config.is_positive(self.network.residual(arc)) {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        visited
    }
}

impl<G: FlowGraph> MaximumFlowAlgorithm<G> for PushRelabel<G> {
    fn maximum_flow(
        &mut self,
        source: G::NodeId,
        sink: G::NodeId,
    ) -> Result<MaximumFlow<G::EdgeId>> {
        let value = self.max_flow_value(source, sink)?;
        let flows = (0..self.network.edge_count())
            .map(|e| (self.network.edge_id(e), self.network.edge_flow(e)))
            .collect();
        Ok(MaximumFlow::with_edge_flows(value, flows))
    }

    fn maximum_flow_value(&mut self, source: G::NodeId, sink: G::NodeId) -> Result<f64> {
        self.max_flow_value(source, sink)
    }
}

impl<G: FlowGraph> MinimumStCutAlgorithm<G> for PushRelabel<G> {
    fn minimum_cut(
        &mut self,
        source: G::NodeId,
        sink: G::NodeId,
    ) -> Result<Cut<G::NodeId, G::EdgeId>> {
        let source = self.network.index_of(source)?;
        let sink = self.network.index_of(sink)?;
        let value = self.run(source, sink)?;
        let source_side = self.residual_reachable(source);
        Ok(cut_from_partition(&self.network, &source_side, value))
    }
}
