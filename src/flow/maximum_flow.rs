use crate::error::{FlowError, Result};
use crate::flow::cut::Cut;
use crate::flow::graph::FlowGraph;

/// How much is known about the flow behind a maximum-flow value.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowAssignment<E> {
    /// Flow on every input edge, in edge iteration order.
    PerEdge(Vec<(E, f64)>),
    /// Only the value is known; `algorithm` names the producer.
    ValueOnly { algorithm: &'static str },
}

#[derive(Clone, Debug, PartialEq)]
pub struct MaximumFlow<E> {
    pub value: f64,
    pub assignment: FlowAssignment<E>,
}

impl<E> MaximumFlow<E> {
    pub fn with_edge_flows(value: f64, flows: Vec<(E, f64)>) -> Self {
        Self {
            value,
            assignment: FlowAssignment::PerEdge(flows),
        }
    }

    pub fn value_only(value: f64, algorithm: &'static str) -> Self {
        Self {
            value,
            assignment: FlowAssignment::ValueOnly { algorithm },
        }
    }

    pub fn edge_flows(&self) -> Result<&[(E, f64)]> {
        match &self.assignment {
            FlowAssignment::PerEdge(flows) => Ok(flows),
            FlowAssignment::ValueOnly { algorithm } => {
                Err(FlowError::FlowMapUnavailable(*algorithm))
            }
        }
    }
}

/// Algorithms answering maximum flow queries between two vertices.
pub trait MaximumFlowAlgorithm<G: FlowGraph> {
    fn maximum_flow(
        &mut self,
        source: G::NodeId,
        sink: G::NodeId,
    ) -> Result<MaximumFlow<G::EdgeId>>;

    fn maximum_flow_value(&mut self, source: G::NodeId, sink: G::NodeId) -> Result<f64> {
        self.maximum_flow(source, sink).map(|flow| flow.value)
    }
}

/// Algorithms answering minimum source-sink cut queries.
pub trait MinimumStCutAlgorithm<G: FlowGraph> {
    fn minimum_cut(
        &mut self,
        source: G::NodeId,
        sink: G::NodeId,
    ) -> Result<Cut<G::NodeId, G::EdgeId>>;
}
