mod cut;
mod equivalent_flow;
mod gomory_hu;
mod graph;
mod maximum_flow;
mod network;
mod odd_cut;
mod push_relabel;
mod tree;

pub use cut::Cut;
pub use equivalent_flow::EquivalentFlowTree;
pub use gomory_hu::GomoryHuTree;
pub use graph::{Capacity, FlowGraph};
pub use maximum_flow::{FlowAssignment, MaximumFlow, MaximumFlowAlgorithm, MinimumStCutAlgorithm};
pub use network::{AnnotatedEdge, FlowNetwork, VertexRecord};
pub use odd_cut::PadbergRaoOddMinimumCutset;
pub use push_relabel::{PushRelabel, PushRelabelStats};
