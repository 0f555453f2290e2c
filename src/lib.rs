//! Maximum flows, minimum cuts and cut trees over `petgraph` graphs.
//!
//! - [`PushRelabel`]: FIFO preflow push-relabel with the gap heuristic, giving
//!   maximum flows, per-edge flows and minimum s-t cuts.
//! - [`GomoryHuTree`]: Gusfield's construction of a Gomory-Hu tree, answering
//!   every pairwise max-flow and min-cut query of an undirected graph.
//! - [`EquivalentFlowTree`]: Gusfield's flow-equivalent tree (values only).
//! - [`PadbergRaoOddMinimumCutset`]: minimum cuts separating an odd number of
//!   designated vertices, with or without tree compression.
//!
//! ```no_run
//! use flow_cut_trees::{MinimumStCutAlgorithm, PushRelabel};
//! use petgraph::graph::{DiGraph, NodeIndex};
//!
//! let graph = DiGraph::<(), u32>::from_edges(&[(0, 1, 3), (1, 2, 2), (0, 2, 7)]);
//! let mut push_relabel = PushRelabel::new(&graph)?;
//! let cut = push_relabel.minimum_cut(NodeIndex::new(0), NodeIndex::new(2))?;
//! assert_eq!(cut.weight, 9.0);
//! # Ok::<(), flow_cut_trees::FlowError>(())
//! ```

pub mod config;
pub mod error;
pub mod flow;

pub use config::{FlowConfig, DEFAULT_EPSILON};
pub use error::{FlowError, Result};
pub use flow::{
    Capacity, Cut, EquivalentFlowTree, FlowAssignment, FlowGraph, FlowNetwork, GomoryHuTree,
    MaximumFlow, MaximumFlowAlgorithm, MinimumStCutAlgorithm, PadbergRaoOddMinimumCutset,
    PushRelabel, PushRelabelStats,
};
