//! Error types for the flow-network engine

use thiserror::Error;

/// Result type for flow and cut operations
pub type Result<T> = std::result::Result<T, FlowError>;

/// Errors that can occur while building a flow network or running one of the
/// algorithms on top of it
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    /// Source and sink are the same vertex
    #[error("Source and sink must be different vertices")]
    SameTerminals,

    /// Vertex is not part of the graph
    #[error("Vertex not found in graph: {0}")]
    VertexNotFound(usize),

    /// Edge is not part of the graph
    #[error("Edge not found in graph: {0}")]
    EdgeNotFound(usize),

    /// The odd vertex set has odd cardinality
    #[error("Odd vertex set must have even cardinality, got {0}")]
    OddCardinality(usize),

    /// The odd vertex set is empty, so no odd cut exists
    #[error("Odd vertex set is empty")]
    EmptyOddSet,

    /// Negative, NaN or infinite edge weight
    #[error("Invalid capacity {capacity} on edge {edge}")]
    InvalidCapacity { edge: usize, capacity: f64 },

    /// Multigraphs and other structures the arc pairing cannot express
    #[error("Unsupported graph structure: {0}")]
    UnsupportedStructure(String),

    /// Algorithm only works on undirected graphs
    #[error("Algorithm requires an undirected graph")]
    DirectedGraph,

    /// Per-edge flows were requested from an algorithm that only knows values
    #[error("Per-edge flows are not available from {0}")]
    FlowMapUnavailable(&'static str),

    /// Invalid epsilon value for floating-point comparisons
    #[error("Invalid epsilon value: {0} (must be positive and finite)")]
    InvalidEpsilon(f64),

    /// The active-vertex loop exceeded its discharge bound
    #[error("Push-relabel did not converge after {0} discharges")]
    NonConvergence(usize),

    /// Internal algorithm error
    #[error("Internal algorithm error: {0}")]
    InternalError(String),
}

impl FlowError {
    /// Check if the error is a violated precondition of the call
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            FlowError::SameTerminals
                | FlowError::VertexNotFound(_)
                | FlowError::EdgeNotFound(_)
                | FlowError::OddCardinality(_)
                | FlowError::EmptyOddSet
        )
    }

    /// Check if the caller can recover by fixing its input.
    ///
    /// Non-convergence and internal errors mean an invariant of the engine
    /// broke; retrying the same computation will not help.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            FlowError::NonConvergence(_) | FlowError::InternalError(_)
        )
    }
}
