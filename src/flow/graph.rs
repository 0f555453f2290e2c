use petgraph::visit::{
    EdgeIndexable, EdgeRef, GraphProp, IntoEdgeReferences, IntoNodeIdentifiers, NodeIndexable,
};

/// Edge weights that can be read as a flow capacity.
pub trait Capacity: Copy {
    fn as_capacity(self) -> f64;
}

macro_rules! impl_capacity {
    ($($t:ty),*) => {
        $(
            impl Capacity for $t {
                #[inline]
                fn as_capacity(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_capacity!(f32, f64, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// The graph traits every flow algorithm in this crate relies on.
///
/// Implemented for any petgraph graph reference whose edge weight is a
/// [`Capacity`], e.g. `&DiGraph<N, f64>` or `&StableUnGraph<N, u32>`.
pub trait FlowGraph:
    IntoEdgeReferences + IntoNodeIdentifiers + NodeIndexable + EdgeIndexable + GraphProp
{
    /// Capacity of `edge`, i.e. its weight.
    fn capacity(edge: Self::EdgeRef) -> f64;
}

impl<G> FlowGraph for G
where
    G: IntoEdgeReferences + IntoNodeIdentifiers + NodeIndexable + EdgeIndexable + GraphProp,
    G::EdgeWeight: Capacity,
{
    fn capacity(edge: G::EdgeRef) -> f64 {
        (*edge.weight()).as_capacity()
    }
}

#[cfg(test)]
mod tests {
    use petgraph::graph::{DiGraph, UnGraph};
    use petgraph::visit::{GraphProp, IntoEdgeReferences};

    use super::FlowGraph;

    fn capacities<G: FlowGraph>(graph: G) -> Vec<f64> {
        graph.edge_references().map(G::capacity).collect()
    }

    #[test]
    fn reads_integer_and_float_weights() {
        let graph = DiGraph::<(), u32>::from_edges(&[(0, 1, 3), (1, 2, 5)]);
        assert_eq!(capacities(&graph), vec![3.0, 5.0]);

        let graph = UnGraph::<(), f64>::from_edges(&[(0, 1, 0.5)]);
        assert_eq!(capacities(&graph), vec![0.5]);
    }

    #[test]
    fn directedness_comes_from_the_graph() {
        let directed = DiGraph::<(), u8>::from_edges(&[(0, 1, 1)]);
        let undirected = UnGraph::<(), u8>::from_edges(&[(0, 1, 1)]);
        assert!((&directed).is_directed());
        assert!(!(&undirected).is_directed());
    }
}
