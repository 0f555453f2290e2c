use crate::flow::graph::FlowGraph;
use crate::flow::network::FlowNetwork;

/// A partition of the vertices into a source side and a sink side, the input
/// edges crossing it and its weight.
#[derive(Clone, Debug)]
pub struct Cut<N, E> {
    pub source_set: Vec<N>,
    pub sink_set: Vec<N>,
    pub cut_set: Vec<E>,
    pub weight: f64,
}

impl<N, E> Cut<N, E> {
    pub fn new(source_set: Vec<N>, sink_set: Vec<N>, cut_set: Vec<E>, weight: f64) -> Self {
        Self {
            source_set,
            sink_set,
            cut_set,
            weight,
        }
    }

    /// Number of crossing edges.
    pub fn size(&self) -> usize {
        self.cut_set.len()
    }
}

impl<N: PartialEq, E> Cut<N, E> {
    pub fn is_source_side(&self, node: &N) -> bool {
        self.source_set.contains(node)
    }
}

impl<N: PartialEq, E: PartialEq> PartialEq for Cut<N, E> {
    fn eq(&self, other: &Self) -> bool {
        self.source_set == other.source_set
            && self.sink_set == other.sink_set
            && self.cut_set == other.cut_set
    }
}

/// Builds the cut induced by `source_side` (indexed by dense vertex index).
///
/// Directed: edges from the source side into the sink side. Undirected: edges
/// with exactly one endpoint on the source side.
pub(crate) fn cut_from_partition<G: FlowGraph>(
    network: &FlowNetwork<G>,
    source_side: &[bool],
    weight: f64,
) -> Cut<G::NodeId, G::EdgeId> {
    let (source_set, sink_set) = (0..network.vertex_count())
        .map(|v| (v, network.node_id(v)))
        .fold((vec![], vec![]), |(mut source, mut sink), (v, node)| {
            if source_side[v] {
                source.push(node);
            } else {
                sink.push(node);
            }
            (source, sink)
        });

    let cut_set = (0..network.edge_count())
        .filter(|&e| {
            let (u, v) = network.endpoints(e);
            if network.is_directed() {
                source_side[u] && !source_side[v]
            } else {
                source_side[u] ^ source_side[v]
            }
        })
        .map(|e| network.edge_id(e))
        .collect();

    Cut::new(source_set, sink_set, cut_set, weight)
}

#[cfg(test)]
mod tests {
    use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex, UnGraph};

    use crate::flow::cut::{cut_from_partition, Cut};
    use crate::flow::network::FlowNetwork;

    #[test]
    fn directed_cut_only_counts_forward_edges() {
        let graph = DiGraph::<(), u32>::from_edges(&[(0, 1, 1), (1, 2, 1), (2, 0, 1)]);
        let network = FlowNetwork::build(&graph).unwrap();

        let cut = cut_from_partition(&network, &[true, false, false], 1.0);
        assert_eq!(cut.source_set, vec![NodeIndex::new(0)]);
        assert_eq!(cut.sink_set, vec![NodeIndex::new(1), NodeIndex::new(2)]);
        assert_eq!(cut.cut_set, vec![EdgeIndex::new(0)]);
        assert_eq!(cut.size(), 1);
        assert!(cut.is_source_side(&NodeIndex::new(0)));
    }

    #[test]
    fn undirected_cut_counts_both_directions() {
        let graph = UnGraph::<(), u32>::from_edges(&[(0, 1, 1), (1, 2, 1), (2, 0, 1)]);
        let network = FlowNetwork::build(&graph).unwrap();

        let cut = cut_from_partition(&network, &[true, false, false], 2.0);
        assert_eq!(cut.cut_set, vec![EdgeIndex::new(0), EdgeIndex::new(2)]);
        assert_eq!(cut.weight, 2.0);
    }

    #[test]
    fn equality_ignores_weight() {
        let a: Cut<usize, usize> = Cut::new(vec![0], vec![1], vec![0], 1.0);
        let b = Cut::new(vec![0], vec![1], vec![0], 1.0 + 1e-12);
        assert_eq!(a, b);
        assert_ne!(a, Cut::new(vec![1], vec![0], vec![0], 1.0));
    }
}
