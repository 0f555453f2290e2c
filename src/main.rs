use flow_cut_trees::{
    GomoryHuTree, MaximumFlowAlgorithm, MinimumStCutAlgorithm, PadbergRaoOddMinimumCutset,
    PushRelabel,
};
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> flow_cut_trees::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_target(false))
        .init();

    // Example from CLRS book
    let mut network = DiGraph::<(), u32>::new();
    let source = network.add_node(()); // 0
    let _ = network.add_node(());
    let _ = network.add_node(());
    let _ = network.add_node(());
    let _ = network.add_node(());
    let sink = network.add_node(()); // 5
    network.extend_with_edges(&[
        (0, 1, 16), // 0
        (0, 2, 13), // 1
        (2, 1, 4),  // 2
        (1, 3, 12), // 3
        (2, 4, 14), // 4
        (3, 2, 9),  // 5
        (3, 5, 20), // 6
        (4, 3, 7),  // 7
        (4, 5, 4),  // 8
    ]);

    let mut push_relabel = PushRelabel::new(&network)?;
    let flow = push_relabel.maximum_flow(source, sink)?;
    println!("Maximum flow: {}", flow.value);
    println!("Edge flows: {:?}", flow.edge_flows()?);
    let cut = push_relabel.minimum_cut(source, sink)?;
    println!("Minimum cut: {:?}", cut);
    info!(stats = ?push_relabel.stats(), "push-relabel finished");

    // Example from the Gomory-Hu article on Wikipedia
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
    let tree = GomoryHuTree::build(&graph)?;
    for (vertex, parent, weight) in tree.edges() {
        println!("Tree edge {} - {}: {}", vertex.index(), parent.index(), weight);
    }
    println!(
        "Cut between 0 and 5: {:?}",
        tree.min_cut(NodeIndex::new(0), NodeIndex::new(5))?
    );

    let odd: Vec<NodeIndex> = (0..6).map(NodeIndex::new).collect();
    let mut solver = PadbergRaoOddMinimumCutset::new(&graph)?;
    for use_compression in [false, true] {
        let cut = solver.solve(&odd, use_compression)?;
        println!(
            "Odd minimum cut-set (compression: {}): {} {:?}",
            use_compression, cut.weight, cut.source_set
        );
    }

    Ok(())
}
