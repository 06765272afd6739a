use clap::Parser;
use keiro::prelude::*;
use std::fs;
use std::time::Instant;

/// Workflow document inspector for the keiro graph engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow document JSON file
    document_path: String,

    /// Print every node and edge after import
    #[arg(short, long)]
    verbose: bool,

    /// Re-export the imported graph and print the persistence-shape JSON
    #[arg(long)]
    round_trip: bool,
}

fn main() {
    let cli = Cli::parse();
    let total_start = Instant::now();

    let raw = fs::read_to_string(&cli.document_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read document file '{}': {}",
            &cli.document_path, e
        ))
    });
    let document: WorkflowDocument = serde_json::from_str(&raw)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse document JSON: {}", e)));

    let import_start = Instant::now();
    let (nodes, edges) = import_document(&document)
        .unwrap_or_else(|e| exit_with_error(&format!("Import failed: {}", e)));
    let import_duration = import_start.elapsed();

    let mut store = GraphStore::new();
    store.initialize_from_backend(nodes, edges);

    println!("Imported '{}'", cli.document_path);
    println!("  Nodes: {}", store.nodes().len());
    println!("  Edges: {}", store.edges().len());

    let triggers = store
        .nodes()
        .iter()
        .filter(|n| n.node_type.is_trigger())
        .count();
    let loops = store
        .nodes()
        .iter()
        .filter(|n| n.node_type == NodeType::Loop)
        .count();
    let loop_edges = store.edges().iter().filter(|e| e.is_loop_edge()).count();
    println!("  Triggers: {}", triggers);
    println!("  Loops: {} ({} loop-classified edges)", loops, loop_edges);

    if cli.verbose {
        println!("\n--- Nodes ---");
        for node in store.nodes() {
            println!(
                "  {} [{}] '{}' outputs={:?}",
                node.id, node.node_type, node.name, node.outputs
            );
        }
        println!("\n--- Edges ---");
        for edge in store.edges() {
            let role = edge
                .loop_role
                .map(|r| format!(" ({})", r))
                .unwrap_or_default();
            println!(
                "  {} --{}--> {}{}",
                edge.source, edge.source_handle, edge.target, role
            );
        }
    }

    if cli.round_trip {
        let exported = WorkflowDocument {
            nodes: store.nodes().iter().map(to_external_node).collect(),
            edges: store.edges().iter().map(to_external_edge).collect(),
        };
        let json = serde_json::to_string_pretty(&exported)
            .unwrap_or_else(|e| exit_with_error(&format!("Re-export failed: {}", e)));
        println!("\n{}", json);
    }

    println!("\n--- Performance Summary ---");
    println!("Import:          {:?}", import_duration);
    println!("Total Execution: {:?}", total_start.elapsed());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
