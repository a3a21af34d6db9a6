//! Resolve command implementation

use std::path::Path;

use crate::cli::ResolveArgs;
use crate::error::Result;
use crate::graph::{ComponentId, MemoryGraph};
use crate::resolver;

/// Run resolve command
///
/// Prints the installation order, one component per line, dependencies
/// first. Read-only.
pub fn run(graph_path: &Path, args: ResolveArgs) -> Result<()> {
    let graph = MemoryGraph::load(graph_path)?;
    let root = ComponentId::new(args.component);

    let order = resolver::resolve(&graph, &root)?;

    if args.json {
        let ids: Vec<&str> = order.iter().map(ComponentId::as_str).collect();
        println!("{}", serde_json::json!(ids));
    } else {
        for component in &order {
            println!("{}", component);
        }
    }

    Ok(())
}
