//! kcm - component manager for graph knowledge bases
//!
//! Resolves the transitive dependencies of a component recorded in a graph
//! knowledge store, fetches each required specification or source tree from
//! its remote hosting scheme, and installs the fetched material by executing
//! the declared installation scripts in dependency order.

use clap::Parser;

mod cli;
mod commands;
mod common;
mod downloader;
mod error;
mod graph;
mod installer;
mod locator;
mod orchestrator;
mod pipeline;
mod progress;
mod resolver;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(&cli.graph, args),
        Commands::Resolve(args) => commands::resolve::run(&cli.graph, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
