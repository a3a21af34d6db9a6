//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - resolve: Resolve command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod install;
pub mod resolve;

pub use completions::CompletionsArgs;
pub use install::InstallArgs;
pub use resolve::ResolveArgs;

/// kcm - component manager for graph knowledge bases
///
/// Resolves, downloads and installs components recorded in a knowledge store.
#[derive(Parser, Debug)]
#[command(
    name = "kcm",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Component manager for graph-based knowledge bases",
    long_about = "kcm resolves the transitive dependencies of a component recorded in a \
                  graph knowledge store, fetches each required specification or source tree \
                  from its remote hosting scheme, and installs the fetched material by \
                  executing the declared installation scripts in dependency order."
)]
pub struct Cli {
    /// Graph snapshot file describing the knowledge store
    #[arg(long, short = 'g', global = true, env = "KCM_GRAPH", default_value = "kcm.yaml")]
    pub graph: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve, download and install a component with its dependencies
    Install(InstallArgs),

    /// Print the installation order of a component without side effects
    Resolve(ResolveArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
