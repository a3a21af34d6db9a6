use clap::Parser;

/// Arguments for the resolve command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Print installation order:\n    kcm resolve kb-web\n\n\
                   Print installation order as JSON:\n    kcm resolve kb-web --json")]
pub struct ResolveArgs {
    /// Component identifier in the knowledge store
    pub component: String,

    /// Print the order as a JSON array
    #[arg(long)]
    pub json: bool,
}
