use clap::Parser;
use std::path::PathBuf;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install a component and its dependencies:\n    kcm install kb-web\n\n\
                   Install into a specific directory:\n    kcm install kb-web --dir ./downloads\n\n\
                   Keep going after a component fails:\n    kcm install kb-web --keep-going\n\n\
                   Print the run report as JSON:\n    kcm install kb-web --json")]
pub struct InstallArgs {
    /// Component identifier in the knowledge store
    pub component: String,

    /// Base download directory (one subdirectory per component)
    #[arg(long, short = 'd', value_name = "DIR", default_value = "components")]
    pub dir: PathBuf,

    /// Continue with remaining components after a failure (best-effort mode)
    #[arg(long)]
    pub keep_going: bool,

    /// Print the run report as JSON instead of styled text
    #[arg(long)]
    pub json: bool,
}
