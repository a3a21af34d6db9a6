//! Install command implementation

use std::path::Path;

use console::style;

use crate::cli::InstallArgs;
use crate::downloader::DownloaderRegistry;
use crate::error::Result;
use crate::graph::{ComponentId, MemoryGraph};
use crate::pipeline::{FailurePolicy, OutcomeState, Pipeline, RunReport};

/// Run install command
pub fn run(graph_path: &Path, args: InstallArgs) -> Result<()> {
    let graph = MemoryGraph::load(graph_path)?;
    let root = ComponentId::new(args.component);

    let policy = if args.keep_going {
        FailurePolicy::BestEffort
    } else {
        FailurePolicy::FailFast
    };

    let mut pipeline =
        Pipeline::new(&graph, DownloaderRegistry::with_defaults()).with_failure_policy(policy);
    if !args.json {
        pipeline = pipeline.with_progress();
    }

    let report = pipeline.run(&root, &args.dir)?;

    if args.json {
        println!("{}", render_json(&report));
    } else {
        render_text(&report);
    }

    if !report.all_installed() {
        std::process::exit(1);
    }

    Ok(())
}

fn render_text(report: &RunReport) {
    for outcome in &report.outcomes {
        let state = match &outcome.state {
            OutcomeState::Installed => style("installed").green().to_string(),
            OutcomeState::Failed { reason } => {
                format!("{}: {}", style("failed").red(), reason)
            }
            other => style(other.as_str()).dim().to_string(),
        };
        println!("  {} {}", style(&outcome.component).bold(), state);
    }

    let failed = report.failed().count();
    if failed == 0 {
        println!(
            "{} {} component(s) installed",
            style("OK").green().bold(),
            report.outcomes.len()
        );
    } else {
        println!("{} {} component(s) failed", style("FAILED").red().bold(), failed);
    }
}

fn render_json(report: &RunReport) -> String {
    let components: Vec<serde_json::Value> = report
        .outcomes
        .iter()
        .map(|outcome| {
            serde_json::json!({
                "id": outcome.component.as_str(),
                "state": outcome.state.as_str(),
                "reason": match &outcome.state {
                    OutcomeState::Failed { reason } => Some(reason.as_str()),
                    _ => None,
                },
                "path": outcome.local_path.as_ref().map(|p| p.display().to_string()),
            })
        })
        .collect();

    serde_json::json!({ "components": components }).to_string()
}
