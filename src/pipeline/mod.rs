//! Pipeline controller
//!
//! Sequences resolve -> acquire -> install over the full ordered dependency
//! list of a root component and aggregates per-component outcomes into a
//! run report.
//!
//! Resolution errors abort the run before any filesystem or network side
//! effect. Per-component download/install failures are captured in the
//! report; whether they halt the remaining components is governed by the
//! configured [`FailurePolicy`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::downloader::DownloaderRegistry;
use crate::error::Result;
use crate::graph::{ComponentId, GraphQueryGateway};
use crate::installer;
use crate::orchestrator;
use crate::progress::ProgressDisplay;
use crate::resolver;

/// What to do with remaining components after one fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop processing at the first failed component (default)
    #[default]
    FailFast,
    /// Keep processing subsequent components, accumulating all failures
    BestEffort,
}

/// Per-component state over the course of a run
///
/// `Installed` and `Failed` are terminal. Under fail-fast, components after
/// the first failure stay at `Resolved`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeState {
    Pending,
    Resolved,
    Downloaded,
    Installed,
    Failed { reason: String },
}

impl OutcomeState {
    pub fn as_str(&self) -> &str {
        match self {
            OutcomeState::Pending => "pending",
            OutcomeState::Resolved => "resolved",
            OutcomeState::Downloaded => "downloaded",
            OutcomeState::Installed => "installed",
            OutcomeState::Failed { .. } => "failed",
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, OutcomeState::Failed { .. })
    }
}

/// Outcome of one component in a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub component: ComponentId,
    pub state: OutcomeState,
    /// Local directory the component was acquired into, once downloaded
    pub local_path: Option<PathBuf>,
}

impl Outcome {
    fn new(component: ComponentId) -> Self {
        Self {
            component,
            state: OutcomeState::Pending,
            local_path: None,
        }
    }
}

/// Full report of one pipeline run, in resolution order
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outcomes: Vec<Outcome>,
}

impl RunReport {
    pub fn failed(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.state.is_failed())
    }

    pub fn all_installed(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| o.state == OutcomeState::Installed)
    }

    fn outcome_mut(&mut self, component: &ComponentId) -> Option<&mut Outcome> {
        self.outcomes
            .iter_mut()
            .find(|o| &o.component == component)
    }
}

/// The resolve -> acquire -> install pipeline for one knowledge store
pub struct Pipeline<'a, G: GraphQueryGateway + ?Sized> {
    gateway: &'a G,
    registry: DownloaderRegistry,
    policy: FailurePolicy,
    cancel: Option<Arc<AtomicBool>>,
    progress: bool,
}

impl<'a, G: GraphQueryGateway + ?Sized> Pipeline<'a, G> {
    pub fn new(gateway: &'a G, registry: DownloaderRegistry) -> Self {
        Self {
            gateway,
            registry,
            policy: FailurePolicy::default(),
            cancel: None,
            progress: false,
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Cancellation flag, checked between components (never mid-download)
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Show a terminal progress bar while running
    pub fn with_progress(mut self) -> Self {
        self.progress = true;
        self
    }

    /// Run the pipeline for `root`, downloading into `base_dir`
    ///
    /// # Errors
    ///
    /// Only resolution errors ([`crate::error::KcmError::CyclicDependency`],
    /// [`crate::error::KcmError::ComponentNotFound`],
    /// [`crate::error::KcmError::ClassNotFound`]) abort the run; they occur
    /// before any side effect. Download and install failures are recorded
    /// in the returned report instead.
    pub fn run(&self, root: &ComponentId, base_dir: &Path) -> Result<RunReport> {
        let order = resolver::resolve(self.gateway, root)?;

        // Classification failures abort before any side effect, like cycles
        for component in &order {
            if self.gateway.classify(component) == crate::graph::ComponentKind::Unknown {
                return Err(crate::error::KcmError::ClassNotFound {
                    id: component.to_string(),
                });
            }
        }

        let mut report = RunReport {
            outcomes: order.iter().cloned().map(Outcome::new).collect(),
        };

        // Resolution succeeded for the whole closure
        for outcome in &mut report.outcomes {
            outcome.state = OutcomeState::Resolved;
        }

        let display = self
            .progress
            .then(|| ProgressDisplay::new(order.len() as u64));

        let total = order.len();
        for (index, component) in order.iter().enumerate() {
            if self.cancelled() {
                break;
            }

            if let Some(display) = &display {
                display.update_component(component.as_str(), index + 1, total);
            }

            let state = self.process_component(&mut report, component, base_dir);
            let stop = state.is_failed() && self.policy == FailurePolicy::FailFast;

            if let Some(outcome) = report.outcome_mut(component) {
                outcome.state = state;
            }
            if let Some(display) = &display {
                display.inc();
            }

            if stop {
                break;
            }
        }

        if let Some(display) = &display {
            display.finish();
        }

        Ok(report)
    }

    /// Acquire then install one component; returns its terminal state
    fn process_component(
        &self,
        report: &mut RunReport,
        component: &ComponentId,
        base_dir: &Path,
    ) -> OutcomeState {
        let local_path =
            match orchestrator::acquire(self.gateway, &self.registry, component, base_dir) {
                Ok(path) => path,
                Err(err) => {
                    return OutcomeState::Failed {
                        reason: err.to_string(),
                    };
                }
            };

        if let Some(outcome) = report.outcome_mut(component) {
            outcome.state = OutcomeState::Downloaded;
            outcome.local_path = Some(local_path.clone());
        }

        match installer::install(self.gateway, component, &local_path) {
            Ok(()) => OutcomeState::Installed,
            Err(err) => OutcomeState::Failed {
                reason: err.to_string(),
            },
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
