//! Progress bar display for pipeline runs

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for component installation
pub struct ProgressDisplay {
    component_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total component count
    pub fn new(total_components: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let component_pb = ProgressBar::new(total_components);
        component_pb.set_style(style);

        Self { component_pb }
    }

    /// Update to show the component currently being processed
    pub fn update_component(&self, component: &str, current: usize, total: usize) {
        let msg = format!("({}/{}) {}", current, total, component);
        self.component_pb.set_message(msg);
    }

    /// Increment component progress
    pub fn inc(&self) {
        self.component_pb.inc(1);
    }

    /// Finish the bar
    pub fn finish(&self) {
        self.component_pb.finish_and_clear();
    }
}
