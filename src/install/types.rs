//! Per-tool outcomes of an install run.

use crate::catalog::ToolSpec;

/// Result of a single tool installation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// Installed successfully
    Done,
    /// Already present, nothing to do
    Skipped,
    /// Installation failed; carries the installer's error output
    Failed(String),
}

impl ToolStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, ToolStatus::Failed(_))
    }
}

#[derive(Debug, Clone)]
pub struct ToolOutcome {
    pub tool: ToolSpec,
    pub status: ToolStatus,
}

/// Everything attempted during one run, in order.
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    pub outcomes: Vec<ToolOutcome>,
}

impl InstallReport {
    pub fn extend(&mut self, outcomes: Vec<ToolOutcome>) {
        self.outcomes.extend(outcomes);
    }

    pub fn failed(&self) -> impl Iterator<Item = &ToolOutcome> {
        self.outcomes.iter().filter(|o| o.status.is_failed())
    }
}

#[cfg(test)]
impl InstallReport {
    pub fn status_of(&self, id: &str) -> Option<&ToolStatus> {
        self.outcomes
            .iter()
            .find(|o| o.tool.id == id)
            .map(|o| &o.status)
    }
}
