//! Python applications via pipx.

use std::collections::HashSet;

use super::installer::Installer;
use super::types::{ToolOutcome, ToolStatus};
use crate::catalog::ToolSpec;
use crate::runner::CommandSpec;

/// Installer for pipx-managed tools
pub struct PipxInstaller<'a> {
    installer: &'a Installer<'a>,
}

impl<'a> PipxInstaller<'a> {
    pub fn new(installer: &'a Installer<'a>) -> Self {
        Self { installer }
    }

    /// `pipx ensurepath`. A failure here only means the user fixes PATH later.
    pub async fn ensure_path(&self) {
        self.installer.reporter.phase("Python tools (pipx)");

        match self
            .installer
            .run_command(&CommandSpec::new("pipx").arg("ensurepath"))
            .await
        {
            Ok(_) => self.installer.reporter.success("pipx path configured"),
            Err(e) => {
                tracing::debug!("pipx ensurepath failed: {}", e);
                self.installer
                    .reporter
                    .warning(&format!("could not configure the pipx path: {}", e));
            }
        }
    }

    /// Names of the applications pipx already manages, lowercased.
    pub async fn installed(&self) -> HashSet<String> {
        match self
            .installer
            .run_command(&CommandSpec::new("pipx").args(["list", "--short"]))
            .await
        {
            Ok(listing) => parse_listing(&listing),
            Err(e) => {
                tracing::debug!("could not list pipx packages, assuming none: {}", e);
                HashSet::new()
            }
        }
    }

    pub async fn install_all(&self, tools: &[ToolSpec]) -> Vec<ToolOutcome> {
        let installed = self.installed().await;

        let mut outcomes = Vec::with_capacity(tools.len());
        for tool in tools {
            if installed.contains(&tool.base_name().to_lowercase()) {
                self.installer
                    .reporter
                    .skipped(&format!("{} already installed", tool.base_name()));
                outcomes.push(ToolOutcome {
                    tool: tool.clone(),
                    status: ToolStatus::Skipped,
                });
                continue;
            }

            let cmd = CommandSpec::new("pipx").args(["install", tool.id.as_str()]);
            let outcome = self.installer.attempt(tool, cmd).await;
            if outcome.status.is_failed() {
                self.installer
                    .reporter
                    .hint(&format!("retry by hand: pipx install --force {}", tool.id));
            }
            outcomes.push(outcome);
        }
        outcomes
    }
}

/// `pipx list --short` prints one `name version` pair per line.
fn parse_listing(listing: &str) -> HashSet<String> {
    listing
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_lowercase)
        .collect()
}
