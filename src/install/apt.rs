//! apt: package index refresh, bootstrap essentials and system packages.

use super::installer::Installer;
use super::types::ToolOutcome;
use crate::catalog::ToolSpec;
use crate::error::{ArmoryError, Result};

/// Installer for apt packages
pub struct AptInstaller<'a> {
    installer: &'a Installer<'a>,
}

impl<'a> AptInstaller<'a> {
    pub fn new(installer: &'a Installer<'a>) -> Self {
        Self { installer }
    }

    /// `apt-get update`. Nothing else can work without it.
    pub async fn refresh_index(&self) -> Result<()> {
        self.installer.reporter.phase("Refreshing package index");

        let cmd = self.installer.privileged("apt-get").arg("update");
        self.installer
            .run_command(&cmd)
            .await
            .map_err(ArmoryError::IndexRefresh)?;

        self.installer.reporter.success("package index up to date");
        Ok(())
    }

    /// Install the packages later phases run on (pip, pipx, git) in one go.
    pub async fn install_essentials(&self) -> Result<()> {
        let essentials = &self.installer.catalog.essentials;
        self.installer.reporter.phase("Installing essentials");

        let cmd = self
            .installer
            .privileged("apt-get")
            .args(["install", "-y"])
            .args(essentials.iter().map(|t| t.id.as_str()));
        self.installer
            .run_command(&cmd)
            .await
            .map_err(ArmoryError::Essentials)?;

        let names: Vec<&str> = essentials.iter().map(|t| t.id.as_str()).collect();
        self.installer
            .reporter
            .success(&format!("{} installed", names.join(", ")));
        Ok(())
    }

    /// Install each package on its own so one bad package cannot sink the rest.
    pub async fn install_all(&self, title: &str, tools: &[ToolSpec]) -> Vec<ToolOutcome> {
        self.installer.reporter.phase(title);

        let mut outcomes = Vec::with_capacity(tools.len());
        for tool in tools {
            let cmd = self
                .installer
                .privileged("apt-get")
                .args(["install", "-y", tool.id.as_str()]);
            outcomes.push(self.installer.attempt(tool, cmd).await);
        }
        outcomes
    }
}
