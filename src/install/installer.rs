//! Installer - Orchestrates the install phases.

use std::time::Instant;

use super::apt::AptInstaller;
use super::golang::GoInstaller;
use super::pipx::PipxInstaller;
use super::types::{InstallReport, ToolOutcome, ToolStatus};
use crate::catalog::{self, Catalog, ToolSpec};
use crate::config::AppConfig;
use crate::error::Result;
use crate::runner::{CommandRunner, CommandSpec};
use crate::ui::Reporter;

pub struct Installer<'a> {
    pub(crate) runner: &'a dyn CommandRunner,
    pub(crate) reporter: &'a Reporter,
    pub(crate) catalog: Catalog,
    pub(crate) sudo: bool,
}

impl<'a> Installer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, reporter: &'a Reporter, config: &AppConfig) -> Self {
        Self {
            runner,
            reporter,
            catalog: config.catalog(),
            sudo: config.sudo,
        }
    }

    pub async fn run(&self) -> Result<InstallReport> {
        tracing::info!("Starting workstation installation");
        let started = Instant::now();
        let mut report = InstallReport::default();

        self.reporter.banner();

        // Phase 0: bootstrap, the only fatal apt steps
        let apt = AptInstaller::new(self);
        apt.refresh_index().await?;
        apt.install_essentials().await?;

        // Phase 1: Python applications
        let pipx = PipxInstaller::new(self);
        pipx.ensure_path().await;
        report.extend(pipx.install_all(&self.catalog.pipx).await);

        // Phase 2: apt packages, then the headers cgo builds need
        report.extend(apt.install_all("System tools (apt)", &self.catalog.apt).await);
        report.extend(
            apt.install_all("Native dependencies (apt)", &self.catalog.native_deps)
                .await,
        );

        // Phase 3: Go modules, gated on a go toolchain
        let go = GoInstaller::new(self);
        go.ensure_available()?;
        report.extend(go.install_all("Go tools", &self.catalog.go).await);
        report.extend(go.install_all("Go tools (cgo)", &self.catalog.go_native).await);

        self.reporter.phase("Manual follow-up");
        self.reporter.text("These tools still need to be installed by hand:\n");
        self.reporter.text(&catalog::manual_text());
        self.reporter.hint(GoInstaller::PATH_HINT);
        self.reporter.done("Workstation setup finished.");

        let failed: Vec<&str> = report.failed().map(|o| o.tool.id.as_str()).collect();
        tracing::debug!(
            attempted = report.outcomes.len(),
            failed = ?failed,
            elapsed_secs = started.elapsed().as_secs(),
            "Workstation installation completed"
        );

        Ok(report)
    }

    /// Run a command and fold spawn errors and non-zero exits into `Err`.
    pub(crate) async fn run_command(&self, cmd: &CommandSpec) -> std::result::Result<String, String> {
        match self.runner.run(cmd).await {
            Ok(output) if output.success => Ok(output.stdout),
            Ok(output) => {
                tracing::debug!(command = %cmd, stderr = %output.stderr, "command failed");
                Err(last_line(&output.stderr)
                    .unwrap_or("exited with non-zero status")
                    .to_string())
            }
            Err(e) => Err(e.to_string()),
        }
    }

    /// Attempt one tool install. Failures are reported and contained here.
    pub(crate) async fn attempt(&self, tool: &ToolSpec, cmd: CommandSpec) -> ToolOutcome {
        let status = match self.run_command(&cmd).await {
            Ok(_) => {
                self.reporter.success(&format!("{} installed", tool.base_name()));
                ToolStatus::Done
            }
            Err(e) => {
                tracing::debug!(
                    tool = %tool.id,
                    mechanism = tool.mechanism.label(),
                    "install failed: {}",
                    e
                );
                self.reporter.warning(&format!(
                    "{} failed to install via {}: {}",
                    tool.base_name(),
                    tool.mechanism.label(),
                    e
                ));
                ToolStatus::Failed(e)
            }
        };

        ToolOutcome {
            tool: tool.clone(),
            status,
        }
    }

    /// Prefix with sudo when configured.
    pub(crate) fn privileged(&self, program: &str) -> CommandSpec {
        if self.sudo {
            CommandSpec::new("sudo").arg(program)
        } else {
            CommandSpec::new(program)
        }
    }
}

fn last_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).rev().find(|l| !l.is_empty())
}
