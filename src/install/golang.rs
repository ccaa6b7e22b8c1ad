//! Go modules via `go install`.

use super::installer::Installer;
use super::types::ToolOutcome;
use crate::catalog::{Mechanism, ToolSpec};
use crate::error::{ArmoryError, Result};
use crate::runner::CommandSpec;

/// Installer for Go modules
pub struct GoInstaller<'a> {
    installer: &'a Installer<'a>,
}

impl<'a> GoInstaller<'a> {
    pub const PATH_HINT: &'static str =
        "Go binaries land in $(go env GOPATH)/bin; add it to your PATH to use them.";

    pub fn new(installer: &'a Installer<'a>) -> Self {
        Self { installer }
    }

    /// The go toolchain has to be on PATH before any module can be built.
    pub fn ensure_available(&self) -> Result<()> {
        match self.installer.runner.find_program("go") {
            Some(path) => {
                tracing::debug!(path = %path.display(), "found go toolchain");
                Ok(())
            }
            None => Err(ArmoryError::MissingPrerequisite {
                program: "go".to_string(),
                hint: "Install golang-go (or a toolchain from https://go.dev/dl/) and re-run with -i."
                    .to_string(),
            }),
        }
    }

    pub async fn install_all(&self, title: &str, tools: &[ToolSpec]) -> Vec<ToolOutcome> {
        self.installer.reporter.phase(title);

        let mut outcomes = Vec::with_capacity(tools.len());
        for tool in tools {
            outcomes.push(self.installer.attempt(tool, go_install(tool)).await);
        }
        outcomes
    }
}

/// `go install <module>` with the environment the module's mechanism needs.
fn go_install(tool: &ToolSpec) -> CommandSpec {
    let cmd = CommandSpec::new("go").args(["install", tool.id.as_str()]);
    match tool.mechanism {
        Mechanism::GoModuleNative => cmd.env("CGO_ENABLED", "1"),
        _ => cmd.env("GO111MODULE", "on"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::runner::mock::MockRunner;
    use crate::ui::capture;

    #[test]
    fn test_go_install_env_per_mechanism() {
        let plain = go_install(&ToolSpec::new(
            "github.com/ffuf/ffuf/v2@latest",
            Mechanism::GoModule,
        ));
        assert_eq!(plain.envs, vec![("GO111MODULE".to_string(), "on".to_string())]);

        let native = go_install(&ToolSpec::new(
            "github.com/bettercap/bettercap@latest",
            Mechanism::GoModuleNative,
        ));
        assert_eq!(native.envs, vec![("CGO_ENABLED".to_string(), "1".to_string())]);
        assert_eq!(native.args, vec!["install", "github.com/bettercap/bettercap@latest"]);
    }

    #[test]
    fn test_ensure_available() {
        let (reporter, _, _) = capture::reporter();
        let config = AppConfig::default();

        let with_go = MockRunner::new().with_program("go");
        let installer = Installer::new(&with_go, &reporter, &config);
        assert!(GoInstaller::new(&installer).ensure_available().is_ok());

        let without_go = MockRunner::new();
        let installer = Installer::new(&without_go, &reporter, &config);
        let err = GoInstaller::new(&installer).ensure_available().unwrap_err();
        assert!(err.to_string().starts_with("'go' not found in PATH."));
    }
}
