use clap::{CommandFactory, Parser};

use crate::catalog;
use crate::config::AppConfig;
use crate::error::{ArmoryError, Result};
use crate::install::Installer;
use crate::runner::{CommandRunner, DryRunner, SystemRunner};
use crate::ui::Reporter;

#[derive(Parser, Debug)]
#[command(name = "armory")]
#[command(version)]
#[command(disable_help_flag = true)]
#[command(about = "Provision a security-tooling workstation")]
#[command(long_about = "Provision a security-tooling workstation.\n\nInstalls apt packages, pipx applications and Go modules in a fixed order. \
Individual tool failures are reported and skipped; only a broken apt bootstrap or a missing go toolchain stops the run.")]
#[command(after_help = "Exit codes:\n  0  success (individual tools may still have failed)\n  1  fatal precondition failure\n  2  invalid or conflicting options")]
pub struct Cli {
    /// Run the automated install sequence
    #[arg(short, long)]
    pub install: bool,

    /// Print the manual-install instructions
    #[arg(short, long)]
    pub manual: bool,

    /// Print this help
    #[arg(short, long)]
    pub help: bool,

    /// With -i: print the commands instead of running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file (default: ~/.config/armory/config.yaml)
    #[arg(short, long, value_name = "PATH", env = "ARMORY_CONFIG")]
    pub config: Option<String>,
}

/// What a single invocation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Help,
    Manual,
    Install,
}

impl RunMode {
    /// Install and manual are mutually exclusive; with neither, show help.
    pub fn select(install: bool, manual: bool, help: bool) -> Result<Self> {
        match (install, manual) {
            (true, true) => Err(ArmoryError::ConflictingModes),
            _ if help => Ok(RunMode::Help),
            (true, false) => Ok(RunMode::Install),
            (false, true) => Ok(RunMode::Manual),
            (false, false) => Ok(RunMode::Help),
        }
    }
}

/// Rendered help text.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

impl Cli {
    pub fn mode(&self) -> Result<RunMode> {
        RunMode::select(self.install, self.manual, self.help)
    }

    pub async fn execute(self) -> Result<()> {
        let reporter = Reporter::stdio();
        if self.dry_run {
            self.execute_with(&DryRunner::new(&reporter), &reporter).await
        } else {
            self.execute_with(&SystemRunner, &reporter).await
        }
    }

    pub async fn execute_with(&self, runner: &dyn CommandRunner, reporter: &Reporter) -> Result<()> {
        match self.mode()? {
            RunMode::Help => {
                reporter.text(&usage());
                Ok(())
            }
            RunMode::Manual => {
                reporter.text("Install these tools by hand:\n");
                reporter.text(&catalog::manual_text());
                Ok(())
            }
            RunMode::Install => {
                let config = AppConfig::load(self.config.as_deref())?;
                Installer::new(runner, reporter, &config).run().await?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::mock::MockRunner;
    use crate::ui::capture;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("armory").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(parse(&[]).mode().unwrap(), RunMode::Help);
        assert_eq!(parse(&["-h"]).mode().unwrap(), RunMode::Help);
        assert_eq!(parse(&["-m"]).mode().unwrap(), RunMode::Manual);
        assert_eq!(parse(&["-i"]).mode().unwrap(), RunMode::Install);
        assert_eq!(parse(&["--install", "-n"]).mode().unwrap(), RunMode::Install);
    }

    #[test]
    fn test_conflicting_modes() {
        for args in [&["-i", "-m"][..], &["-im"][..], &["-m", "-i", "-h"][..]] {
            let err = parse(args).mode().unwrap_err();
            assert!(matches!(err, ArmoryError::ConflictingModes));
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_unknown_flag_is_usage_error() {
        let err = Cli::try_parse_from(["armory", "-z"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let rendered = err.to_string();
        assert!(rendered.contains("'-z'"));
        assert!(rendered.contains("Usage: armory"));

        let err = Cli::try_parse_from(["armory", "install"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_usage_lists_modes() {
        let text = usage();
        assert!(text.contains("--install"));
        assert!(text.contains("--manual"));
        assert!(text.contains("Exit codes"));
    }

    #[tokio::test]
    async fn test_help_touches_nothing() {
        for args in [&[][..], &["-h"][..]] {
            let runner = MockRunner::new().with_program("go");
            let (reporter, out, err) = capture::reporter();
            parse(args).execute_with(&runner, &reporter).await.unwrap();

            assert!(out.contents().contains("Usage:"));
            assert!(err.contents().is_empty());
            assert!(runner.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn test_manual_prints_three_recipes_only() {
        let runner = MockRunner::new().with_program("go");
        let (reporter, out, _) = capture::reporter();
        parse(&["-m"]).execute_with(&runner, &reporter).await.unwrap();

        let out = out.contents();
        assert!(out.contains("1. BloodHound Community Edition"));
        assert!(out.contains("2. Burp Suite"));
        assert!(out.contains("3. Metasploit Framework"));
        assert!(!out.contains("4. "));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_conflict_runs_no_phase() {
        let runner = MockRunner::new().with_program("go");
        let (reporter, out, _) = capture::reporter();
        let err = parse(&["-i", "-m"])
            .execute_with(&runner, &reporter)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("mutually exclusive"));
        assert!(runner.calls().is_empty());
        assert!(out.contents().is_empty());
    }

    #[tokio::test]
    async fn test_install_with_missing_config_file() {
        let runner = MockRunner::new().with_program("go");
        let (reporter, _, _) = capture::reporter();
        let err = parse(&["-i", "-c", "/nonexistent/armory.yaml"])
            .execute_with(&runner, &reporter)
            .await
            .unwrap_err();

        assert!(matches!(err, ArmoryError::Config(_)));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_install_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "sudo: false\npipx_tools: []\napt_tools: [nmap]\nnative_deps: []\ngo_tools: []\ngo_native_tools: []\n",
        )
        .unwrap();

        let runner = MockRunner::new().with_program("go");
        let (reporter, _, _) = capture::reporter();
        parse(&["-i", "-c", path.to_str().unwrap()])
            .execute_with(&runner, &reporter)
            .await
            .unwrap();

        assert_eq!(
            runner.calls(),
            vec![
                "apt-get update",
                "apt-get install -y python3-pip pipx git",
                "pipx ensurepath",
                "pipx list --short",
                "apt-get install -y nmap",
            ]
        );
    }
}
