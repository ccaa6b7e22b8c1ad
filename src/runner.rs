//! Process execution for the installers.
//!
//! Installers never spawn processes themselves; they describe a command as a
//! [`CommandSpec`] and hand it to a [`CommandRunner`]. The system runner runs
//! it on the host, the dry-run runner only prints it.

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;

use anyhow::Context;
use async_trait::async_trait;

use crate::error::Result;
use crate::ui::Reporter;

/// A program invocation: program, arguments and extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.envs {
            write!(f, "{}={} ", key, value)?;
        }
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion.
    ///
    /// `Err` means the process could not be started at all; a process that ran
    /// and exited non-zero is an `Ok` output with `success == false`.
    async fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput>;

    /// Locate an executable on PATH.
    fn find_program(&self, name: &str) -> Option<PathBuf>;
}

/// Runs commands on the host and waits for each to exit.
#[derive(Debug, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput> {
        tracing::debug!(command = %cmd, "running");

        let output = tokio::process::Command::new(&cmd.program)
            .args(&cmd.args)
            .envs(cmd.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("failed to start '{}'", cmd.program))?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    fn find_program(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }
}

/// Prints commands instead of running them. Every command "succeeds".
pub struct DryRunner<'a> {
    reporter: &'a Reporter,
}

impl<'a> DryRunner<'a> {
    pub fn new(reporter: &'a Reporter) -> Self {
        Self { reporter }
    }
}

#[async_trait]
impl CommandRunner for DryRunner<'_> {
    async fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput> {
        self.reporter.command(&cmd.to_string());
        Ok(CommandOutput::ok(""))
    }

    fn find_program(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }
}
