//! Console output for the install run.
//!
//! Progress and per-tool results go to the "out" stream, fatal errors to the
//! "err" stream. Both are injectable so runs can be captured in tests.

use std::io::{self, Write};
use std::sync::Mutex;

use console::style;

const BANNER: &str = r#"╔═══════════════════════════╗
║  a r m o r y              ║
║  workstation provisioner  ║
╚═══════════════════════════╝"#;

pub struct Reporter {
    out: Mutex<Box<dyn Write + Send>>,
    err: Mutex<Box<dyn Write + Send>>,
}

impl Reporter {
    pub fn new(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    pub fn stdio() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    fn line(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", text);
            let _ = out.flush();
        }
    }

    fn err_line(&self, text: &str) {
        if let Ok(mut err) = self.err.lock() {
            let _ = writeln!(err, "{}", text);
            let _ = err.flush();
        }
    }

    pub fn banner(&self) {
        self.line(&style(BANNER).cyan().to_string());
    }

    /// Heading for a new phase.
    pub fn phase(&self, title: &str) {
        self.line("");
        self.line(&format!("{} {}", style("==>").cyan().bold(), style(title).bold()));
    }

    pub fn success(&self, message: &str) {
        self.line(&format!("  {} {}", style("✓").green().bold(), message));
    }

    pub fn skipped(&self, message: &str) {
        self.line(&format!("  {} {}", style("•").dim(), style(message).dim()));
    }

    /// Non-fatal failure, reported inline with the rest of the run.
    pub fn warning(&self, message: &str) {
        self.line(&format!("  {} {}", style("!").yellow().bold(), style(message).yellow()));
    }

    /// A command a dry run would have executed.
    pub fn command(&self, rendered: &str) {
        self.line(&format!("  {} {}", style("would run:").dim(), rendered));
    }

    pub fn hint(&self, message: &str) {
        self.line(&format!("    {}", style(message).dim()));
    }

    /// Fatal failure.
    pub fn error(&self, message: &str) {
        self.err_line(&format!("{} {}", style("✗").red().bold(), style(message).red()));
    }

    pub fn text(&self, text: &str) {
        self.line(text.trim_end_matches('\n'));
    }

    pub fn done(&self, message: &str) {
        self.line("");
        self.line(&style(message).green().bold().to_string());
    }
}

#[cfg(test)]
pub mod capture {
    //! In-memory writers for asserting on output.

    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use super::Reporter;

    #[derive(Clone, Default)]
    pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// A reporter plus handles to what it wrote to stdout and stderr.
    pub fn reporter() -> (Reporter, SharedBuffer, SharedBuffer) {
        console::set_colors_enabled(false);
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let reporter = Reporter::new(Box::new(out.clone()), Box::new(err.clone()));
        (reporter, out, err)
    }
}
