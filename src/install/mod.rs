//! Workstation installation for armory.
//!
//! Runs the install phases in a fixed order against the host. Only the apt
//! bootstrap and the `go` lookup can abort a run; every other tool failure is
//! reported and the run moves on to the next tool.
//!
//! ## Module structure
//! - `types` - Per-tool outcomes (ToolStatus, ToolOutcome, InstallReport)
//! - `installer` - Installer with phase orchestration
//! - `apt` - Package index refresh, essentials, apt packages
//! - `pipx` - Python applications via pipx
//! - `golang` - Go modules via `go install`

mod apt;
mod golang;
mod installer;
mod pipx;
mod types;

pub use installer::Installer;
