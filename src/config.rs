use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{self, Catalog, Mechanism, ToolSpec};
use crate::error::{ArmoryError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Prefix apt invocations with `sudo`
    #[serde(default = "default_true")]
    pub sudo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipx_tools: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apt_tools: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_deps: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_tools: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_native_tools: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sudo: true,
            pipx_tools: None,
            apt_tools: None,
            native_deps: None,
            go_tools: None,
            go_native_tools: None,
        }
    }
}

impl AppConfig {
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            ArmoryError::Config("Could not determine the user config directory".to_string())
        })?;
        Ok(base.join("armory"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Load configuration.
    ///
    /// A file named with `-c` (or `$ARMORY_CONFIG`) must exist; the default
    /// location may be absent, in which case the defaults apply.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match explicit.filter(|p| !p.is_empty()) {
            Some(path) => {
                let path = PathBuf::from(shellexpand::tilde(path).as_ref());
                Self::load_from(&path, true)
            }
            None => Self::load_from(&Self::config_path()?, false),
        }
    }

    pub fn load_from(path: &Path, required: bool) -> Result<Self> {
        if !path.exists() {
            if required {
                return Err(ArmoryError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_yaml::from_str(&content).map_err(|e| {
            ArmoryError::Config(format!("Invalid config {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Tool lists for this run: configured lists replace the defaults per phase.
    pub fn catalog(&self) -> Catalog {
        let defaults = Catalog::default();

        let pick = |configured: &Option<Vec<String>>,
                    default: Vec<ToolSpec>,
                    mechanism: Mechanism| match configured {
            Some(ids) => catalog::specs(ids.as_slice(), mechanism),
            None => default,
        };

        Catalog {
            essentials: defaults.essentials,
            pipx: pick(&self.pipx_tools, defaults.pipx, Mechanism::Pipx),
            apt: pick(&self.apt_tools, defaults.apt, Mechanism::SystemPackage),
            native_deps: pick(
                &self.native_deps,
                defaults.native_deps,
                Mechanism::SystemPackage,
            ),
            go: pick(&self.go_tools, defaults.go, Mechanism::GoModule),
            go_native: pick(
                &self.go_native_tools,
                defaults.go_native,
                Mechanism::GoModuleNative,
            ),
        }
    }
}
