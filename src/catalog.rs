//! Tool catalog for the armory workstation.
//!
//! Every tool armory knows how to install is listed here, grouped by the
//! mechanism that installs it:
//! - pipx for Python applications (PyPI names or VCS URLs)
//! - apt for system packages and native build dependencies
//! - `go install` for Go modules, with or without cgo
//!
//! Tools that cannot be installed unattended are described as manual recipes.

use serde::{Deserialize, Serialize};

/// How a tool gets onto the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mechanism {
    /// `pipx install <spec>`
    Pipx,
    /// `apt-get install -y <package>`
    SystemPackage,
    /// `go install <module>` with `GO111MODULE=on`
    GoModule,
    /// `go install <module>` with `CGO_ENABLED=1`
    GoModuleNative,
}

impl Mechanism {
    pub fn label(&self) -> &'static str {
        match self {
            Mechanism::Pipx => "pipx",
            Mechanism::SystemPackage => "apt",
            Mechanism::GoModule => "go",
            Mechanism::GoModuleNative => "go (cgo)",
        }
    }
}

/// A single installable tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Identifier handed to the installer (URL, package name or module path)
    pub id: String,
    pub mechanism: Mechanism,
}

impl ToolSpec {
    pub fn new(id: impl Into<String>, mechanism: Mechanism) -> Self {
        Self {
            id: id.into(),
            mechanism,
        }
    }

    /// Short name of the tool, as package managers list it.
    ///
    /// `git+https://github.com/Pennyw0rth/NetExec.git@main` -> `NetExec`,
    /// `certipy-ad[full]==4.8` -> `certipy-ad`,
    /// `github.com/ffuf/ffuf/v2@latest` -> `ffuf`.
    pub fn base_name(&self) -> &str {
        let id = self.id.trim().trim_start_matches("git+").trim_end_matches('/');
        let last = id.rsplit('/').next().unwrap_or(id);
        let last = last.split('@').next().unwrap_or(last);
        let last = last
            .split(|c: char| matches!(c, '[' | '=' | '<' | '>' | '!' | '~' | ';'))
            .next()
            .unwrap_or(last);
        let last = last.strip_suffix(".git").unwrap_or(last);

        // Go major-version suffixes (`.../ffuf/v2`) name the module one level up
        if is_major_version(last) {
            let parent = id.rsplit('/').nth(1);
            if let Some(parent) = parent {
                return parent;
            }
        }

        last
    }
}

fn is_major_version(segment: &str) -> bool {
    segment.len() > 1
        && segment.starts_with('v')
        && segment[1..].chars().all(|c| c.is_ascii_digit())
}

// =============================================================================
// Default lists
// =============================================================================

/// Bootstrap packages every later phase depends on.
pub const ESSENTIAL_PACKAGES: &[&str] = &["python3-pip", "pipx", "git"];

pub const PIPX_TOOLS: &[&str] = &[
    "git+https://github.com/Pennyw0rth/NetExec",
    "impacket",
    "certipy-ad",
    "bloodhound",
    "git+https://github.com/dirkjanm/mitm6",
    "git+https://github.com/login-securite/DonPAPI",
];

pub const APT_TOOLS: &[&str] = &[
    "nmap",
    "masscan",
    "hydra",
    "john",
    "hashcat",
    "sqlmap",
    "gobuster",
    "nikto",
    "smbclient",
    "golang-go",
];

/// Headers and toolchains the cgo modules link against.
pub const NATIVE_DEPS: &[&str] = &[
    "build-essential",
    "libpcap-dev",
    "libusb-1.0-0-dev",
    "libnetfilter-queue-dev",
];

pub const GO_TOOLS: &[&str] = &[
    "github.com/projectdiscovery/subfinder/v2/cmd/subfinder@latest",
    "github.com/projectdiscovery/httpx/cmd/httpx@latest",
    "github.com/projectdiscovery/nuclei/v3/cmd/nuclei@latest",
    "github.com/ffuf/ffuf/v2@latest",
    "github.com/OJ/gobuster/v3@latest",
];

pub const GO_NATIVE_TOOLS: &[&str] = &[
    "github.com/projectdiscovery/naabu/v2/cmd/naabu@latest",
    "github.com/bettercap/bettercap@latest",
];

/// The full set of tools for one install run, grouped by phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub essentials: Vec<ToolSpec>,
    pub pipx: Vec<ToolSpec>,
    pub apt: Vec<ToolSpec>,
    pub native_deps: Vec<ToolSpec>,
    pub go: Vec<ToolSpec>,
    pub go_native: Vec<ToolSpec>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            essentials: specs(ESSENTIAL_PACKAGES, Mechanism::SystemPackage),
            pipx: specs(PIPX_TOOLS, Mechanism::Pipx),
            apt: specs(APT_TOOLS, Mechanism::SystemPackage),
            native_deps: specs(NATIVE_DEPS, Mechanism::SystemPackage),
            go: specs(GO_TOOLS, Mechanism::GoModule),
            go_native: specs(GO_NATIVE_TOOLS, Mechanism::GoModuleNative),
        }
    }
}

pub fn specs<S: AsRef<str>>(ids: &[S], mechanism: Mechanism) -> Vec<ToolSpec> {
    ids.iter()
        .map(|id| ToolSpec::new(id.as_ref(), mechanism))
        .collect()
}

// =============================================================================
// Manual recipes
// =============================================================================

/// A tool that has to be installed by hand, with the steps to do it.
#[derive(Debug, Clone, Copy)]
pub struct ManualRecipe {
    pub name: &'static str,
    pub steps: &'static [&'static str],
}

pub const MANUAL_RECIPES: &[ManualRecipe] = &[
    ManualRecipe {
        name: "BloodHound Community Edition",
        steps: &[
            "sudo apt-get install -y docker.io docker-compose-v2",
            "curl -L https://ghst.ly/getbhce -o docker-compose.yml",
            "sudo docker compose pull && sudo docker compose up -d",
            "Open http://localhost:8080/ui/login and use the initial password from the container logs",
        ],
    },
    ManualRecipe {
        name: "Burp Suite",
        steps: &[
            "Download the Linux installer from https://portswigger.net/burp/releases",
            "chmod +x burpsuite_*_linux.sh && ./burpsuite_*_linux.sh",
            "Import the Burp CA certificate into your browser",
        ],
    },
    ManualRecipe {
        name: "Metasploit Framework",
        steps: &[
            "curl https://raw.githubusercontent.com/rapid7/metasploit-omnibus/master/config/templates/metasploit-framework-wrappers/msfupdate.erb > msfinstall",
            "chmod 755 msfinstall && sudo ./msfinstall",
            "msfdb init",
        ],
    },
];

/// Render the manual recipes as numbered, indented paragraphs.
pub fn manual_text() -> String {
    let mut text = String::new();

    for (idx, recipe) in MANUAL_RECIPES.iter().enumerate() {
        if idx > 0 {
            text.push('\n');
        }
        text.push_str(&format!("{}. {}\n", idx + 1, recipe.name));
        for step in recipe.steps {
            text.push_str(&format!("   - {}\n", step));
        }
    }

    text
}
