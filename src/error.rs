use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArmoryError {
    #[error("Options -i and -m are mutually exclusive")]
    ConflictingModes,

    #[error("Failed to refresh the package index: {0}")]
    IndexRefresh(String),

    #[error("Failed to install essential packages: {0}")]
    Essentials(String),

    /// A tool later phases rely on is not on PATH.
    #[error("'{program}' not found in PATH. {hint}")]
    MissingPrerequisite { program: String, hint: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl ArmoryError {
    /// Process exit code for this error: 2 for usage mistakes, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            ArmoryError::ConflictingModes => 2,
            _ => 1,
        }
    }

    pub fn is_usage(&self) -> bool {
        self.exit_code() == 2
    }
}

pub type Result<T> = std::result::Result<T, ArmoryError>;
