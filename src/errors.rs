use std::fmt;

#[derive(Debug)]
pub enum RewriteError {
    InputUnavailable { path: String, reason: String },
    OutputUnwritable { path: String, reason: String },
    InvalidConfig(String),
}

impl RewriteError {
    pub fn input(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        RewriteError::InputUnavailable { path: path.into(), reason: reason.to_string() }
    }

    pub fn output(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        RewriteError::OutputUnwritable { path: path.into(), reason: reason.to_string() }
    }
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteError::InputUnavailable { path, reason } => {
                write!(f, "Cannot read source file '{}': {}", path, reason)
            }
            RewriteError::OutputUnwritable { path, reason } => {
                write!(f, "Cannot write source file '{}': {}", path, reason)
            }
            RewriteError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for RewriteError {}

impl From<String> for RewriteError {
    fn from(msg: String) -> Self {
        RewriteError::InvalidConfig(msg)
    }
}
