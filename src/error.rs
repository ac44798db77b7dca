//! Error types with fix suggestions

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SkeletonError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Errors surfaced by the skeleton.
///
/// Lookup misses (unknown tab or widget keys) and a saturated refresh
/// channel are deliberately not represented here: both are no-ops.
#[derive(Error, Debug)]
pub enum SkeletonError {
    #[error("SKEL-001: no pages added, add at least one page before starting")]
    NoPages,

    #[error("SKEL-010: invalid configuration in {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("SKEL-011: YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("SKEL-020: terminal error: {reason}")]
    Terminal { reason: String },

    #[error("SKEL-090: IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SkeletonError {
    pub(crate) fn config(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Error code (e.g. `SKEL-001`)
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoPages => "SKEL-001",
            Self::Config { .. } => "SKEL-010",
            Self::Yaml(_) => "SKEL-011",
            Self::Terminal { .. } => "SKEL-020",
            Self::Io(_) => "SKEL-090",
        }
    }
}

impl FixSuggestion for SkeletonError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            SkeletonError::NoPages => Some("Call add_page() at least once before running"),
            SkeletonError::Config { .. } => {
                Some("Check key names (e.g. ctrl+left) and that capacities are positive")
            }
            SkeletonError::Yaml(_) => Some("Check YAML syntax: indentation and quoting"),
            SkeletonError::Terminal { .. } => Some("Run inside an interactive terminal (TTY)"),
            SkeletonError::Io(_) => Some("Check file path and permissions"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_pages_message() {
        let err = SkeletonError::NoPages;
        assert!(err.to_string().contains("SKEL-001"));
        assert_eq!(err.code(), "SKEL-001");
        assert!(err.fix_suggestion().is_some());
    }

    #[test]
    fn test_config_error_includes_path() {
        let err = SkeletonError::config("skeleton.yaml", "unknown key 'ctrl+?'");
        let msg = err.to_string();
        assert!(msg.contains("skeleton.yaml"));
        assert!(msg.contains("ctrl+?"));
    }
}
