//! Error types for script loading and story traversal.

use std::ops::Range;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for script loading and parsing.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while reading or parsing a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file does not exist.
    #[error("script asset not found: {}", path.display())]
    AssetMissing {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The script file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The script is empty, so the character count is missing.
    #[error("script is empty: expected a character count on line 1")]
    MissingCharacterCount,

    /// A token could not be read as the number the grammar requires.
    #[error("line {line}: expected {expected}, found \"{found}\"")]
    MalformedToken {
        /// 1-based line number.
        line: usize,
        /// Byte range of the offending token in the source.
        span: Range<usize>,
        /// What the grammar expected at this position.
        expected: &'static str,
        /// The text actually found.
        found: String,
    },

    /// The character table ended before the declared count was reached.
    #[error("expected {expected} characters, script ends after {found}")]
    TruncatedCharacters {
        /// Declared character count.
        expected: usize,
        /// Characters actually read.
        found: usize,
    },

    /// An option block ended before all of its option pairs were read.
    #[error("line {line}: branch \"{branch}\" declares {expected} options, script ends after {found}")]
    TruncatedOptions {
        /// Branch whose option block is incomplete.
        branch: String,
        /// 1-based line number of the option count.
        line: usize,
        /// Byte range of the option count line.
        span: Range<usize>,
        /// Declared option count.
        expected: usize,
        /// Complete pairs actually read.
        found: usize,
    },
}

impl ScriptError {
    /// Byte range in the source this error points at, if it has one.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Self::MalformedToken { span, .. } | Self::TruncatedOptions { span, .. } => {
                Some(span.clone())
            }
            _ => None,
        }
    }
}

/// Errors raised while traversing a story.
///
/// All of these are data-integrity faults in the script: a session that hits
/// one cannot continue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A branch name has no entry in the story graph.
    #[error("branch not found: \"{0}\"")]
    DanglingBranch(String),

    /// A dialogue line names a character beyond the character table.
    #[error("character index {index} out of range (story has {len} characters)")]
    CharacterIndexOutOfRange {
        /// Index used by the line.
        index: usize,
        /// Size of the character table.
        len: usize,
    },

    /// A choice was resolved while the current branch was not waiting for one.
    #[error("the current branch is not waiting for a choice")]
    NotAwaitingChoice,

    /// The option index does not exist on the current branch.
    #[error("invalid choice {index}: branch has {available} options")]
    InvalidChoice {
        /// Requested option index.
        index: usize,
        /// Number of options on the branch.
        available: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_token_display() {
        let err = ScriptError::MalformedToken {
            line: 3,
            span: 10..14,
            expected: "an integer",
            found: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "line 3: expected an integer, found \"abc\"");
        assert_eq!(err.span(), Some(10..14));
    }

    #[test]
    fn engine_error_display() {
        let err = EngineError::CharacterIndexOutOfRange { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "character index 7 out of range (story has 3 characters)"
        );
        assert_eq!(
            EngineError::DanglingBranch("End4".into()).to_string(),
            "branch not found: \"End4\""
        );
    }
}
