//! Errors surfaced by the game front end.

use thiserror::Error;

use saga_core::{EngineError, ScriptError};
use saga_view::ViewError;

/// Result type for the game front end.
pub type GameResult<T> = Result<T, GameError>;

/// Anything that can end a game session.
#[derive(Debug, Error)]
pub enum GameError {
    /// The script could not be read or parsed.
    #[error("script: {0}")]
    Script(#[from] ScriptError),

    /// The story graph is broken where the player reached it.
    #[error("story: {0}")]
    Engine(#[from] EngineError),

    /// Fonts or views could not be built.
    #[error("view: {0}")]
    View(#[from] ViewError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_engine_errors() {
        let err: GameError = EngineError::DanglingBranch("Nowhere".into()).into();
        assert!(matches!(err, GameError::Engine(_)));
        assert!(err.to_string().starts_with("story: "));
        assert!(err.to_string().contains("Nowhere"));
    }

    #[test]
    fn wraps_view_errors() {
        let err: GameError = ViewError::InvalidRevealRate(-1.0).into();
        assert_eq!(err.to_string(), "view: reveal rate must be positive and finite, got -1");
    }
}
