use thiserror::Error;

/// Errors the game core can surface to its caller.
///
/// Ordinary game outcomes (wrong guess, duplicate letter, timeout, a settled
/// tournament) are never errors; they travel as plain return values.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("secret word must contain at least one non-whitespace character")]
    EmptyWord,

    #[error("mistake budget must be at least 1")]
    ZeroMistakeBudget,

    /// The word-supply collaborator failed before a round could start.
    /// Recoverable at the caller; no round state exists at this point.
    #[error("word supply '{source_name}' failed")]
    WordSupply {
        source_name: String,
        #[source]
        source: anyhow::Error,
    },
}
