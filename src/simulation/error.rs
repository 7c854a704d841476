//! Errors surfaced by the simulation core.

use thiserror::Error;

use super::settings::SettingsError;

/// Everything that can stop a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// Settings failed validation before the run started.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// An agent's weight matrices do not fit its sensory/motor interface.
    #[error("agent `{agent}` has a malformed brain: {detail}")]
    MalformedBrain {
        /// Name of the offending agent.
        agent: String,
        /// Which shapes disagree.
        detail: String,
    },
    /// The mutation noise distribution could not be built.
    #[error("invalid mutation distribution: {0}")]
    Mutation(String),
    /// A collaborator failed to write its output.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A collaborator failed to encode its output.
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}
