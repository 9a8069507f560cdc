//! Errors surfaced by the runtime.

use combat_core::{ActorId, AttackId, CastError, CombatError, ErrorSeverity, OracleError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to load combat content")]
    Content(#[source] anyhow::Error),

    #[error("simulation requires oracles to be configured before building")]
    MissingOracles,

    #[error("unknown actor template '{0}'")]
    UnknownTemplate(String),

    #[error("unknown attack '{0}'")]
    UnknownAttack(AttackId),

    #[error("actor template '{template}' references unknown loot table '{table}'")]
    UnresolvedLootTable { template: String, table: String },

    #[error("a player-controlled actor is already spawned")]
    PlayerAlreadySpawned,

    #[error("actor {0} does not exist")]
    UnknownActor(ActorId),

    #[error("scenario '{scenario}': {message}")]
    Scenario { scenario: String, message: String },

    #[error(transparent)]
    Cast(#[from] CastError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl RuntimeError {
    /// Severity of the underlying failure; runtime wiring failures are fatal.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Cast(err) => err.severity(),
            Self::Oracle(err) => err.severity(),
            Self::UnknownTemplate(_)
            | Self::UnknownAttack(_)
            | Self::PlayerAlreadySpawned
            | Self::UnknownActor(_)
            | Self::Scenario { .. } => ErrorSeverity::Validation,
            Self::Content(_) | Self::MissingOracles | Self::UnresolvedLootTable { .. } => {
                ErrorSeverity::Fatal
            }
        }
    }
}
