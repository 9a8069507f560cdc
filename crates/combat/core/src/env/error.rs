//! Oracle access errors.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::AttackId;

/// Errors raised when static content cannot be reached.
///
/// A missing oracle means the runtime wired the environment incorrectly; a
/// missing record means a caller referenced content that was never loaded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("AttackOracle not available")]
    AttacksNotAvailable,

    #[error("LootOracle not available")]
    LootNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,

    #[error("attack definition '{0}' not found")]
    AttackNotFound(AttackId),

    #[error("loot table '{0}' not found")]
    LootTableNotFound(String),

    #[error("actor template '{0}' not found")]
    ActorTemplateNotFound(String),
}

impl CombatError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            AttacksNotAvailable | LootNotAvailable | RngNotAvailable => ErrorSeverity::Fatal,
            AttackNotFound(_) | LootTableNotFound(_) | ActorTemplateNotFound(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            AttacksNotAvailable => "ORACLE_ATTACKS_NOT_AVAILABLE",
            LootNotAvailable => "ORACLE_LOOT_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            AttackNotFound(_) => "ORACLE_ATTACK_NOT_FOUND",
            LootTableNotFound(_) => "ORACLE_LOOT_TABLE_NOT_FOUND",
            ActorTemplateNotFound(_) => "ORACLE_ACTOR_TEMPLATE_NOT_FOUND",
        }
    }
}
