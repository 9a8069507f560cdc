//! Explicit per-actor tables for energy and cooldowns.
mod cooldowns;
mod resources;

pub use cooldowns::CooldownLedger;
pub use resources::{EnergyPool, EnergyPools, PoolKind, ResourceLedger};

use crate::error::{CombatError, ErrorSeverity};
use crate::state::ActorId;

/// Errors raised by direct ledger mutation.
///
/// Failing to afford a cast is not an error; see
/// [`ResourceLedger::try_reserve`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("actor {0} has no energy pools")]
    UnknownActor(ActorId),
}

impl CombatError for LedgerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownActor(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownActor(_) => "LEDGER_UNKNOWN_ACTOR",
        }
    }
}
