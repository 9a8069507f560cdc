use std::fmt;

use crate::env::OracleError;
use crate::error::{CombatError, ErrorContext, ErrorSeverity};
use crate::events::CombatEvent;
use crate::state::{ActorId, AttackId, Point};

/// A request to use an attack, aimed at a world position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastIntent {
    pub caster: ActorId,
    pub attack: AttackId,
    pub aim: Point,
}

impl CastIntent {
    pub fn new(caster: ActorId, attack: impl Into<AttackId>, aim: Point) -> Self {
        Self {
            caster,
            attack: attack.into(),
            aim,
        }
    }
}

/// Why a well-formed cast was refused. Rejections have no side effects.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastRejection {
    /// The caster does not exist or is dead.
    CasterUnavailable,
    /// The player died; no further casts resolve.
    GameOver,
    OnCooldown {
        remaining: f32,
    },
    InsufficientEnergy,
}

impl CastRejection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CasterUnavailable => "caster_unavailable",
            Self::GameOver => "game_over",
            Self::OnCooldown { .. } => "on_cooldown",
            Self::InsufficientEnergy => "insufficient_energy",
        }
    }
}

impl fmt::Display for CastRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnCooldown { remaining } => write!(f, "on cooldown ({remaining:.2}s left)"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Result of a single cast request.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastOutcome {
    /// The attack was committed as the given instance id.
    Accepted { instance: u64 },
    Rejected(CastRejection),
}

impl CastOutcome {
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    pub const fn rejection(&self) -> Option<CastRejection> {
        match *self {
            Self::Rejected(reason) => Some(reason),
            Self::Accepted { .. } => None,
        }
    }
}

/// Everything one fixed step produced.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameOutcome {
    /// Index of the completed frame.
    pub frame: u64,
    /// One outcome per submitted intent, in submission order.
    pub casts: Vec<CastOutcome>,
    pub events: Vec<CombatEvent>,
    /// Set when the world was already over and nothing ran.
    pub skipped: bool,
}

/// Errors that abort a cast or a frame.
///
/// These indicate broken content wiring, not gameplay conditions.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CastError {
    #[error("unknown attack '{attack}'")]
    UnknownAttack {
        attack: AttackId,
        context: ErrorContext,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl CombatError for CastError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownAttack { .. } => ErrorSeverity::Fatal,
            Self::Oracle(err) => err.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::UnknownAttack { context, .. } => Some(context),
            Self::Oracle(_) => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAttack { .. } => "CAST_UNKNOWN_ATTACK",
            Self::Oracle(err) => err.error_code(),
        }
    }
}
