//! Error types for the core engine.
//!
//! Placement rejections are not errors: they come back as
//! [`Placement::Rejected`](crate::engine::Placement::Rejected). The variants
//! here signal an invalid catalog/config at startup or a driver that is out
//! of sync with the engine.

use crate::types::{FigureKind, GamePhase};

/// Why a raw shape could not be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("shape has no cells")]
    Empty,
    #[error("offset ({dx}, {dy}) appears more than once")]
    Duplicate { dx: i8, dy: i8 },
    #[error("shape has {cells} cells, at most {max} are supported")]
    TooLarge { cells: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid shape for figure `{kind}`: {reason}")]
    InvalidShape { kind: FigureKind, reason: ShapeError },
    #[error("`{op}` is not allowed while {phase}")]
    IllegalOperation { op: &'static str, phase: GamePhase },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl GameError {
    pub fn code(&self) -> &'static str {
        match self {
            GameError::InvalidShape { .. } => "invalid_shape",
            GameError::IllegalOperation { .. } => "illegal_operation",
            GameError::InvalidConfig(_) => "invalid_config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = GameError::InvalidShape {
            kind: FigureKind::T,
            reason: ShapeError::Duplicate { dx: 1, dy: 0 },
        };
        assert_eq!(
            err.to_string(),
            "invalid shape for figure `t`: offset (1, 0) appears more than once"
        );
        assert_eq!(err.code(), "invalid_shape");
        assert_eq!(
            GameError::IllegalOperation {
                op: "tick",
                phase: GamePhase::NotStarted
            }
            .to_string(),
            "`tick` is not allowed while not started"
        );
    }
}
