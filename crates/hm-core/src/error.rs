//! Environment errors

use thiserror::Error;

/// Errors surfaced by the environment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvError {
    /// Action code outside the discrete action set. Nothing was mutated.
    #[error("invalid action code {code} (expected 0..=3)")]
    InvalidAction { code: i64 },

    /// Action container that does not hold exactly one element.
    #[error("invalid action shape: expected a single element, got {len}")]
    InvalidActionShape { len: usize },

    /// The grid cannot host a non-overlapping placement.
    #[error(
        "degenerate configuration: cannot place {ghosts} ghost(s) on a {size}x{size} grid \
         (gave up after {attempts} draws)"
    )]
    DegenerateConfiguration {
        size: i32,
        ghosts: usize,
        attempts: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The attached render adapter failed.
    #[error("render error: {0}")]
    Render(String),
}

impl EnvError {
    /// Errors the caller can recover from by retrying with different input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EnvError::InvalidAction { .. } | EnvError::InvalidActionShape { .. }
        )
    }
}

/// Convenience alias for results using [`EnvError`].
pub type Result<T> = core::result::Result<T, EnvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EnvError::InvalidAction { code: 7 };
        assert_eq!(err.to_string(), "invalid action code 7 (expected 0..=3)");

        let err = EnvError::DegenerateConfiguration {
            size: 2,
            ghosts: 3,
            attempts: 0,
        };
        assert!(err.to_string().contains("3 ghost(s) on a 2x2 grid"));
    }

    #[test]
    fn test_recoverable() {
        assert!(EnvError::InvalidAction { code: 9 }.is_recoverable());
        assert!(EnvError::InvalidActionShape { len: 2 }.is_recoverable());
        assert!(!EnvError::InvalidConfig("size".into()).is_recoverable());
    }
}
