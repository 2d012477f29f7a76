//! Configuration error types.
//!
//! Game outcomes ("YOU WIN" / "YOU LOSE") are ordinary session state, not
//! errors.  The only faults in this crate come from loading and validating
//! [`crate::config::GameConfig`]; callers log them and fall back to defaults.
//!
//! ## Usage
//!
//! ```rust
//! use deathstar::config::GameConfig;
//!
//! let config = GameConfig::default();
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;

/// Top-level error enum for configuration loading.
#[derive(Debug)]
pub enum GameError {
    /// The config file exists but could not be read.
    ConfigRead {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::config::GameConfig`].
    ConfigParse {
        /// Path that was parsed.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A configured value is outside the range the simulation can handle.
    InvalidValue {
        /// Name of the config key.
        name: &'static str,
        /// The rejected value, formatted for display.
        value: String,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ConfigRead { path, source } => {
                write!(f, "failed to read '{}': {}", path, source)
            }
            GameError::ConfigParse { path, message } => {
                write!(f, "failed to parse '{}': {}", path, message)
            }
            GameError::InvalidValue {
                name,
                value,
                expected,
            } => write!(
                f,
                "config value '{}' = {} is invalid (expected {})",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn require_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidValue {
            name,
            value: value.to_string(),
            expected: "a finite value > 0",
        })
    }
}

/// Returns an error if a counter that must be at least one is zero.
pub fn require_nonzero(name: &'static str, value: u32) -> GameResult<()> {
    if value == 0 {
        Err(GameError::InvalidValue {
            name,
            value: value.to_string(),
            expected: "an integer ≥ 1",
        })
    } else {
        Ok(())
    }
}
