/// Interpreter settings, read from `CURVESCRIPT_*` environment variables.
use std::str::FromStr;

use thiserror::Error;

use crate::render::Color;

pub const PARSE_ERRORS_VAR: &str = "CURVESCRIPT_PARSE_ERRORS";
pub const UNKNOWN_COMMANDS_VAR: &str = "CURVESCRIPT_UNKNOWN_COMMANDS";
pub const CIRCLE_STEPS_VAR: &str = "CURVESCRIPT_CIRCLE_STEPS";
pub const HERMITE_STEPS_VAR: &str = "CURVESCRIPT_HERMITE_STEPS";
pub const BEZIER_STEPS_VAR: &str = "CURVESCRIPT_BEZIER_STEPS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: expected `abort` or `skip`, got {value:?}")]
    Policy { var: String, value: String },

    #[error("{var}: expected a positive integer, got {value:?}")]
    Steps { var: String, value: String },

    #[error("{var}: {message}")]
    Invalid { var: String, message: String },
}

/// What to do with a command that cannot be executed as written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop the script and return the error
    Abort,
    /// Log the problem and continue with the next line
    Skip,
}

impl FromStr for ErrorPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" | "strict" => Ok(ErrorPolicy::Abort),
            "skip" | "lenient" => Ok(ErrorPolicy::Skip),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterpreterConfig {
    pub parse_errors: ErrorPolicy,
    pub unknown_commands: ErrorPolicy,
    pub circle_steps: usize,
    pub hermite_steps: usize,
    pub bezier_steps: usize,
    pub draw_color: Color,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            parse_errors: ErrorPolicy::Abort,
            unknown_commands: ErrorPolicy::Skip,
            circle_steps: 1000,
            hermite_steps: 100,
            bezier_steps: 1000,
            draw_color: Color::RED,
        }
    }
}

impl InterpreterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Build a config from `(name, value)` pairs; unrelated names are ignored
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                PARSE_ERRORS_VAR => config.parse_errors = parse_policy(key, value)?,
                UNKNOWN_COMMANDS_VAR => config.unknown_commands = parse_policy(key, value)?,
                CIRCLE_STEPS_VAR => config.circle_steps = parse_steps(key, value)?,
                HERMITE_STEPS_VAR => config.hermite_steps = parse_steps(key, value)?,
                BEZIER_STEPS_VAR => config.bezier_steps = parse_steps(key, value)?,
                _ => {}
            }
        }
        Ok(config)
    }
}

fn parse_policy(var: &str, value: &str) -> Result<ErrorPolicy, ConfigError> {
    value.parse().map_err(|_| ConfigError::Policy {
        var: var.to_string(),
        value: value.to_string(),
    })
}

fn parse_steps(var: &str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(steps) if steps > 0 => Ok(steps),
        _ => Err(ConfigError::Steps {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InterpreterConfig::from_vars(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config, InterpreterConfig::default());
        assert_eq!(config.parse_errors, ErrorPolicy::Abort);
        assert_eq!(config.unknown_commands, ErrorPolicy::Skip);
        assert_eq!(config.circle_steps, 1000);
        assert_eq!(config.hermite_steps, 100);
        assert_eq!(config.bezier_steps, 1000);
    }

    #[test]
    fn test_overrides() {
        let config = InterpreterConfig::from_vars([
            (PARSE_ERRORS_VAR, "skip"),
            (UNKNOWN_COMMANDS_VAR, "Abort"),
            (CIRCLE_STEPS_VAR, "64"),
            ("PATH", "/usr/bin"),
        ])
        .unwrap();
        assert_eq!(config.parse_errors, ErrorPolicy::Skip);
        assert_eq!(config.unknown_commands, ErrorPolicy::Abort);
        assert_eq!(config.circle_steps, 64);
        assert_eq!(config.bezier_steps, 1000);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = InterpreterConfig::from_vars([(PARSE_ERRORS_VAR, "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::Policy { .. }));

        let err = InterpreterConfig::from_vars([(HERMITE_STEPS_VAR, "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Steps { .. }));
    }
}
