use std::fmt::{self, Display};
use std::io;

use crate::sird::Compartment;

/// Everything that can go wrong while configuring, stepping or displaying a run.
#[derive(Debug)]
pub enum SimError {
    InvalidConfig(String),
    NumericalInstability { compartment: Compartment, value: f64 },
    Window(String),
    Logging(String),
    IoError(io::Error),
    TomlError(toml::de::Error),
}

impl From<io::Error> for SimError {
    fn from(error: io::Error) -> Self {
        SimError::IoError(error)
    }
}

impl From<toml::de::Error> for SimError {
    fn from(error: toml::de::Error) -> Self {
        SimError::TomlError(error)
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::IoError(e) => Some(e),
            SimError::TomlError(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            SimError::NumericalInstability { compartment, value } => write!(
                f,
                "numerical instability: compartment {} reached {}",
                compartment.label(),
                value
            ),
            SimError::Window(msg) => write!(f, "window error: {}", msg),
            SimError::Logging(msg) => write!(f, "logging setup failed: {}", msg),
            SimError::IoError(e) => write!(f, "io error: {}", e),
            SimError::TomlError(e) => write!(f, "config parse error: {}", e),
        }
    }
}

/// Returns `InvalidConfig(msg)` from the enclosing function unless `cond` holds.
macro_rules! ensure_config {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::SimError::InvalidConfig(format!($($arg)+)));
        }
    };
}

pub(crate) use ensure_config;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instability_message_names_compartment() {
        let err = SimError::NumericalInstability {
            compartment: Compartment::Infected,
            value: f64::INFINITY,
        };
        assert_eq!(
            err.to_string(),
            "numerical instability: compartment I reached inf"
        );
    }

    #[test]
    fn io_errors_convert() {
        let err: SimError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, SimError::IoError(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
