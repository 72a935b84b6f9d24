//! Errors for models, integrators and scenario loading

use thiserror::Error;

use crate::{Float, core::status::Status, models::Model};

/// Validation errors reported by the integration methods before stepping.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingError {
    #[error("nmax must be positive (got {0})")]
    NMaxMustBePositive(usize),
    #[error("nstiff must be positive (got {0})")]
    NStiffMustBePositive(usize),
    #[error("newton_maxiter must be positive (got {0})")]
    NewtonMaxIterMustBePositive(usize),
    #[error("uround must be in (1e-35, 1.0) (got {0})")]
    URoundOutOfRange(Float),
    #[error("safety_factor must be in (1e-4, 1.0) (got {0})")]
    SafetyFactorOutOfRange(Float),
    #[error("beta must be <= 0.2 (got {0})")]
    BetaTooLarge(Float),
    #[error("step size h is zero, not finite or points the wrong way (got {0})")]
    InvalidStepSize(Float),
    #[error("tolerances must be positive (got {0})")]
    InvalidTolerance(Float),
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A vector does not have the length the model or call expects.
    #[error("{what} has length {got}, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// A named parameter required by the model is absent.
    #[error("{model} requires parameter `{name}`")]
    MissingParameter { model: Model, name: &'static str },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid solver settings: {}", join(.0))]
    InvalidSettings(Vec<SettingError>),

    /// The adaptive solver stopped before the end of the time grid.
    #[error("integration stopped at t = {t} with status {status:?}")]
    Integration { status: Status, t: Float },

    #[error("unknown model `{0}`")]
    UnknownModel(String),

    #[error("failed to render trajectory: {0}")]
    Render(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<Vec<SettingError>> for Error {
    fn from(errors: Vec<SettingError>) -> Self {
        Error::InvalidSettings(errors)
    }
}

fn join(errors: &[SettingError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_errors_are_joined() {
        let err = Error::from(vec![
            SettingError::NMaxMustBePositive(0),
            SettingError::BetaTooLarge(0.5),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid solver settings: nmax must be positive (got 0); beta must be <= 0.2 (got 0.5)"
        );
    }

    #[test]
    fn missing_parameter_names_the_model() {
        let err = Error::MissingParameter {
            model: Model::Seir,
            name: "epsilon_E",
        };
        assert_eq!(err.to_string(), "SEIR requires parameter `epsilon_E`");
    }
}
