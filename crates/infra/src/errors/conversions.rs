//! Conversions from external infrastructure errors into domain errors.

use std::io::Error as IoError;

use capacal_domain::CapacalError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CapacalError);

impl From<InfraError> for CapacalError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CapacalError> for InfraError {
    fn from(value: CapacalError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoCapacalError {
    fn into_capacal(self) -> CapacalError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CapacalError */
/* -------------------------------------------------------------------------- */

impl IntoCapacalError for HttpError {
    fn into_capacal(self) -> CapacalError {
        if self.is_timeout() {
            return CapacalError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return CapacalError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return CapacalError::Config(format!("invalid HTTP request: {self}"));
        }

        CapacalError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_capacal())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → CapacalError */
/* -------------------------------------------------------------------------- */

impl IntoCapacalError for IoError {
    fn into_capacal(self) -> CapacalError {
        CapacalError::Config(format!("failed to read file: {self}"))
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_capacal())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
