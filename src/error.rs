// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Error types for the sensitive word filter

use thiserror::Error;

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

impl FilterError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        FilterError::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(feature = "python")]
impl From<FilterError> for pyo3::PyErr {
    fn from(err: FilterError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
