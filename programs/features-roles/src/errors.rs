use alloy_primitives::U256;
use thiserror::Error;

use crate::registry::Namespace;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeaturesRolesError {
    #[error("Invalid argument `{input}`: {reason}")]
    InvalidArgument { input: String, reason: String },

    #[error("Unknown feature or role `{0}`")]
    UnknownConstant(String),

    #[error("Features {0:#x} fall outside FEATURE_ALL")]
    InvalidFeatures(U256),

    #[error("`{name}` does not belong to the {expected} bitmask space")]
    WrongNamespace { name: String, expected: Namespace },

    #[error("Invalid address `{0}`")]
    InvalidAddress(String),
}

impl FeaturesRolesError {
    pub(crate) fn invalid_argument(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FeaturesRolesError>;
