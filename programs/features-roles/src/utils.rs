use alloy_primitives::U256;
use serde::Serialize;

use crate::constants::{FEATURE_ALL, FULL_PRIVILEGES_MASK};
use crate::errors::{FeaturesRolesError, Result};
use crate::parse::parse_value;
use crate::registry::{single_bit_flags, Namespace};

/// Complement of the union of `roles` relative to [`FULL_PRIVILEGES_MASK`].
pub fn not<I>(roles: I) -> U256
where
    I: IntoIterator<Item = U256>,
{
    let roles_sum = roles
        .into_iter()
        .fold(U256::ZERO, |sum, role| sum | role);
    FULL_PRIVILEGES_MASK ^ roles_sum
}

/// Like [`not`], but over raw input (names, hex or decimal literals).
pub fn try_not<I, S>(inputs: I) -> Result<U256>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let roles = inputs
        .into_iter()
        .map(|input| parse_value(input.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Ok(not(roles))
}

pub fn has_any_role(granted: U256, required: U256) -> bool {
    !(granted & required).is_zero()
}

pub fn require_valid_features(features: U256) -> Result<()> {
    if !(features & !FEATURE_ALL).is_zero() {
        return Err(FeaturesRolesError::InvalidFeatures(features));
    }
    Ok(())
}

pub fn bit_position(value: U256) -> Option<usize> {
    (value.count_ones() == 1).then(|| value.trailing_zeros())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub names: Vec<&'static str>,
    /// Bits set in the mask that no named flag of the namespace covers.
    pub residual: U256,
}

pub fn decode(mask: U256, namespace: Namespace) -> Decoded {
    let mut names = Vec::new();
    let mut residual = mask;
    for flag in single_bit_flags(namespace) {
        if has_any_role(mask, flag.value) {
            names.push(flag.name);
            residual &= !flag.value;
        }
    }
    Decoded { names, residual }
}
