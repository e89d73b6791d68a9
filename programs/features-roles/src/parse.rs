//! Caller input to `U256`.
//!
//! Accepts registry names (case-insensitive), `0x` hex and decimal literals
//! with optional `_` separators, and `|` unions of those. Anything that does
//! not fit 256 unsigned bits is an `InvalidArgument`, never truncated.

use alloy_primitives::U256;

use crate::errors::{FeaturesRolesError, Result};
use crate::registry::{lookup, BitFlag};

/// One operand of a `|` union.
pub(crate) enum Term {
    Literal(U256),
    Flag(&'static BitFlag),
}

impl Term {
    pub(crate) fn value(&self) -> U256 {
        match self {
            Term::Literal(value) => *value,
            Term::Flag(flag) => flag.value,
        }
    }
}

pub fn parse_value(input: &str) -> Result<U256> {
    if input.trim().is_empty() {
        return Err(FeaturesRolesError::invalid_argument(input, "empty value"));
    }
    input
        .split('|')
        .map(|term| parse_term(term, input))
        .try_fold(U256::ZERO, |acc, term| Ok(acc | term?.value()))
}

/// Parses one union operand; `input` is the whole entry it came from and is
/// what errors report.
pub(crate) fn parse_term(term: &str, input: &str) -> Result<Term> {
    let term = term.trim();
    if term.is_empty() {
        return Err(FeaturesRolesError::invalid_argument(input, "empty term in union"));
    }
    if term.starts_with('-') {
        return Err(FeaturesRolesError::invalid_argument(
            input,
            "negative values are not representable",
        ));
    }
    if term.starts_with(|c: char| c.is_ascii_digit()) {
        return parse_literal(term, input).map(Term::Literal);
    }
    lookup(&term.to_ascii_uppercase())
        .map(Term::Flag)
        .ok_or_else(|| FeaturesRolesError::UnknownConstant(term.to_string()))
}

fn parse_literal(literal: &str, input: &str) -> Result<U256> {
    let digits: String = literal.chars().filter(|c| *c != '_').collect();
    let (digits, radix) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (digits.as_str(), 10),
    };
    if digits.is_empty() {
        return Err(FeaturesRolesError::invalid_argument(input, "missing digits"));
    }
    if radix == 16 && digits.trim_start_matches('0').len() > 64 {
        return Err(FeaturesRolesError::invalid_argument(
            input,
            "value exceeds 256 bits",
        ));
    }
    U256::from_str_radix(digits, radix)
        .map_err(|err| FeaturesRolesError::invalid_argument(input, err.to_string()))
}
