//! Feature and role bitmasks of the ERC20 token and the ERC20 tunnel, as
//! `U256` constants, with the helpers deployment scripts and tests use to
//! combine and negate them.

pub mod constants;
pub mod errors;
pub mod parse;
pub mod plan;
pub mod registry;
pub mod utils;

pub use alloy_primitives::U256;
pub use errors::{FeaturesRolesError, Result};
pub use parse::parse_value;
pub use plan::{
    ContractPlan, DeploymentPlan, ResolvedContract, ResolvedGrant, ResolvedPlan, RoleGrant,
};
pub use registry::{in_namespace, lookup, registry, BitFlag, Category, Namespace};
pub use utils::{
    bit_position, decode, has_any_role, not, require_valid_features, try_not, Decoded,
};
