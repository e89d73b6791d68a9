//! Deployment role plan: which features to enable and which roles to grant
//! on the token and the tunnel after they are deployed.

use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::errors::{FeaturesRolesError, Result};
use crate::parse::{parse_term, Term};
use crate::registry::{BitFlag, Namespace};
use crate::utils::{not, require_valid_features};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploymentPlan {
    pub token: Option<ContractPlan>,
    pub tunnel: Option<ContractPlan>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractPlan {
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub roles: Vec<RoleGrant>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleGrant {
    pub address: String,
    #[serde(default)]
    pub grant: Vec<String>,
    /// Grants everything except these roles.
    pub all_except: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPlan {
    pub token: Option<ResolvedContract>,
    pub tunnel: Option<ResolvedContract>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedContract {
    pub namespace: Namespace,
    pub features: U256,
    pub roles: Vec<ResolvedGrant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedGrant {
    pub address: Address,
    pub roles: U256,
}

#[derive(Clone, Copy)]
enum Kind {
    Feature,
    Role,
}

impl DeploymentPlan {
    pub fn resolve(&self) -> Result<ResolvedPlan> {
        Ok(ResolvedPlan {
            token: self
                .token
                .as_ref()
                .map(|plan| plan.resolve(Namespace::Erc20))
                .transpose()?,
            tunnel: self
                .tunnel
                .as_ref()
                .map(|plan| plan.resolve(Namespace::Tunnel))
                .transpose()?,
        })
    }
}

impl ContractPlan {
    pub fn resolve(&self, namespace: Namespace) -> Result<ResolvedContract> {
        let features = resolve_union(&self.features, namespace, Kind::Feature)?;
        require_valid_features(features)?;

        let mut assignments: BTreeMap<Address, U256> = BTreeMap::new();
        for entry in &self.roles {
            let address = parse_address(&entry.address)?;
            let mut roles = resolve_union(&entry.grant, namespace, Kind::Role)?;
            if let Some(except) = &entry.all_except {
                roles |= not(resolve_each(except, namespace, Kind::Role)?);
            }
            let assignment = assignments.entry(address).or_insert(U256::ZERO);
            *assignment |= roles;
            tracing::debug!(%namespace, %address, roles = %format!("{roles:#x}"), "resolved role grant");
        }

        Ok(ResolvedContract {
            namespace,
            features,
            roles: assignments
                .into_iter()
                .map(|(address, roles)| ResolvedGrant { address, roles })
                .collect(),
        })
    }
}

fn parse_address(value: &str) -> Result<Address> {
    value
        .trim()
        .parse::<Address>()
        .map_err(|_| FeaturesRolesError::InvalidAddress(value.to_string()))
}

fn resolve_union(entries: &[String], namespace: Namespace, kind: Kind) -> Result<U256> {
    Ok(resolve_each(entries, namespace, kind)?
        .into_iter()
        .fold(U256::ZERO, |acc, value| acc | value))
}

fn resolve_each(entries: &[String], namespace: Namespace, kind: Kind) -> Result<Vec<U256>> {
    entries
        .iter()
        .flat_map(|entry| entry.split('|').map(move |term| (term, entry.as_str())))
        .map(|(term, entry)| resolve_term(term, entry, namespace, kind))
        .collect()
}

fn resolve_term(term: &str, entry: &str, namespace: Namespace, kind: Kind) -> Result<U256> {
    let flag = match parse_term(term, entry)? {
        Term::Literal(value) => return Ok(value),
        Term::Flag(flag) => flag,
    };
    if !namespace.accepts(flag.namespace()) {
        return Err(FeaturesRolesError::WrongNamespace {
            name: flag.name.to_string(),
            expected: namespace,
        });
    }
    if !matches_kind(flag, kind) {
        let reason = match kind {
            Kind::Feature => "expected a feature",
            Kind::Role => "expected a role",
        };
        return Err(FeaturesRolesError::invalid_argument(entry, reason));
    }
    Ok(flag.value)
}

fn matches_kind(flag: &BitFlag, kind: Kind) -> bool {
    match kind {
        Kind::Feature => {
            flag.category.is_feature() || matches!(flag.name, "FEATURE_ALL" | "FEATURE_NONE")
        }
        Kind::Role => flag.category.is_role() || flag.name == "FULL_PRIVILEGES_MASK",
    }
}
