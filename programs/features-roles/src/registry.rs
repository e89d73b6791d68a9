//! Static table of every named feature and role.
//!
//! Names are unique across the whole table. Values are only unique inside a
//! contract's bitmask space: the token and the tunnel both use bit 0 for
//! their first feature.

use std::fmt;

use alloy_primitives::U256;
use serde::Serialize;

use crate::constants::*;

/// Bitmask space a flag is interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Manager roles and sentinels, meaningful to every contract.
    Shared,
    Erc20,
    Tunnel,
}

impl Namespace {
    /// Whether flags of `other` are meaningful in this space.
    pub fn accepts(self, other: Namespace) -> bool {
        other == Namespace::Shared || other == self
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Namespace::Shared => "shared",
            Namespace::Erc20 => "erc20",
            Namespace::Tunnel => "tunnel",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Manager,
    Sentinel,
    Erc20Feature,
    Erc20Role,
    TunnelFeature,
    TunnelRole,
}

impl Category {
    pub fn namespace(self) -> Namespace {
        match self {
            Category::Manager | Category::Sentinel => Namespace::Shared,
            Category::Erc20Feature | Category::Erc20Role => Namespace::Erc20,
            Category::TunnelFeature | Category::TunnelRole => Namespace::Tunnel,
        }
    }

    pub fn is_feature(self) -> bool {
        matches!(self, Category::Erc20Feature | Category::TunnelFeature)
    }

    pub fn is_role(self) -> bool {
        matches!(
            self,
            Category::Manager | Category::Erc20Role | Category::TunnelRole
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Manager => "manager",
            Category::Sentinel => "sentinel",
            Category::Erc20Feature => "ERC20 feature",
            Category::Erc20Role => "ERC20 role",
            Category::TunnelFeature => "tunnel feature",
            Category::TunnelRole => "tunnel role",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BitFlag {
    pub name: &'static str,
    pub value: U256,
    pub category: Category,
    pub description: &'static str,
}

impl BitFlag {
    const fn new(
        name: &'static str,
        value: U256,
        category: Category,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            value,
            category,
            description,
        }
    }

    pub fn namespace(&self) -> Namespace {
        self.category.namespace()
    }

    /// Bit position for single-bit flags; `None` for sentinels.
    pub fn bit(&self) -> Option<usize> {
        crate::utils::bit_position(self.value)
    }
}

static REGISTRY: [BitFlag; 23] = [
    BitFlag::new(
        "ROLE_ACCESS_MANAGER",
        ROLE_ACCESS_MANAGER,
        Category::Manager,
        "Assigns roles to users and enables/disables global features",
    ),
    BitFlag::new(
        "ROLE_UPGRADE_MANAGER",
        ROLE_UPGRADE_MANAGER,
        Category::Manager,
        "Performs smart contract upgrades",
    ),
    BitFlag::new(
        "FULL_PRIVILEGES_MASK",
        FULL_PRIVILEGES_MASK,
        Category::Sentinel,
        "Every permission at once (super admin)",
    ),
    BitFlag::new(
        "FEATURE_ALL",
        FEATURE_ALL,
        Category::Sentinel,
        "All 16 features enabled",
    ),
    BitFlag::new(
        "FEATURE_NONE",
        FEATURE_NONE,
        Category::Sentinel,
        "All 16 features disabled",
    ),
    BitFlag::new(
        "FEATURE_TRANSFERS",
        FEATURE_TRANSFERS,
        Category::Erc20Feature,
        "Transfers by the token owner",
    ),
    BitFlag::new(
        "FEATURE_TRANSFERS_ON_BEHALF",
        FEATURE_TRANSFERS_ON_BEHALF,
        Category::Erc20Feature,
        "Transfers by someone else on behalf of the token owner",
    ),
    BitFlag::new(
        "FEATURE_UNSAFE_TRANSFERS",
        FEATURE_UNSAFE_TRANSFERS,
        Category::Erc20Feature,
        "Skip the ERC20 receiver check in transfer and transferFrom",
    ),
    BitFlag::new(
        "FEATURE_OWN_BURNS",
        FEATURE_OWN_BURNS,
        Category::Erc20Feature,
        "Token owners burn their own tokens",
    ),
    BitFlag::new(
        "FEATURE_BURNS_ON_BEHALF",
        FEATURE_BURNS_ON_BEHALF,
        Category::Erc20Feature,
        "Approved operators burn tokens on behalf of their owners",
    ),
    BitFlag::new(
        "FEATURE_DELEGATIONS",
        FEATURE_DELEGATIONS,
        Category::Erc20Feature,
        "Delegators elect delegates",
    ),
    BitFlag::new(
        "FEATURE_DELEGATIONS_ON_BEHALF",
        FEATURE_DELEGATIONS_ON_BEHALF,
        Category::Erc20Feature,
        "Delegates elected on behalf of delegators",
    ),
    BitFlag::new(
        "FEATURE_ERC1363_TRANSFERS",
        FEATURE_ERC1363_TRANSFERS,
        Category::Erc20Feature,
        "ERC-1363 transfers with callback",
    ),
    BitFlag::new(
        "FEATURE_ERC1363_APPROVALS",
        FEATURE_ERC1363_APPROVALS,
        Category::Erc20Feature,
        "ERC-1363 approvals with callback",
    ),
    BitFlag::new(
        "FEATURE_EIP2612_PERMITS",
        FEATURE_EIP2612_PERMITS,
        Category::Erc20Feature,
        "Approvals on behalf via EIP-712 signed permits",
    ),
    BitFlag::new(
        "FEATURE_EIP3009_TRANSFERS",
        FEATURE_EIP3009_TRANSFERS,
        Category::Erc20Feature,
        "EIP-3009 meta transfers via EIP-712 signature",
    ),
    BitFlag::new(
        "FEATURE_EIP3009_RECEPTIONS",
        FEATURE_EIP3009_RECEPTIONS,
        Category::Erc20Feature,
        "EIP-3009 meta receptions via EIP-712 signature",
    ),
    BitFlag::new(
        "ROLE_TOKEN_CREATOR",
        ROLE_TOKEN_CREATOR,
        Category::Erc20Role,
        "Mints tokens to an arbitrary address",
    ),
    BitFlag::new(
        "ROLE_TOKEN_DESTROYER",
        ROLE_TOKEN_DESTROYER,
        Category::Erc20Role,
        "Burns tokens owned by an arbitrary address",
    ),
    BitFlag::new(
        "ROLE_ERC20_RECEIVER",
        ROLE_ERC20_RECEIVER,
        Category::Erc20Role,
        "Receives tokens without ERC20 safety checks",
    ),
    BitFlag::new(
        "ROLE_ERC20_SENDER",
        ROLE_ERC20_SENDER,
        Category::Erc20Role,
        "Sends tokens without ERC20 safety checks",
    ),
    BitFlag::new(
        "FEATURE_ENTRANCE_OPEN",
        FEATURE_ENTRANCE_OPEN,
        Category::TunnelFeature,
        "Deposits into the tunnel; withdrawals are always enabled",
    ),
    BitFlag::new(
        "ROLE_RESCUE_MANAGER",
        ROLE_RESCUE_MANAGER,
        Category::TunnelRole,
        "Rescues ERC20/ERC721 tokens accidentally sent to the tunnel",
    ),
];

/// Every entry, in declaration order.
pub fn registry() -> &'static [BitFlag] {
    &REGISTRY
}

pub fn lookup(name: &str) -> Option<&'static BitFlag> {
    REGISTRY.iter().find(|flag| flag.name == name)
}

/// Entries of exactly this namespace; shared entries are not repeated.
pub fn in_namespace(namespace: Namespace) -> impl Iterator<Item = &'static BitFlag> {
    REGISTRY
        .iter()
        .filter(move |flag| flag.namespace() == namespace)
}

/// Single-bit flags meaningful in `namespace`, shared managers included.
pub fn single_bit_flags(namespace: Namespace) -> impl Iterator<Item = &'static BitFlag> {
    REGISTRY
        .iter()
        .filter(move |flag| namespace.accepts(flag.namespace()) && flag.bit().is_some())
}
