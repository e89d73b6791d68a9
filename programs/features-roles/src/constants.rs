use alloy_primitives::U256;

// Shared by every contract: access and upgrade managers live in the top bits.
pub const ROLE_ACCESS_MANAGER: U256 = U256::from_limbs([0, 0, 0, 1 << 63]);
pub const ROLE_UPGRADE_MANAGER: U256 = U256::from_limbs([0, 0, 0, 1 << 62]);

pub const FULL_PRIVILEGES_MASK: U256 = U256::MAX;

pub const FEATURE_ALL: U256 = U256::from_limbs([0x0000_FFFF, 0, 0, 0]);
pub const FEATURE_NONE: U256 = U256::ZERO;

// ERC20 token features.
pub const FEATURE_TRANSFERS: U256 = U256::from_limbs([0x0000_0001, 0, 0, 0]);
pub const FEATURE_TRANSFERS_ON_BEHALF: U256 = U256::from_limbs([0x0000_0002, 0, 0, 0]);
pub const FEATURE_UNSAFE_TRANSFERS: U256 = U256::from_limbs([0x0000_0004, 0, 0, 0]);
pub const FEATURE_OWN_BURNS: U256 = U256::from_limbs([0x0000_0008, 0, 0, 0]);
pub const FEATURE_BURNS_ON_BEHALF: U256 = U256::from_limbs([0x0000_0010, 0, 0, 0]);
pub const FEATURE_DELEGATIONS: U256 = U256::from_limbs([0x0000_0020, 0, 0, 0]);
pub const FEATURE_DELEGATIONS_ON_BEHALF: U256 = U256::from_limbs([0x0000_0040, 0, 0, 0]);
pub const FEATURE_ERC1363_TRANSFERS: U256 = U256::from_limbs([0x0000_0080, 0, 0, 0]);
pub const FEATURE_ERC1363_APPROVALS: U256 = U256::from_limbs([0x0000_0100, 0, 0, 0]);
pub const FEATURE_EIP2612_PERMITS: U256 = U256::from_limbs([0x0000_0200, 0, 0, 0]);
pub const FEATURE_EIP3009_TRANSFERS: U256 = U256::from_limbs([0x0000_0400, 0, 0, 0]);
pub const FEATURE_EIP3009_RECEPTIONS: U256 = U256::from_limbs([0x0000_0800, 0, 0, 0]);

// ERC20 token roles.
pub const ROLE_TOKEN_CREATOR: U256 = U256::from_limbs([0x0001_0000, 0, 0, 0]);
pub const ROLE_TOKEN_DESTROYER: U256 = U256::from_limbs([0x0002_0000, 0, 0, 0]);
pub const ROLE_ERC20_RECEIVER: U256 = U256::from_limbs([0x0004_0000, 0, 0, 0]);
pub const ROLE_ERC20_SENDER: U256 = U256::from_limbs([0x0008_0000, 0, 0, 0]);

// Tunnel features and roles. The tunnel has its own bitmask space, so bit 0
// here is unrelated to FEATURE_TRANSFERS.
pub const FEATURE_ENTRANCE_OPEN: U256 = U256::from_limbs([0x0000_0001, 0, 0, 0]);
pub const ROLE_RESCUE_MANAGER: U256 = U256::from_limbs([0x0010_0000, 0, 0, 0]);
