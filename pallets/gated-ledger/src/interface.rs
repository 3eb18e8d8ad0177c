//! Interface introspection for external tooling.
//!
//! Bridge pools and audit scripts identify the surfaces they rely on by 4-byte
//! interface ids: the XOR of the keccak-256 selectors of each function in the
//! interface. The ledger answers `supports_interface` for the fungible,
//! introspection, access-control, bridge-admin and burn/mint surfaces without the
//! caller having to invoke any of them.

pub type InterfaceId = [u8; 4];

/// Reserved id that must never be reported as supported.
pub const INVALID_INTERFACE: InterfaceId = [0xff; 4];

const INTROSPECTION: &[&str] = &["supportsInterface(bytes4)"];

const FUNGIBLE: &[&str] = &[
    "totalSupply()",
    "balanceOf(address)",
    "transfer(address,uint256)",
    "allowance(address,address)",
    "approve(address,uint256)",
    "transferFrom(address,address,uint256)",
];

const ACCESS_CONTROL: &[&str] = &[
    "hasRole(bytes32,address)",
    "getRoleAdmin(bytes32)",
    "grantRole(bytes32,address)",
    "revokeRole(bytes32,address)",
    "renounceRole(bytes32,address)",
];

const BRIDGE_ADMIN: &[&str] = &["getCCIPAdmin()"];

const BURN_MINT: &[&str] = &[
    "mint(address,uint256)",
    "burn(uint256)",
    "burn(address,uint256)",
    "burnFrom(address,uint256)",
];

const SUPPORTED: &[&[&str]] = &[INTROSPECTION, FUNGIBLE, ACCESS_CONTROL, BRIDGE_ADMIN, BURN_MINT];

/// First four bytes of the keccak-256 hash of a function signature.
pub fn selector(signature: &str) -> InterfaceId {
    let hash = sp_io::hashing::keccak_256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

pub fn interface_id(signatures: &[&str]) -> InterfaceId {
    signatures.iter().fold([0u8; 4], |mut acc, signature| {
        for (byte, other) in acc.iter_mut().zip(selector(signature)) {
            *byte ^= other;
        }
        acc
    })
}

pub fn supports(id: InterfaceId) -> bool {
    id != INVALID_INTERFACE && SUPPORTED.iter().any(|signatures| interface_id(signatures) == id)
}
