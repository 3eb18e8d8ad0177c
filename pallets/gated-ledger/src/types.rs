//! Value types stored by the ledger.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use frame_support::PalletError;
use sp_runtime::RuntimeDebug;
use scale_info::TypeInfo;

/// Capability kinds that can be granted to an account.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Encode,
    Decode,
    DecodeWithMemTracking,
    MaxEncodedLen,
    TypeInfo,
    PalletError,
    RuntimeDebug,
)]
pub enum Role {
    /// Root: administers every role, itself included.
    DefaultAdmin,
    Minter,
    Burner,
    Upgrader,
    /// Held by the bridge/pool component.
    Bridge,
    /// Manages the launch-phase allow-list and ends the phase.
    LaunchManager,
    /// Pause, unpause and foreign-asset recovery.
    Emergency,
    /// Operational admin: bulk-grants Minter/Burner and rotates the bridge admin.
    Admin,
}

impl Role {
    /// Every role, in declaration order. The root administrator is seeded with all of them.
    pub const ALL: [Role; 8] = [
        Role::DefaultAdmin,
        Role::Minter,
        Role::Burner,
        Role::Upgrader,
        Role::Bridge,
        Role::LaunchManager,
        Role::Emergency,
        Role::Admin,
    ];

    /// Roles whose holders may grant or revoke `self`.
    ///
    /// The first entry is the primary administrator and is the one reported when a
    /// caller holds none of them.
    pub const fn administered_by(self) -> &'static [Role] {
        match self {
            Role::Minter | Role::Burner => &[Role::DefaultAdmin, Role::Admin],
            Role::DefaultAdmin |
            Role::Upgrader |
            Role::Bridge |
            Role::LaunchManager |
            Role::Emergency |
            Role::Admin => &[Role::DefaultAdmin],
        }
    }

    pub const fn primary_admin(self) -> Role {
        self.administered_by()[0]
    }
}

/// Restricted launch phase. `Concluded` is terminal.
#[derive(
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Encode,
    Decode,
    DecodeWithMemTracking,
    MaxEncodedLen,
    TypeInfo,
    RuntimeDebug,
)]
pub enum LaunchPhase {
    Active,
    #[default]
    Concluded,
}

impl LaunchPhase {
    pub fn from_flag(active: bool) -> Self {
        if active {
            LaunchPhase::Active
        } else {
            LaunchPhase::Concluded
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, LaunchPhase::Active)
    }

    /// The only legal transition. Returns `None` once the phase has already concluded.
    pub fn conclude(self) -> Option<Self> {
        match self {
            LaunchPhase::Active => Some(LaunchPhase::Concluded),
            LaunchPhase::Concluded => None,
        }
    }
}

/// Initializer bookkeeping for a storage instance.
#[derive(
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Encode,
    Decode,
    DecodeWithMemTracking,
    MaxEncodedLen,
    TypeInfo,
    RuntimeDebug,
)]
pub enum InitState {
    #[default]
    Uninitialized,
    /// Initialized at the given initializer version.
    Initialized(u64),
    /// Logic-only instance: initializers can never run against it.
    Disabled,
}

impl InitState {
    pub fn is_initialized(&self) -> bool {
        matches!(self, InitState::Initialized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minter_and_burner_are_administered_by_admin() {
        assert_eq!(Role::Minter.administered_by(), &[Role::DefaultAdmin, Role::Admin]);
        assert_eq!(Role::Burner.administered_by(), &[Role::DefaultAdmin, Role::Admin]);
        assert_eq!(Role::Upgrader.administered_by(), &[Role::DefaultAdmin]);
        assert_eq!(Role::DefaultAdmin.primary_admin(), Role::DefaultAdmin);
    }

    #[test]
    fn launch_phase_concludes_once() {
        let phase = LaunchPhase::from_flag(true);
        assert!(phase.is_active());

        let concluded = phase.conclude().unwrap();
        assert!(!concluded.is_active());
        assert_eq!(concluded.conclude(), None);
    }
}
