//! Storage migrations for pallet-gated-ledger.
//!
//! Each migration is versioned, checks the on-chain storage version before doing
//! anything and runs exactly once.
//!
//! # Adding a migration
//!
//! 1. **Increment `STORAGE_VERSION`** in `lib.rs` (e.g., from 1 to 2)
//! 2. **Create a new module** (e.g., `v2::MigrateToV2`) implementing `OnRuntimeUpgrade`
//! 3. **Add tests** next to the existing ones below
//! 4. **Wire it up in the runtime** through the `Executive` migration tuple
//!
//! ```ignore
//! pub type Executive = frame_executive::Executive<
//!     Runtime,
//!     Block,
//!     frame_system::ChainContext<Runtime>,
//!     Runtime,
//!     AllPalletsWithSystem,
//!     pallet_gated_ledger::migrations::v1::MigrateToV1<Runtime>,
//! >;
//! ```
//!
//! Migrations run when new logic is enacted after `authorize_upgrade`, so they
//! are the only place where ledger storage may be reshaped. Balances, roles and
//! the allow-list must survive every one of them.

use frame_support::{pallet_prelude::*, traits::OnRuntimeUpgrade};
use sp_std::marker::PhantomData;

use crate::{Config, InitState, Initialization, Pallet, Roles, INITIALIZER_VERSION, LOG_TARGET};

/// Migration to version 1.
///
/// Version 0 storage predates the initializer marker: a ledger could hold roles
/// and balances while `Initialization` still reads `Uninitialized`, which would
/// let `initialize` run a second time. The migration records such ledgers as
/// initialized. Ledgers that were never set up are left alone.
pub mod v1 {
    use super::*;

    pub struct MigrateToV1<T>(PhantomData<T>);

    impl<T: Config> OnRuntimeUpgrade for MigrateToV1<T> {
        fn on_runtime_upgrade() -> Weight {
            let on_chain_version = Pallet::<T>::on_chain_storage_version();

            if on_chain_version >= 1 {
                log::info!(
                    target: LOG_TARGET,
                    "Storage already at v{on_chain_version:?}, skipping v1 migration"
                );
                return T::DbWeight::get().reads(1);
            }

            let mut reads = 2;
            let mut writes = 1;
            if Initialization::<T>::get() == InitState::Uninitialized {
                reads += 1;
                if Roles::<T>::iter().next().is_some() {
                    Initialization::<T>::put(InitState::Initialized(INITIALIZER_VERSION));
                    writes += 1;
                    log::info!(target: LOG_TARGET, "Marked populated v0 ledger as initialized");
                }
            }

            StorageVersion::new(1).put::<Pallet<T>>();
            log::info!(target: LOG_TARGET, "Migrated storage v0 -> v1");

            T::DbWeight::get().reads_writes(reads, writes)
        }

        #[cfg(feature = "try-runtime")]
        fn pre_upgrade() -> Result<sp_std::vec::Vec<u8>, sp_runtime::TryRuntimeError> {
            let on_chain_version = Pallet::<T>::on_chain_storage_version();
            log::info!(
                target: LOG_TARGET,
                "Pre-upgrade: on-chain storage version is {on_chain_version:?}"
            );
            Ok((on_chain_version, crate::TotalSupply::<T>::get()).encode())
        }

        #[cfg(feature = "try-runtime")]
        fn post_upgrade(state: sp_std::vec::Vec<u8>) -> Result<(), sp_runtime::TryRuntimeError> {
            let (pre_version, pre_supply): (StorageVersion, u128) =
                Decode::decode(&mut &state[..])
                    .map_err(|_| sp_runtime::TryRuntimeError::Other("Failed to decode pre-state"))?;
            let post_version = Pallet::<T>::on_chain_storage_version();

            log::info!(
                target: LOG_TARGET,
                "Post-upgrade: version changed from {pre_version:?} to {post_version:?}"
            );

            ensure!(
                post_version >= 1,
                sp_runtime::TryRuntimeError::Other("Migration to v1 did not complete")
            );
            ensure!(
                crate::TotalSupply::<T>::get() == pre_supply,
                sp_runtime::TryRuntimeError::Other("Total supply changed during migration")
            );
            Pallet::<T>::do_try_state()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mock::{new_test_ext, ExtBuilder, Test, ADMIN, PRE_MINT},
        Role,
    };
    use frame_support::traits::StorageVersion;

    #[test]
    fn migration_v1_from_v0_bumps_version() {
        new_test_ext().execute_with(|| {
            StorageVersion::new(0).put::<Pallet<Test>>();
            assert_eq!(Pallet::<Test>::on_chain_storage_version(), 0);

            v1::MigrateToV1::<Test>::on_runtime_upgrade();

            assert_eq!(Pallet::<Test>::on_chain_storage_version(), 1);
            assert_eq!(Pallet::<Test>::init_state(), InitState::Initialized(1));
            assert_eq!(Pallet::<Test>::balance_of(&ADMIN), PRE_MINT);
        });
    }

    #[test]
    fn migration_v1_marks_populated_ledger_initialized() {
        ExtBuilder::default().uninitialized().build().execute_with(|| {
            // v0 layout: roles and balances written, no initializer marker
            Roles::<Test>::insert(Role::DefaultAdmin, ADMIN, true);
            crate::Balances::<Test>::insert(ADMIN, 500);
            crate::TotalSupply::<Test>::put(500);
            StorageVersion::new(0).put::<Pallet<Test>>();

            v1::MigrateToV1::<Test>::on_runtime_upgrade();

            assert_eq!(Pallet::<Test>::init_state(), InitState::Initialized(INITIALIZER_VERSION));
            assert_eq!(Pallet::<Test>::balance_of(&ADMIN), 500);
            assert_eq!(Pallet::<Test>::has_role(Role::DefaultAdmin, &ADMIN), true);
            assert!(Pallet::<Test>::do_try_state().is_ok());
        });
    }

    #[test]
    fn migration_v1_leaves_empty_ledger_uninitialized() {
        ExtBuilder::default().uninitialized().build().execute_with(|| {
            StorageVersion::new(0).put::<Pallet<Test>>();

            v1::MigrateToV1::<Test>::on_runtime_upgrade();

            assert_eq!(Pallet::<Test>::on_chain_storage_version(), 1);
            assert_eq!(Pallet::<Test>::init_state(), InitState::Uninitialized);
        });
    }

    #[test]
    fn migration_v1_keeps_logic_only_instance_disabled() {
        ExtBuilder::default().logic_only().build().execute_with(|| {
            StorageVersion::new(0).put::<Pallet<Test>>();

            v1::MigrateToV1::<Test>::on_runtime_upgrade();

            assert_eq!(Pallet::<Test>::init_state(), InitState::Disabled);
        });
    }

    #[test]
    fn migration_v1_idempotent() {
        ExtBuilder::default().uninitialized().build().execute_with(|| {
            StorageVersion::new(1).put::<Pallet<Test>>();
            Roles::<Test>::insert(Role::DefaultAdmin, ADMIN, true);

            v1::MigrateToV1::<Test>::on_runtime_upgrade();

            // Already at v1: nothing is touched
            assert_eq!(Pallet::<Test>::on_chain_storage_version(), 1);
            assert_eq!(Pallet::<Test>::init_state(), InitState::Uninitialized);
        });
    }

    #[test]
    fn migration_v1_skipped_on_higher_version() {
        new_test_ext().execute_with(|| {
            StorageVersion::new(5).put::<Pallet<Test>>();

            v1::MigrateToV1::<Test>::on_runtime_upgrade();

            assert_eq!(Pallet::<Test>::on_chain_storage_version(), 5);
        });
    }
}
