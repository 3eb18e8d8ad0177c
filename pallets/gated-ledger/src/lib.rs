//! # Gated Ledger Pallet
//!
//! A capped fungible ledger whose privileged operations are gated by roles.
//!
//! - Supply: balances, allowances and total issuance, bounded by the immutable
//!   `Config::MaxSupply`.
//! - Roles: `DefaultAdmin` administers every role; `Admin` additionally
//!   administers the Minter/Burner pair and rotates the bridge admin.
//! - Launch phase: while active, only allow-listed accounts may send. Ending the
//!   phase is irreversible.
//! - Emergency controls: pause, and recovery of foreign assets sent to the
//!   ledger's own account.
//! - Upgrades: storage is bound to one logic implementation at a time and only
//!   `Upgrader` holders may rebind it. The initializer runs once per storage
//!   instance and never on a logic-only instance.
//!
//! Every call runs inside a storage transaction, so a failing call leaves no
//! trace.

#![cfg_attr(not(feature = "std"), no_std)]
// Allow deprecated getters and weight attributes used across the pallet
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

use frame_support::{
    dispatch::DispatchResult,
    ensure,
    pallet_prelude::*,
    traits::{fungibles, tokens::Preservation, EnsureOrigin},
    PalletId,
};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_runtime::traits::AccountIdConversion;
use sp_std::prelude::*;

pub use pallet::*;

pub mod interface;
pub mod migrations;
pub mod types;
pub mod upgrade;
pub mod weights;

pub use interface::InterfaceId;
pub use types::{InitState, LaunchPhase, Role};
pub use upgrade::{LogicUpgrade, SystemCodeUpgrade};
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub(crate) const LOG_TARGET: &str = "pallet-gated-ledger";

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

/// Initializer version recorded by `initialize`.
pub const INITIALIZER_VERSION: u64 = 1;

/// Allowance value that is never decreased by spending.
pub const UNLIMITED_ALLOWANCE: u128 = u128::MAX;

pub type TokenNameOf = BoundedVec<u8, ConstU32<64>>;
pub type TokenSymbolOf = BoundedVec<u8, ConstU32<16>>;

/// Benchmark setup the pallet cannot do on its own.
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AssetId, AccountId> {
    /// Create a foreign asset, other than the native one, and credit `amount` of it to `who`.
    fn fund_foreign_asset(who: &AccountId, amount: u128) -> AssetId;
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Origin allowed to run the one-time initializer.
        type DeployOrigin: EnsureOrigin<Self::RuntimeOrigin>;

        /// Hard ceiling on total issuance. Never changes for a given ledger.
        #[pallet::constant]
        type MaxSupply: Get<u128>;

        /// Seed of the ledger's own account.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        /// Maximum number of entries in a batch allow-list update.
        #[pallet::constant]
        type MaxBatchSize: Get<u32>;

        type AssetId: Parameter + MaxEncodedLen + Copy;

        /// Foreign assets that may end up held by the ledger's own account.
        type Assets: fungibles::Mutate<Self::AccountId, AssetId = Self::AssetId, Balance = u128>;

        /// Id of this ledger's own asset within the `Assets` id space.
        #[pallet::constant]
        type NativeAssetId: Get<Self::AssetId>;

        /// Performs the logic swap on `authorize_upgrade`.
        type LogicUpgrade: LogicUpgrade<Self::Hash>;

        type WeightInfo: WeightInfo;

        #[cfg(feature = "runtime-benchmarks")]
        type BenchmarkHelper: BenchmarkHelper<Self::AssetId, Self::AccountId>;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Token name (e.g., "Sovereign Bond Token")
    #[pallet::storage]
    #[pallet::getter(fn token_name)]
    pub type TokenName<T> = StorageValue<_, TokenNameOf, ValueQuery>;

    /// Token symbol (e.g., "SBT")
    #[pallet::storage]
    #[pallet::getter(fn token_symbol)]
    pub type TokenSymbol<T> = StorageValue<_, TokenSymbolOf, ValueQuery>;

    /// Token decimals (e.g., 6 for USDC-style, 18 for ETH-style)
    #[pallet::storage]
    #[pallet::getter(fn decimals)]
    pub type Decimals<T> = StorageValue<_, u8, ValueQuery>;

    /// Total issued units. Always equal to the sum of `Balances`.
    #[pallet::storage]
    #[pallet::getter(fn total_supply)]
    pub type TotalSupply<T> = StorageValue<_, u128, ValueQuery>;

    /// Account balances
    #[pallet::storage]
    #[pallet::getter(fn balance_of)]
    pub type Balances<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

    /// Spending allowances, keyed by (owner, spender).
    #[pallet::storage]
    #[pallet::getter(fn allowance)]
    pub type Allowances<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        T::AccountId,
        u128,
        ValueQuery,
    >;

    /// Role grants.
    #[pallet::storage]
    #[pallet::getter(fn has_role)]
    pub type Roles<T: Config> =
        StorageDoubleMap<_, Twox64Concat, Role, Blake2_128Concat, T::AccountId, bool, ValueQuery>;

    /// Accounts allowed to send while the launch phase is active.
    #[pallet::storage]
    #[pallet::getter(fn launch_whitelist)]
    pub type LaunchWhitelist<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, bool, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn launch_phase)]
    pub type Phase<T> = StorageValue<_, LaunchPhase, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn is_paused)]
    pub type Paused<T> = StorageValue<_, bool, ValueQuery>;

    /// Administrative identity exposed to the bridge/pool component.
    #[pallet::storage]
    #[pallet::getter(fn bridge_admin)]
    pub type BridgeAdmin<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    /// Code hash of the logic currently bound to this storage.
    #[pallet::storage]
    #[pallet::getter(fn implementation)]
    pub type Implementation<T: Config> = StorageValue<_, T::Hash, OptionQuery>;

    #[pallet::storage]
    #[pallet::getter(fn init_state)]
    pub type Initialization<T> = StorageValue<_, InitState, ValueQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Storage initialized at the given initializer version
        Initialized { version: u64 },
        /// Tokens transferred from one account to another
        Transferred { from: T::AccountId, to: T::AccountId, amount: u128 },
        /// Spending allowance set
        Approval { owner: T::AccountId, spender: T::AccountId, amount: u128 },
        /// New tokens minted
        Minted { to: T::AccountId, amount: u128 },
        /// Tokens destroyed
        Burned { from: T::AccountId, amount: u128 },
        RoleGranted { role: Role, account: T::AccountId, sender: T::AccountId },
        RoleRevoked { role: Role, account: T::AccountId, sender: T::AccountId },
        /// Launch-phase allow-list entry written
        LaunchPhaseWhitelistUpdated { account: T::AccountId, allowed: bool },
        /// Launch phase ended for good
        LaunchPhaseDeactivated { account: T::AccountId },
        Paused { account: T::AccountId },
        Unpaused { account: T::AccountId },
        /// Foreign asset swept out of the ledger's own account
        EmergencyWithdraw { asset: T::AssetId, to: T::AccountId, amount: u128 },
        BridgeAdminTransferred { previous: Option<T::AccountId>, new_admin: T::AccountId },
        /// Storage rebound to new logic
        Upgraded { implementation: T::Hash },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Caller lacks the given role.
        Unauthorized(Role),
        /// The zero account was given where a real account is required.
        InvalidAccount,
        /// Recipient (or asset) is not allowed to receive.
        InvalidRecipient,
        ZeroAmount,
        /// Resulting total issuance would exceed `MaxSupply`.
        MaxSupplyExceeded,
        InsufficientBalance,
        InsufficientAllowance,
        Overflow,
        /// Parallel batch inputs differ in length.
        LengthMismatch,
        EmptyBatch,
        /// Sender is not allow-listed while the launch phase is active.
        NotWhitelisted,
        /// The launch phase has ended; the allow-list can no longer change.
        PhaseInactive,
        /// The launch phase was already deactivated.
        AlreadyInactive,
        /// Balance-mutating calls are suspended.
        Paused,
        AlreadyInitialized,
        /// Initializers are disabled on this instance or it is not bound to logic.
        InvalidInitialization,
        NotInitialized,
        /// The zero hash cannot be bound as logic.
        InvalidImplementation,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        fn integrity_test() {
            assert!(T::MaxSupply::get() > 0, "MaxSupply must be non-zero");
            assert!(T::MaxBatchSize::get() > 0, "MaxBatchSize must be non-zero");
        }

        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// One-time initializer for a storage instance bound to logic.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::initialize())]
        pub fn initialize(
            origin: OriginFor<T>,
            name: TokenNameOf,
            symbol: TokenSymbolOf,
            admin: T::AccountId,
            pre_mint: u128,
            decimals: u8,
            launch_phase_active: bool,
        ) -> DispatchResult {
            T::DeployOrigin::ensure_origin(origin)?;
            Self::do_initialize(name, symbol, admin, pre_mint, decimals, launch_phase_active)
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::ensure_not_paused()?;
            Self::ensure_may_send(&sender)?;
            Self::do_transfer(&sender, &to, amount)
        }

        /// Set `spender`'s allowance over the caller's balance. Allowed while paused.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn approve(
            origin: OriginFor<T>,
            spender: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            ensure!(!Self::is_null_account(&spender), Error::<T>::InvalidAccount);
            Self::do_approve(&owner, &spender, amount);
            Ok(())
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::transfer_from())]
        pub fn transfer_from(
            origin: OriginFor<T>,
            from: T::AccountId,
            to: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let spender = ensure_signed(origin)?;
            Self::ensure_not_paused()?;
            ensure!(!Self::is_null_account(&from), Error::<T>::InvalidAccount);
            Self::ensure_may_send(&from)?;
            Self::spend_allowance(&from, &spender, amount)?;
            Self::do_transfer(&from, &to, amount)
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::mint())]
        pub fn mint(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_not_paused()?;
            Self::ensure_role(Role::Minter, &who)?;
            Self::do_mint(&to, amount)
        }

        /// Burn from the caller's own balance.
        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::burn())]
        pub fn burn(origin: OriginFor<T>, amount: u128) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_not_paused()?;
            Self::ensure_role(Role::Burner, &who)?;
            ensure!(amount > 0, Error::<T>::ZeroAmount);
            Self::do_burn(&who, amount)
        }

        /// Burn from `from`, spending the caller's allowance.
        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::burn_from())]
        pub fn burn_with_allowance(
            origin: OriginFor<T>,
            from: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::do_burn_with_allowance(&who, &from, amount)
        }

        /// Burn from `from`, spending the caller's allowance.
        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::burn_from())]
        pub fn burn_from(origin: OriginFor<T>, from: T::AccountId, amount: u128) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::do_burn_with_allowance(&who, &from, amount)
        }

        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::grant_role())]
        pub fn grant_role(
            origin: OriginFor<T>,
            role: Role,
            account: T::AccountId,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_administers(role, &who)?;
            ensure!(!Self::is_null_account(&account), Error::<T>::InvalidAccount);
            Self::do_grant_role(role, &account, &who);
            Ok(())
        }

        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::revoke_role())]
        pub fn revoke_role(
            origin: OriginFor<T>,
            role: Role,
            account: T::AccountId,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_administers(role, &who)?;
            ensure!(!Self::is_null_account(&account), Error::<T>::InvalidAccount);
            Self::do_revoke_role(role, &account, &who);
            Ok(())
        }

        /// Drop a role held by the caller.
        #[pallet::call_index(10)]
        #[pallet::weight(T::WeightInfo::renounce_role())]
        pub fn renounce_role(origin: OriginFor<T>, role: Role) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::do_revoke_role(role, &who, &who);
            Ok(())
        }

        /// Grant both `Minter` and `Burner` to `account`, as the bridge pool needs.
        #[pallet::call_index(11)]
        #[pallet::weight(T::WeightInfo::grant_mint_and_burn_roles())]
        pub fn grant_mint_and_burn_roles(
            origin: OriginFor<T>,
            account: T::AccountId,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::Admin, &who)?;
            ensure!(!Self::is_null_account(&account), Error::<T>::InvalidAccount);
            Self::do_grant_role(Role::Minter, &account, &who);
            Self::do_grant_role(Role::Burner, &account, &who);
            Ok(())
        }

        #[pallet::call_index(12)]
        #[pallet::weight(T::WeightInfo::set_launch_phase_whitelist())]
        pub fn set_launch_phase_whitelist(
            origin: OriginFor<T>,
            account: T::AccountId,
            allowed: bool,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::LaunchManager, &who)?;
            ensure!(Phase::<T>::get().is_active(), Error::<T>::PhaseInactive);
            ensure!(!Self::is_null_account(&account), Error::<T>::InvalidAccount);
            Self::write_whitelist(account, allowed);
            Ok(())
        }

        /// Update several allow-list entries at once. The whole batch is validated
        /// before any entry is written.
        #[pallet::call_index(13)]
        #[pallet::weight(T::WeightInfo::batch_set_launch_phase_whitelist(accounts.len() as u32))]
        pub fn batch_set_launch_phase_whitelist(
            origin: OriginFor<T>,
            accounts: BoundedVec<T::AccountId, T::MaxBatchSize>,
            statuses: BoundedVec<bool, T::MaxBatchSize>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::LaunchManager, &who)?;
            ensure!(Phase::<T>::get().is_active(), Error::<T>::PhaseInactive);
            ensure!(accounts.len() == statuses.len(), Error::<T>::LengthMismatch);
            ensure!(!accounts.is_empty(), Error::<T>::EmptyBatch);
            ensure!(
                !accounts.iter().any(|account| Self::is_null_account(account)),
                Error::<T>::InvalidAccount
            );

            for (account, allowed) in accounts.into_iter().zip(statuses) {
                Self::write_whitelist(account, allowed);
            }
            Ok(())
        }

        /// End the launch phase. Cannot be undone.
        #[pallet::call_index(14)]
        #[pallet::weight(T::WeightInfo::deactivate_launch_phase())]
        pub fn deactivate_launch_phase(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::LaunchManager, &who)?;
            let next = Phase::<T>::get().conclude().ok_or(Error::<T>::AlreadyInactive)?;
            Phase::<T>::put(next);

            log::info!(target: LOG_TARGET, "Launch phase deactivated by {who:?}");
            Self::deposit_event(Event::LaunchPhaseDeactivated { account: who });
            Ok(())
        }

        #[pallet::call_index(15)]
        #[pallet::weight(T::WeightInfo::pause())]
        pub fn pause(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::Emergency, &who)?;
            Paused::<T>::put(true);

            log::info!(target: LOG_TARGET, "Ledger paused by {who:?}");
            Self::deposit_event(Event::Paused { account: who });
            Ok(())
        }

        #[pallet::call_index(16)]
        #[pallet::weight(T::WeightInfo::unpause())]
        pub fn unpause(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::Emergency, &who)?;
            Paused::<T>::put(false);

            log::info!(target: LOG_TARGET, "Ledger unpaused by {who:?}");
            Self::deposit_event(Event::Unpaused { account: who });
            Ok(())
        }

        /// Move a foreign asset held by the ledger's own account to `to`.
        ///
        /// The ledger's own asset can never be swept this way.
        #[pallet::call_index(17)]
        #[pallet::weight(T::WeightInfo::emergency_withdraw())]
        pub fn emergency_withdraw(
            origin: OriginFor<T>,
            asset: T::AssetId,
            to: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::Emergency, &who)?;
            ensure!(asset != T::NativeAssetId::get(), Error::<T>::InvalidRecipient);
            ensure!(!Self::is_null_account(&to), Error::<T>::InvalidRecipient);
            ensure!(amount > 0, Error::<T>::ZeroAmount);

            <T::Assets as fungibles::Mutate<T::AccountId>>::transfer(
                asset,
                &Self::account_id(),
                &to,
                amount,
                Preservation::Expendable,
            )?;

            log::info!(
                target: LOG_TARGET,
                "Emergency withdrawal of {amount} units of asset {asset:?} to {to:?} by {who:?}"
            );
            Self::deposit_event(Event::EmergencyWithdraw { asset, to, amount });
            Ok(())
        }

        #[pallet::call_index(18)]
        #[pallet::weight(T::WeightInfo::set_bridge_admin())]
        pub fn set_bridge_admin(origin: OriginFor<T>, new_admin: T::AccountId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::Admin, &who)?;
            ensure!(!Self::is_null_account(&new_admin), Error::<T>::InvalidAccount);

            let previous = BridgeAdmin::<T>::get();
            BridgeAdmin::<T>::put(&new_admin);
            Self::deposit_event(Event::BridgeAdminTransferred { previous, new_admin });
            Ok(())
        }

        /// Rebind storage to the logic identified by `new_implementation`.
        ///
        /// Balances, roles, the allow-list and all flags are left untouched.
        #[pallet::call_index(19)]
        #[pallet::weight(T::WeightInfo::authorize_upgrade())]
        pub fn authorize_upgrade(
            origin: OriginFor<T>,
            new_implementation: T::Hash,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::Upgrader, &who)?;
            ensure!(Initialization::<T>::get().is_initialized(), Error::<T>::NotInitialized);
            ensure!(new_implementation != T::Hash::default(), Error::<T>::InvalidImplementation);

            let current = Implementation::<T>::get();
            T::LogicUpgrade::bind(current.as_ref(), &new_implementation)?;
            Implementation::<T>::put(new_implementation);

            log::info!(
                target: LOG_TARGET,
                "Logic binding {current:?} -> {new_implementation:?} by {who:?}"
            );
            Self::deposit_event(Event::Upgraded { implementation: new_implementation });
            Ok(())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Logic bound to this storage. `None` makes this a logic-only instance on
        /// which the initializer can never run.
        pub implementation: Option<T::Hash>,
        /// Root administrator. When set, the initializer runs at genesis.
        pub admin: Option<T::AccountId>,
        /// Token name
        pub token_name: Vec<u8>,
        /// Token symbol
        pub token_symbol: Vec<u8>,
        /// Token decimals
        pub decimals: u8,
        /// Units credited to the admin at initialization
        pub pre_mint: u128,
        /// Whether the ledger starts in the restricted launch phase
        pub launch_phase_active: bool,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            let Some(implementation) = self.implementation else {
                Initialization::<T>::put(InitState::Disabled);
                return;
            };
            Implementation::<T>::put(implementation);

            if let Some(ref admin) = self.admin {
                let name: TokenNameOf =
                    self.token_name.clone().try_into().expect("Token name too long (max 64 bytes)");
                let symbol: TokenSymbolOf = self
                    .token_symbol
                    .clone()
                    .try_into()
                    .expect("Token symbol too long (max 16 bytes)");

                Pallet::<T>::do_initialize(
                    name,
                    symbol,
                    admin.clone(),
                    self.pre_mint,
                    self.decimals,
                    self.launch_phase_active,
                )
                .expect("Genesis ledger initialization failed");
            }
        }
    }
}

impl<T: Config> Pallet<T> {
    /// The ledger's own account.
    pub fn account_id() -> T::AccountId {
        T::PalletId::get().into_account_truncating()
    }

    pub fn max_supply() -> u128 {
        T::MaxSupply::get()
    }

    pub fn launch_phase_active() -> bool {
        Phase::<T>::get().is_active()
    }

    pub fn supports_interface(id: InterfaceId) -> bool {
        interface::supports(id)
    }

    /// The zero account is the one whose encoding is all zero bytes.
    pub fn is_null_account(who: &T::AccountId) -> bool {
        who.using_encoded(|bytes| bytes.iter().all(|byte| *byte == 0))
    }

    pub(crate) fn do_initialize(
        name: TokenNameOf,
        symbol: TokenSymbolOf,
        admin: T::AccountId,
        pre_mint: u128,
        decimals: u8,
        launch_phase_active: bool,
    ) -> DispatchResult {
        match Initialization::<T>::get() {
            InitState::Uninitialized => {},
            InitState::Initialized(_) => return Err(Error::<T>::AlreadyInitialized.into()),
            InitState::Disabled => return Err(Error::<T>::InvalidInitialization.into()),
        }
        ensure!(Implementation::<T>::exists(), Error::<T>::InvalidInitialization);
        ensure!(!Self::is_null_account(&admin), Error::<T>::InvalidAccount);
        if pre_mint > T::MaxSupply::get() {
            log::debug!(
                target: LOG_TARGET,
                "Pre-mint of {pre_mint} exceeds max supply {}",
                T::MaxSupply::get()
            );
            return Err(Error::<T>::MaxSupplyExceeded.into());
        }

        TokenName::<T>::put(name);
        TokenSymbol::<T>::put(symbol);
        Decimals::<T>::put(decimals);

        for role in Role::ALL {
            Self::do_grant_role(role, &admin, &admin);
        }
        BridgeAdmin::<T>::put(&admin);
        Self::deposit_event(Event::BridgeAdminTransferred {
            previous: None,
            new_admin: admin.clone(),
        });

        Phase::<T>::put(LaunchPhase::from_flag(launch_phase_active));

        if pre_mint > 0 {
            Self::do_mint(&admin, pre_mint)?;
        }

        Initialization::<T>::put(InitState::Initialized(INITIALIZER_VERSION));
        log::info!(
            target: LOG_TARGET,
            "Ledger initialized: admin {admin:?}, pre-mint {pre_mint}, \
             launch phase {launch_phase_active}"
        );
        Self::deposit_event(Event::Initialized { version: INITIALIZER_VERSION });
        Ok(())
    }

    fn ensure_not_paused() -> DispatchResult {
        ensure!(!Paused::<T>::get(), Error::<T>::Paused);
        Ok(())
    }

    fn ensure_role(role: Role, who: &T::AccountId) -> DispatchResult {
        if Roles::<T>::get(role, who) {
            return Ok(());
        }
        log::debug!(target: LOG_TARGET, "{who:?} is missing role {role:?}");
        Err(Error::<T>::Unauthorized(role).into())
    }

    fn ensure_administers(role: Role, who: &T::AccountId) -> DispatchResult {
        if role.administered_by().iter().any(|admin| Roles::<T>::get(admin, who)) {
            return Ok(());
        }
        let required = role.primary_admin();
        log::debug!(
            target: LOG_TARGET,
            "{who:?} cannot administer {role:?}, requires {required:?}"
        );
        Err(Error::<T>::Unauthorized(required).into())
    }

    /// Launch-phase gate: only allow-listed accounts may be debited by a transfer.
    fn ensure_may_send(from: &T::AccountId) -> DispatchResult {
        if Phase::<T>::get().is_active() {
            ensure!(LaunchWhitelist::<T>::get(from), Error::<T>::NotWhitelisted);
        }
        Ok(())
    }

    fn do_transfer(from: &T::AccountId, to: &T::AccountId, amount: u128) -> DispatchResult {
        ensure!(!Self::is_null_account(to), Error::<T>::InvalidRecipient);
        Self::debit(from, amount)?;
        Self::credit(to, amount)?;
        Self::deposit_event(Event::Transferred { from: from.clone(), to: to.clone(), amount });
        Ok(())
    }

    fn do_approve(owner: &T::AccountId, spender: &T::AccountId, amount: u128) {
        Allowances::<T>::insert(owner, spender, amount);
        Self::deposit_event(Event::Approval {
            owner: owner.clone(),
            spender: spender.clone(),
            amount,
        });
    }

    fn spend_allowance(
        owner: &T::AccountId,
        spender: &T::AccountId,
        amount: u128,
    ) -> DispatchResult {
        let current = Allowances::<T>::get(owner, spender);
        if current == UNLIMITED_ALLOWANCE {
            return Ok(());
        }
        if current < amount {
            log::debug!(
                target: LOG_TARGET,
                "{spender:?} has allowance {current} from {owner:?}, needs {amount}"
            );
            return Err(Error::<T>::InsufficientAllowance.into());
        }
        Allowances::<T>::insert(owner, spender, current - amount);
        Ok(())
    }

    pub(crate) fn do_mint(to: &T::AccountId, amount: u128) -> DispatchResult {
        ensure!(amount > 0, Error::<T>::ZeroAmount);
        ensure!(
            !Self::is_null_account(to) && *to != Self::account_id(),
            Error::<T>::InvalidRecipient
        );

        let supply = TotalSupply::<T>::get();
        let new_supply = supply.checked_add(amount).filter(|total| *total <= T::MaxSupply::get());
        let Some(new_supply) = new_supply else {
            log::debug!(
                target: LOG_TARGET,
                "Mint of {amount} would bring supply to {}, max {}",
                supply.saturating_add(amount),
                T::MaxSupply::get()
            );
            return Err(Error::<T>::MaxSupplyExceeded.into());
        };

        Self::credit(to, amount)?;
        TotalSupply::<T>::put(new_supply);
        Self::deposit_event(Event::Minted { to: to.clone(), amount });
        Ok(())
    }

    fn do_burn(from: &T::AccountId, amount: u128) -> DispatchResult {
        Self::debit(from, amount)?;
        TotalSupply::<T>::try_mutate(|supply| -> DispatchResult {
            *supply = supply.checked_sub(amount).ok_or(Error::<T>::Overflow)?;
            Ok(())
        })?;
        Self::deposit_event(Event::Burned { from: from.clone(), amount });
        Ok(())
    }

    fn do_burn_with_allowance(
        spender: &T::AccountId,
        from: &T::AccountId,
        amount: u128,
    ) -> DispatchResult {
        Self::ensure_not_paused()?;
        Self::ensure_role(Role::Burner, spender)?;
        ensure!(amount > 0, Error::<T>::ZeroAmount);
        ensure!(!Self::is_null_account(from), Error::<T>::InvalidAccount);
        Self::spend_allowance(from, spender, amount)?;
        Self::do_burn(from, amount)
    }

    fn debit(who: &T::AccountId, amount: u128) -> DispatchResult {
        Balances::<T>::try_mutate(who, |balance| -> DispatchResult {
            *balance = balance.checked_sub(amount).ok_or(Error::<T>::InsufficientBalance)?;
            Ok(())
        })
    }

    fn credit(who: &T::AccountId, amount: u128) -> DispatchResult {
        Balances::<T>::try_mutate(who, |balance| -> DispatchResult {
            *balance = balance.checked_add(amount).ok_or(Error::<T>::Overflow)?;
            Ok(())
        })
    }

    fn do_grant_role(role: Role, account: &T::AccountId, sender: &T::AccountId) {
        if Roles::<T>::get(role, account) {
            return;
        }
        Roles::<T>::insert(role, account, true);
        Self::deposit_event(Event::RoleGranted {
            role,
            account: account.clone(),
            sender: sender.clone(),
        });
    }

    fn do_revoke_role(role: Role, account: &T::AccountId, sender: &T::AccountId) {
        if !Roles::<T>::get(role, account) {
            return;
        }
        Roles::<T>::remove(role, account);
        Self::deposit_event(Event::RoleRevoked {
            role,
            account: account.clone(),
            sender: sender.clone(),
        });
    }

    fn write_whitelist(account: T::AccountId, allowed: bool) {
        if allowed {
            LaunchWhitelist::<T>::insert(&account, true);
        } else {
            LaunchWhitelist::<T>::remove(&account);
        }
        Self::deposit_event(Event::LaunchPhaseWhitelistUpdated { account, allowed });
    }

    /// Supply invariants: balances sum to total issuance, which never exceeds the cap.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), sp_runtime::TryRuntimeError> {
        let sum = Balances::<T>::iter_values()
            .try_fold(0u128, |acc, balance| acc.checked_add(balance))
            .ok_or(sp_runtime::TryRuntimeError::Other("Sum of balances overflows"))?;
        let supply = TotalSupply::<T>::get();

        ensure!(
            sum == supply,
            sp_runtime::TryRuntimeError::Other("Sum of balances differs from total supply")
        );
        ensure!(
            supply <= T::MaxSupply::get(),
            sp_runtime::TryRuntimeError::Other("Total supply exceeds max supply")
        );
        Ok(())
    }
}
