//! Benchmarking setup for pallet-gated-ledger

use super::*;

#[allow(unused)]
use crate::Pallet as GatedLedger;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;
use frame_support::traits::fungibles;
use sp_runtime::traits::Hash;

fn holder<T: Config>(role: Role) -> T::AccountId {
    let caller: T::AccountId = whitelisted_caller();
    Roles::<T>::insert(role, &caller, true);
    caller
}

fn fund<T: Config>(who: &T::AccountId, amount: u128) {
    Balances::<T>::mutate(who, |balance| *balance = balance.saturating_add(amount));
    TotalSupply::<T>::mutate(|supply| *supply = supply.saturating_add(amount));
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn initialize() {
        // Fresh storage bound to logic
        Initialization::<T>::kill();
        TotalSupply::<T>::kill();
        Implementation::<T>::put(T::Hashing::hash(b"ledger-logic"));
        let admin: T::AccountId = account("admin", 0, 0);
        let origin = T::DeployOrigin::try_successful_origin().expect("Deploy origin");

        #[extrinsic_call]
        _(
            origin as T::RuntimeOrigin,
            TokenNameOf::truncate_from(b"Bench Token".to_vec()),
            TokenSymbolOf::truncate_from(b"BNC".to_vec()),
            admin.clone(),
            1_000,
            18,
            true,
        );

        assert_eq!(Initialization::<T>::get(), InitState::Initialized(INITIALIZER_VERSION));
        assert_eq!(Balances::<T>::get(&admin), 1_000);
    }

    #[benchmark]
    fn transfer() {
        let caller: T::AccountId = whitelisted_caller();
        let recipient: T::AccountId = account("recipient", 0, 0);
        let amount: u128 = 1_000_000;

        // Worst case: launch phase active, sender allow-listed
        Phase::<T>::put(LaunchPhase::Active);
        LaunchWhitelist::<T>::insert(&caller, true);
        fund::<T>(&caller, 10_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), recipient.clone(), amount);

        assert_eq!(Balances::<T>::get(&recipient), amount);
    }

    #[benchmark]
    fn approve() {
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), 1_000_000);

        assert_eq!(Allowances::<T>::get(&caller, &spender), 1_000_000);
    }

    #[benchmark]
    fn transfer_from() {
        let spender: T::AccountId = whitelisted_caller();
        let owner: T::AccountId = account("owner", 0, 0);
        let recipient: T::AccountId = account("recipient", 0, 0);
        let amount: u128 = 1_000_000;

        Phase::<T>::put(LaunchPhase::Active);
        LaunchWhitelist::<T>::insert(&owner, true);
        fund::<T>(&owner, 10_000_000);
        Allowances::<T>::insert(&owner, &spender, amount);

        #[extrinsic_call]
        _(RawOrigin::Signed(spender.clone()), owner.clone(), recipient.clone(), amount);

        assert_eq!(Balances::<T>::get(&recipient), amount);
        assert_eq!(Allowances::<T>::get(&owner, &spender), 0);
    }

    #[benchmark]
    fn mint() {
        let caller = holder::<T>(Role::Minter);
        let recipient: T::AccountId = account("recipient", 0, 0);
        TotalSupply::<T>::kill();
        let amount = T::MaxSupply::get().min(1_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), recipient.clone(), amount);

        assert_eq!(Balances::<T>::get(&recipient), amount);
    }

    #[benchmark]
    fn burn() {
        let caller = holder::<T>(Role::Burner);
        fund::<T>(&caller, 1_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), 1_000_000);

        assert_eq!(Balances::<T>::get(&caller), 0);
    }

    #[benchmark]
    fn burn_from() {
        let caller = holder::<T>(Role::Burner);
        let owner: T::AccountId = account("owner", 0, 0);
        fund::<T>(&owner, 1_000_000);
        Allowances::<T>::insert(&owner, &caller, 1_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), owner.clone(), 1_000_000);

        assert_eq!(Balances::<T>::get(&owner), 0);
    }

    #[benchmark]
    fn grant_role() {
        let caller = holder::<T>(Role::DefaultAdmin);
        let account: T::AccountId = account("grantee", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), Role::Minter, account.clone());

        assert!(Roles::<T>::get(Role::Minter, &account));
    }

    #[benchmark]
    fn revoke_role() {
        let caller = holder::<T>(Role::DefaultAdmin);
        let account: T::AccountId = account("grantee", 0, 0);
        Roles::<T>::insert(Role::Minter, &account, true);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), Role::Minter, account.clone());

        assert!(!Roles::<T>::get(Role::Minter, &account));
    }

    #[benchmark]
    fn renounce_role() {
        let caller = holder::<T>(Role::Emergency);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), Role::Emergency);

        assert!(!Roles::<T>::get(Role::Emergency, &caller));
    }

    #[benchmark]
    fn grant_mint_and_burn_roles() {
        let caller = holder::<T>(Role::Admin);
        let pool: T::AccountId = account("pool", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), pool.clone());

        assert!(Roles::<T>::get(Role::Minter, &pool));
        assert!(Roles::<T>::get(Role::Burner, &pool));
    }

    #[benchmark]
    fn set_launch_phase_whitelist() {
        let caller = holder::<T>(Role::LaunchManager);
        let account: T::AccountId = account("member", 0, 0);
        Phase::<T>::put(LaunchPhase::Active);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), account.clone(), true);

        assert!(LaunchWhitelist::<T>::get(&account));
    }

    #[benchmark]
    fn batch_set_launch_phase_whitelist(n: Linear<1, { T::MaxBatchSize::get() }>) {
        let caller = holder::<T>(Role::LaunchManager);
        Phase::<T>::put(LaunchPhase::Active);
        let members: Vec<T::AccountId> = (0..n).map(|i| account("member", i, 0)).collect();
        let accounts: BoundedVec<_, T::MaxBatchSize> =
            members.clone().try_into().expect("n is bounded by MaxBatchSize");
        let statuses: BoundedVec<_, T::MaxBatchSize> =
            sp_std::vec![true; n as usize].try_into().expect("n is bounded by MaxBatchSize");

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), accounts, statuses);

        assert!(members.iter().all(|member| LaunchWhitelist::<T>::get(member)));
    }

    #[benchmark]
    fn deactivate_launch_phase() {
        let caller = holder::<T>(Role::LaunchManager);
        Phase::<T>::put(LaunchPhase::Active);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller));

        assert_eq!(Phase::<T>::get(), LaunchPhase::Concluded);
    }

    #[benchmark]
    fn pause() {
        let caller = holder::<T>(Role::Emergency);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller));

        assert!(Paused::<T>::get());
    }

    #[benchmark]
    fn unpause() {
        let caller = holder::<T>(Role::Emergency);
        Paused::<T>::put(true);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller));

        assert!(!Paused::<T>::get());
    }

    #[benchmark]
    fn set_bridge_admin() {
        let caller = holder::<T>(Role::Admin);
        let new_admin: T::AccountId = account("bridge", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), new_admin.clone());

        assert_eq!(BridgeAdmin::<T>::get(), Some(new_admin));
    }

    #[benchmark]
    fn authorize_upgrade() {
        let caller = holder::<T>(Role::Upgrader);
        Initialization::<T>::put(InitState::Initialized(INITIALIZER_VERSION));
        let next = T::Hashing::hash(b"next-ledger-logic");

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), next);

        assert_eq!(Implementation::<T>::get(), Some(next));
    }

    #[benchmark]
    fn emergency_withdraw() {
        let caller = holder::<T>(Role::Emergency);
        let recipient: T::AccountId = account("recipient", 0, 0);
        let amount: u128 = 1_000_000;
        let asset = T::BenchmarkHelper::fund_foreign_asset(&GatedLedger::<T>::account_id(), amount);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), asset, recipient.clone(), amount);

        assert_eq!(
            <T::Assets as fungibles::Inspect<T::AccountId>>::balance(asset, &recipient),
            amount
        );
    }

    impl_benchmark_test_suite!(GatedLedger, crate::mock::new_test_ext(), crate::mock::Test);
}
