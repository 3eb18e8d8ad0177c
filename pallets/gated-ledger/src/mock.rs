use crate as pallet_gated_ledger;
use crate::{LogicUpgrade, SystemCodeUpgrade};
use codec::Encode;
use frame_support::{
    derive_impl, parameter_types,
    storage::unhashed,
    traits::{
        fungibles,
        tokens::{DepositConsequence, Fortitude, Preservation, Provenance, WithdrawConsequence},
        ConstU32, ConstU64,
    },
    PalletId,
};
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, IdentityLookup},
    BuildStorage, DispatchError, DispatchResult,
};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        GatedLedger: pallet_gated_ledger,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type BaseCallFilter = frame_support::traits::Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Nonce = u64;
    type Hash = H256;
    type Hashing = BlakeTwo256;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Block = Block;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = ConstU64<250>;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = ();
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = ();
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

pub const ADMIN: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;
pub const CHARLIE: u64 = 4;
pub const OUTSIDER: u64 = 5;
/// The all-zero account.
pub const NULL: u64 = 0;

pub const MAX_SUPPLY: u128 = 1_000_000_000;
pub const PRE_MINT: u128 = 10_000_000;

/// Asset id of the ledger itself in the foreign-asset id space.
pub const NATIVE_ASSET: u32 = 0;
pub const FOREIGN_ASSET: u32 = 7;
/// Asset id the mock foreign-asset registry does not know.
pub const UNKNOWN_ASSET: u32 = 99;

pub const LOGIC_V1: H256 = H256::repeat_byte(0x01);
pub const LOGIC_V2: H256 = H256::repeat_byte(0x02);
/// Logic hash the mock upgrade hook refuses to bind.
pub const REJECTED_LOGIC: H256 = H256::repeat_byte(0xee);

parameter_types! {
    pub const LedgerPalletId: PalletId = PalletId(*b"gt/ledgr");
    pub const MaxSupply: u128 = MAX_SUPPLY;
    pub const NativeAssetId: u32 = NATIVE_ASSET;
}

/// Foreign-asset balances kept in raw storage so that they share the dispatch
/// transaction with the ledger.
pub struct ForeignAssets;

impl ForeignAssets {
    fn key(asset: u32, who: &u64) -> Vec<u8> {
        (b"ForeignAssets", asset, who).encode()
    }

    pub fn balance_of(asset: u32, who: &u64) -> u128 {
        unhashed::get_or_default(&Self::key(asset, who))
    }

    pub fn set_balance(asset: u32, who: &u64, amount: u128) {
        unhashed::put(&Self::key(asset, who), &amount);
    }
}

impl fungibles::Inspect<u64> for ForeignAssets {
    type AssetId = u32;
    type Balance = u128;

    fn total_issuance(_asset: u32) -> u128 {
        0
    }

    fn minimum_balance(_asset: u32) -> u128 {
        0
    }

    fn total_balance(asset: u32, who: &u64) -> u128 {
        Self::balance_of(asset, who)
    }

    fn balance(asset: u32, who: &u64) -> u128 {
        Self::balance_of(asset, who)
    }

    fn reducible_balance(
        asset: u32,
        who: &u64,
        _preservation: Preservation,
        _force: Fortitude,
    ) -> u128 {
        Self::balance_of(asset, who)
    }

    fn can_deposit(
        asset: u32,
        _who: &u64,
        _amount: u128,
        _provenance: Provenance,
    ) -> DepositConsequence {
        if Self::asset_exists(asset) {
            DepositConsequence::Success
        } else {
            DepositConsequence::UnknownAsset
        }
    }

    fn can_withdraw(asset: u32, who: &u64, amount: u128) -> WithdrawConsequence<u128> {
        if !Self::asset_exists(asset) {
            WithdrawConsequence::UnknownAsset
        } else if Self::balance_of(asset, who) < amount {
            WithdrawConsequence::BalanceLow
        } else {
            WithdrawConsequence::Success
        }
    }

    fn asset_exists(asset: u32) -> bool {
        asset != UNKNOWN_ASSET
    }
}

impl fungibles::Unbalanced<u64> for ForeignAssets {
    fn handle_dust(_dust: fungibles::Dust<u64, Self>) {}

    fn write_balance(
        asset: u32,
        who: &u64,
        amount: u128,
    ) -> Result<Option<u128>, DispatchError> {
        Self::set_balance(asset, who, amount);
        Ok(None)
    }

    fn set_total_issuance(_asset: u32, _amount: u128) {}
}

impl fungibles::Mutate<u64> for ForeignAssets {}

/// Delegates to the `frame_system` adapter, except for `REJECTED_LOGIC`.
pub struct MockLogicUpgrade;

impl LogicUpgrade<H256> for MockLogicUpgrade {
    fn bind(current: Option<&H256>, new: &H256) -> DispatchResult {
        if *new == REJECTED_LOGIC {
            return Err(DispatchError::Other("Logic rejected by upgrade hook"));
        }
        SystemCodeUpgrade::<Test>::bind(current, new)
    }
}

impl pallet_gated_ledger::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type DeployOrigin = frame_system::EnsureRoot<u64>;
    type MaxSupply = MaxSupply;
    type PalletId = LedgerPalletId;
    type MaxBatchSize = ConstU32<16>;
    type AssetId = u32;
    type Assets = ForeignAssets;
    type NativeAssetId = NativeAssetId;
    type LogicUpgrade = MockLogicUpgrade;
    type WeightInfo = ();
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper = ForeignAssetsHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct ForeignAssetsHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<u32, u64> for ForeignAssetsHelper {
    fn fund_foreign_asset(who: &u64, amount: u128) -> u32 {
        ForeignAssets::set_balance(FOREIGN_ASSET, who, amount);
        FOREIGN_ASSET
    }
}

/// Builds test externalities with a configurable ledger genesis.
pub struct ExtBuilder {
    implementation: Option<H256>,
    admin: Option<u64>,
    pre_mint: u128,
    launch_phase_active: bool,
}

impl Default for ExtBuilder {
    fn default() -> Self {
        Self {
            implementation: Some(LOGIC_V1),
            admin: Some(ADMIN),
            pre_mint: PRE_MINT,
            launch_phase_active: false,
        }
    }
}

impl ExtBuilder {
    pub fn launch_phase(mut self, active: bool) -> Self {
        self.launch_phase_active = active;
        self
    }

    pub fn pre_mint(mut self, amount: u128) -> Self {
        self.pre_mint = amount;
        self
    }

    /// Bound to logic but not yet initialized.
    pub fn uninitialized(mut self) -> Self {
        self.admin = None;
        self
    }

    /// Storage of a logic-only instance.
    pub fn logic_only(mut self) -> Self {
        self.implementation = None;
        self.admin = None;
        self
    }

    pub fn build(self) -> sp_io::TestExternalities {
        let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

        pallet_gated_ledger::GenesisConfig::<Test> {
            implementation: self.implementation,
            admin: self.admin,
            token_name: b"Test Token".to_vec(),
            token_symbol: b"TST".to_vec(),
            decimals: 18,
            pre_mint: self.pre_mint,
            launch_phase_active: self.launch_phase_active,
        }
        .assimilate_storage(&mut t)
        .unwrap();

        let mut ext = sp_io::TestExternalities::new(t);
        ext.execute_with(|| System::set_block_number(1));
        ext
    }
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    ExtBuilder::default().build()
}
