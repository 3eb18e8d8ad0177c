//! Binding between ledger storage and the logic that operates on it.
//!
//! Storage lives in the pallet for the whole lifetime of the ledger. The logic is
//! identified by a code hash recorded in `Implementation`; swapping it goes through
//! a [`LogicUpgrade`] hook so the runtime decides what "binding new logic" means.
//! The hook runs inside the dispatch transaction: if it errors, the previous
//! binding stays in effect and nothing the hook wrote is kept.

use core::marker::PhantomData;
use sp_runtime::DispatchResult;

pub trait LogicUpgrade<Hash> {
    /// Bind storage to the logic identified by `new`.
    ///
    /// `current` is the binding being replaced, if any.
    fn bind(current: Option<&Hash>, new: &Hash) -> DispatchResult;
}

impl<Hash> LogicUpgrade<Hash> for () {
    fn bind(_current: Option<&Hash>, _new: &Hash) -> DispatchResult {
        Ok(())
    }
}

/// Authorizes a runtime code upgrade to `new` through `frame_system`.
///
/// The code itself is supplied later with `apply_authorized_upgrade`; storage
/// migrations run when it is enacted.
pub struct SystemCodeUpgrade<T>(PhantomData<T>);

impl<T: frame_system::Config> LogicUpgrade<T::Hash> for SystemCodeUpgrade<T> {
    fn bind(current: Option<&T::Hash>, new: &T::Hash) -> DispatchResult {
        log::info!(
            target: crate::LOG_TARGET,
            "Authorizing runtime upgrade {current:?} -> {new:?}"
        );
        frame_system::Pallet::<T>::do_authorize_upgrade(*new, true);
        Ok(())
    }
}
