//! Single-threaded behaviour shared by every strategy.
//!
//! Sequential calls must always return the same identity and must never run
//! the initializer a second time, whatever the number of calls.

use std::sync::Arc;

use proptest::prelude::*;
use sl_core::{ConstructionProbe, InstanceId, SingletonProvider, Strategy};
use sl_strategies::{
    DoubleChecked, EagerBlock, EagerField, Enumerated, Holder, NaiveLazy, SynchronizedAccessor,
    SynchronizedBlock,
};

/// Call `provider` `calls` times and return every identity seen.
fn identities<P: SingletonProvider>(provider: &P, calls: usize) -> Vec<InstanceId> {
    (0..calls).map(|_| provider.observe()).collect()
}

fn assert_single<P: SingletonProvider>(provider: &P, probe: &ConstructionProbe, calls: usize) {
    let ids = identities(provider, calls);
    assert!(
        ids.windows(2).all(|w| w[0] == w[1]),
        "{}: identities differ across sequential calls",
        provider.strategy()
    );
    assert_eq!(
        probe.constructions(),
        1,
        "{}: initializer ran more than once",
        provider.strategy()
    );
}

fn probed() -> (Arc<ConstructionProbe>, impl Fn() -> sl_core::ProbeInstance + Sync) {
    let probe = Arc::new(ConstructionProbe::new());
    let init = {
        let probe = probe.clone();
        move || probe.construct()
    };
    (probe, init)
}

#[test]
fn lazy_strategies_start_uninitialized() {
    let (probe, init) = probed();
    let naive = NaiveLazy::new(init);
    assert!(!naive.is_initialized());
    assert_eq!(probe.constructions(), 0);

    let (probe, init) = probed();
    let locked = SynchronizedAccessor::new(init);
    assert!(!locked.is_initialized());
    assert_eq!(probe.constructions(), 0);

    let (probe, init) = probed();
    let block = SynchronizedBlock::new(init);
    assert!(!block.is_initialized());
    assert_eq!(probe.constructions(), 0);

    let (probe, init) = probed();
    let dcl = DoubleChecked::new(init);
    assert!(!dcl.is_initialized());
    assert_eq!(probe.constructions(), 0);

    let (probe, init) = probed();
    let holder = Holder::new(init);
    assert!(!holder.is_initialized());
    assert_eq!(probe.constructions(), 0);

    for provider_strategy in [
        naive.strategy(),
        locked.strategy(),
        block.strategy(),
        dcl.strategy(),
        holder.strategy(),
    ] {
        assert!(provider_strategy.is_lazy());
    }
}

#[test]
fn eager_strategies_are_built_at_setup() {
    let probe = ConstructionProbe::new();
    let field = EagerField::build(|| probe.construct());
    assert_eq!(probe.constructions(), 1);
    assert!(field.is_initialized());

    let probe = ConstructionProbe::new();
    let block = EagerBlock::with_initializer(|| probe.construct());
    assert_eq!(probe.constructions(), 1);
    assert!(block.is_initialized());
}

#[test]
fn enumerated_is_canonical_across_calls() {
    let ids = identities(&Enumerated::Instance, 100);
    assert!(ids.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(Enumerated::Instance.strategy(), Strategy::Enumerated);
    assert!(Enumerated::constructions() <= 1);
}

proptest! {
    #[test]
    fn sequential_calls_share_one_identity(calls in 1usize..256) {
        let (probe, init) = probed();
        assert_single(&NaiveLazy::new(init), &probe, calls);

        let (probe, init) = probed();
        assert_single(&SynchronizedAccessor::new(init), &probe, calls);

        let (probe, init) = probed();
        assert_single(&SynchronizedBlock::new(init), &probe, calls);

        let (probe, init) = probed();
        assert_single(&DoubleChecked::new(init), &probe, calls);

        let (probe, init) = probed();
        assert_single(&Holder::new(init), &probe, calls);

        let probe = ConstructionProbe::new();
        assert_single(&EagerField::build(|| probe.construct()), &probe, calls);

        let probe = ConstructionProbe::new();
        assert_single(&EagerBlock::with_initializer(|| probe.construct()), &probe, calls);
    }
}
