//! Catalogue of the singleton strategies.

/// One way of providing a shared instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    /// Built with the provider from a field expression.
    EagerField,
    /// Built with the provider by an explicit initializer block.
    EagerBlock,
    /// Unsynchronized check-then-construct.  Racy.
    NaiveLazy,
    /// Whole accessor under one lock, on every call.
    SynchronizedAccessor,
    /// Unlocked check, locked construction.  Racy.
    SynchronizedBlock,
    /// Acquire-load fast path, lock and re-check on the slow path.
    DoubleChecked,
    /// One-time initialization delegated to a nested `OnceLock` holder.
    Holder,
    /// Single-variant enum whose variant is the instance.
    Enumerated,
}

impl Strategy {
    /// Every strategy, in catalogue order.
    pub const ALL: [Strategy; 8] = [
        Strategy::EagerField,
        Strategy::EagerBlock,
        Strategy::NaiveLazy,
        Strategy::SynchronizedAccessor,
        Strategy::SynchronizedBlock,
        Strategy::DoubleChecked,
        Strategy::Holder,
        Strategy::Enumerated,
    ];

    /// Strategies that guarantee a single instance under concurrency.
    pub const SAFE: [Strategy; 6] = [
        Strategy::EagerField,
        Strategy::EagerBlock,
        Strategy::SynchronizedAccessor,
        Strategy::DoubleChecked,
        Strategy::Holder,
        Strategy::Enumerated,
    ];

    /// Strategies with a check-then-act race.
    pub const UNSAFE: [Strategy; 2] = [Strategy::NaiveLazy, Strategy::SynchronizedBlock];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::EagerField => "eager field",
            Strategy::EagerBlock => "eager block",
            Strategy::NaiveLazy => "naive lazy",
            Strategy::SynchronizedAccessor => "synchronized accessor",
            Strategy::SynchronizedBlock => "synchronized block",
            Strategy::DoubleChecked => "double-checked locking",
            Strategy::Holder => "lazy holder",
            Strategy::Enumerated => "enumerated",
        }
    }

    /// `true` if construction is deferred until the first accessor call.
    ///
    /// The enumerated strategy backs its variant with a lazily created state,
    /// but the variant itself is a compile-time constant, so it counts as
    /// eager.
    pub fn is_lazy(&self) -> bool {
        matches!(
            self,
            Strategy::NaiveLazy
                | Strategy::SynchronizedAccessor
                | Strategy::SynchronizedBlock
                | Strategy::DoubleChecked
                | Strategy::Holder
        )
    }

    /// `true` if every concurrent caller is guaranteed the same instance.
    pub fn is_thread_safe(&self) -> bool {
        !matches!(self, Strategy::NaiveLazy | Strategy::SynchronizedBlock)
    }

    /// `true` if the accessor takes a lock even after initialization.
    pub fn locks_on_hot_path(&self) -> bool {
        matches!(self, Strategy::SynchronizedAccessor)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
