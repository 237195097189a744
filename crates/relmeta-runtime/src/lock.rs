///
/// LockMode
///
/// Ordered by strength; statement caching keys off this, and the `Upgrade`
/// threshold decides whether profile-keyed caching is still allowed.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum LockMode {
    #[default]
    None,
    Read,
    Optimistic,
    OptimisticForceIncrement,
    Upgrade,
    UpgradeNowait,
    UpgradeSkipLocked,
    PessimisticForceIncrement,
    Write,
}

impl LockMode {
    pub const ALL: [Self; 9] = [
        Self::None,
        Self::Read,
        Self::Optimistic,
        Self::OptimisticForceIncrement,
        Self::Upgrade,
        Self::UpgradeNowait,
        Self::UpgradeSkipLocked,
        Self::PessimisticForceIncrement,
        Self::Write,
    ];

    /// Dense index for per-mode statement caches.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn is_pessimistic(self) -> bool {
        self >= Self::Upgrade
    }
}

///
/// LockTimeout
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LockTimeout {
    #[default]
    Default,
    NoWait,
    SkipLocked,
    /// Block until the lock is granted, however long that takes.
    WaitForever,
    Millis(u32),
}

///
/// LockOptions
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LockOptions {
    pub mode: LockMode,
    pub timeout: LockTimeout,
}

impl LockOptions {
    #[must_use]
    pub const fn read() -> Self {
        Self {
            mode: LockMode::Read,
            timeout: LockTimeout::Default,
        }
    }

    #[must_use]
    pub const fn of(mode: LockMode) -> Self {
        Self {
            mode,
            timeout: LockTimeout::Default,
        }
    }

    /// An indefinite wait makes a statement uncacheable.
    #[must_use]
    pub const fn wait_forever(&self) -> bool {
        matches!(self.timeout, LockTimeout::WaitForever)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_modes_order_by_strength() {
        assert!(LockMode::None < LockMode::Read);
        assert!(LockMode::Read < LockMode::Upgrade);
        assert!(LockMode::Upgrade < LockMode::Write);
        assert!(!LockMode::Optimistic.is_pessimistic());
        assert!(LockMode::UpgradeNowait.is_pessimistic());
    }

    #[test]
    fn indexes_are_dense_and_stable() {
        for (position, mode) in LockMode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), position);
        }
    }
}
