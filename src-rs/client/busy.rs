use std::sync::atomic::{AtomicBool, Ordering};

/// Whatever shows the user that an analysis is running (spinner, disabled button)
pub trait BusyIndicator: Send + Sync {
    fn set_busy(&self, busy: bool);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBusy;

impl BusyIndicator for NoopBusy {
    fn set_busy(&self, _busy: bool) {}
}

/// Holds the busy state for one submission and releases it on drop,
/// whichever way the submission exits.
pub struct BusyGuard<'a> {
    flag: &'a AtomicBool,
    indicator: &'a dyn BusyIndicator,
}

impl<'a> BusyGuard<'a> {
    /// Returns `None` while another submission holds the flag.
    pub fn acquire(flag: &'a AtomicBool, indicator: &'a dyn BusyIndicator) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        indicator.set_busy(true);
        Some(Self { flag, indicator })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.indicator.set_busy(false);
        self.flag.store(false, Ordering::Release);
    }
}
