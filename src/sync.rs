//! Single-slot signalling primitives.
//!
//! Two distinct roles share the same underlying `embassy_sync::Signal`:
//!
//! - [`Notify`] - a one-shot event ("second elapsed", "press confirmed").
//!   Raising it twice before it is taken is observed once.
//! - [`Latest`] - an overwrite channel carrying the newest value of a
//!   reading. An unread value is replaced by the next publish.
//!
//! Both are safe to raise/publish from interrupt context: neither blocks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// One-shot event notification (level, not edge, for the consumer).
pub struct Notify {
    inner: Signal<CriticalSectionRawMutex, ()>,
}

impl Notify {
    pub const fn new() -> Self {
        Self {
            inner: Signal::new(),
        }
    }

    /// Raise the event. Never blocks.
    pub fn raise(&self) {
        self.inner.signal(());
    }

    /// Consume the event if it is pending.
    pub fn try_take(&self) -> bool {
        self.inner.try_take().is_some()
    }

    /// Whether the event is pending, without consuming it.
    pub fn is_raised(&self) -> bool {
        self.inner.signaled()
    }

    /// Wait until the event is raised, consuming it.
    pub async fn wait(&self) {
        self.inner.wait().await;
    }
}

impl Default for Notify {
    fn default() -> Self {
        Self::new()
    }
}

/// Latest-value overwrite channel with one-deep buffering.
pub struct Latest<T> {
    inner: Signal<CriticalSectionRawMutex, T>,
}

impl<T: Send> Latest<T> {
    pub const fn new() -> Self {
        Self {
            inner: Signal::new(),
        }
    }

    /// Publish a value, replacing any unread one.
    pub fn publish(&self, value: T) {
        self.inner.signal(value);
    }

    /// Take the newest unread value, if any.
    pub fn try_receive(&self) -> Option<T> {
        self.inner.try_take()
    }

    /// Wait for the next value.
    pub async fn receive(&self) -> T {
        self.inner.wait().await
    }
}

impl<T: Send> Default for Latest<T> {
    fn default() -> Self {
        Self::new()
    }
}
