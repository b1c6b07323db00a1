//! Per-batch execution state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use punica_config::DEFAULT_INTER_CALL_DELAY_SECS;
use zeroize::Zeroizing;

/// Passwords already entered during one batch, keyed by address.
///
/// Values are wiped when they are replaced, cleared or dropped.
#[derive(Default)]
pub struct PasswordCache {
    entries: HashMap<String, Zeroizing<String>>,
}

impl PasswordCache {
    pub fn insert(&mut self, address: impl Into<String>, password: Zeroizing<String>) {
        self.entries.insert(address.into(), password);
    }

    pub fn get(&self, address: &str) -> Option<&str> {
        self.entries.get(address).map(|password| password.as_str())
    }

    pub fn contains(&self, address: &str) -> bool {
        self.entries.contains_key(address)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for PasswordCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

/// Stops a running batch before its next call.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// State threaded through planning and dispatch of one batch.
#[derive(Debug)]
pub struct ExecutionContext {
    /// Report failures with their full error detail.
    pub debug: bool,
    inter_call_delay: Option<Duration>,
    passwords: PasswordCache,
    cancel: CancelHandle,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self {
            debug: false,
            inter_call_delay: None,
            passwords: PasswordCache::default(),
            cancel: CancelHandle::default(),
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Overrides the delay configured by `sleepTime`.
    pub fn with_inter_call_delay(mut self, delay: Duration) -> Self {
        self.inter_call_delay = Some(delay);
        self
    }

    /// Delay after a state-changing call: the override, else `configured`,
    /// else six seconds.
    pub fn inter_call_delay(&self, configured: Option<Duration>) -> Duration {
        self.inter_call_delay
            .or(configured)
            .unwrap_or(Duration::from_secs(DEFAULT_INTER_CALL_DELAY_SECS))
    }

    pub fn passwords(&self) -> &PasswordCache {
        &self.passwords
    }

    pub fn passwords_mut(&mut self) -> &mut PasswordCache {
        &mut self.passwords
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drops everything cached for the batch.
    pub fn finish_batch(&mut self) {
        self.passwords.clear();
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}
