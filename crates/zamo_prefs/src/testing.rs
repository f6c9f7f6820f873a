//! Fault injection for tests of code that sits on top of a store.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Result, StoreError};
use crate::store::{PreferenceStore, SharedStore};

/// Wraps another store and lets a test break or slow it down.
pub struct FlakyStore {
    inner: SharedStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    read_delay_ms: AtomicU64,
    write_delay_ms: AtomicU64,
}

impl FlakyStore {
    pub fn new(inner: SharedStore) -> Self {
        Self {
            inner,
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            read_delay_ms: AtomicU64::new(0),
            write_delay_ms: AtomicU64::new(0),
        }
    }

    pub fn shared(inner: SharedStore) -> Arc<Self> {
        Arc::new(Self::new(inner))
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn delay_reads(&self, delay: Duration) {
        self.read_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn delay_writes(&self, delay: Duration) {
        self.write_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    async fn pause(delay_ms: &AtomicU64) {
        let ms = delay_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    fn check(flag: &AtomicBool, op: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("injected {op} failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Self::pause(&self.read_delay_ms).await;
        Self::check(&self.fail_reads, "read")?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        Self::pause(&self.write_delay_ms).await;
        Self::check(&self.fail_writes, "write")?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        Self::pause(&self.write_delay_ms).await;
        Self::check(&self.fail_writes, "write")?;
        self.inner.remove(key).await
    }

    async fn clear(&self) -> Result<()> {
        Self::pause(&self.write_delay_ms).await;
        Self::check(&self.fail_writes, "write")?;
        self.inner.clear().await
    }
}
