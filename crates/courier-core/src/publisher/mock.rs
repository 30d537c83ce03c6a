//! In-process transport for tests and dry runs
//!
//! Behaves like a broker that acknowledges, rejects, stalls or answers late,
//! and records everything it was handed.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{TransportError, TransportResult};
use super::transport::{Delivery, OutboundRecord, Transport};

/// How the mock answers a send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockMode {
    /// Acknowledge on `partition`; offsets count up from `offset`
    Ack { partition: i32, offset: i64 },
    /// Reject every send with a delivery error
    Fail(String),
    /// Never answer
    Hang,
    /// Acknowledge on partition 0 after a delay
    Delay(Duration),
}

impl Default for MockMode {
    fn default() -> Self {
        MockMode::Ack {
            partition: 0,
            offset: 0,
        }
    }
}

/// Configurable fake broker
#[derive(Debug, Default)]
pub struct MockTransport {
    mode: Mutex<MockMode>,
    next_offset: AtomicI64,
    sends: AtomicUsize,
    closes: AtomicUsize,
    fail_close: AtomicBool,
    records: Mutex<Vec<OutboundRecord>>,
}

impl MockTransport {
    /// Acknowledge every send on partition 0
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: MockMode) -> Self {
        let transport = Self::default();
        transport.set_mode(mode);
        transport
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_mode(MockMode::Fail(message.into()))
    }

    pub fn hanging() -> Self {
        Self::with_mode(MockMode::Hang)
    }

    pub fn delayed(delay: Duration) -> Self {
        Self::with_mode(MockMode::Delay(delay))
    }

    /// Switch behaviour for subsequent sends
    pub fn set_mode(&self, mode: MockMode) {
        if let MockMode::Ack { offset, .. } = mode {
            self.next_offset.store(offset, Ordering::SeqCst);
        }
        *self.mode.lock() = mode;
    }

    /// Make `close` report a flush failure
    pub fn fail_on_close(&self, fail: bool) {
        self.fail_close.store(fail, Ordering::SeqCst);
    }

    /// Number of sends that reached the transport
    pub fn send_count(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// Records handed to the transport, in arrival order
    pub fn records(&self) -> Vec<OutboundRecord> {
        self.records.lock().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, record: OutboundRecord) -> TransportResult<Delivery> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        self.records.lock().push(record);

        let mode = self.mode.lock().clone();
        match mode {
            MockMode::Ack { partition, .. } => Ok(Delivery {
                partition,
                offset: self.next_offset.fetch_add(1, Ordering::SeqCst),
            }),
            MockMode::Fail(message) => Err(TransportError::Delivery(message)),
            MockMode::Hang => std::future::pending().await,
            MockMode::Delay(delay) => {
                tokio::time::sleep(delay).await;
                Ok(Delivery {
                    partition: 0,
                    offset: self.next_offset.fetch_add(1, Ordering::SeqCst),
                })
            }
        }
    }

    async fn close(&self) -> TransportResult<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close.load(Ordering::SeqCst) {
            return Err(TransportError::Flush("mock flush failure".to_string()));
        }
        Ok(())
    }
}
