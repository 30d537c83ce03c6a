//! Broker transport seam

use async_trait::async_trait;

use super::error::TransportResult;

/// A serialized record ready for the broker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRecord {
    pub topic: String,
    pub payload: Vec<u8>,
    pub headers: Vec<(String, String)>,
}

impl OutboundRecord {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Where the broker stored an acknowledged record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub partition: i32,
    pub offset: i64,
}

/// Client that hands records to the broker and waits for acknowledgement
///
/// The publisher serializes all calls through its state lock, so `send`
/// and `close` never run concurrently against one transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Send one record and wait until it is acknowledged or fails
    async fn send(&self, record: OutboundRecord) -> TransportResult<Delivery>;

    /// Flush outstanding records and release the connection
    async fn close(&self) -> TransportResult<()>;
}
