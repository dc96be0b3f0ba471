//! Inbound seam between a transport runner and the application.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::RawMessage;

/// Receives one inbound message (or one completed album) from a transport.
///
/// Runners spawn a task per call, so implementations must tolerate concurrent use.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, raw: RawMessage) -> Result<()>;
}
