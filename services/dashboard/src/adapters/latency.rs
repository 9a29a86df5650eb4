//! services/dashboard/src/adapters/latency.rs
//!
//! Implements the `LatencyService` port on the tokio timer, standing in for the
//! round trip a real account backend would cost.

use async_trait::async_trait;
use learning_dashboard_core::ports::{LatencyService, PortResult};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct TokioLatencyAdapter {
    delay: Duration,
}

impl TokioLatencyAdapter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl LatencyService for TokioLatencyAdapter {
    async fn wait(&self) -> PortResult<()> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}
