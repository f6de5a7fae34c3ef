use crate::domain::model::{PlotFields, UpstreamRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// An upstream geodata service: how to ask it about a plot and how to read its answer.
pub trait PlotSource: Send + Sync {
    /// Tag written into `PlotResult::source`.
    fn tag(&self) -> &'static str;

    fn build_request(&self, cadastral_number: &str) -> Result<UpstreamRequest>;

    fn extract(&self, document: &serde_json::Value) -> Result<PlotFields>;
}

#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Performs exactly one GET and decodes the body as JSON.
    async fn fetch_json(&self, request: &UpstreamRequest) -> Result<serde_json::Value>;
}
