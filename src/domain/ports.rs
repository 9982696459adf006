use crate::domain::model::GenerationRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// The only true I/O boundary: a text-generation capability. Returns
/// the raw text payload; the estimation client owns parsing and the
/// empty/malformed fault mapping.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest, credential: &str) -> Result<String>;
}

/// Sink for exported estimate documents. `write_file` returns the
/// full path the sink actually wrote, so callers never reconstruct it.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Access to service tuning and output placement.
pub trait ServiceConfig: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn model(&self) -> &str;
    fn temperature(&self) -> f32;
    fn output_path(&self) -> &str;
}
