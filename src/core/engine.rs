use crate::core::client::EstimationClient;
use crate::core::normalize::normalize;
use crate::core::prompt::build_request;
use crate::core::render::build_export_archive;
use crate::domain::model::{NormalizedEstimate, ProjectDetails};
use crate::domain::ports::{Storage, TextGenerator};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

const EXPORT_FILENAME: &str = "rab_estimate.zip";

/// Drives one estimation run: validate → build request → call the
/// generation service → normalize. One linear invocation, nothing in
/// flight concurrently.
pub struct EstimateEngine<G: TextGenerator, S: Storage> {
    client: EstimationClient<G>,
    storage: S,
}

impl<G: TextGenerator, S: Storage> EstimateEngine<G, S> {
    pub fn new(client: EstimationClient<G>, storage: S) -> Self {
        Self { client, storage }
    }

    pub async fn run(&self, details: &ProjectDetails) -> Result<NormalizedEstimate> {
        details.validate()?;

        tracing::info!("Building estimation request for '{}'", details.project_name);
        let request = build_request(details);

        tracing::info!("Requesting RAB estimate from the generation service");
        let result = self.client.estimate(&request).await?;
        tracing::info!(
            "Received estimate: {} categories, grand total {}",
            result.categories.len(),
            result.grand_total
        );

        Ok(normalize(&result))
    }

    /// Writes the export archive and returns the path the storage
    /// sink wrote it to.
    pub async fn export(
        &self,
        estimate: &NormalizedEstimate,
        project_name: &str,
    ) -> Result<String> {
        let archive = build_export_archive(estimate, project_name)?;
        tracing::debug!("Writing export archive ({} bytes)", archive.len());
        self.storage.write_file(EXPORT_FILENAME, &archive).await
    }
}
