use crate::core::prompt::GenerationRequest;
use crate::domain::model::RabResult;
use crate::domain::ports::TextGenerator;
use crate::utils::error::{EstimateError, Result};

/// Access token for the generation service. Lives only for the
/// invocation it was resolved for; redacted from debug output.
#[derive(Clone)]
pub struct ApiCredential(String);

impl ApiCredential {
    /// Resolves the credential: explicit user input wins, then the
    /// `GEMINI_API_KEY` environment variable. Blank values count as
    /// absent.
    pub fn resolve(user_supplied: Option<&str>) -> Option<Self> {
        let from_user = user_supplied
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let from_env = || {
            std::env::var("GEMINI_API_KEY")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        from_user.or_else(from_env).map(ApiCredential)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiCredential(<redacted>)")
    }
}

/// Issues a single generation call and parses the text payload into a
/// [`RabResult`]. No retries; every fault is terminal for the attempt.
pub struct EstimationClient<G: TextGenerator> {
    generator: G,
    credential: Option<ApiCredential>,
}

impl<G: TextGenerator> EstimationClient<G> {
    pub fn new(generator: G, credential: Option<ApiCredential>) -> Self {
        Self {
            generator,
            credential,
        }
    }

    pub async fn estimate(&self, request: &GenerationRequest) -> Result<RabResult> {
        // Checked before any transport activity.
        let credential = self
            .credential
            .as_ref()
            .ok_or(EstimateError::CredentialMissing)?;

        tracing::debug!("Sending generation request ({} chars)", request.prompt.len());
        let text = self.generator.generate(request, credential.as_str()).await?;

        if text.trim().is_empty() {
            return Err(EstimateError::EmptyResponse);
        }

        let result: RabResult = serde_json::from_str(&text)?;
        tracing::debug!(
            "Parsed estimate with {} categories, grand total {}",
            result.categories.len(),
            result.grand_total
        );
        Ok(result)
    }
}
