//! Crop/soil profile recommendations from the completion provider

use std::sync::Arc;

use shared::{build_prompt, parse_recommendation, RecommendationOutcome, RecommendationRequest};

use crate::error::{AppError, AppResult};
use crate::external::CompletionProvider;

#[derive(Clone)]
pub struct RecommendationService {
    completion: Option<Arc<dyn CompletionProvider>>,
}

impl RecommendationService {
    pub fn new(completion: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self { completion }
    }

    /// Ask the provider for a structured recommendation.
    ///
    /// The request is validated before any network call. A reply that is
    /// not valid JSON still succeeds as [`RecommendationOutcome::RawFallback`].
    pub async fn recommend(&self, request: &RecommendationRequest) -> AppResult<RecommendationOutcome> {
        request.validate()?;

        let provider = self.completion.as_ref().ok_or_else(|| {
            AppError::Configuration("completion provider credentials".to_string())
        })?;

        let prompt = build_prompt(request);
        let content = provider.complete(&prompt).await.map_err(|e| {
            tracing::error!(error = %e, crop_type = %request.crop_type, "Recommendation request failed");
            AppError::completion(e)
        })?;

        let outcome = parse_recommendation(&content);
        if !outcome.is_structured() {
            tracing::warn!(
                crop_type = %request.crop_type,
                "Recommendation reply was not valid JSON; returning raw text"
            );
        }

        Ok(outcome)
    }
}
