//! Semantic router.

use crate::agent::RoutingResult;
use crate::error::RouterError;
use crate::generator::{GeminiConfig, GeminiGenerator, TextGenerator};
use crate::prompt;
use futures_util::future::try_join_all;

/// Routes free-text requests to specialist agents with one model call each.
pub struct SemanticRouter<G> {
    generator: G,
}

impl SemanticRouter<GeminiGenerator> {
    /// Router over Gemini with the key from `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self, RouterError> {
        Ok(Self::new(GeminiGenerator::new(&GeminiConfig::from_env())?))
    }
}

impl<G: TextGenerator> SemanticRouter<G> {
    pub const fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Route one request.
    pub async fn route(&self, request: &str) -> Result<RoutingResult, RouterError> {
        let text = self.generator.generate(&prompt::build_prompt(request)).await?;

        match prompt::parse_response(&text) {
            Ok(result) => {
                tracing::debug!(
                    agent = %result.agent,
                    confidence = result.confidence,
                    "Request routed"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::error!(response = %text, error = %e, "Unparseable routing response");
                Err(e)
            }
        }
    }

    /// Route many requests concurrently. Fails if any single request fails.
    ///
    /// Results are in request order.
    pub async fn batch_route<S: AsRef<str>>(
        &self,
        requests: &[S],
    ) -> Result<Vec<RoutingResult>, RouterError> {
        try_join_all(requests.iter().map(|request| self.route(request.as_ref()))).await
    }
}
