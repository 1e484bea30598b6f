//! Semantic intent router.
//!
//! Picks the specialist agent for a free-text request with a single
//! prompt-and-parse call against a text-generation endpoint. Independent of
//! the MCP bridge.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod agent;
mod error;
mod generator;
mod prompt;
mod router;

pub use agent::{AgentType, BatchSummary, ConfidenceBand, RoutingResult};
pub use error::RouterError;
pub use generator::{
    API_KEY_ENV_VAR, DEFAULT_MODEL, GeminiConfig, GeminiGenerator, TextGenerator,
};
pub use prompt::{build_prompt, parse_response};
pub use router::SemanticRouter;
