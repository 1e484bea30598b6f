//! Domain types shared by every toolbridge crate.

mod artifact;
mod call;
mod envelope;
mod registry;

pub use artifact::{ArtifactMetadata, ImageFormat};
pub use call::{CallOptions, CallRequest};
pub use envelope::{BlockSummary, ContentBlock, EnvelopeSummary, ResultEnvelope};
pub use registry::{AttemptOutcome, LaunchSpec, RegistryAttempt, ServerRegistry};
