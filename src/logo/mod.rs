//! Logo generation module.
//!
//! Resolves style templates to service URLs and runs each request through
//! the primary renderer, then the fallback maker API, delivering exactly one
//! outcome to the chat.

mod error;
mod fallback;
mod orchestrator;
mod renderer;
mod request;
mod variant;

pub use error::{DeliveryError, FallbackError, PrimaryError};
pub use fallback::{maker_url, validate_response, FallbackApi, MakerApiClient, MakerQuery};
pub use orchestrator::LogoOrchestrator;
pub use renderer::{HttpRenderer, LogoRenderer, RenderedLogo};
pub use request::{
    DEFAULT_SECONDARY_TEXT, FailureReporting, GenerationResult, LogoRequest, SourceAttempt,
    TierFailures,
};
pub use variant::{ServiceEndpoint, ServiceVariant};
