//! Generation relay for Courier
//!
//! Validates `/generate` payloads, resolves the credential and model for
//! each request, and forwards a single-turn chat completion to an
//! OpenAI-compatible provider such as OpenRouter.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
#[cfg(feature = "http")]
mod handler;
pub mod protocol;
pub mod provider;
mod relay;
#[cfg(test)]
mod test_support;
pub mod types;

pub use error::{RelayError, TransportKind};
#[cfg(feature = "http")]
pub use handler::relay_router;
pub use provider::Provider;
pub use relay::{Defaults, Relay};
pub use types::{GenerateResponse, GenerationRequest, GenerationResult};
