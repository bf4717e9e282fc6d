//! # Gateway Providers
//!
//! Summarization adapters for the site summary gateway:
//! - OpenAI chat completions
//! - Anthropic Claude messages
//! - Perplexity (OpenAI-compatible)
//! - Google Gemini
//! - Cohere generate
//!
//! Each adapter owns its endpoint, default model and wire format. The
//! [`ProviderRegistry`] maps service ids to adapters.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
mod http;
pub mod registry;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "anthropic")]
pub mod anthropic;

#[cfg(feature = "perplexity")]
pub mod perplexity;

#[cfg(feature = "google")]
pub mod google;

#[cfg(feature = "cohere")]
pub mod cohere;

// Re-export main types
pub use config::{ProviderConfig, DEFAULT_TIMEOUT};
pub use registry::ProviderRegistry;

#[cfg(feature = "openai")]
pub use openai::OpenAIProvider;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicProvider;

#[cfg(feature = "perplexity")]
pub use perplexity::PerplexityProvider;

#[cfg(feature = "google")]
pub use google::GoogleProvider;

#[cfg(feature = "cohere")]
pub use cohere::CohereProvider;
